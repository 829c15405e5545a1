//! Incremental construction of problems
//!
//! Drafts are plain values: every setter consumes the draft and returns the
//! updated one, and cloning a draft lets two problems branch from the same
//! starting point. Nothing is shared between drafts, so later changes to one
//! never show up in another.

use std::fmt;

use crate::cause::Cause;
use crate::kind::Kind;
use crate::problem::{Metadata, Problem};
use crate::template;

/// A problem under construction, see [`Problem::draft`]
///
/// ```
/// use problem::{Kind, Problem};
///
/// let base = Problem::draft(Kind::NotFound, "Not Found");
/// let user = base.clone().with_message("user missing").make();
/// let team = base.with_message("team missing").make();
/// assert_eq!(user.to_string(), "user missing");
/// assert_eq!(team.to_string(), "team missing");
/// ```
#[derive(Debug, Clone)]
pub struct Draft {
    kind: Kind,
    title: String,
    message: String,
    cause: Option<Cause>,
    metadata: Option<Metadata>,
}

impl Draft {
    pub fn new(kind: Kind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: String::new(),
            cause: None,
            metadata: None,
        }
    }

    /// Replace the message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Replace the cause
    pub fn with_cause(mut self, cause: impl Into<Cause>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Replace the metadata
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Switch to a templated message, filled in by [`FormatDraft::make`]
    pub fn with_format(self, template: impl Into<String>) -> FormatDraft {
        FormatDraft {
            kind: self.kind,
            title: self.title,
            template: template.into(),
            cause: self.cause,
            metadata: self.metadata,
        }
    }

    /// Build a new problem from the current fields
    pub fn make(&self) -> Problem {
        Problem::new(
            self.kind,
            self.title.clone(),
            self.message.clone(),
            self.cause.clone(),
            self.metadata.clone(),
        )
    }
}

/// A problem whose message is rendered from a template at build time
///
/// See [`crate::template`] for the placeholder syntax.
#[derive(Debug, Clone)]
pub struct FormatDraft {
    kind: Kind,
    title: String,
    template: String,
    cause: Option<Cause>,
    metadata: Option<Metadata>,
}

impl FormatDraft {
    /// Replace the cause
    pub fn with_cause(mut self, cause: impl Into<Cause>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Replace the metadata
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Build a new problem, rendering the template with `args`
    pub fn make(&self, args: &[&dyn fmt::Display]) -> Problem {
        Problem::new(
            self.kind,
            self.title.clone(),
            template::render(&self.template, args),
            self.cause.clone(),
            self.metadata.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cause::{wrap, PlainError};
    use serde_json::json;

    #[test]
    fn test_last_write_wins() {
        let problem = Problem::draft(Kind::Conflict, "Conflict")
            .with_message("first")
            .with_message("second")
            .with_cause(wrap(PlainError::new("a")))
            .with_cause(wrap(PlainError::new("b")))
            .make();
        assert_eq!(problem.message(), "second");
        assert_eq!(problem.to_string(), "second: b");
    }

    #[test]
    fn test_branching_drafts_are_independent() {
        let base = Problem::draft(Kind::Malformed, "Bad Request").with_message("base");
        let with_cause = base.clone().with_cause(wrap(PlainError::new("parse")));
        let plain = base.make();
        let caused = with_cause.make();

        assert!(plain.cause().is_none());
        assert_eq!(caused.to_string(), "base: parse");
    }

    #[test]
    fn test_each_make_is_a_new_problem() {
        let draft = Problem::draft(Kind::Timeout, "Timeout");
        assert!(!draft.make().ptr_eq(&draft.make()));
    }

    #[test]
    fn test_format_defers_rendering() {
        let mut metadata = Metadata::new();
        metadata.insert("attempts".to_string(), json!(3));
        let draft = Problem::draft(Kind::TooManyRequests, "Slow Down")
            .with_metadata(metadata)
            .with_format("retry in {} seconds");

        let problem = draft.make(&[&30]);
        assert_eq!(problem.message(), "retry in 30 seconds");
        assert_eq!(problem.title(), "Slow Down");
        assert_eq!(problem.metadata().and_then(|m| m.get("attempts")), Some(&json!(3)));

        let other = draft.make(&[&5]);
        assert_eq!(other.message(), "retry in 5 seconds");
    }

    #[test]
    fn test_format_keeps_cause_from_draft() {
        let problem = Problem::draft(Kind::BadGateway, "Upstream")
            .with_cause(wrap(PlainError::new("reset")))
            .with_format("call to {} failed")
            .make(&[&"billing"]);
        assert_eq!(problem.to_string(), "call to billing failed: reset");
    }

    #[test]
    fn test_format_mismatch_is_inert() {
        let problem = Problem::draft(Kind::UnexpectedError, "Oops")
            .with_format("{} and {}")
            .make(&[&1]);
        assert_eq!(problem.message(), "1 and {!missing}");
    }
}
