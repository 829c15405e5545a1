use std::error::Error;
use std::fmt;
use std::sync::Arc;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::builder::Draft;
use crate::cause::Cause;
use crate::codec;
use crate::kind::Kind;
use crate::limits::DecodeLimits;

/// Free-form structured details attached to a problem
pub type Metadata = serde_json::Map<String, Value>;

/// Canonical structured error type
///
/// A problem carries a [`Kind`] for programmatic handling, a short title,
/// a message, an optional cause and optional metadata. It is immutable once
/// built and lives behind a shared pointer: clones refer to the same error,
/// while every construction produces a new one, even from identical fields.
///
/// On the wire a problem is an object:
///
/// ```json
/// {"kind": "not found", "title": "...", "message": "...", "cause": ..., "metadata": {...}}
/// ```
///
/// `cause` and `metadata` are omitted when absent (or, for metadata, empty).
/// Decoding always yields a cause: a missing one comes back as an empty
/// [`PlainError`](crate::PlainError).
#[derive(Debug, Clone)]
pub struct Problem {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    kind: Kind,
    title: String,
    message: String,
    cause: Option<Cause>,
    metadata: Option<Metadata>,
}

impl Problem {
    /// Create a new problem
    pub fn new(
        kind: Kind,
        title: impl Into<String>,
        message: impl Into<String>,
        cause: Option<Cause>,
        metadata: Option<Metadata>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                kind,
                title: title.into(),
                message: message.into(),
                cause,
                metadata,
            }),
        }
    }

    /// Start building a problem incrementally, see [`Draft`]
    pub fn draft(kind: Kind, title: impl Into<String>) -> Draft {
        Draft::new(kind, title)
    }

    pub fn kind(&self) -> Kind {
        self.inner.kind
    }

    pub fn title(&self) -> &str {
        &self.inner.title
    }

    pub fn message(&self) -> &str {
        &self.inner.message
    }

    /// The cause of the problem, if any
    pub fn cause(&self) -> Option<&Cause> {
        self.inner.cause.as_ref()
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        self.inner.metadata.as_ref()
    }

    /// Whether the problem falls under the external category, see [`Kind`]
    pub fn is_external(&self) -> bool {
        self.inner.kind.is_external()
    }

    /// Whether the problem falls under the internal category, see [`Kind`]
    pub fn is_internal(&self) -> bool {
        self.inner.kind.is_internal()
    }

    /// Whether both handles refer to the same error
    pub fn ptr_eq(&self, other: &Problem) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.message)?;
        if let Some(cause) = &self.inner.cause {
            write!(f, ": {}", cause)?;
        }
        Ok(())
    }
}

impl Error for Problem {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.inner
            .cause
            .as_ref()
            .map(|cause| cause.as_error() as &(dyn Error + 'static))
    }
}

impl Serialize for Problem {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let metadata = self.inner.metadata.as_ref().filter(|m| !m.is_empty());
        let len = 3 + usize::from(self.inner.cause.is_some()) + usize::from(metadata.is_some());

        let mut state = serializer.serialize_struct("Problem", len)?;
        state.serialize_field("kind", &self.inner.kind)?;
        state.serialize_field("title", &self.inner.title)?;
        state.serialize_field("message", &self.inner.message)?;
        match &self.inner.cause {
            Some(cause) => state.serialize_field("cause", cause)?,
            None => state.skip_field("cause")?,
        }
        match metadata {
            Some(metadata) => state.serialize_field("metadata", metadata)?,
            None => state.skip_field("metadata")?,
        }
        state.end()
    }
}

impl<'de> Deserialize<'de> for Problem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        codec::problem_from_value(&value, &DecodeLimits::default(), 0)
            .map_err(serde::de::Error::custom)
    }
}
