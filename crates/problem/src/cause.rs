//! Cause wrapper
//!
//! A [`Cause`] holds one error of any type and gives it a wire shape. The
//! set of error types a chain may contain is open, so serialization probes
//! what the held value can do instead of relying on its static type:
//!
//! 1. an aggregate ([`MultiError`]) becomes an array, each constituent
//!    wrapped in turn;
//! 2. a natively serializable error ([`Problem`], or anything registered
//!    through [`Cause::encodable`]) serializes itself;
//! 3. anything else becomes a string holding its display form.
//!
//! Decoding is closed: a cause node is read as a problem object, else as a
//! string (giving a [`PlainError`]), else it fails with
//! [`CodecError::Unrecognized`]. Foreign error types therefore come back as
//! their rendered message only.

use std::any::Any;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

use crate::codec;
use crate::limits::DecodeLimits;
use crate::multi::MultiError;
use crate::problem::Problem;

#[cfg(doc)]
use crate::error::CodecError;

/// Message-only error, produced when a cause decodes from a plain string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct PlainError {
    message: String,
}

impl PlainError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors that know how to produce their own wire form
trait Encodable: Error + Send + Sync + 'static {
    fn to_wire(&self) -> serde_json::Result<Value>;

    fn as_error(&self) -> &(dyn Error + Send + Sync + 'static);
}

impl<T> Encodable for T
where
    T: Error + Serialize + Send + Sync + 'static,
{
    fn to_wire(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    fn as_error(&self) -> &(dyn Error + Send + Sync + 'static) {
        self
    }
}

#[derive(Clone)]
enum Held {
    Error(Arc<dyn Error + Send + Sync>),
    Encodable(Arc<dyn Encodable>),
}

/// What the held value can do, in probe priority order
enum Capability<'a> {
    Aggregate(&'a MultiError),
    Problem(&'a Problem),
    Encodable(&'a dyn Encodable),
    Display(&'a (dyn Error + Send + Sync + 'static)),
}

/// Serialization adapter around a single error value
///
/// The held value is shared, not owned: cloning a `Cause` or building one
/// from an `Arc` keeps pointing at the same error.
#[derive(Clone)]
pub struct Cause {
    held: Held,
}

/// Wrap an error so it can travel on the wire
pub fn wrap<E>(err: E) -> Cause
where
    E: Error + Send + Sync + 'static,
{
    Cause::new(err)
}

impl Cause {
    /// Wrap an error value
    ///
    /// Wrapping a `Cause` reuses the value it already holds.
    pub fn new<E>(err: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::from(Box::new(err) as Box<dyn Error + Send + Sync>)
    }

    /// Wrap a foreign error that serializes itself
    ///
    /// Its wire form is whatever its `Serialize` impl produces. Decoding
    /// still only recovers problems and plain messages. Like [`Cause::new`],
    /// passing a `Cause` reuses the value it already holds.
    pub fn encodable<E>(err: E) -> Self
    where
        E: Error + Serialize + Send + Sync + 'static,
    {
        if let Some(cause) = (&err as &dyn Any).downcast_ref::<Cause>() {
            return cause.clone();
        }

        Self {
            held: Held::Encodable(Arc::new(err)),
        }
    }

    /// The wrapped error
    pub fn as_error(&self) -> &(dyn Error + Send + Sync + 'static) {
        match &self.held {
            Held::Error(err) => err.as_ref(),
            Held::Encodable(err) => err.as_error(),
        }
    }

    /// Borrow the wrapped error as a concrete type
    pub fn downcast_ref<T>(&self) -> Option<&T>
    where
        T: Error + 'static,
    {
        self.as_error().downcast_ref::<T>()
    }

    /// The wrapped error, if it is a problem
    pub fn as_problem(&self) -> Option<&Problem> {
        self.downcast_ref::<Problem>()
    }

    /// The wrapped error, if it is an aggregate
    pub fn as_multi(&self) -> Option<&MultiError> {
        self.downcast_ref::<MultiError>()
    }

    fn capability(&self) -> Capability<'_> {
        let err = self.as_error();
        if let Some(multi) = err.downcast_ref::<MultiError>() {
            return Capability::Aggregate(multi);
        }

        match &self.held {
            Held::Encodable(encodable) => Capability::Encodable(encodable.as_ref()),
            Held::Error(_) => match err.downcast_ref::<Problem>() {
                Some(problem) => Capability::Problem(problem),
                None => Capability::Display(err),
            },
        }
    }
}

impl From<Box<dyn Error + Send + Sync>> for Cause {
    fn from(err: Box<dyn Error + Send + Sync>) -> Self {
        match err.downcast::<Cause>() {
            Ok(cause) => *cause,
            Err(err) => Self {
                held: Held::Error(Arc::from(err)),
            },
        }
    }
}

impl From<Arc<dyn Error + Send + Sync>> for Cause {
    fn from(err: Arc<dyn Error + Send + Sync>) -> Self {
        match err.downcast_ref::<Cause>() {
            Some(cause) => cause.clone(),
            None => Self {
                held: Held::Error(err),
            },
        }
    }
}

impl From<Problem> for Cause {
    fn from(problem: Problem) -> Self {
        Self {
            held: Held::Error(Arc::new(problem)),
        }
    }
}

impl From<MultiError> for Cause {
    fn from(multi: MultiError) -> Self {
        Self {
            held: Held::Error(Arc::new(multi)),
        }
    }
}

impl From<PlainError> for Cause {
    fn from(err: PlainError) -> Self {
        Self {
            held: Held::Error(Arc::new(err)),
        }
    }
}

impl fmt::Debug for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cause").field(&self.as_error()).finish()
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_error(), f)
    }
}

impl Error for Cause {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.as_error())
    }
}

impl Serialize for Cause {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.capability() {
            Capability::Aggregate(multi) => serializer.collect_seq(multi.iter()),
            Capability::Problem(problem) => problem.serialize(serializer),
            Capability::Encodable(encodable) => encodable
                .to_wire()
                .map_err(<S::Error as serde::ser::Error>::custom)?
                .serialize(serializer),
            Capability::Display(err) => serializer.collect_str(err),
        }
    }
}

impl<'de> Deserialize<'de> for Cause {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        codec::cause_from_value(&value, &DecodeLimits::default(), 0)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::Kind;
    use crate::multi::join;
    use serde_json::json;

    #[derive(Debug, Error)]
    #[error("disk on fire")]
    struct DiskError;

    #[derive(Debug, Error, Serialize)]
    #[error("quota exceeded for {tenant}")]
    struct QuotaError {
        tenant: String,
        limit: u32,
    }

    #[test]
    fn test_foreign_error_encodes_as_display_string() {
        let cause = wrap(DiskError);
        assert_eq!(serde_json::to_value(&cause).unwrap(), json!("disk on fire"));
    }

    #[test]
    fn test_problem_encodes_as_object() {
        let cause = Cause::from(Problem::new(Kind::NotFound, "Missing", "no row", None, None));
        assert_eq!(
            serde_json::to_value(&cause).unwrap(),
            json!({"kind": "not found", "title": "Missing", "message": "no row"})
        );
    }

    #[test]
    fn test_encodable_foreign_error_uses_its_own_shape() {
        let cause = Cause::encodable(QuotaError {
            tenant: "acme".to_string(),
            limit: 3,
        });
        assert_eq!(
            serde_json::to_value(&cause).unwrap(),
            json!({"tenant": "acme", "limit": 3})
        );
        assert_eq!(cause.to_string(), "quota exceeded for acme");
    }

    #[test]
    fn test_aggregate_wins_over_native_serialization() {
        let multi = join([Some(wrap(DiskError)), Some(wrap(PlainError::new("second")))])
            .expect("two causes");
        let cause = Cause::encodable(multi);
        assert_eq!(
            serde_json::to_value(&cause).unwrap(),
            json!(["disk on fire", "second"])
        );
    }

    #[test]
    fn test_wrapping_a_cause_does_not_nest() {
        let inner = wrap(DiskError);
        let outer = wrap(inner.clone());
        assert!(outer.downcast_ref::<DiskError>().is_some());
        assert!(outer.downcast_ref::<Cause>().is_none());
    }

    #[test]
    fn test_encodable_cause_does_not_nest() {
        let problem = Problem::new(Kind::Conflict, "Conflict", "taken", None, None);
        let cause = Cause::encodable(Cause::from(problem.clone()));
        assert!(cause.as_problem().is_some_and(|p| p.ptr_eq(&problem)));
        assert!(cause.downcast_ref::<Cause>().is_none());

        let multi = join([Some(wrap(DiskError))]).expect("one cause");
        let cause = Cause::encodable(Cause::from(multi));
        assert_eq!(cause.as_multi().map(MultiError::len), Some(1));
        assert_eq!(serde_json::to_value(&cause).unwrap(), json!(["disk on fire"]));
    }

    #[test]
    fn test_shared_value_is_not_copied() {
        let shared: Arc<dyn Error + Send + Sync> = Arc::new(DiskError);
        let a = Cause::from(shared.clone());
        let b = a.clone();
        assert!(std::ptr::addr_eq(a.as_error(), shared.as_ref()));
        assert!(std::ptr::addr_eq(b.as_error(), shared.as_ref()));
    }

    #[test]
    fn test_display_and_source_are_transparent() {
        let cause = wrap(DiskError);
        assert_eq!(cause.to_string(), "disk on fire");
        let source = cause.source().expect("wrapped value");
        assert!(source.downcast_ref::<DiskError>().is_some());
    }

    #[test]
    fn test_decode_string_gives_plain_error() {
        let cause: Cause = serde_json::from_value(json!("boom")).unwrap();
        let plain = cause.downcast_ref::<PlainError>().expect("plain error");
        assert_eq!(plain.message(), "boom");
    }

    #[test]
    fn test_decode_object_gives_problem() {
        let cause: Cause =
            serde_json::from_value(json!({"kind": "conflict", "message": "taken"})).unwrap();
        let problem = cause.as_problem().expect("problem");
        assert_eq!(problem.kind(), Kind::Conflict);
        assert_eq!(problem.message(), "taken");
    }

    #[test]
    fn test_decode_other_shapes_fail() {
        for node in [json!(42), json!(true), json!(["a"]), json!({"title": "no kind"})] {
            let err = serde_json::from_value::<Cause>(node.clone()).unwrap_err();
            assert_eq!(
                err.to_string(),
                "failed to decode error into a sensible type",
                "node {node}"
            );
        }
    }
}
