use std::error::Error;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::cause::Cause;
use crate::codec;
use crate::limits::DecodeLimits;

/// An error that represents multiple errors
///
/// Built by [`join`], which never produces an empty aggregate. On the wire
/// an aggregate is an array of cause nodes.
#[derive(Debug, Clone)]
pub struct MultiError {
    errs: Vec<Cause>,
}

/// Combine errors into a single aggregate
///
/// `None` entries are skipped and the order of the rest is kept. Returns
/// `None` when nothing is left. A single error still yields an aggregate;
/// only its rendering collapses to the lone constituent.
pub fn join<I, E>(errs: I) -> Option<MultiError>
where
    I: IntoIterator<Item = Option<E>>,
    E: Into<Cause>,
{
    let errs: Vec<Cause> = errs.into_iter().flatten().map(Into::into).collect();
    if errs.is_empty() {
        return None;
    }

    Some(MultiError { errs })
}

impl MultiError {
    pub(crate) fn from_causes(errs: Vec<Cause>) -> Self {
        Self { errs }
    }

    pub fn len(&self) -> usize {
        self.errs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errs.is_empty()
    }

    /// Constituents in join order
    pub fn iter(&self) -> std::slice::Iter<'_, Cause> {
        self.errs.iter()
    }

    pub fn causes(&self) -> &[Cause] {
        &self.errs
    }
}

impl<'a> IntoIterator for &'a MultiError {
    type Item = &'a Cause;
    type IntoIter = std::slice::Iter<'a, Cause>;

    fn into_iter(self) -> Self::IntoIter {
        self.errs.iter()
    }
}

impl fmt::Display for MultiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((first, rest)) = self.errs.split_first() else {
            return f.write_str("<nil>");
        };

        write!(f, "{}", first)?;
        for err in rest {
            write!(f, "\n{}", err)?;
        }
        Ok(())
    }
}

impl Error for MultiError {}

impl Serialize for MultiError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(&self.errs)
    }
}

impl<'de> Deserialize<'de> for MultiError {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        codec::multi_from_value(&value, &DecodeLimits::default(), 0)
            .map_err(serde::de::Error::custom)
    }
}
