//! Optional values with a JSON `null` wire form
//!
//! [`Opt`] is an optional container for payload fields that must round trip
//! through JSON: an absent value encodes as `null` and `null` decodes as
//! absent, whatever the inner type.
//!
//! ```
//! use problem_opt::Opt;
//!
//! let port: Opt<u16> = serde_json::from_str("8080")?;
//! assert_eq!(port.get(), Some(&8080));
//! assert_eq!(Opt::<u16>::none().to_string(), "<none>");
//! # Ok::<(), serde_json::Error>(())
//! ```

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Rendering of an absent value
pub const NONE_DISPLAY: &str = "<none>";

/// A value that may or may not be present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Opt<T> {
    val: Option<T>,
}

impl<T> Opt<T> {
    pub fn some(val: T) -> Self {
        Self { val: Some(val) }
    }

    pub fn none() -> Self {
        Self { val: None }
    }

    /// The value, if present
    pub fn get(&self) -> Option<&T> {
        self.val.as_ref()
    }

    pub fn into_option(self) -> Option<T> {
        self.val
    }

    pub fn is_some(&self) -> bool {
        self.val.is_some()
    }
}

impl<T: DeserializeOwned> Opt<T> {
    /// Decode `input` into `self`
    ///
    /// On failure `self` is left absent and the error is returned.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when `input` is not valid JSON or does
    /// not match `T`.
    pub fn decode_in_place(&mut self, input: &str) -> serde_json::Result<()> {
        match serde_json::from_str::<Opt<T>>(input) {
            Ok(decoded) => {
                *self = decoded;
                Ok(())
            }
            Err(err) => {
                self.val = None;
                Err(err)
            }
        }
    }
}

impl<T> Default for Opt<T> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T> From<Option<T>> for Opt<T> {
    fn from(val: Option<T>) -> Self {
        Self { val }
    }
}

impl<T> From<Opt<T>> for Option<T> {
    fn from(opt: Opt<T>) -> Self {
        opt.val
    }
}

impl<T: fmt::Display> fmt::Display for Opt<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.val {
            Some(val) => val.fmt(f),
            None => f.write_str(NONE_DISPLAY),
        }
    }
}

impl<T: Serialize> Serialize for Opt<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &self.val {
            Some(val) => val.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Opt<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_is_default() {
        let opt: Opt<String> = Opt::default();
        assert!(!opt.is_some());
        assert_eq!(opt.get(), None);
        assert_eq!(opt, Opt::none());
    }

    #[test]
    fn test_display() {
        assert_eq!(Opt::some(5).to_string(), "5");
        assert_eq!(Opt::some("text").to_string(), "text");
        assert_eq!(Opt::<i32>::none().to_string(), "<none>");
    }

    #[test]
    fn test_option_conversions() {
        assert_eq!(Opt::from(Some(1)).into_option(), Some(1));
        assert_eq!(Option::<i32>::from(Opt::none()), None);
    }

    #[test]
    fn test_null_is_absent() {
        let opt: Opt<u32> = serde_json::from_str("null").unwrap();
        assert!(!opt.is_some());
        assert_eq!(serde_json::to_string(&opt).unwrap(), "null");
    }

    #[test]
    fn test_present_value_is_inner_json() {
        assert_eq!(serde_json::to_string(&Opt::some(5)).unwrap(), "5");
        let opt: Opt<Vec<u8>> = serde_json::from_str("[1,2]").unwrap();
        assert_eq!(opt.get(), Some(&vec![1, 2]));
    }

    #[test]
    fn test_decode_in_place_failure_resets() {
        let mut opt = Opt::some("kept".to_string());
        let err = opt.decode_in_place("5").unwrap_err();
        assert!(err.is_data());
        assert!(!opt.is_some());
    }

    #[test]
    fn test_decode_in_place_success_and_null() {
        let mut opt = Opt::<u8>::none();
        opt.decode_in_place("7").unwrap();
        assert_eq!(opt.get(), Some(&7));

        opt.decode_in_place("null").unwrap();
        assert!(!opt.is_some());
    }
}
