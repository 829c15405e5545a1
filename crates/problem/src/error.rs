use thiserror::Error;

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// Failures raised while turning wire input back into errors
///
/// Encoding has no dedicated variant: serialization failures are
/// `serde_json::Error`s and are returned as such.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The input was not JSON, or did not have the expected outer shape
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The `kind` field named no known label
    #[error("problem: kind must be a known label, got {label:?}")]
    InvalidKind { label: String },

    /// A cause node was neither a problem object nor a string
    #[error("failed to decode error into a sensible type")]
    Unrecognized,

    /// Causes or aggregates were nested deeper than the configured limit
    #[error("problem: causes are too deeply nested (limit {limit})")]
    TooDeep { limit: usize },
}

impl CodecError {
    pub(crate) fn invalid_kind(label: impl Into<String>) -> Self {
        CodecError::InvalidKind {
            label: label.into(),
        }
    }

    /// Whether the failure came from the depth guard
    pub fn is_too_deep(&self) -> bool {
        matches!(self, CodecError::TooDeep { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrecognized_message_is_stable() {
        assert_eq!(
            CodecError::Unrecognized.to_string(),
            "failed to decode error into a sensible type"
        );
    }

    #[test]
    fn test_invalid_kind_names_the_label() {
        let err = CodecError::invalid_kind("bogus");
        assert!(err.to_string().contains("\"bogus\""));
        assert!(!err.is_too_deep());
    }

    #[test]
    fn test_json_errors_convert() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CodecError = json_err.into();
        assert!(matches!(err, CodecError::Json(_)));
    }
}
