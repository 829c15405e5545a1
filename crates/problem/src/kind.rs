use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use problem_core_types::schema::{CATEGORY_EXTERNAL, CATEGORY_INTERNAL};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CodecError;

/// Canonical error kind taxonomy
///
/// Every kind has an HTTP status counterpart in the 4xx or 5xx range (the
/// reverse is not true), and the kind's code can be used directly as a
/// status. Labels do not necessarily keep the HTTP reason phrase.
///
/// Kinds in the 4xx range are called *external* (caused by the client) and
/// kinds in the 5xx range *internal* (not caused by the client, usually
/// outside of its control).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum Kind {
    // External
    /// Bad Request
    Malformed = 400,
    /// Unauthorized
    Unauthenticated = 401,
    /// Payment Required
    PaymentRequired = 402,
    /// Forbidden
    Unauthorized = 403,
    /// Not Found
    NotFound = 404,
    /// Not Acceptable
    UnsupportedAcceptable = 406,
    /// Request Timeout
    Timeout = 408,
    /// Conflict
    Conflict = 409,
    /// Precondition Failed
    PreconditionFailed = 412,
    /// Content Too Large
    TooLarge = 413,
    /// Unsupported Media Type
    UnsupportedContentType = 415,
    /// Unprocessable Content
    SemanticalError = 422,
    /// Precondition Required
    LostUpdate = 428,
    /// Too Many Requests
    TooManyRequests = 429,

    // Internal
    /// Internal Server Error
    UnexpectedError = 500,
    /// Not Implemented
    Unimplemented = 501,
    /// Bad Gateway
    BadGateway = 502,
    /// Service Unavailable
    Unavailable = 503,
    /// Gateway Timeout
    GatewayTimeout = 504,
    /// Insufficient Storage
    InsufficientStorage = 507,
}

impl Kind {
    /// Every defined kind, in code order
    pub const ALL: [Kind; 20] = [
        Kind::Malformed,
        Kind::Unauthenticated,
        Kind::PaymentRequired,
        Kind::Unauthorized,
        Kind::NotFound,
        Kind::UnsupportedAcceptable,
        Kind::Timeout,
        Kind::Conflict,
        Kind::PreconditionFailed,
        Kind::TooLarge,
        Kind::UnsupportedContentType,
        Kind::SemanticalError,
        Kind::LostUpdate,
        Kind::TooManyRequests,
        Kind::UnexpectedError,
        Kind::Unimplemented,
        Kind::BadGateway,
        Kind::Unavailable,
        Kind::GatewayTimeout,
        Kind::InsufficientStorage,
    ];

    /// Numeric code of the kind, usable as an HTTP status
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Look a kind up by its numeric code
    pub fn from_code(code: u16) -> Option<Kind> {
        Kind::ALL.into_iter().find(|kind| kind.code() == code)
    }

    /// Whether the kind falls under the external category, i.e. caused by a client
    pub const fn is_external(self) -> bool {
        is_external_code(self.code())
    }

    /// Whether the kind falls under the internal category, i.e. not caused
    /// by the client
    pub const fn is_internal(self) -> bool {
        is_internal_code(self.code())
    }

    /// Category name used in structured logs
    pub const fn category(self) -> &'static str {
        if self.is_external() {
            CATEGORY_EXTERNAL
        } else {
            CATEGORY_INTERNAL
        }
    }

    /// Stable short label, used on the wire
    pub const fn label(self) -> &'static str {
        match self {
            Kind::Malformed => "malformed",
            Kind::Unauthenticated => "unauthenticated",
            Kind::PaymentRequired => "payment required",
            Kind::Unauthorized => "unauthorized",
            Kind::NotFound => "not found",
            Kind::UnsupportedAcceptable => "unsupported acceptable",
            Kind::Timeout => "timeout",
            Kind::Conflict => "conflict",
            Kind::PreconditionFailed => "precondition failed",
            Kind::TooLarge => "too large",
            Kind::UnsupportedContentType => "unsupported content type",
            Kind::SemanticalError => "semantical error",
            Kind::LostUpdate => "lost update",
            Kind::TooManyRequests => "too many requests",
            Kind::UnexpectedError => "unexpected error",
            Kind::Unimplemented => "unimplemented",
            Kind::BadGateway => "bad gateway",
            Kind::Unavailable => "unavailable",
            Kind::GatewayTimeout => "gateway timeout",
            Kind::InsufficientStorage => "insufficient storage",
        }
    }

    /// Inverse of [`Kind::label`]
    pub fn from_label(label: &str) -> Option<Kind> {
        label_table().get(label).copied()
    }
}

/// Whether a raw code lies in the external range `[400, 499]`
pub const fn is_external_code(code: u16) -> bool {
    matches!(code, 400..=499)
}

/// Whether a raw code lies in the internal range `[500, 599]`
pub const fn is_internal_code(code: u16) -> bool {
    matches!(code, 500..=599)
}

/// Label of a raw code, empty when the code names no kind
pub fn label_for_code(code: u16) -> &'static str {
    Kind::from_code(code).map(Kind::label).unwrap_or("")
}

static LABEL_TABLE: OnceLock<HashMap<&'static str, Kind>> = OnceLock::new();

fn label_table() -> &'static HashMap<&'static str, Kind> {
    LABEL_TABLE.get_or_init(|| {
        let mut table = HashMap::with_capacity(Kind::ALL.len());
        for kind in Kind::ALL {
            if let Some(other) = table.insert(kind.label(), kind) {
                panic!(
                    "kinds {:?} and {:?} share the label {:?}",
                    other,
                    kind,
                    kind.label()
                );
            }
        }
        table
    })
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Kind {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::from_label(s).ok_or_else(|| CodecError::invalid_kind(s))
    }
}

impl Serialize for Kind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Kind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_a_category() {
        for kind in Kind::ALL {
            assert_ne!(
                kind.is_external(),
                kind.is_internal(),
                "{:?} must be in exactly one category",
                kind
            );
        }
    }

    #[test]
    fn test_category_names() {
        assert_eq!(Kind::TooLarge.category(), "external");
        assert_eq!(Kind::GatewayTimeout.category(), "internal");
    }

    #[test]
    fn test_label_table_is_bijective() {
        assert_eq!(label_table().len(), Kind::ALL.len());
        for kind in Kind::ALL {
            assert!(!kind.label().is_empty());
            assert_eq!(Kind::from_label(kind.label()), Some(kind));
        }
    }

    #[test]
    fn test_known_labels() {
        let cases = [
            (Kind::Malformed, "malformed"),
            (Kind::NotFound, "not found"),
            (Kind::TooManyRequests, "too many requests"),
            (Kind::UnexpectedError, "unexpected error"),
            (Kind::Unavailable, "unavailable"),
        ];
        for (kind, label) in cases {
            assert_eq!(kind.label(), label, "Wrong label for {:?}", kind);
        }
    }

    #[test]
    fn test_unknown_label_and_code() {
        assert_eq!(Kind::from_label("teapot"), None);
        assert_eq!(Kind::from_label(""), None);
        assert_eq!(Kind::from_code(418), None);
        assert_eq!(label_for_code(418), "");
        assert_eq!(label_for_code(0), "");
        assert_eq!(label_for_code(503), "unavailable");
    }

    #[test]
    fn test_code_round_trip() {
        for kind in Kind::ALL {
            assert_eq!(Kind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(Kind::NotFound.code(), 404);
    }

    #[test]
    fn test_display_and_parse() {
        assert_eq!(Kind::Conflict.to_string(), "conflict");
        assert_eq!("bad gateway".parse::<Kind>().ok(), Some(Kind::BadGateway));
        let err = "nope".parse::<Kind>().unwrap_err();
        assert!(matches!(err, CodecError::InvalidKind { .. }));
    }

    #[test]
    fn test_serde_uses_label() {
        let json = serde_json::to_string(&Kind::LostUpdate).unwrap();
        assert_eq!(json, "\"lost update\"");
        let kind: Kind = serde_json::from_str("\"gateway timeout\"").unwrap();
        assert_eq!(kind, Kind::GatewayTimeout);
        assert!(serde_json::from_str::<Kind>("\"missing\"").is_err());
        assert!(serde_json::from_str::<Kind>("404").is_err());
    }
}
