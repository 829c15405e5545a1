//! Problem - structured errors for service applications
//!
//! This crate provides:
//! - A closed [`Kind`] taxonomy aligned with HTTP 4xx/5xx statuses, split
//!   into external (client caused) and internal (server caused) kinds
//! - [`Problem`], the structured error record: kind, title, message, cause
//!   and metadata
//! - [`MultiError`] and [`join`] for folding several errors into one
//! - [`Cause`], which gives an arbitrary error a JSON wire shape and reads
//!   it back through a closed fallback chain
//! - Chain utilities ([`as_type`], [`chain`]) and builders ([`Draft`],
//!   [`FormatDraft`])
//! - A structured logging facility built on `tracing`
//!
//! ```
//! use problem::{codec, wrap, Kind, PlainError, Problem};
//!
//! let problem = Problem::draft(Kind::NotFound, "Not Found")
//!     .with_message("user 7 missing")
//!     .with_cause(wrap(PlainError::new("no rows")))
//!     .make();
//!
//! let json = codec::encode(&problem)?;
//! let back = codec::decode(&json)?;
//! assert_eq!(back.to_string(), "user 7 missing: no rows");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod cause;
pub mod chain;
pub mod codec;
pub mod error;
pub mod kind;
pub mod limits;
pub mod logging_facility;
pub mod multi;
pub mod problem;
pub mod template;

pub use problem_core_types as core_types;

// Re-export commonly used types
pub use builder::{Draft, FormatDraft};
pub use cause::{wrap, Cause, PlainError};
pub use chain::{as_type, chain};
pub use error::{CodecError, Result};
pub use kind::{is_external_code, is_internal_code, label_for_code, Kind};
pub use limits::DecodeLimits;
pub use multi::{join, MultiError};
pub use problem::{Metadata, Problem};
