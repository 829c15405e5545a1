//! Structured logging facility
//!
//! This module provides:
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//!   whose error variant records a problem's kind, code and category
//! - Test capture mode for deterministic assertions
//!
//! The codec itself only emits `debug`/`warn` events; this facility is for
//! the application that owns the subscriber.
//!
//! # Usage
//!
//! ```rust
//! use problem::logging_facility::{init, Profile};
//!
//! // Initialize once at application startup
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
