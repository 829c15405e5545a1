//! Core types shared across the problem facilities
//!
//! This crate provides the vocabulary used by both the error codec
//! and the logging facility:
//!
//! - **Schema constants**: Canonical field keys and event names

pub mod schema;
