//! Canonical schema constants for structured logging and events
//!
//! These constants keep the field names emitted by the logging macros and
//! the codec consistent, so log pipelines can key on them.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";
pub const FIELD_ERR_CATEGORY: &str = "err.category";
pub const FIELD_ERR_TITLE: &str = "err.title";

// Codec fields
pub const FIELD_DEPTH: &str = "depth";
pub const FIELD_MAX_DEPTH: &str = "max_depth";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_CAUSE_FALLBACK: &str = "cause_fallback";
pub const EVENT_DEPTH_EXCEEDED: &str = "depth_exceeded";

// Error categories
pub const CATEGORY_EXTERNAL: &str = "external";
pub const CATEGORY_INTERNAL: &str = "internal";
