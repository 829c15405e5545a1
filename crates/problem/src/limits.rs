//! Decoder configuration
//!
//! Wire input may come from an untrusted peer, so the decoder bounds how far
//! causes and aggregates may nest before giving up.

use serde::{Deserialize, Serialize};

/// Default bound on nested cause nodes
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Deepest nesting the JSON parser accepts before it gives up
///
/// `serde_json` refuses input nested 128 levels or more, so no limit above
/// this can take effect.
pub const PARSER_MAX_DEPTH: usize = 127;

/// Limits applied while decoding problems from the wire
///
/// Every cause node that is a problem object or an aggregate array counts
/// as one level. Applications usually embed this in their own configuration
/// file; missing fields fall back to the defaults. Values above
/// [`PARSER_MAX_DEPTH`] are capped to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeLimits {
    pub max_depth: usize,
}

impl DecodeLimits {
    /// Limits with a custom depth bound
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// The depth bound actually enforced
    pub fn effective_max_depth(&self) -> usize {
        self.max_depth.min(PARSER_MAX_DEPTH)
    }
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
