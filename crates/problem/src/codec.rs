//! JSON entry points
//!
//! Encoding goes through the `Serialize` impls directly. Decoding first
//! parses into a [`serde_json::Value`] and then walks it, so that nesting
//! can be bounded by [`DecodeLimits`] and the failure reported as
//! [`CodecError::TooDeep`] instead of overflowing the stack.

use problem_core_types::schema::{EVENT_CAUSE_FALLBACK, EVENT_DEPTH_EXCEEDED};
use serde::de::{Error as _, Unexpected};
use serde::Deserialize;
use serde_json::Value;

use crate::cause::{Cause, PlainError};
use crate::error::{CodecError, Result};
use crate::kind::Kind;
use crate::limits::DecodeLimits;
use crate::multi::MultiError;
use crate::problem::{Metadata, Problem};

/// Encode a problem as a JSON string
///
/// # Errors
///
/// Fails only when a cause registered through [`Cause::encodable`] cannot
/// be serialized.
pub fn encode(problem: &Problem) -> serde_json::Result<String> {
    serde_json::to_string(problem)
}

/// Encode a problem as a JSON value
///
/// # Errors
///
/// See [`encode`].
pub fn encode_value(problem: &Problem) -> serde_json::Result<Value> {
    serde_json::to_value(problem)
}

/// Decode a problem with the default limits
///
/// # Errors
///
/// Returns [`CodecError::Json`] when the input is not a problem object,
/// [`CodecError::InvalidKind`] for an unknown kind label,
/// [`CodecError::Unrecognized`] when a cause node has no usable shape and
/// [`CodecError::TooDeep`] when causes nest past the limit.
pub fn decode(input: &str) -> Result<Problem> {
    decode_with(input, &DecodeLimits::default())
}

/// Decode a problem with explicit limits
///
/// # Errors
///
/// See [`decode`].
pub fn decode_with(input: &str, limits: &DecodeLimits) -> Result<Problem> {
    let value = parse(input, limits)?;
    decode_value(&value, limits)
}

/// Decode a problem from an already parsed JSON value
///
/// # Errors
///
/// See [`decode`].
pub fn decode_value(value: &Value, limits: &DecodeLimits) -> Result<Problem> {
    problem_from_value(value, limits, 0)
}

/// Decode an aggregate (a JSON array of cause nodes)
///
/// # Errors
///
/// See [`decode`]; a non-array input is a [`CodecError::Json`].
pub fn decode_multi(input: &str) -> Result<MultiError> {
    decode_multi_with(input, &DecodeLimits::default())
}

/// Decode an aggregate with explicit limits
///
/// # Errors
///
/// See [`decode_multi`].
pub fn decode_multi_with(input: &str, limits: &DecodeLimits) -> Result<MultiError> {
    let value = parse(input, limits)?;
    multi_from_value(&value, limits, 0)
}

/// Decode a single cause node
///
/// # Errors
///
/// See [`decode`].
pub fn decode_cause(input: &str) -> Result<Cause> {
    let limits = DecodeLimits::default();
    let value = parse(input, &limits)?;
    cause_from_value(&value, &limits, 0)
}

/// Parse raw input, reporting the parser's own nesting bound as
/// [`CodecError::TooDeep`]
fn parse(input: &str, limits: &DecodeLimits) -> Result<Value> {
    serde_json::from_str(input).map_err(|err| {
        if err.to_string().starts_with(RECURSION_LIMIT_MESSAGE) {
            too_deep(None, limits)
        } else {
            CodecError::Json(err)
        }
    })
}

const RECURSION_LIMIT_MESSAGE: &str = "recursion limit exceeded";

/// The fields of a problem object other than its cause
#[derive(Deserialize)]
struct ProblemFields {
    kind: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    metadata: Option<Metadata>,
}

pub(crate) fn problem_from_value(
    value: &Value,
    limits: &DecodeLimits,
    depth: usize,
) -> Result<Problem> {
    if !value.is_object() {
        return Err(serde_json::Error::invalid_type(unexpected(value), &"a problem object").into());
    }
    enter(depth, limits)?;

    let fields = ProblemFields::deserialize(value)?;
    let kind = fields.kind.parse::<Kind>()?;

    let cause = match value.get("cause") {
        None | Some(Value::Null) => Cause::from(PlainError::new(String::new())),
        Some(node) => cause_from_value(node, limits, depth + 1)?,
    };

    Ok(Problem::new(
        kind,
        fields.title,
        fields.message,
        Some(cause),
        fields.metadata,
    ))
}

pub(crate) fn cause_from_value(value: &Value, limits: &DecodeLimits, depth: usize) -> Result<Cause> {
    match problem_from_value(value, limits, depth) {
        Ok(problem) => return Ok(Cause::from(problem)),
        Err(err @ CodecError::TooDeep { .. }) => return Err(err),
        Err(err) => {
            tracing::debug!(
                component = module_path!(),
                event = EVENT_CAUSE_FALLBACK,
                depth,
                reason = %err,
                "cause is not a problem object"
            );
        }
    }

    match value {
        Value::String(message) => Ok(Cause::from(PlainError::new(message.as_str()))),
        _ => Err(CodecError::Unrecognized),
    }
}

pub(crate) fn multi_from_value(
    value: &Value,
    limits: &DecodeLimits,
    depth: usize,
) -> Result<MultiError> {
    let Value::Array(nodes) = value else {
        return Err(
            serde_json::Error::invalid_type(unexpected(value), &"a sequence of causes").into(),
        );
    };
    enter(depth, limits)?;

    let causes = nodes
        .iter()
        .map(|node| cause_from_value(node, limits, depth + 1))
        .collect::<Result<Vec<_>>>()?;

    Ok(MultiError::from_causes(causes))
}

fn enter(depth: usize, limits: &DecodeLimits) -> Result<()> {
    if depth < limits.effective_max_depth() {
        return Ok(());
    }
    Err(too_deep(Some(depth), limits))
}

/// `depth` is `None` when the parser tripped before any node was walked
fn too_deep(depth: Option<usize>, limits: &DecodeLimits) -> CodecError {
    let limit = limits.effective_max_depth();
    tracing::warn!(
        component = module_path!(),
        event = EVENT_DEPTH_EXCEEDED,
        depth = ?depth,
        max_depth = limit,
        "refusing to decode nested causes"
    );
    CodecError::TooDeep { limit }
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}
