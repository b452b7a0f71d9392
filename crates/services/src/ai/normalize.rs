//! Turns raw completion text into a single JSON object.
//!
//! Models wrap JSON in code fences or prose and cut it off at the token limit.
//! Repair only pads missing closing punctuation; truncation inside a string or
//! a key is not recoverable here.

use std::borrow::Cow;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::NormalizeError;

const FENCE: &str = "```";

/// Clean, optionally repair, and parse `raw` as a JSON object.
///
/// # Errors
///
/// Returns `NormalizeError::EmptyResponse` when nothing is left after
/// stripping fences, and `NormalizeError::Parse` when neither the cleaned text
/// nor the outermost `{...}` span of `raw` parses as an object.
pub fn normalize(raw: &str, was_truncated: bool) -> Result<Map<String, Value>, NormalizeError> {
    let cleaned = strip_code_fence(raw);
    if cleaned.is_empty() {
        return Err(NormalizeError::EmptyResponse);
    }

    let candidate = if was_truncated && parse_object(cleaned).is_err() {
        repair_truncated_json(cleaned)
    } else {
        Cow::Borrowed(cleaned)
    };

    let message = match parse_object(&candidate) {
        Ok(object) => return Ok(object),
        Err(message) => message,
    };
    debug!(error = %message, cleaned = %candidate, "cleaned completion did not parse");

    if let Some(span) = outermost_braces(raw) {
        if let Ok(object) = parse_object(span) {
            warn!("recovered JSON object embedded in surrounding text");
            return Ok(object);
        }
    }

    Err(NormalizeError::Parse {
        message,
        raw_response: raw.to_string(),
    })
}

/// Trim `raw` and drop a leading fence (with optional language tag) and a
/// trailing fence.
#[must_use]
pub fn strip_code_fence(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix(FENCE) {
        let tag_len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+')))
            .unwrap_or(rest.len());
        let after_tag = &rest[tag_len..];
        text = if tag_len > 0 && after_tag.chars().next().is_none_or(char::is_whitespace) {
            after_tag
        } else {
            rest
        };
    }
    if let Some(rest) = text.strip_suffix(FENCE) {
        text = rest;
    }
    text.trim()
}

/// Append the missing `]` then `}` characters to a truncated object.
///
/// Text that is balanced, or that does not start with `{`, comes back
/// unchanged.
#[must_use]
pub fn repair_truncated_json(text: &str) -> Cow<'_, str> {
    let count = |needle: char| text.chars().filter(|&c| c == needle).count();
    let (open_braces, close_braces) = (count('{'), count('}'));
    let (open_brackets, close_brackets) = (count('['), count(']'));

    if open_braces <= close_braces && open_brackets <= close_brackets {
        return Cow::Borrowed(text);
    }
    if !text.trim().starts_with('{') {
        return Cow::Borrowed(text);
    }

    warn!(
        open_braces,
        close_braces, open_brackets, close_brackets, "repairing truncated JSON"
    );
    let mut repaired = String::with_capacity(text.len() + 8);
    repaired.push_str(text);
    repaired.extend(std::iter::repeat_n(']', open_brackets.saturating_sub(close_brackets)));
    repaired.extend(std::iter::repeat_n('}', open_braces.saturating_sub(close_braces)));
    Cow::Owned(repaired)
}

fn parse_object(text: &str) -> Result<Map<String, Value>, String> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(other) => Err(format!("expected a JSON object, found {}", kind_of(&other))),
        Err(err) => Err(err.to_string()),
    }
}

/// First `{` through last `}` of `raw`, if both exist in that order.
fn outermost_braces(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
