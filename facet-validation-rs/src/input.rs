//! Input and output boundary helpers
//!
//! Annotators often wrap their JSON in a markdown code fence. These helpers
//! strip the fence, parse the object, and render the canonical record.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::errors::{FacetError, FacetResult};

static OPENING_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A```(?:json)?\s*\n?").expect("opening fence pattern"));
static CLOSING_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n?```\s*\z").expect("closing fence pattern"));

/// Trim whitespace and remove a surrounding markdown code fence, if any
pub fn strip_code_fence(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(m) = OPENING_FENCE.find(text) {
        text = &text[m.end()..];
    }
    if let Some(m) = CLOSING_FENCE.find(text) {
        text = &text[..m.start()];
    }
    text
}

/// Parse raw annotator output into a facet object
pub fn parse_facet(raw: &str) -> FacetResult<Map<String, Value>> {
    let value: Value = serde_json::from_str(strip_code_fence(raw))?;
    into_object(value)
}

/// Unwrap a top-level object; any other JSON value is fatal
pub(crate) fn into_object(value: Value) -> FacetResult<Map<String, Value>> {
    match value {
        Value::Object(record) => Ok(record),
        other => Err(FacetError::not_an_object(&other)),
    }
}

/// Render a record as 2-space indented JSON
pub fn to_pretty_json(record: &Map<String, Value>) -> FacetResult<String> {
    Ok(serde_json::to_string_pretty(record)?)
}
