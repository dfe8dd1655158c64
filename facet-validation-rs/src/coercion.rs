//! Coercion log
//!
//! Each repair the validator applies is recorded as a [`Coercion`], so callers
//! can report not just how many values were repaired but which ones.

use serde::Serialize;
use serde_json::Value;

/// How a non-canonical value was repaired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoercionKind {
    /// Known synonym mapped to its canonical value
    Synonym,
    /// Missing or unrecognised enum value replaced by the field default
    Fallback,
    /// Unrecognised frequency-map key folded into the catch-all key
    CatchAll,
}

/// A single repair applied to a record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coercion {
    /// Field name, or `field.key` for frequency-map entries
    pub path: String,
    /// Value as supplied; `None` when the field was missing
    pub original: Option<Value>,
    /// Canonical value that replaced it
    pub canonical: &'static str,
    pub kind: CoercionKind,
}

impl Coercion {
    pub fn new(
        path: impl Into<String>,
        original: Option<Value>,
        canonical: &'static str,
        kind: CoercionKind,
    ) -> Self {
        Self {
            path: path.into(),
            original,
            canonical,
            kind,
        }
    }
}
