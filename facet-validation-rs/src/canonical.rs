//! Enum canonicalization
//!
//! Maps a raw enum value onto its canonical domain. Required and optional
//! fields share the same lookup but differ in how a missing field is treated.

use serde_json::{Map, Value};

use crate::coercion::{Coercion, CoercionKind};
use crate::registry::EnumDomain;

/// Canonicalize `value` against `domain`.
///
/// Returns the canonical value and whether it differs from the input.
/// Members pass through unchanged, known synonyms map to their target, and
/// anything else (including `None`) becomes `fallback`.
pub fn canonicalize(
    value: Option<&str>,
    domain: &EnumDomain,
    fallback: &'static str,
) -> (&'static str, bool) {
    let Some(value) = value else {
        return (fallback, true);
    };
    if let Some(member) = domain.member(value) {
        return (member, false);
    }
    match domain.synonym(value) {
        Some(mapped) => (mapped, true),
        None => (fallback, true),
    }
}

/// State of an optional field in the raw record
#[derive(Debug, PartialEq)]
pub enum Presence<'a> {
    /// Field not present; record predates it
    Absent,
    /// Present and already canonical
    Valid(&'static str),
    /// Present but outside the domain
    Invalid(&'a Value),
}

/// Classify `domain.field` in `record` without modifying it
pub fn presence<'a>(record: &'a Map<String, Value>, domain: &EnumDomain) -> Presence<'a> {
    match record.get(domain.field) {
        None => Presence::Absent,
        Some(value) => match value.as_str().and_then(|s| domain.member(s)) {
            Some(member) => Presence::Valid(member),
            None => Presence::Invalid(value),
        },
    }
}

/// Resolve a required field. A missing field counts as a coercion.
pub fn resolve_required(
    record: &Map<String, Value>,
    domain: &EnumDomain,
    fallback: &'static str,
) -> (&'static str, Option<Coercion>) {
    let raw = record.get(domain.field);
    let (canonical, coerced) = canonicalize(raw.and_then(Value::as_str), domain, fallback);
    if !coerced {
        return (canonical, None);
    }
    (canonical, Some(repair(domain, raw, canonical)))
}

/// Resolve an optional field.
///
/// Absent fields get `fallback` silently. Present fields with a value outside
/// the domain get `fallback` (or a synonym target) and count as a coercion.
pub fn resolve_optional(
    record: &Map<String, Value>,
    domain: &EnumDomain,
    fallback: &'static str,
) -> (&'static str, Option<Coercion>) {
    match presence(record, domain) {
        Presence::Absent => (fallback, None),
        Presence::Valid(member) => (member, None),
        Presence::Invalid(raw) => {
            let (canonical, _) = canonicalize(raw.as_str(), domain, fallback);
            (canonical, Some(repair(domain, Some(raw), canonical)))
        }
    }
}

fn repair(domain: &EnumDomain, raw: Option<&Value>, canonical: &'static str) -> Coercion {
    let kind = match raw.and_then(Value::as_str).and_then(|s| domain.synonym(s)) {
        Some(_) => CoercionKind::Synonym,
        None => CoercionKind::Fallback,
    };
    Coercion::new(domain.field, raw.cloned(), canonical, kind)
}
