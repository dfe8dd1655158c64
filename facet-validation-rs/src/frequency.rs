//! Frequency map cleaning
//!
//! One routine serves every key→count map in a facet. Keys are resolved to
//! their canonical form and counts for keys that resolve to the same
//! canonical key are summed.

use serde_json::{Map, Number, Value};

use crate::coercion::{Coercion, CoercionKind};
use crate::registry::FrequencyDomain;

/// Cleaned map plus the repairs made while building it
#[derive(Debug, Default, PartialEq)]
pub struct CleanedMap {
    pub counts: Map<String, Value>,
    pub coercions: Vec<Coercion>,
}

impl CleanedMap {
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Clean a raw frequency map against `domain`.
///
/// A non-object input is treated as empty. Entries whose count is not a
/// number, or truncates to zero or less, are dropped without being counted
/// as coercions. Output keys keep the order in which they first resolved.
pub fn clean_map(raw: Option<&Value>, domain: &FrequencyDomain) -> CleanedMap {
    let Some(Value::Object(entries)) = raw else {
        return CleanedMap::default();
    };

    let mut totals: Vec<(&'static str, u64)> = Vec::with_capacity(entries.len());
    let mut coercions = Vec::new();

    for (key, value) in entries {
        let Some(count) = positive_count(value) else {
            continue;
        };

        let resolved = if let Some(canonical) = domain.key(key) {
            canonical
        } else if let Some(mapped) = domain.synonym(key) {
            coercions.push(entry_coercion(domain, key, mapped, CoercionKind::Synonym));
            mapped
        } else {
            let catch_all = domain.catch_all();
            coercions.push(entry_coercion(domain, key, catch_all, CoercionKind::CatchAll));
            catch_all
        };

        match totals.iter_mut().find(|(k, _)| *k == resolved) {
            Some((_, total)) => {
                *total = total.checked_add(count).unwrap_or_else(|| {
                    tracing::warn!(
                        field = domain.field,
                        key = resolved,
                        "Merged count overflowed; capped at u64::MAX"
                    );
                    u64::MAX
                });
            }
            None => totals.push((resolved, count)),
        }
    }

    let counts = totals
        .into_iter()
        .map(|(key, total)| (key.to_string(), Value::Number(Number::from(total))))
        .collect();

    CleanedMap { counts, coercions }
}

/// Count carried by a map entry, truncated toward zero; `None` if unusable
fn positive_count(value: &Value) -> Option<u64> {
    let Value::Number(n) = value else {
        return None;
    };
    if let Some(u) = n.as_u64() {
        return (u > 0).then_some(u);
    }
    if n.as_i64().is_some() {
        // negative integer
        return None;
    }
    let truncated = n.as_f64()?.trunc();
    if truncated < 1.0 {
        return None;
    }
    if truncated >= u64::MAX as f64 {
        tracing::warn!(count = truncated, "Count exceeds u64 range; capped at u64::MAX");
        return Some(u64::MAX);
    }
    Some(truncated as u64)
}

fn entry_coercion(
    domain: &FrequencyDomain,
    key: &str,
    canonical: &'static str,
    kind: CoercionKind,
) -> Coercion {
    Coercion::new(
        format!("{}.{}", domain.field, key),
        Some(Value::String(key.to_string())),
        canonical,
        kind,
    )
}
