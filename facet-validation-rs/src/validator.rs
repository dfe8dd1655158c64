//! Facet validation
//!
//! Applies the registry rules to one record, field by field, in a fixed
//! order. `recovery_quality` depends on the cleaned `friction_counts`, so the
//! friction map must be resolved first.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::instrument;

use crate::canonical::{resolve_optional, resolve_required};
use crate::coercion::Coercion;
use crate::errors::FacetResult;
use crate::frequency::clean_map;
use crate::input::into_object;
use crate::registry::{
    registry, EnumDomain, FrequencyDomain, CONTEXT_SWITCHES, CONTEXT_SWITCHES_DEFAULT,
};

/// Canonical record plus every repair applied to produce it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationOutcome {
    pub facet: Map<String, Value>,
    pub coercions: Vec<Coercion>,
}

impl ValidationOutcome {
    /// Number of non-standard values that were repaired
    pub fn coercion_count(&self) -> usize {
        self.coercions.len()
    }
}

/// Validate a parsed JSON value. Anything other than an object is fatal.
pub fn validate_value(value: Value) -> FacetResult<ValidationOutcome> {
    into_object(value).map(validate_facet)
}

/// Validate and coerce a facet record.
///
/// Never fails: every schema deviation is repaired and logged in the
/// returned outcome. Fields the registry does not know are left untouched.
#[instrument(name = "validate_facet", skip_all)]
pub fn validate_facet(mut record: Map<String, Value>) -> ValidationOutcome {
    let reg = registry();
    let mut coercions = Vec::new();

    apply_required(&mut record, &reg.outcome, &mut coercions);
    apply_required(&mut record, &reg.helpfulness, &mut coercions);
    apply_required(&mut record, &reg.session_type, &mut coercions);

    let has_friction = apply_frequency(&mut record, &reg.friction, &mut coercions);
    apply_frequency(&mut record, &reg.satisfaction, &mut coercions);

    apply_required(&mut record, &reg.primary_success, &mut coercions);

    apply_optional(
        &mut record,
        &reg.session_complexity,
        reg.session_complexity.default_value(),
        &mut coercions,
    );
    apply_optional(
        &mut record,
        &reg.recovery_quality,
        reg.recovery_default(has_friction),
        &mut coercions,
    );

    // Missing or non-numeric counts reset silently.
    if !matches!(record.get(CONTEXT_SWITCHES), Some(Value::Number(_))) {
        record.insert(
            CONTEXT_SWITCHES.to_string(),
            Value::from(CONTEXT_SWITCHES_DEFAULT),
        );
    }

    apply_optional(
        &mut record,
        &reg.root_cause_depth,
        reg.root_cause_depth.default_value(),
        &mut coercions,
    );

    for coercion in &coercions {
        tracing::debug!(
            path = %coercion.path,
            original = ?coercion.original,
            canonical = coercion.canonical,
            kind = ?coercion.kind,
            "Coerced non-standard value"
        );
    }
    if !coercions.is_empty() {
        tracing::info!(count = coercions.len(), "Facet required coercion");
    }

    ValidationOutcome {
        facet: record,
        coercions,
    }
}

fn apply_required(
    record: &mut Map<String, Value>,
    domain: &EnumDomain,
    coercions: &mut Vec<Coercion>,
) {
    let (value, coercion) = resolve_required(record, domain, domain.default_value());
    coercions.extend(coercion);
    record.insert(domain.field.to_string(), Value::from(value));
}

fn apply_optional(
    record: &mut Map<String, Value>,
    domain: &EnumDomain,
    fallback: &'static str,
    coercions: &mut Vec<Coercion>,
) {
    let (value, coercion) = resolve_optional(record, domain, fallback);
    coercions.extend(coercion);
    record.insert(domain.field.to_string(), Value::from(value));
}

/// Replace a frequency map with its cleaned form; returns whether it is non-empty
fn apply_frequency(
    record: &mut Map<String, Value>,
    domain: &FrequencyDomain,
    coercions: &mut Vec<Coercion>,
) -> bool {
    let cleaned = clean_map(record.get(domain.field), domain);
    let non_empty = !cleaned.is_empty();
    coercions.extend(cleaned.coercions);
    record.insert(domain.field.to_string(), Value::Object(cleaned.counts));
    non_empty
}
