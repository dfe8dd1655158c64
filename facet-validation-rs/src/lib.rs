//! # Facet Validation Library
//!
//! Normalizes loosely-structured session facets, as produced by a free-form
//! annotation step, against a fixed and closed schema.
//!
//! ## Features
//!
//! - A process-wide registry of canonical values, synonyms and defaults
//! - Enum canonicalization with distinct policies for required and optional fields
//! - Frequency-map cleaning that merges synonym keys by summing their counts
//! - An itemised coercion log for monitoring upstream data quality
//! - Markdown fence stripping and metadata stamping at the input boundary
//!
//! Validation is a pure function of one record: there is no cross-record
//! state, so records may be validated concurrently without coordination.

mod coercion;
mod errors;

pub mod canonical;
pub mod frequency;
pub mod input;
pub mod metadata;
pub mod registry;
pub mod validator;


pub use coercion::{Coercion, CoercionKind};
pub use errors::{FacetError, FacetResult};
pub use input::{parse_facet, strip_code_fence, to_pretty_json};
pub use metadata::MetadataOverrides;
pub use registry::{registry, FacetRegistry};
pub use validator::{validate_facet, validate_value, ValidationOutcome};

/// Re-export commonly used items for convenience
pub mod prelude {
    pub use crate::coercion::{Coercion, CoercionKind};
    pub use crate::errors::{FacetError, FacetResult};
    pub use crate::input::{parse_facet, to_pretty_json};
    pub use crate::metadata::MetadataOverrides;
    pub use crate::validator::{validate_facet, ValidationOutcome};
}

/// Version of the validation library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parse raw annotator output, stamp metadata, and validate it.
///
/// Fails only when the text is not a JSON object.
pub fn process(raw: &str, overrides: &MetadataOverrides) -> FacetResult<ValidationOutcome> {
    let mut record = parse_facet(raw)?;
    overrides.apply(&mut record);
    Ok(validate_facet(record))
}
