//! Field normalization for supplier contract templates.
//!
//! Turns the raw field dictionary extracted from a PDF contract template
//! into an ordered, typed and categorized [`FormSchema`], and maps the
//! values entered against that schema back to the template's own field
//! names for document generation.

#![deny(unsafe_code)]

pub mod builder;
pub mod envelope;
pub mod error;
pub mod keys;
pub mod rules;
pub mod utils;
pub mod values;

use serde_json::Value;

use contract_model::{FallbackReason, FormSchema};

pub use builder::SchemaBuilder;
pub use envelope::{decode_envelope, decode_envelope_str};
pub use error::EnvelopeError;
pub use values::{map_values_to_source, validate_values};

/// Builds a schema with default options. See [`SchemaBuilder::build_from_value`].
pub fn build_form_schema(input: Option<&Value>) -> FormSchema {
    SchemaBuilder::default().build_from_value(input)
}

/// Builds a schema from serialized envelope text with default options.
pub fn build_form_schema_from_str(text: &str) -> FormSchema {
    SchemaBuilder::default().build_from_str(text)
}

/// The built-in five-field schema with default options.
pub fn fallback_schema(reason: FallbackReason) -> FormSchema {
    SchemaBuilder::default().fallback(reason)
}
