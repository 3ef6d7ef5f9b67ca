//! Normalized form schema consumed by the compilation UI.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::category::Category;

/// Input widget the renderer should use for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Text,
    Email,
    Tel,
    Date,
    Textarea,
}

impl InputKind {
    pub fn as_str(self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Email => "email",
            InputKind::Tel => "tel",
            InputKind::Date => "date",
            InputKind::Textarea => "textarea",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One editable field of the compiled form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedFormField {
    /// Machine-safe identifier, unique within its schema.
    pub key: String,
    /// Original PDF field name this field writes back to.
    pub source_name: String,
    pub label: String,
    pub input_kind: InputKind,
    pub required: bool,
    pub max_length: u32,
    pub placeholder: String,
    pub hint: String,
    pub category: Category,
}

/// Why a built-in schema was returned instead of an extracted one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// No envelope was supplied.
    Absent,
    /// The envelope could not be decoded into a field mapping.
    DecodeFailure,
    /// The envelope decoded but held no usable text fields.
    EmptyFieldSet,
}

impl FallbackReason {
    pub fn description(self) -> &'static str {
        match self {
            FallbackReason::Absent => "no field envelope supplied",
            FallbackReason::DecodeFailure => "field envelope could not be decoded",
            FallbackReason::EmptyFieldSet => "field envelope contains no fields",
        }
    }
}

/// Provenance of a [`FormSchema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "reason")]
pub enum SchemaOrigin {
    /// Built from the template's extracted fields.
    Extracted,
    /// Built-in minimal schema.
    Fallback(FallbackReason),
}

/// Ordered form schema for one contract template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSchema {
    /// Fields sorted by category precedence, base fields before duplicates.
    pub fields: Vec<NormalizedFormField>,
    /// Original names of toggle widgets the user must select by hand.
    pub selection_fields: Vec<String>,
    pub origin: SchemaOrigin,
    /// Version tag carried over from the envelope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_version: Option<String>,
}

impl FormSchema {
    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, SchemaOrigin::Fallback(_))
    }

    pub fn field(&self, key: &str) -> Option<&NormalizedFormField> {
        self.fields.iter().find(|field| field.key == key)
    }

    /// Maps every normalized key to its original PDF field name.
    pub fn reverse_map(&self) -> BTreeMap<&str, &str> {
        self.fields
            .iter()
            .map(|field| (field.key.as_str(), field.source_name.as_str()))
            .collect()
    }

    pub fn required_keys(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|field| field.required)
            .map(|field| field.key.as_str())
            .collect()
    }

    /// Groups fields for rendering, in category precedence order.
    ///
    /// Empty categories are omitted; fields keep their schema order.
    pub fn by_category(&self) -> Vec<(Category, Vec<&NormalizedFormField>)> {
        Category::PRECEDENCE
            .iter()
            .filter_map(|category| {
                let fields: Vec<&NormalizedFormField> = self
                    .fields
                    .iter()
                    .filter(|field| field.category == *category)
                    .collect();
                (!fields.is_empty()).then_some((*category, fields))
            })
            .collect()
    }
}
