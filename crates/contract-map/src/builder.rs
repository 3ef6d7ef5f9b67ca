//! Form schema builder.

use serde_json::Value;

use contract_model::{
    FallbackReason, FieldEnvelope, FormSchema, NormalizedFormField, NormalizerOptions,
    RawFieldEntry, SchemaOrigin,
};

use crate::envelope::{decode_envelope, decode_envelope_str};
use crate::error::EnvelopeError;
use crate::keys::{KeyRegistry, derive_key};
use crate::rules::{
    FieldFacts, classify_category, infer_hint, infer_input_kind, infer_placeholder,
    infer_required,
};

/// Names of the built-in fields used when a template yields nothing usable.
const FALLBACK_FIELDS: [(&str, Option<u32>); 5] = [
    ("Nome", None),
    ("Cognome", None),
    ("Codice Fiscale", Some(16)),
    ("Telefono", None),
    ("Email", None),
];

/// Builds ordered form schemas from extracted template fields.
///
/// The builder holds no state between calls; one instance can serve any
/// number of templates, from any number of threads.
///
/// # Example
///
/// ```
/// use contract_map::SchemaBuilder;
/// use contract_model::NormalizerOptions;
/// use serde_json::json;
///
/// let builder = SchemaBuilder::new(NormalizerOptions::default());
/// let envelope = json!({"campi": {"Cognome": {"widget_kind": "TextField"}}});
/// let schema = builder.build_from_value(Some(&envelope));
/// assert_eq!(schema.fields[0].key, "cognome");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    options: NormalizerOptions,
}

impl SchemaBuilder {
    pub fn new(options: NormalizerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &NormalizerOptions {
        &self.options
    }

    /// Builds a schema from an optional envelope value.
    ///
    /// Never fails: undecodable or empty envelopes yield the fallback schema.
    pub fn build_from_value(&self, input: Option<&Value>) -> FormSchema {
        self.build_decoded(decode_envelope(input))
    }

    /// Builds a schema from serialized envelope text.
    pub fn build_from_str(&self, text: &str) -> FormSchema {
        self.build_decoded(decode_envelope_str(text))
    }

    fn build_decoded(&self, decoded: Result<FieldEnvelope, EnvelopeError>) -> FormSchema {
        match decoded {
            Ok(envelope) => self.build(&envelope),
            Err(error) => {
                let reason = error.fallback_reason();
                if reason == FallbackReason::DecodeFailure {
                    tracing::warn!(%error, "using fallback form schema");
                } else {
                    tracing::info!(%error, "using fallback form schema");
                }
                self.fallback(reason)
            }
        }
    }

    /// Builds a schema from an already decoded envelope.
    pub fn build(&self, envelope: &FieldEnvelope) -> FormSchema {
        let selection_fields = envelope.selection_names();
        let text_entries: Vec<&RawFieldEntry> = envelope
            .fields
            .iter()
            .filter(|entry| !entry.widget_kind.is_selection())
            .collect();

        if text_entries.is_empty() {
            tracing::info!(
                template = envelope.template.as_deref().unwrap_or("-"),
                selection_count = selection_fields.len(),
                "template has no text fields, using fallback form schema"
            );
            let mut schema = self.fallback(FallbackReason::EmptyFieldSet);
            schema.selection_fields = selection_fields;
            schema.template_version = envelope.version.clone();
            return schema;
        }

        let mut registry = KeyRegistry::new();
        let fields = self.normalize(&text_entries, &mut registry);
        tracing::debug!(
            template = envelope.template.as_deref().unwrap_or("-"),
            field_count = fields.len(),
            selection_count = selection_fields.len(),
            key_collisions = registry.collisions(),
            "built form schema"
        );

        FormSchema {
            fields,
            selection_fields,
            origin: SchemaOrigin::Extracted,
            template_version: envelope.version.clone(),
        }
    }

    /// The built-in five-field schema.
    pub fn fallback(&self, reason: FallbackReason) -> FormSchema {
        let entries: Vec<RawFieldEntry> = FALLBACK_FIELDS
            .iter()
            .enumerate()
            .map(|(index, (name, max_length))| {
                let entry = RawFieldEntry::text(index, *name);
                match max_length {
                    Some(len) => entry.with_max_length(*len),
                    None => entry,
                }
            })
            .collect();
        let refs: Vec<&RawFieldEntry> = entries.iter().collect();
        let mut fields = self.normalize(&refs, &mut KeyRegistry::new());
        for field in &mut fields {
            field.required = true;
        }
        FormSchema {
            fields,
            selection_fields: Vec::new(),
            origin: SchemaOrigin::Fallback(reason),
            template_version: None,
        }
    }

    fn normalize(
        &self,
        entries: &[&RawFieldEntry],
        registry: &mut KeyRegistry,
    ) -> Vec<NormalizedFormField> {
        let mut fields: Vec<(bool, NormalizedFormField)> = entries
            .iter()
            .map(|entry| {
                let field = self.normalize_entry(entry, registry);
                (entry_is_duplicate(entry), field)
            })
            .collect();
        // Stable: equal keys keep extraction order.
        fields.sort_by_key(|(duplicate, field)| (field.category.rank(), *duplicate));
        fields.into_iter().map(|(_, field)| field).collect()
    }

    fn normalize_entry(
        &self,
        entry: &RawFieldEntry,
        registry: &mut KeyRegistry,
    ) -> NormalizedFormField {
        let (candidate, generic_key) = derive_key(&entry.original_name, entry.index);
        let key = registry.claim(candidate);
        let facts = FieldFacts::from_entry(entry, generic_key, &self.options);
        let input_kind = infer_input_kind(&facts);

        NormalizedFormField {
            key,
            source_name: entry.original_name.clone(),
            label: entry
                .ai_label
                .as_deref()
                .map(str::trim)
                .filter(|label| !label.is_empty())
                .unwrap_or(&entry.original_name)
                .to_string(),
            input_kind,
            required: infer_required(&facts),
            max_length: entry.max_length.unwrap_or(self.options.default_max_length),
            placeholder: infer_placeholder(&facts, input_kind),
            hint: infer_hint(&facts, entry.ai_description.as_deref()),
            category: classify_category(&facts, entry.ai_category.as_deref()),
        }
    }
}

fn entry_is_duplicate(entry: &RawFieldEntry) -> bool {
    crate::utils::duplicate_marker(&entry.original_name).is_some()
}
