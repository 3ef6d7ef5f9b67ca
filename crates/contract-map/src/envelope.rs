//! Boundary decoding of the raw field envelope.
//!
//! The envelope reaches us either as a JSON object or as a JSON string that
//! holds the serialized object (as stored alongside templates). Fields live
//! under `campi`, keyed by their original PDF name, in extraction order.

use serde_json::{Map, Value};

use contract_model::{FieldEnvelope, RawFieldEntry, WidgetKind};

use crate::error::EnvelopeError;

const FIELD_MAP_KEY: &str = "campi";

// Accepted spellings per entry attribute, in lookup order.
const WIDGET_KIND_KEYS: &[&str] = &["widget_kind", "tipo", "type"];
const MAX_LENGTH_KEYS: &[&str] = &["max_length", "maxLength", "lunghezza_max"];
const LABEL_KEYS: &[&str] = &["ai_label", "nome_descrittivo"];
const CATEGORY_KEYS: &[&str] = &["ai_category", "categoria"];
const DESCRIPTION_KEYS: &[&str] = &["ai_description", "descrizione"];

/// Decodes an optional envelope value into typed field entries.
///
/// A JSON string is parsed once; the result must be an object.
pub fn decode_envelope(input: Option<&Value>) -> Result<FieldEnvelope, EnvelopeError> {
    match input {
        None | Some(Value::Null) => Err(EnvelopeError::Absent),
        Some(Value::String(text)) => decode_envelope_str(text),
        Some(value) => decode_object(value),
    }
}

/// Decodes a serialized envelope.
pub fn decode_envelope_str(text: &str) -> Result<FieldEnvelope, EnvelopeError> {
    if text.trim().is_empty() {
        return Err(EnvelopeError::Absent);
    }
    let value: Value = serde_json::from_str(text)?;
    decode_object(&value)
}

fn decode_object(value: &Value) -> Result<FieldEnvelope, EnvelopeError> {
    let object = value.as_object().ok_or(EnvelopeError::NotAnObject {
        found: json_kind(value),
    })?;
    let field_map = match object.get(FIELD_MAP_KEY) {
        None | Some(Value::Null) => return Err(EnvelopeError::MissingFieldMap),
        Some(Value::Object(map)) => map,
        Some(other) => {
            return Err(EnvelopeError::InvalidFieldMap {
                found: json_kind(other),
            });
        }
    };

    Ok(FieldEnvelope {
        version: first_scalar(object, &["versione", "version"]),
        template: first_scalar(object, &["nome_file", "template", "file"]),
        fields: field_map
            .iter()
            .enumerate()
            .map(|(index, (name, attributes))| decode_entry(index, name, attributes))
            .collect(),
    })
}

fn decode_entry(index: usize, name: &str, attributes: &Value) -> RawFieldEntry {
    let mut entry = RawFieldEntry::new(index, name, WidgetKind::Unknown);
    match attributes {
        // First usable spelling wins, per attribute.
        Value::Object(map) => {
            entry.widget_kind = first_scalar(map, WIDGET_KIND_KEYS)
                .as_deref()
                .map_or(WidgetKind::Unknown, WidgetKind::parse);
            entry.max_length = MAX_LENGTH_KEYS
                .iter()
                .filter_map(|key| map.get(*key))
                .find_map(lenient_length);
            entry.ai_label = first_scalar(map, LABEL_KEYS);
            entry.ai_category = first_scalar(map, CATEGORY_KEYS);
            entry.ai_description = first_scalar(map, DESCRIPTION_KEYS);
        }
        // Some extractors store just the widget type per name.
        Value::String(kind) => entry.widget_kind = WidgetKind::parse(kind),
        _ => tracing::debug!(field = name, "ignoring non-object field attributes"),
    }
    entry
}

fn first_scalar(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find_map(scalar_to_string)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn lenient_length(value: &Value) -> Option<u32> {
    let length = match value {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().filter(|n| *n >= 1.0).map(|n| n as u64)),
        Value::String(text) => text.trim().parse::<u64>().ok(),
        _ => None,
    };
    length
        .filter(|len| *len > 0)
        .map(|len| u32::try_from(len).unwrap_or(u32::MAX))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_object_in_insertion_order() {
        let value = json!({
            "versione": 2,
            "nome_file": "contratto_luce.pdf",
            "campi": {
                "Nome": {"tipo": "PDFTextField", "max_length": 40},
                "Cognome": {"widget_kind": "TextField", "nome_descrittivo": "Cognome titolare"},
                "Privacy": {"type": "PDFCheckBox"}
            }
        });
        let envelope = decode_envelope(Some(&value)).expect("decode envelope");
        assert_eq!(envelope.version.as_deref(), Some("2"));
        assert_eq!(envelope.template.as_deref(), Some("contratto_luce.pdf"));
        let names: Vec<&str> = envelope
            .fields
            .iter()
            .map(|f| f.original_name.as_str())
            .collect();
        assert_eq!(names, vec!["Nome", "Cognome", "Privacy"]);
        assert_eq!(envelope.fields[0].max_length, Some(40));
        assert_eq!(envelope.fields[1].ai_label.as_deref(), Some("Cognome titolare"));
        assert_eq!(envelope.fields[2].widget_kind, WidgetKind::CheckBox);
        assert_eq!(envelope.fields[2].index, 2);
    }

    #[test]
    fn decodes_serialized_string() {
        let value = Value::String(r#"{"campi": {"Email": {"tipo": "text"}}}"#.to_string());
        let envelope = decode_envelope(Some(&value)).expect("decode envelope");
        assert_eq!(envelope.fields.len(), 1);
        assert_eq!(envelope.fields[0].widget_kind, WidgetKind::TextField);
    }

    #[test]
    fn lenient_attribute_values() {
        let value = json!({
            "campi": {
                "CAP": {"max_length": "5", "categoria": null},
                "Zero": {"max_length": 0},
                "Only kind": "PDFRadioGroup",
                "Nothing": null
            }
        });
        let envelope = decode_envelope(Some(&value)).expect("decode envelope");
        assert_eq!(envelope.fields[0].max_length, Some(5));
        assert_eq!(envelope.fields[0].ai_category, None);
        assert_eq!(envelope.fields[1].max_length, None);
        assert_eq!(envelope.fields[2].widget_kind, WidgetKind::RadioGroup);
        assert_eq!(envelope.fields[3].widget_kind, WidgetKind::Unknown);
    }

    #[test]
    fn failures_map_to_fallback_reasons() {
        use contract_model::FallbackReason;

        let cases = [
            (None, FallbackReason::Absent),
            (Some(Value::Null), FallbackReason::Absent),
            (Some(Value::String("not json".into())), FallbackReason::DecodeFailure),
            (Some(json!([1, 2])), FallbackReason::DecodeFailure),
            (Some(json!({"campi": [1]})), FallbackReason::DecodeFailure),
            (Some(json!({"altro": {}})), FallbackReason::EmptyFieldSet),
        ];
        for (input, expected) in cases {
            let error = decode_envelope(input.as_ref()).expect_err("decode should fail");
            assert_eq!(error.fallback_reason(), expected, "{error}");
        }
    }

    #[test]
    fn repeated_attribute_spellings_keep_the_entry() {
        let value = json!({
            "campi": {
                "Nome": {"tipo": "PDFTextField"},
                "Privacy": {"tipo": "PDFCheckBox", "widget_kind": "CheckBox"},
                "Note": {"max_length": 250, "maxLength": "20", "descrizione": "Annotazioni"}
            }
        });
        let envelope = decode_envelope(Some(&value)).expect("decode envelope");
        assert_eq!(envelope.fields[1].widget_kind, WidgetKind::CheckBox);
        assert_eq!(envelope.selection_names(), vec!["Privacy"]);
        assert_eq!(envelope.fields[2].widget_kind, WidgetKind::Unknown);
        assert_eq!(envelope.fields[2].max_length, Some(250));
        assert_eq!(envelope.fields[2].ai_description.as_deref(), Some("Annotazioni"));
    }
}
