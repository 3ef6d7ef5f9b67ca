//! Tests for contract-model types.

use contract_model::{
    Category, FallbackReason, FormSchema, InputKind, NormalizedFormField, SchemaOrigin,
    ValueIssue, ValueIssueKind,
};

fn field(key: &str, source: &str, category: Category, required: bool) -> NormalizedFormField {
    NormalizedFormField {
        key: key.to_string(),
        source_name: source.to_string(),
        label: source.to_string(),
        input_kind: InputKind::Text,
        required,
        max_length: 9999,
        placeholder: String::new(),
        hint: String::new(),
        category,
    }
}

fn sample_schema() -> FormSchema {
    FormSchema {
        fields: vec![
            field("nome", "Nome", Category::Anagrafica, true),
            field("cognome", "Cognome", Category::Anagrafica, true),
            field("email", "E-mail", Category::Contatti, true),
            field("note", "Note", Category::Note, false),
        ],
        selection_fields: vec!["Privacy".to_string()],
        origin: SchemaOrigin::Extracted,
        template_version: Some("2".to_string()),
    }
}

#[test]
fn reverse_map_covers_every_field() {
    let schema = sample_schema();
    let reverse = schema.reverse_map();
    assert_eq!(reverse.len(), schema.fields.len());
    assert_eq!(reverse.get("email"), Some(&"E-mail"));
}

#[test]
fn by_category_skips_empty_groups() {
    let schema = sample_schema();
    let groups = schema.by_category();
    let categories: Vec<Category> = groups.iter().map(|(category, _)| *category).collect();
    assert_eq!(
        categories,
        vec![Category::Anagrafica, Category::Contatti, Category::Note]
    );
    assert_eq!(groups[0].1.len(), 2);
    assert_eq!(groups[0].1[0].key, "nome");
}

#[test]
fn required_keys_and_lookup() {
    let schema = sample_schema();
    assert_eq!(schema.required_keys(), vec!["nome", "cognome", "email"]);
    assert_eq!(
        schema.field("note").map(|f| f.source_name.as_str()),
        Some("Note")
    );
    assert!(schema.field("missing").is_none());
    assert!(!schema.is_fallback());
}

#[test]
fn schema_serializes_with_wire_labels() {
    let mut schema = sample_schema();
    schema.origin = SchemaOrigin::Fallback(FallbackReason::DecodeFailure);
    let json = serde_json::to_value(&schema).expect("serialize schema");
    assert_eq!(json["fields"][2]["input_kind"], "text");
    assert_eq!(json["fields"][3]["category"], "note");
    assert_eq!(json["origin"]["kind"], "fallback");
    assert_eq!(json["origin"]["reason"], "decode_failure");

    let round: FormSchema = serde_json::from_value(json).expect("deserialize schema");
    assert_eq!(round, schema);
}

#[test]
fn value_issue_display() {
    let issue = ValueIssue {
        key: "cap".to_string(),
        kind: ValueIssueKind::TooLong { max: 5, actual: 7 },
    };
    assert_eq!(issue.to_string(), "cap: 7 characters exceeds limit of 5");
}
