//! Tests for terminal rendering.

use serde_json::json;

use contract_cli::render::{categories_table, issues_table, schema_table};
use contract_map::{build_form_schema, validate_values};

#[test]
fn schema_table_lists_every_field() {
    let envelope = json!({
        "campi": {
            "Cognome": {"tipo": "PDFTextField"},
            "IBAN": {"tipo": "PDFTextField", "max_length": 27},
            "Privacy": {"tipo": "PDFCheckBox"}
        }
    });
    let schema = build_form_schema(Some(&envelope));
    let rendered = schema_table(&schema).to_string();

    assert!(rendered.contains("cognome"));
    assert!(rendered.contains("iban"));
    assert!(rendered.contains("anagrafica"));
    assert!(rendered.contains("pagamento"));
    assert!(!rendered.contains("Privacy"));
}

#[test]
fn categories_table_follows_precedence() {
    let rendered = categories_table().to_string();
    let anagrafica = rendered.find("anagrafica").expect("anagrafica listed");
    let altro = rendered.find("altro").expect("altro listed");
    assert!(anagrafica < altro);
    assert!(rendered.contains("dati_tecnici"));
}

#[test]
fn issues_table_names_offending_keys() {
    let schema = build_form_schema(None);
    let values = std::collections::BTreeMap::from([("email".to_string(), "nope".to_string())]);
    let issues = validate_values(&values, &schema.fields);
    let rendered = issues_table(&issues).to_string();
    assert!(rendered.contains("codice_fiscale"));
    assert!(rendered.contains("not a valid email address"));
}
