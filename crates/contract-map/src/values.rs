//! Mapping user-entered values back to the template's field names.

use std::collections::{BTreeMap, HashMap};

use contract_model::{InputKind, NormalizedFormField, ValueIssue, ValueIssueKind};

/// Re-keys form values by original PDF field name.
///
/// Values under keys the schema does not know are forwarded unchanged. When
/// such a key equals the original name of a schema field, the schema field's
/// value is kept and the stray one is reported at `warn` level.
pub fn map_values_to_source<I, K, V>(
    values: I,
    fields: &[NormalizedFormField],
) -> BTreeMap<String, V>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
{
    let sources: HashMap<&str, &str> = fields
        .iter()
        .map(|field| (field.key.as_str(), field.source_name.as_str()))
        .collect();

    let mut mapped = BTreeMap::new();
    let mut passthrough = Vec::new();
    for (key, value) in values {
        let key = key.as_ref();
        match sources.get(key) {
            Some(source) => {
                mapped.insert((*source).to_string(), value);
            }
            None => {
                tracing::debug!(key, "forwarding value for key outside the schema");
                passthrough.push((key.to_string(), value));
            }
        }
    }
    for (key, value) in passthrough {
        if mapped.contains_key(&key) {
            tracing::warn!(key = %key, "unknown key shadows a schema field name, keeping schema value");
            continue;
        }
        mapped.insert(key, value);
    }
    mapped
}

/// Checks entered values against the schema's constraints.
///
/// Issues follow schema field order. Keys outside the schema are ignored.
pub fn validate_values<V>(
    values: &BTreeMap<String, V>,
    fields: &[NormalizedFormField],
) -> Vec<ValueIssue>
where
    V: AsRef<str>,
{
    let mut issues = Vec::new();
    for field in fields {
        let value = values
            .get(&field.key)
            .map(|value| value.as_ref().trim())
            .unwrap_or_default();
        let issue = if value.is_empty() {
            field.required.then_some(ValueIssueKind::MissingRequired)
        } else if value.chars().count() > field.max_length as usize {
            Some(ValueIssueKind::TooLong {
                max: field.max_length,
                actual: value.chars().count(),
            })
        } else if field.input_kind == InputKind::Email && !is_plausible_email(value) {
            Some(ValueIssueKind::InvalidEmail)
        } else {
            None
        };
        if let Some(kind) = issue {
            issues.push(ValueIssue {
                key: field.key.clone(),
                kind,
            });
        }
    }
    issues
}

fn is_plausible_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
