use std::collections::BTreeMap;
use std::io::{self, Read};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use serde_json::Value;
use tracing::{info, info_span, trace};

use contract_cli::logging::redact_value;
use contract_cli::render::{categories_table, issues_table, print_schema};
use contract_map::{SchemaBuilder, map_values_to_source, validate_values};
use contract_model::{FormSchema, NormalizerOptions, RequiredDuplicateMode};

use crate::cli::{MapBackArgs, NormalizerArgs, SchemaArgs, SchemaFormatArg};

pub fn run_schema(args: &SchemaArgs) -> Result<()> {
    let span = info_span!("schema", envelope = %args.envelope.display());
    let _guard = span.enter();
    let schema = load_schema(&args.envelope, &args.normalizer)?;
    match args.format {
        SchemaFormatArg::Table => print_schema(&schema),
        SchemaFormatArg::Json => {
            let json = serde_json::to_string_pretty(&schema).context("serialize schema")?;
            println!("{json}");
        }
    }
    Ok(())
}

/// Returns false when `--check` found problems in the values.
pub fn run_map_back(args: &MapBackArgs) -> Result<bool> {
    let span = info_span!("map_back", envelope = %args.envelope.display());
    let _guard = span.enter();
    let schema = load_schema(&args.envelope, &args.normalizer)?;

    let text = read_input(&args.values)?;
    let values: BTreeMap<String, Value> = match serde_json::from_str(&text)
        .with_context(|| format!("parse values {}", args.values.display()))?
    {
        Value::Object(map) => map.into_iter().collect(),
        _ => bail!("values must be a JSON object of key to value"),
    };

    if args.check {
        let as_text: BTreeMap<String, String> = values
            .iter()
            .map(|(key, value)| (key.clone(), value_text(value)))
            .collect();
        let issues = validate_values(&as_text, &schema.fields);
        if !issues.is_empty() {
            eprintln!("{}", issues_table(&issues));
            info!(issue_count = issues.len(), "values failed schema checks");
            return Ok(false);
        }
    }

    let value_count = values.len();
    let mapped = map_values_to_source(values, &schema.fields);
    for (name, value) in &mapped {
        let text = value_text(value);
        trace!(field = %name, value = redact_value(&text), "mapped value");
    }
    info!(value_count, mapped_count = mapped.len(), "values mapped to template fields");
    let json = serde_json::to_string_pretty(&mapped).context("serialize mapped values")?;
    println!("{json}");
    Ok(true)
}

pub fn run_categories() {
    println!("{}", categories_table());
}

fn load_schema(path: &Path, normalizer: &NormalizerArgs) -> Result<FormSchema> {
    let start = Instant::now();
    let text = read_input(path)?;
    let builder = SchemaBuilder::new(normalizer_options(normalizer));
    let schema = match serde_json::from_str::<Value>(&text) {
        Ok(value) => builder.build_from_value(Some(&value)),
        Err(_) => builder.build_from_str(&text),
    };
    info!(
        field_count = schema.fields.len(),
        selection_count = schema.selection_fields.len(),
        fallback = schema.is_fallback(),
        duration_ms = start.elapsed().as_millis(),
        "schema built"
    );
    Ok(schema)
}

fn normalizer_options(args: &NormalizerArgs) -> NormalizerOptions {
    let mut options = NormalizerOptions::default();
    if let Some(max_length) = args.default_max_length {
        options = options.with_default_max_length(max_length);
    }
    if let Some(min_length) = args.textarea_min_length {
        options = options.with_textarea_min_length(min_length);
    }
    if args.second_duplicate_only {
        options.required_duplicates = RequiredDuplicateMode::SecondOnly;
    }
    options
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizer_flags_reach_options() {
        let args = NormalizerArgs {
            default_max_length: Some(80),
            textarea_min_length: Some(250),
            second_duplicate_only: true,
        };
        let options = normalizer_options(&args);
        assert_eq!(options.default_max_length, 80);
        assert_eq!(options.textarea_min_length, 250);
        assert_eq!(options.required_duplicates, RequiredDuplicateMode::SecondOnly);
    }

    #[test]
    fn absent_flags_keep_defaults() {
        let args = NormalizerArgs {
            default_max_length: None,
            textarea_min_length: None,
            second_duplicate_only: false,
        };
        let options = normalizer_options(&args);
        let defaults = NormalizerOptions::default();
        assert_eq!(options.default_max_length, defaults.default_max_length);
        assert_eq!(options.textarea_min_length, defaults.textarea_min_length);
        assert_eq!(options.required_duplicates, RequiredDuplicateMode::AnyDuplicate);
    }
}
