//! Raw fields as extracted from a supplier PDF template.

use serde::{Deserialize, Serialize};
use std::fmt;

/// PDF widget type of an extracted field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WidgetKind {
    TextField,
    CheckBox,
    RadioGroup,
    /// Unrecognised or missing widget type; rendered as a text input.
    #[default]
    Unknown,
}

impl WidgetKind {
    /// Parses the widget spellings emitted by common PDF form extractors.
    ///
    /// Matching ignores case. Anything unrecognised maps to [`WidgetKind::Unknown`].
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "textfield" | "pdftextfield" | "text" | "/tx" | "tx" => WidgetKind::TextField,
            "checkbox" | "pdfcheckbox" | "/btn" | "btn" => WidgetKind::CheckBox,
            "radiogroup" | "pdfradiogroup" | "radio" | "radiobutton" => WidgetKind::RadioGroup,
            _ => WidgetKind::Unknown,
        }
    }

    /// True for widgets that are toggled rather than typed into.
    pub fn is_selection(self) -> bool {
        matches!(self, WidgetKind::CheckBox | WidgetKind::RadioGroup)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WidgetKind::TextField => "TextField",
            WidgetKind::CheckBox => "CheckBox",
            WidgetKind::RadioGroup => "RadioGroup",
            WidgetKind::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One fillable field found in a template, with optional annotations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFieldEntry {
    /// 0-based position of the entry in the envelope's insertion order.
    pub index: usize,
    /// Exact field identifier inside the PDF form.
    pub original_name: String,
    pub widget_kind: WidgetKind,
    /// Character cap declared by the PDF field, if any.
    pub max_length: Option<u32>,
    /// Human readable name from the annotation pass.
    pub ai_label: Option<String>,
    /// Category tag from the annotation pass (free text, validated later).
    pub ai_category: Option<String>,
    /// Contextual hint from the annotation pass.
    pub ai_description: Option<String>,
}

impl RawFieldEntry {
    pub fn new(index: usize, original_name: impl Into<String>, widget_kind: WidgetKind) -> Self {
        Self {
            index,
            original_name: original_name.into(),
            widget_kind,
            max_length: None,
            ai_label: None,
            ai_category: None,
            ai_description: None,
        }
    }

    /// Shorthand for a plain text field.
    pub fn text(index: usize, original_name: impl Into<String>) -> Self {
        Self::new(index, original_name, WidgetKind::TextField)
    }

    #[must_use]
    pub fn with_max_length(mut self, max_length: u32) -> Self {
        self.max_length = Some(max_length);
        self
    }

    #[must_use]
    pub fn with_ai_label(mut self, label: impl Into<String>) -> Self {
        self.ai_label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_ai_category(mut self, category: impl Into<String>) -> Self {
        self.ai_category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_ai_description(mut self, description: impl Into<String>) -> Self {
        self.ai_description = Some(description.into());
        self
    }
}

/// Decoded field envelope for one contract template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEnvelope {
    /// Version tag of the analysis that produced the envelope.
    pub version: Option<String>,
    /// Source template file name, when the extractor recorded it.
    pub template: Option<String>,
    /// Entries in original insertion order.
    pub fields: Vec<RawFieldEntry>,
}

impl FieldEnvelope {
    pub fn new(fields: Vec<RawFieldEntry>) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    /// Names of toggle widgets that cannot be filled with text.
    pub fn selection_names(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|entry| entry.widget_kind.is_selection())
            .map(|entry| entry.original_name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widget_parse_accepts_extractor_spellings() {
        assert_eq!(WidgetKind::parse("PDFTextField"), WidgetKind::TextField);
        assert_eq!(WidgetKind::parse("/Tx"), WidgetKind::TextField);
        assert_eq!(WidgetKind::parse("checkbox"), WidgetKind::CheckBox);
        assert_eq!(WidgetKind::parse("RadioGroup"), WidgetKind::RadioGroup);
        assert_eq!(WidgetKind::parse("PDFSignature"), WidgetKind::Unknown);
        assert_eq!(WidgetKind::parse(""), WidgetKind::Unknown);
    }

    #[test]
    fn selection_kinds() {
        assert!(WidgetKind::CheckBox.is_selection());
        assert!(WidgetKind::RadioGroup.is_selection());
        assert!(!WidgetKind::TextField.is_selection());
        assert!(!WidgetKind::Unknown.is_selection());
    }

    #[test]
    fn selection_names_keep_envelope_order() {
        let envelope = FieldEnvelope::new(vec![
            RawFieldEntry::new(0, "Privacy", WidgetKind::CheckBox),
            RawFieldEntry::text(1, "Nome"),
            RawFieldEntry::new(2, "Tipo Richiesta", WidgetKind::RadioGroup),
        ]);
        assert_eq!(envelope.selection_names(), vec!["Privacy", "Tipo Richiesta"]);
    }
}
