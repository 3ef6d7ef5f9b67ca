//! Configuration options for field normalization.

use serde::{Deserialize, Serialize};

/// Which duplicate markers suppress the "required" heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RequiredDuplicateMode {
    /// Only names carrying `_2` are exempted.
    SecondOnly,
    /// Names containing `_2`, or ending in any marker `_N` with N >= 2, are exempted.
    #[default]
    AnyDuplicate,
}

/// Options controlling how raw fields become form fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerOptions {
    /// Length cap used when the PDF field declares none.
    pub default_max_length: u32,

    /// Declared lengths above this value render as a textarea.
    pub textarea_min_length: u32,

    /// Duplicate handling for the required-field heuristic.
    pub required_duplicates: RequiredDuplicateMode,
}

impl Default for NormalizerOptions {
    fn default() -> Self {
        Self {
            default_max_length: 9999,
            textarea_min_length: 100,
            required_duplicates: RequiredDuplicateMode::AnyDuplicate,
        }
    }
}

impl NormalizerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options reproducing the literal `_2`-only required guard.
    pub fn second_only() -> Self {
        Self {
            required_duplicates: RequiredDuplicateMode::SecondOnly,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_default_max_length(mut self, max_length: u32) -> Self {
        self.default_max_length = max_length;
        self
    }

    #[must_use]
    pub fn with_textarea_min_length(mut self, min_length: u32) -> Self {
        self.textarea_min_length = min_length;
        self
    }
}
