//! Normalized key derivation.

use std::collections::BTreeSet;

use crate::utils::fold_accents;

/// Candidate key for a field name, before collision handling.
///
/// The boolean is true when the name had too little usable text and the
/// positional `campo_N` name (1-based) was used instead.
pub fn derive_key(original_name: &str, index: usize) -> (String, bool) {
    let key: String = fold_accents(&underscore_whitespace(&original_name.to_lowercase()))
        .chars()
        .filter(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || *ch == '_')
        .collect();

    if key.chars().count() < 2 {
        return (format!("campo_{}", index + 1), true);
    }
    if key.starts_with(|ch: char| ch.is_ascii_digit()) {
        return (format!("field_{key}"), false);
    }
    (key, false)
}

/// Replaces every whitespace run, leading and trailing ones included, with one `_`.
fn underscore_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !in_run {
                out.push('_');
            }
            in_run = true;
        } else {
            out.push(ch);
            in_run = false;
        }
    }
    out
}

/// Keys already handed out while building one schema.
#[derive(Debug, Default)]
pub struct KeyRegistry {
    seen: BTreeSet<String>,
    collisions: usize,
}

impl KeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves `candidate`, appending `_1`, `_2`, ... until it is unused.
    pub fn claim(&mut self, candidate: String) -> String {
        if !self.seen.contains(&candidate) {
            self.seen.insert(candidate.clone());
            return candidate;
        }
        self.collisions += 1;
        let mut suffix = 1usize;
        loop {
            let attempt = format!("{candidate}_{suffix}");
            if !self.seen.contains(&attempt) {
                tracing::trace!(candidate = %candidate, key = %attempt, "resolved key collision");
                self.seen.insert(attempt.clone());
                return attempt;
            }
            suffix += 1;
        }
    }

    /// Number of candidates that needed a suffix.
    pub fn collisions(&self) -> usize {
        self.collisions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_underscores_whitespace() {
        assert_eq!(derive_key("Codice Fiscale", 0), ("codice_fiscale".to_string(), false));
        assert_eq!(derive_key("Data   di \t Nascita", 0).0, "data_di_nascita");
        assert_eq!(derive_key("Nome ", 0).0, "nome_");
        assert_eq!(derive_key("  Cognome", 0).0, "_cognome");
    }

    #[test]
    fn folds_accents_and_strips_symbols() {
        assert_eq!(derive_key("Località", 0).0, "localita");
        assert_eq!(derive_key("Nr. Civico (Residenza)", 0).0, "nr_civico_residenza");
        assert_eq!(derive_key("E-mail", 0).0, "email");
    }

    #[test]
    fn leading_digit_gets_prefix() {
        assert_eq!(derive_key("3° Livello", 4), ("field_3_livello".to_string(), false));
    }

    #[test]
    fn unusable_names_fall_back_to_position() {
        assert_eq!(derive_key("???", 0), ("campo_1".to_string(), true));
        assert_eq!(derive_key("x", 6), ("campo_7".to_string(), true));
        assert_eq!(derive_key("", 2), ("campo_3".to_string(), true));
    }

    #[test]
    fn registry_suffixes_collisions() {
        let mut registry = KeyRegistry::new();
        assert_eq!(registry.claim("nome".to_string()), "nome");
        assert_eq!(registry.claim("nome".to_string()), "nome_1");
        assert_eq!(registry.claim("nome".to_string()), "nome_2");
        assert_eq!(registry.claim("nome_2".to_string()), "nome_2_1");
        assert_eq!(registry.collisions(), 3);
    }
}
