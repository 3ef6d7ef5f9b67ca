//! Text helpers shared by key derivation and the heuristic rules.

/// Replaces accented vowels with their ASCII base letter.
///
/// Only the vowel classes are folded; other non-ASCII letters are left
/// for the caller to strip.
pub fn fold_accents(raw: &str) -> String {
    raw.chars()
        .map(|ch| match ch {
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
            'è' | 'é' | 'ê' | 'ë' => 'e',
            'ì' | 'í' | 'î' | 'ï' => 'i',
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
            'ù' | 'ú' | 'û' | 'ü' => 'u',
            other => other,
        })
        .collect()
}

/// Lowercased, trimmed form of a field name used by every heuristic.
pub fn normalize_name(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// True when `name` contains any of `needles`.
pub fn contains_any(name: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| name.contains(needle))
}

/// True when `token` appears as a whole alphanumeric word of `name`.
pub fn has_token(name: &str, token: &str) -> bool {
    name.split(|ch: char| !ch.is_alphanumeric())
        .any(|word| word == token)
}

/// Trailing duplicate marker of a field name.
///
/// Returns `N` for names ending in `_N` with `N >= 2`, e.g. `Cognome_2`.
/// `_1` and `_0` are not markers: extractors use them for first occurrences.
pub fn duplicate_marker(name: &str) -> Option<u32> {
    let trimmed = name.trim();
    let (_, suffix) = trimmed.rsplit_once('_')?;
    if suffix.is_empty() || !suffix.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    suffix.parse::<u32>().ok().filter(|n| *n >= 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_each_vowel_class() {
        assert_eq!(fold_accents("àáâãäå"), "aaaaaa");
        assert_eq!(fold_accents("città è più così però"), "citta e piu cosi pero");
        assert_eq!(fold_accents("ç°"), "ç°");
    }

    #[test]
    fn duplicate_marker_reads_trailing_number() {
        assert_eq!(duplicate_marker("Cognome_2"), Some(2));
        assert_eq!(duplicate_marker("Indirizzo_3 "), Some(3));
        assert_eq!(duplicate_marker("Cognome_1"), None);
        assert_eq!(duplicate_marker("Cognome"), None);
        assert_eq!(duplicate_marker("Nome_2_bis"), None);
        assert_eq!(duplicate_marker("Campo_"), None);
    }

    #[test]
    fn token_match_ignores_substrings() {
        assert!(has_token("via e civico", "via"));
        assert!(has_token("indirizzo (via)", "via"));
        assert!(!has_token("invia modulo", "via"));
    }
}
