use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display grouping for contract form fields.
///
/// The variant order is the rendering order: [`Category::PRECEDENCE`] lists
/// the same variants and is the only table used for sorting, so the
/// annotation path and the heuristic path can never disagree on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Holder identity: names, tax code, identity documents.
    Anagrafica,
    /// Phone numbers, email and certified email (PEC).
    Contatti,
    /// Residence address of the holder.
    Residenza,
    /// Supply address, usually the duplicated address block.
    Fornitura,
    /// POD/PDR codes, consumption, power, meter data.
    DatiTecnici,
    /// Commercial offer codes and names.
    Offerta,
    /// IBAN, bank and account holder data.
    Pagamento,
    /// Signature, activation and other dates.
    Date,
    /// Selling agent and agency data.
    Agenzia,
    /// Free-text notes.
    Note,
    /// Anything the rules could not place.
    Altro,
}

impl Category {
    /// Rendering precedence, first group first.
    pub const PRECEDENCE: [Category; 11] = [
        Category::Anagrafica,
        Category::Contatti,
        Category::Residenza,
        Category::Fornitura,
        Category::DatiTecnici,
        Category::Offerta,
        Category::Pagamento,
        Category::Date,
        Category::Agenzia,
        Category::Note,
        Category::Altro,
    ];

    /// Position in [`Category::PRECEDENCE`].
    pub fn rank(self) -> usize {
        Self::PRECEDENCE
            .iter()
            .position(|category| *category == self)
            .unwrap_or(Self::PRECEDENCE.len())
    }

    /// Wire label, as found in annotation output and serialized schemas.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Anagrafica => "anagrafica",
            Category::Contatti => "contatti",
            Category::Residenza => "residenza",
            Category::Fornitura => "fornitura",
            Category::DatiTecnici => "dati_tecnici",
            Category::Offerta => "offerta",
            Category::Pagamento => "pagamento",
            Category::Date => "date",
            Category::Agenzia => "agenzia",
            Category::Note => "note",
            Category::Altro => "altro",
        }
    }

    /// Human readable group title.
    pub fn label(self) -> &'static str {
        match self {
            Category::Anagrafica => "Personal data",
            Category::Contatti => "Contacts",
            Category::Residenza => "Residence",
            Category::Fornitura => "Supply address",
            Category::DatiTecnici => "Technical data",
            Category::Offerta => "Offer",
            Category::Pagamento => "Payment",
            Category::Date => "Dates",
            Category::Agenzia => "Agency",
            Category::Note => "Notes",
            Category::Altro => "Other",
        }
    }

    /// Lenient lookup used for externally supplied category tags.
    ///
    /// Case-insensitive; spaces and hyphens count as underscores. Returns
    /// `None` for tags outside the vocabulary.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase().replace([' ', '-'], "_");
        Self::PRECEDENCE
            .iter()
            .copied()
            .find(|category| category.as_str() == normalized)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown category: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_matches_declaration_order() {
        let mut sorted = Category::PRECEDENCE;
        sorted.sort();
        assert_eq!(sorted, Category::PRECEDENCE);
        assert_eq!(Category::Anagrafica.rank(), 0);
        assert_eq!(Category::Altro.rank(), 10);
    }

    #[test]
    fn parse_is_lenient_about_case_and_separators() {
        assert_eq!(Category::parse("Dati Tecnici"), Some(Category::DatiTecnici));
        assert_eq!(Category::parse(" dati-tecnici "), Some(Category::DatiTecnici));
        assert_eq!(Category::parse("ANAGRAFICA"), Some(Category::Anagrafica));
        assert_eq!(Category::parse("misc"), None);
        assert_eq!(Category::parse(""), None);
    }

    #[test]
    fn serializes_as_wire_label() {
        for category in Category::PRECEDENCE {
            let json = serde_json::to_string(&category).expect("serialize category");
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
    }
}
