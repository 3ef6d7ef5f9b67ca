//! Heuristic rule tables.
//!
//! Every table is evaluated top to bottom against [`FieldFacts`] and the
//! first matching rule wins. Rules only look at the lowercased original
//! field name and the facts derived from it, never at user values.

use contract_model::{Category, InputKind, NormalizerOptions, RawFieldEntry, RequiredDuplicateMode};

use crate::utils::{contains_any, duplicate_marker, has_token, normalize_name};

pub const SAMPLE_EMAIL: &str = "mario.rossi@example.com";
pub const SAMPLE_PHONE: &str = "3331234567";
pub const SAMPLE_POD: &str = "IT001E12345678";
pub const SAMPLE_IBAN: &str = "IT60X0542811101000000123456";
pub const DATE_FORMAT: &str = "dd/mm/yyyy";

const IDENTITY_TERMS: &[&str] = &[
    "nome",
    "cognome",
    "codice fiscale",
    "codice_fiscale",
    "fiscale",
    "nato",
    "nata",
    "nascita",
    "sesso",
    "documento",
    "identit",
    "passaporto",
    "patente",
    "rilasciat",
    "cittadinanza",
    "ragione sociale",
    "partita iva",
    "p.iva",
];
const CONTACT_TERMS: &[&str] = &["telefon", "cellul", "email", "e-mail", "pec", "fax", "recapito"];
const ADDRESS_TERMS: &[&str] = &[
    "indirizzo",
    "civico",
    "comune",
    "cap",
    "provincia",
    "localit",
    "residen",
    "toponimo",
    "frazione",
];
const TECHNICAL_TERMS: &[&str] = &[
    "pod",
    "pdr",
    "consum",
    "potenza",
    "kw",
    "contatore",
    "matricola",
    "tensione",
    "smc",
    "remi",
];
const OFFER_TERMS: &[&str] = &["offerta", "listino", "tariffa", "prezzo", "promo"];
const PAYMENT_TERMS: &[&str] = &[
    "iban",
    "banca",
    "bic",
    "swift",
    "intestatario",
    "titolare conto",
    "conto corrente",
    "sepa",
    "pagamento",
    "sottoscrittore",
];
const DATE_TERMS: &[&str] = &["data", "date", "attivazione", "decorrenza", "scadenza"];
const AGENCY_TERMS: &[&str] = &["agente", "agenzia", "venditore", "consulente"];
const DATE_PREFIXES: &[&str] = &["data", "dt_", "gg"];

/// Name-derived facts every rule table reads.
#[derive(Debug, Clone)]
pub struct FieldFacts {
    /// Lowercased, trimmed original name.
    pub name: String,
    /// Declared length cap, if any.
    pub max_length: Option<u32>,
    /// Trailing duplicate marker (`_2`, `_3`, ...).
    pub duplicate: Option<u32>,
    /// Declared length exceeds the textarea threshold.
    pub long_text: bool,
    /// The "and not a duplicate" guard of the required rules applies.
    pub duplicate_guard: bool,
    /// Key fell back to the positional `campo_N` form.
    pub generic_key: bool,
}

impl FieldFacts {
    pub fn from_entry(entry: &RawFieldEntry, generic_key: bool, options: &NormalizerOptions) -> Self {
        let name = normalize_name(&entry.original_name);
        let duplicate = duplicate_marker(&entry.original_name);
        let duplicate_guard = match options.required_duplicates {
            RequiredDuplicateMode::SecondOnly => name.contains("_2"),
            RequiredDuplicateMode::AnyDuplicate => name.contains("_2") || duplicate.is_some(),
        };
        Self {
            long_text: entry
                .max_length
                .is_some_and(|len| len > options.textarea_min_length),
            max_length: entry.max_length,
            duplicate,
            duplicate_guard,
            generic_key,
            name,
        }
    }

    fn has_any(&self, terms: &[&str]) -> bool {
        contains_any(&self.name, terms)
    }

    fn is_address(&self) -> bool {
        self.has_any(ADDRESS_TERMS) || has_token(&self.name, "via")
    }
}

/// A named predicate selecting a fixed value.
pub struct Rule<T> {
    pub name: &'static str,
    pub matches: fn(&FieldFacts) -> bool,
    pub value: T,
}

fn first_match<T: Copy>(rules: &[Rule<T>], facts: &FieldFacts) -> Option<T> {
    rules.iter().find(|rule| (rule.matches)(facts)).map(|rule| {
        tracing::trace!(field = %facts.name, rule = rule.name, "rule matched");
        rule.value
    })
}

pub static INPUT_KIND_RULES: &[Rule<InputKind>] = &[
    Rule {
        name: "email",
        matches: |f| f.has_any(&["email", "e-mail", "pec"]),
        value: InputKind::Email,
    },
    Rule {
        name: "phone",
        matches: |f| f.has_any(&["telefon", "cellul"]),
        value: InputKind::Tel,
    },
    Rule {
        name: "date",
        matches: |f| f.has_any(&["data", "nato", "date", "gg/mm"]),
        value: InputKind::Date,
    },
    Rule {
        name: "long_text",
        matches: |f| f.name.contains("note") || f.long_text,
        value: InputKind::Textarea,
    },
];

pub fn infer_input_kind(facts: &FieldFacts) -> InputKind {
    first_match(INPUT_KIND_RULES, facts).unwrap_or(InputKind::Text)
}

pub static REQUIRED_RULES: &[Rule<bool>] = &[
    Rule {
        name: "first_name",
        matches: |f| f.name.contains("nome") && !f.duplicate_guard,
        value: true,
    },
    Rule {
        name: "last_name",
        matches: |f| f.name.contains("cognome") && !f.duplicate_guard,
        value: true,
    },
    Rule {
        name: "tax_code",
        matches: |f| f.has_any(&["codice fiscale", "codice_fiscale"]),
        value: true,
    },
    Rule {
        name: "address",
        matches: |f| f.name.contains("indirizzo") && !f.duplicate_guard,
        value: true,
    },
    Rule {
        name: "municipality",
        matches: |f| f.name.contains("comune") && !f.duplicate_guard,
        value: true,
    },
    Rule {
        name: "postcode",
        matches: |f| f.name.contains("cap") && !f.duplicate_guard,
        value: true,
    },
    Rule {
        name: "email",
        matches: |f| f.name.contains("email"),
        value: true,
    },
    Rule {
        name: "phone",
        matches: |f| f.name.contains("telefono"),
        value: true,
    },
];

pub fn infer_required(facts: &FieldFacts) -> bool {
    first_match(REQUIRED_RULES, facts).unwrap_or(false)
}

/// Placeholder rules; each returns the text when it applies.
pub static PLACEHOLDER_RULES: &[fn(&FieldFacts, InputKind) -> Option<String>] = &[
    |f, _| {
        f.max_length
            .filter(|len| (1..=4).contains(len))
            .map(|len| format!("Max {len} characters"))
    },
    |_, kind| (kind == InputKind::Date).then(|| DATE_FORMAT.to_string()),
    |_, kind| (kind == InputKind::Email).then(|| SAMPLE_EMAIL.to_string()),
    |_, kind| (kind == InputKind::Tel).then(|| SAMPLE_PHONE.to_string()),
    |f, _| f.name.contains("fiscale").then(|| "16 characters".to_string()),
    |f, _| f.name.contains("pod").then(|| SAMPLE_POD.to_string()),
    |f, _| f.name.contains("pdr").then(|| "14 digits".to_string()),
    |f, _| f.name.contains("iban").then(|| SAMPLE_IBAN.to_string()),
];

pub fn infer_placeholder(facts: &FieldFacts, kind: InputKind) -> String {
    PLACEHOLDER_RULES
        .iter()
        .find_map(|rule| rule(facts, kind))
        .unwrap_or_default()
}

pub static HINT_RULES: &[Rule<&str>] = &[
    Rule {
        name: "co_holder",
        matches: |f| f.duplicate == Some(2) && f.has_any(IDENTITY_TERMS),
        value: "Co-holder data (second holder)",
    },
    Rule {
        name: "supply_address",
        matches: |f| f.duplicate == Some(2) && f.is_address(),
        value: "Supply address, if different from residence",
    },
    Rule {
        name: "supply_data",
        matches: |f| f.duplicate == Some(2) && f.has_any(TECHNICAL_TERMS),
        value: "Supply point data",
    },
    Rule {
        name: "second_offer",
        matches: |f| f.duplicate == Some(2) && f.has_any(OFFER_TERMS),
        value: "Offer data for the second supply",
    },
    Rule {
        name: "additional",
        matches: |f| f.duplicate.is_some_and(|n| n >= 3),
        value: "Additional field (repeated block)",
    },
    Rule {
        name: "date_prefix",
        matches: |f| DATE_PREFIXES.iter().any(|prefix| f.name.starts_with(prefix)),
        value: "Date in dd/mm/yyyy format",
    },
    Rule {
        name: "generic",
        matches: |f| f.generic_key,
        value: "Generic field: verify on the source document",
    },
];

/// Annotation text when present and non-blank, else the first hint rule.
pub fn infer_hint(facts: &FieldFacts, ai_description: Option<&str>) -> String {
    if let Some(description) = ai_description.filter(|d| !d.trim().is_empty()) {
        return description.to_string();
    }
    first_match(HINT_RULES, facts)
        .map(str::to_string)
        .unwrap_or_default()
}

pub static CATEGORY_RULES: &[Rule<Category>] = &[
    Rule {
        name: "identity",
        matches: |f| f.has_any(IDENTITY_TERMS),
        value: Category::Anagrafica,
    },
    Rule {
        name: "contacts",
        matches: |f| f.has_any(CONTACT_TERMS),
        value: Category::Contatti,
    },
    Rule {
        name: "residence",
        matches: |f| f.is_address() && f.duplicate.is_none() && !f.name.contains("fornitura"),
        value: Category::Residenza,
    },
    Rule {
        name: "supply_address",
        matches: |f| f.is_address(),
        value: Category::Fornitura,
    },
    Rule {
        name: "technical",
        matches: |f| f.has_any(TECHNICAL_TERMS),
        value: Category::DatiTecnici,
    },
    Rule {
        name: "offer",
        matches: |f| f.has_any(OFFER_TERMS),
        value: Category::Offerta,
    },
    Rule {
        name: "payment",
        matches: |f| f.has_any(PAYMENT_TERMS),
        value: Category::Pagamento,
    },
    Rule {
        name: "dates",
        matches: |f| f.has_any(DATE_TERMS),
        value: Category::Date,
    },
    Rule {
        name: "agency",
        matches: |f| f.has_any(AGENCY_TERMS),
        value: Category::Agenzia,
    },
    Rule {
        name: "notes",
        matches: |f| f.name.contains("note"),
        value: Category::Note,
    },
];

/// Annotated category when it is part of the vocabulary, else the rules.
pub fn classify_category(facts: &FieldFacts, ai_category: Option<&str>) -> Category {
    if let Some(category) = ai_category.and_then(Category::parse) {
        return category;
    }
    first_match(CATEGORY_RULES, facts).unwrap_or(Category::Altro)
}
