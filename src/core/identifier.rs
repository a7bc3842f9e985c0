use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalize a raw VAT identifier: trim surrounding whitespace, uppercase.
///
/// Idempotent: `clean_vat_number(&clean_vat_number(x)) == clean_vat_number(x)`.
pub fn clean_vat_number(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// The first two characters of the cleaned identifier.
///
/// No check is made that the prefix is a real country code; an unknown
/// prefix is rejected later by the registry.
pub fn extract_country_code(raw: &str) -> String {
    let cleaned = clean_vat_number(raw);
    let (country, _) = split_prefix(&cleaned);
    country.to_string()
}

/// Split a cleaned identifier after its second character.
///
/// Works on character boundaries, so multi-byte input never panics.
pub(crate) fn split_prefix(cleaned: &str) -> (&str, &str) {
    let at = cleaned
        .char_indices()
        .nth(2)
        .map_or(cleaned.len(), |(idx, _)| idx);
    cleaned.split_at(at)
}

/// A VAT identifier split into jurisdiction prefix and national number.
///
/// Invariant: `normalized == country_code + national_number`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identifier {
    /// Input exactly as supplied by the caller.
    pub raw: String,
    /// Trimmed, uppercased form.
    pub normalized: String,
    /// First two characters of `normalized` (e.g. "IT").
    pub country_code: String,
    /// Everything after the prefix.
    pub national_number: String,
}

impl Identifier {
    /// Normalize and split a raw identifier. Never fails.
    pub fn parse(raw: &str) -> Self {
        let normalized = clean_vat_number(raw);
        let (country, number) = split_prefix(&normalized);
        Self {
            raw: raw.to_string(),
            country_code: country.to_string(),
            national_number: number.to_string(),
            normalized,
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized)
    }
}
