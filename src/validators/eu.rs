//! EU member states, verified through VIES.

use async_trait::async_trait;
use regex::Regex;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use super::VatValidator;
use crate::checksum::luhn_valid;
use crate::core::{Identifier, VerificationPayload, clean_vat_number, split_prefix};
use crate::external::VerificationClient;

/// National-number grammar per member state, as published for VIES.
///
/// Greece uses its VIES prefix `EL`, not the ISO code `GR`.
pub const EU_PATTERNS: &[(&str, &str)] = &[
    ("AT", r"U[A-Z\d]{8}"),
    ("BE", r"(0\d{9}|\d{10})"),
    ("BG", r"\d{9,10}"),
    ("CY", r"\d{8}[A-Z]"),
    ("CZ", r"\d{8,10}"),
    ("DE", r"\d{9}"),
    ("DK", r"(\d{2} ?){3}\d{2}"),
    ("EE", r"\d{9}"),
    ("EL", r"\d{9}"),
    ("ES", r"[A-Z]\d{7}[A-Z]|\d{8}[A-Z]|[A-Z]\d{8}"),
    ("FI", r"\d{8}"),
    ("FR", r"([A-Z]{2}|\d{2})\d{9}"),
    ("HR", r"\d{11}"),
    ("HU", r"\d{8}"),
    ("IE", r"[A-Z\d]{8}|[A-Z\d]{9}"),
    ("IT", r"\d{11}"),
    ("LT", r"(\d{9}|\d{12})"),
    ("LU", r"\d{8}"),
    ("LV", r"\d{11}"),
    ("MT", r"\d{8}"),
    ("NL", r"\d{9}B\d{2}"),
    ("PL", r"\d{10}"),
    ("PT", r"\d{9}"),
    ("RO", r"\d{2,10}"),
    ("SE", r"\d{12}"),
    ("SI", r"\d{8}"),
    ("SK", r"\d{10}"),
];

static EU_CODES: LazyLock<Vec<&'static str>> =
    LazyLock::new(|| EU_PATTERNS.iter().map(|(code, _)| *code).collect());

static EU_GRAMMARS: LazyLock<HashMap<&'static str, Regex>> = LazyLock::new(|| {
    EU_PATTERNS
        .iter()
        .map(|(code, pattern)| {
            let anchored = format!("^(?:{pattern})$");
            let regex = Regex::new(&anchored).expect("EU grammar is a valid regex");
            (*code, regex)
        })
        .collect()
});

/// Validator for the whole EU member-state table.
///
/// Italy additionally runs the Luhn-variant checksum. External validation
/// goes through the attached [`VerificationClient`]; without one the
/// validator answers "not verified externally".
#[derive(Clone, Default)]
pub struct EuValidator {
    client: Option<Arc<VerificationClient>>,
}

impl EuValidator {
    /// Validator whose external checks go through `client`.
    pub fn new(client: Arc<VerificationClient>) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// Format checks only; no remote lookup.
    pub fn offline() -> Self {
        Self { client: None }
    }

    /// All member-state prefixes, in table order.
    pub fn supported_countries() -> &'static [&'static str] {
        &EU_CODES
    }
}

impl std::fmt::Debug for EuValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EuValidator")
            .field("online", &self.client.is_some())
            .finish()
    }
}

#[async_trait]
impl VatValidator for EuValidator {
    fn country_codes(&self) -> &[&'static str] {
        &EU_CODES
    }

    fn lists_supported_countries(&self) -> bool {
        true
    }

    fn supports(&self, country_code: &str) -> bool {
        EU_GRAMMARS.contains_key(country_code.to_ascii_uppercase().as_str())
    }

    fn validate_format(&self, vat_number: &str) -> bool {
        let cleaned = clean_vat_number(vat_number);
        let (country, number) = split_prefix(&cleaned);
        let Some(grammar) = EU_GRAMMARS.get(country) else {
            return false;
        };
        if !grammar.is_match(number) {
            return false;
        }
        if country == "IT" {
            return luhn_valid(number);
        }
        true
    }

    async fn validate_external(&self, vat_number: &str) -> VerificationPayload {
        let identifier = Identifier::parse(vat_number);
        match &self.client {
            Some(client) => client.check(&identifier).await,
            None => VerificationPayload::not_verified(&identifier),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(vat: &str) -> bool {
        EuValidator::offline().validate_format(vat)
    }

    #[test]
    fn table_has_all_member_states() {
        assert_eq!(EuValidator::supported_countries().len(), 27);
        assert_eq!(EuValidator::supported_countries()[0], "AT");
        assert!(EuValidator::supported_countries().contains(&"EL"));
        assert!(!EuValidator::supported_countries().contains(&"GR"));
    }

    #[test]
    fn supports_table_codes() {
        let v = EuValidator::offline();
        assert!(v.supports("DE"));
        assert!(!v.supports("GB"));
        assert!(!v.supports("ZZ"));
    }

    #[test]
    fn supports_ignores_case() {
        let v = EuValidator::offline();
        assert!(v.supports("de"));
        assert!(v.supports("El"));
        assert!(!v.supports("gb"));
        assert!(!v.supports("ZZ"));
    }

    #[test]
    fn italian_luhn() {
        assert!(fmt("IT00743110157"));
        assert!(fmt(" it01114601006 "));
        assert!(!fmt("IT00743110158"));
        assert!(!fmt("IT0074311015"));
    }

    #[test]
    fn grammar_only_members() {
        assert!(fmt("DE123456789"));
        assert!(fmt("ATU12345678"));
        assert!(fmt("NL123456789B01"));
        assert!(fmt("FRAB123456789"));
        assert!(fmt("FR12345678901"));
        assert!(fmt("ESX1234567X"));
        assert!(fmt("ES12345678Z"));
        assert!(fmt("CY12345678L"));
        assert!(fmt("RO12"));
        assert!(fmt("IE1234567WA"));
    }

    #[test]
    fn grammar_rejects() {
        assert!(!fmt("DE12345678"));
        assert!(!fmt("DE1234567890"));
        assert!(!fmt("AT12345678"));
        assert!(!fmt("NL123456789A01"));
        assert!(!fmt("RO1"));
        assert!(!fmt("CY123456789"));
    }

    #[test]
    fn denmark_allows_spaced_pairs() {
        assert!(fmt("DK12345678"));
        assert!(fmt("DK12 34 56 78"));
        assert!(!fmt("DK12  34 56 78"));
    }

    #[test]
    fn belgium_ten_digits() {
        assert!(fmt("BE0123456789"));
        assert!(fmt("BE1234567890"));
        assert!(!fmt("BE123456789"));
    }

    #[test]
    fn alternation_is_anchored() {
        // Without grouping, `^A|B$` would accept a prefix match.
        assert!(!fmt("ESX1234567X99"));
        assert!(!fmt("LT1234567890"));
    }

    #[tokio::test]
    async fn offline_external_not_verified() {
        let p = EuValidator::offline()
            .validate_external("DE123456789")
            .await;
        assert!(!p.valid);
        assert!(!p.is_error);
        assert_eq!(p.details["countryCode"], "DE");
    }
}
