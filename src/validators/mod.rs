//! Country validators and the registry that resolves them.
//!
//! Each validator pairs a format grammar with at most one checksum and
//! knows whether its jurisdiction has a live registry lookup. The
//! [`ValidatorRegistry`] maps a country prefix to the validator that
//! handles it.

mod eu;
mod national;
mod registry;

pub use eu::{EU_PATTERNS, EuValidator};
pub use national::{Jurisdiction, NationalValidator};
pub use registry::ValidatorRegistry;

use async_trait::async_trait;

use crate::core::{Identifier, VerificationPayload, clean_vat_number, extract_country_code};

/// Uniform contract every country validator fulfils.
///
/// Dispatch in the registry is by [`country_codes`](Self::country_codes);
/// `supports` must agree with it.
#[async_trait]
pub trait VatValidator: Send + Sync {
    /// Country prefixes this validator handles (uppercase).
    fn country_codes(&self) -> &[&'static str];

    /// Whether this validator's codes appear in the registry's
    /// [`supported_countries`](ValidatorRegistry::supported_countries) listing.
    fn lists_supported_countries(&self) -> bool {
        false
    }

    /// Whether `country_code` is handled here. Case-insensitive.
    fn supports(&self, country_code: &str) -> bool {
        self.country_codes()
            .iter()
            .any(|code| code.eq_ignore_ascii_case(country_code))
    }

    /// Grammar match AND checksum (when the jurisdiction has one).
    fn validate_format(&self, vat_number: &str) -> bool;

    /// Registry lookup. Jurisdictions without one answer "not verified
    /// externally": `valid = false`, `is_error = false`.
    async fn validate_external(&self, vat_number: &str) -> VerificationPayload {
        VerificationPayload::not_verified(&Identifier::parse(vat_number))
    }

    /// Trim and uppercase.
    fn clean_vat_number(&self, vat_number: &str) -> String {
        clean_vat_number(vat_number)
    }

    /// First two characters of the cleaned value.
    fn extract_country_code(&self, vat_number: &str) -> String {
        extract_country_code(vat_number)
    }
}

/// Remove the separators national conventions allow inside a number.
pub(crate) fn strip_separators(number: &str) -> String {
    number
        .chars()
        .filter(|c| !(c.is_whitespace() || *c == '.' || *c == '-'))
        .collect()
}

/// Keep only ASCII digits.
pub(crate) fn only_digits(number: &str) -> String {
    number.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    #[async_trait]
    impl VatValidator for Fixed {
        fn country_codes(&self) -> &[&'static str] {
            &["XX"]
        }

        fn validate_format(&self, vat_number: &str) -> bool {
            vat_number.len() == 5
        }
    }

    #[test]
    fn default_supports_is_case_insensitive() {
        assert!(Fixed.supports("XX"));
        assert!(Fixed.supports("xx"));
        assert!(!Fixed.supports("XY"));
    }

    #[test]
    fn default_helpers() {
        assert_eq!(Fixed.clean_vat_number(" xx123 "), "XX123");
        assert_eq!(Fixed.extract_country_code(" xx123 "), "XX");
        assert!(!Fixed.lists_supported_countries());
    }

    #[tokio::test]
    async fn default_external_is_not_verified() {
        let p = Fixed.validate_external("XX123").await;
        assert!(!p.valid);
        assert!(!p.is_error);
        assert!(p.error_description.is_none());
        assert_eq!(p.details["countryCode"], "XX");
        assert_eq!(p.details["nationalNumber"], "123");
    }

    #[test]
    fn separators() {
        assert_eq!(strip_separators("E-116.281 710"), "E116281710");
        assert_eq!(only_digits("51 824-753/556"), "51824753556");
    }
}
