//! Single-jurisdiction validators outside the EU.

use async_trait::async_trait;
use regex::Regex;
use std::fmt;
use std::sync::{Arc, LazyLock};

use super::{VatValidator, only_digits, strip_separators};
use crate::checksum::{abn_valid, hmrc_valid, mod11_ch_valid, mod11_no_valid};
use crate::core::{Identifier, VerificationPayload, clean_vat_number, split_prefix};
use crate::external::VerificationClient;

static GB_SPECIAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(GD|HA)(\d{3})$").expect("valid GB special regex"));
static GB_STANDARD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{9})(\d{3})?$").expect("valid GB standard regex"));
static CH_UID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^E?(\d{9})(MWST|TVA|IVA)?$").expect("valid CH regex"));
static NO_ORGNR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{9})(MVA)?$").expect("valid NO regex"));
static CA_BN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{9}(RT\d{4})?$").expect("valid CA regex"));

/// Non-EU jurisdictions with a dedicated validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Jurisdiction {
    /// United Kingdom: 9 or 12 digits with the HMRC MOD-97 check, or a
    /// `GD`/`HA` code for government departments and health authorities.
    Gb,
    /// Switzerland: UID with MOD-11, optional `E` and `MWST|TVA|IVA` suffix.
    Ch,
    /// Norway: organisation number with MOD-11, optional `MVA` suffix.
    No,
    /// Australia: 11-digit ABN with the MOD-89 check.
    Au,
    /// Canada: 9-digit business number, optional `RTnnnn` program account.
    Ca,
    /// New Zealand: 8 or 9 digit GST number, length check only.
    Nz,
}

impl Jurisdiction {
    /// Every jurisdiction, in default registration order.
    pub const ALL: [Self; 6] = [Self::Gb, Self::Ch, Self::No, Self::Au, Self::Ca, Self::Nz];

    /// The two-letter prefix.
    pub fn code(self) -> &'static str {
        self.codes()[0]
    }

    fn codes(self) -> &'static [&'static str] {
        match self {
            Self::Gb => &["GB"],
            Self::Ch => &["CH"],
            Self::No => &["NO"],
            Self::Au => &["AU"],
            Self::Ca => &["CA"],
            Self::Nz => &["NZ"],
        }
    }

    /// Validate the national number (the part after the prefix).
    pub fn validate_number(self, number: &str) -> bool {
        match self {
            Self::Gb => validate_gb(&strip_separators(number)),
            Self::Ch => validate_core(&CH_UID, &strip_separators(number), mod11_ch_valid),
            Self::No => validate_core(&NO_ORGNR, &strip_separators(number), mod11_no_valid),
            Self::Au => abn_valid(&only_digits(number)),
            Self::Ca => {
                let compact: String = number.chars().filter(|c| !c.is_whitespace()).collect();
                CA_BN.is_match(&compact)
            }
            Self::Nz => matches!(only_digits(number).len(), 8 | 9),
        }
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Match `grammar`, then run `checksum` on its first capture group.
fn validate_core(grammar: &Regex, number: &str, checksum: fn(&str) -> bool) -> bool {
    grammar
        .captures(number)
        .and_then(|caps| caps.get(1))
        .is_some_and(|core| checksum(core.as_str()))
}

fn validate_gb(number: &str) -> bool {
    if let Some(caps) = GB_SPECIAL.captures(number) {
        let (Some(kind), Some(digits)) = (caps.get(1), caps.get(2)) else {
            return false;
        };
        let Ok(n) = digits.as_str().parse::<u16>() else {
            return false;
        };
        return match kind.as_str() {
            "GD" => (1..500).contains(&n),
            _ => (500..=999).contains(&n),
        };
    }
    validate_core(&GB_STANDARD, number, hmrc_valid)
}

/// Validator for one [`Jurisdiction`].
///
/// Only attach a client where the jurisdiction has a registry to ask;
/// otherwise external validation answers "not verified externally".
#[derive(Clone)]
pub struct NationalValidator {
    jurisdiction: Jurisdiction,
    client: Option<Arc<VerificationClient>>,
}

impl NationalValidator {
    /// Format-only validator.
    pub fn new(jurisdiction: Jurisdiction) -> Self {
        Self {
            jurisdiction,
            client: None,
        }
    }

    /// Validator whose external checks go through `client`.
    pub fn with_client(jurisdiction: Jurisdiction, client: Arc<VerificationClient>) -> Self {
        Self {
            jurisdiction,
            client: Some(client),
        }
    }

    /// The jurisdiction handled.
    pub fn jurisdiction(&self) -> Jurisdiction {
        self.jurisdiction
    }
}

impl fmt::Debug for NationalValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NationalValidator")
            .field("jurisdiction", &self.jurisdiction)
            .field("online", &self.client.is_some())
            .finish()
    }
}

#[async_trait]
impl VatValidator for NationalValidator {
    fn country_codes(&self) -> &[&'static str] {
        self.jurisdiction.codes()
    }

    fn validate_format(&self, vat_number: &str) -> bool {
        let cleaned = clean_vat_number(vat_number);
        let (country, number) = split_prefix(&cleaned);
        self.supports(country) && self.jurisdiction.validate_number(number)
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

    fn fmt(j: Jurisdiction, vat: &str) -> bool {
        NationalValidator::new(j).validate_format(vat)
    }

    #[test]
    fn gb_standard_and_branch() {
        assert!(fmt(Jurisdiction::Gb, "GB980780684"));
        assert!(fmt(Jurisdiction::Gb, "GB 980 7806 84"));
        assert!(fmt(Jurisdiction::Gb, "GB980780684001"));
        assert!(fmt(Jurisdiction::Gb, "GB100000034"));
        assert!(!fmt(Jurisdiction::Gb, "GB980780685"));
        assert!(!fmt(Jurisdiction::Gb, "GB98078068400"));
    }

    #[test]
    fn gb_government_departments() {
        assert!(fmt(Jurisdiction::Gb, "GBGD001"));
        assert!(fmt(Jurisdiction::Gb, "GBGD499"));
        assert!(!fmt(Jurisdiction::Gb, "GBGD000"));
        assert!(!fmt(Jurisdiction::Gb, "GBGD500"));
    }

    #[test]
    fn gb_health_authorities() {
        assert!(fmt(Jurisdiction::Gb, "GBHA500"));
        assert!(fmt(Jurisdiction::Gb, "gbha999"));
        assert!(!fmt(Jurisdiction::Gb, "GBHA499"));
    }

    #[test]
    fn ch_uid_forms() {
        assert!(fmt(Jurisdiction::Ch, "CHE-116.281.710"));
        assert!(fmt(Jurisdiction::Ch, "CHE116281710MWST"));
        assert!(fmt(Jurisdiction::Ch, "CHE-116.281.710 TVA"));
        assert!(fmt(Jurisdiction::Ch, "CH116281710IVA"));
        assert!(!fmt(Jurisdiction::Ch, "CHE-116.281.711"));
        assert!(!fmt(Jurisdiction::Ch, "CHE116281710VAT"));
    }

    #[test]
    fn no_orgnr() {
        assert!(fmt(Jurisdiction::No, "NO923609016"));
        assert!(fmt(Jurisdiction::No, "NO 923 609 016 MVA"));
        assert!(!fmt(Jurisdiction::No, "NO923609017"));
        assert!(!fmt(Jurisdiction::No, "NO92360901"));
    }

    #[test]
    fn au_abn() {
        assert!(fmt(Jurisdiction::Au, "AU51824753556"));
        assert!(fmt(Jurisdiction::Au, "AU 51 824 753 556"));
        assert!(!fmt(Jurisdiction::Au, "AU51824753557"));
    }

    #[test]
    fn ca_business_number() {
        assert!(fmt(Jurisdiction::Ca, "CA123456789"));
        assert!(fmt(Jurisdiction::Ca, "ca 123456789 rt0001"));
        assert!(!fmt(Jurisdiction::Ca, "CA123456789RC0001"));
        assert!(!fmt(Jurisdiction::Ca, "CA12345678"));
    }

    #[test]
    fn nz_length_only() {
        assert!(fmt(Jurisdiction::Nz, "NZ12345678"));
        assert!(fmt(Jurisdiction::Nz, "NZ123-456-789"));
        assert!(!fmt(Jurisdiction::Nz, "NZ1234567"));
        assert!(!fmt(Jurisdiction::Nz, "NZ1234567890"));
    }

    #[test]
    fn wrong_prefix_rejected() {
        assert!(!fmt(Jurisdiction::No, "SE923609016"));
        assert!(!fmt(Jurisdiction::Gb, "XI980780684"));
    }

    #[test]
    fn codes_and_display() {
        let codes: Vec<_> = Jurisdiction::ALL.iter().map(|j| j.code()).collect();
        assert_eq!(codes, ["GB", "CH", "NO", "AU", "CA", "NZ"]);
        assert_eq!(Jurisdiction::Ch.to_string(), "CH");
    }
}
