use std::collections::HashMap;
use std::sync::Arc;

use super::{EuValidator, Jurisdiction, NationalValidator, VatValidator};
use crate::external::VerificationClient;

/// Ordered collection of validators with a code index built at
/// registration time.
///
/// When two validators claim the same code, the one registered first
/// keeps it.
#[derive(Default)]
pub struct ValidatorRegistry {
    validators: Vec<Box<dyn VatValidator>>,
    index: HashMap<String, usize>,
}

impl ValidatorRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default set: the EU group first, then one validator per non-EU
    /// jurisdiction. `eu_client` serves VIES lookups, `ch_client` the
    /// optional Swiss registry.
    pub fn with_defaults(
        eu_client: Option<Arc<VerificationClient>>,
        ch_client: Option<Arc<VerificationClient>>,
    ) -> Self {
        let mut registry = Self::new();
        registry.register(eu_client.map_or_else(EuValidator::offline, EuValidator::new));
        for jurisdiction in Jurisdiction::ALL {
            let validator = match (&ch_client, jurisdiction) {
                (Some(client), Jurisdiction::Ch) => {
                    NationalValidator::with_client(jurisdiction, Arc::clone(client))
                }
                _ => NationalValidator::new(jurisdiction),
            };
            registry.register(validator);
        }
        registry
    }

    /// Default set with no remote lookups at all.
    pub fn offline() -> Self {
        Self::with_defaults(None, None)
    }

    /// Append a validator. Codes already claimed stay with their
    /// earlier owner.
    pub fn register<V: VatValidator + 'static>(&mut self, validator: V) -> &mut Self {
        let slot = self.validators.len();
        for code in validator.country_codes() {
            let claimed = self.index.entry(code.to_ascii_uppercase()).or_insert(slot);
            if *claimed != slot {
                tracing::debug!(
                    country_code = code,
                    "country code already claimed by an earlier validator"
                );
            }
        }
        self.validators.push(Box::new(validator));
        self
    }

    /// The validator handling `country_code`, if any. Case-insensitive.
    pub fn create_validator(&self, country_code: &str) -> Option<&dyn VatValidator> {
        let slot = *self.index.get(&country_code.to_ascii_uppercase())?;
        self.validators.get(slot).map(|v| v.as_ref())
    }

    /// Whether any validator handles `country_code`.
    pub fn is_country_supported(&self, country_code: &str) -> bool {
        self.create_validator(country_code).is_some()
    }

    /// Codes advertised by validators that opt into the listing (by
    /// default only the EU group), in registration order, deduplicated.
    ///
    /// Single-jurisdiction validators remain resolvable through
    /// [`create_validator`](Self::create_validator) but are not listed
    /// here; see [`resolvable_countries`](Self::resolvable_countries).
    pub fn supported_countries(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for validator in self.validators.iter().filter(|v| v.lists_supported_countries()) {
            for code in validator.country_codes() {
                if !out.iter().any(|c| c == code) {
                    out.push((*code).to_string());
                }
            }
        }
        out
    }

    /// Every code the registry resolves, sorted.
    pub fn resolvable_countries(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.index.keys().cloned().collect();
        codes.sort();
        codes
    }

    /// Number of registered validators.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl std::fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("validators", &self.validators.len())
            .field("codes", &self.index.len())
            .finish()
    }
}
