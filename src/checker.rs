//! The result assembler: registry lookup, format check, conditional
//! external check, normalized output.

use std::sync::Arc;
use std::time::Duration;

use crate::core::{CheckerConfig, Identifier, ValidationResult};
use crate::external::{CacheStore, Notifier, VerificationClient, VerificationTransport};
use crate::validators::{ValidatorRegistry, VatValidator};

#[cfg(feature = "vies")]
use crate::core::SetupError;
#[cfg(feature = "vies")]
use crate::external::{JsonRegistryTransport, LogNotifier, MemoryCache, ViesRestTransport};

/// Validates VAT identifiers end to end.
///
/// ```
/// use vatcheck::{CheckState, VatChecker};
///
/// let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
/// let checker = VatChecker::offline();
///
/// let result = rt.block_on(checker.check("ZZ123456789"));
/// assert_eq!(result.state(), CheckState::Unsupported);
///
/// let result = rt.block_on(checker.check("IT00743110158"));
/// assert_eq!(result.state(), CheckState::MalformedFormat);
/// ```
#[derive(Debug)]
pub struct VatChecker {
    registry: ValidatorRegistry,
}

impl VatChecker {
    /// Checker over an explicit registry.
    pub fn new(registry: ValidatorRegistry) -> Self {
        Self { registry }
    }

    /// Default validators, no remote lookups. Well-formed numbers come
    /// back as "not verified externally".
    pub fn offline() -> Self {
        Self::new(ValidatorRegistry::offline())
    }

    /// Default validators with the EU group verified through `transport`.
    ///
    /// Cache, notification and deadline policy come from `config`.
    pub fn with_transport<T: VerificationTransport + 'static>(
        config: &CheckerConfig,
        transport: T,
        cache: Arc<dyn CacheStore>,
        notifier: Option<Arc<dyn Notifier>>,
    ) -> Self {
        let eu = configured_client(config, transport, cache, notifier, config.vies.deadline());
        Self::new(ValidatorRegistry::with_defaults(Some(Arc::new(eu)), None))
    }

    /// Default validators with the VIES REST transport, an in-memory
    /// cache and failures reported through [`LogNotifier`].
    ///
    /// # Errors
    ///
    /// Returns a [`SetupError`] if an HTTP client cannot be built or the
    /// configuration is incomplete.
    #[cfg(feature = "vies")]
    pub fn from_config(config: &CheckerConfig) -> Result<Self, SetupError> {
        Self::from_config_with(config, Arc::new(MemoryCache::new()), Some(Arc::new(LogNotifier)))
    }

    /// Like [`from_config`](Self::from_config) with caller-supplied
    /// collaborators. When `config.ch.enabled` is set, Swiss numbers are
    /// verified through the configured JSON registry and share the same
    /// cache and notifier.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::Config`] if the Swiss registry is enabled
    /// without a URL, [`SetupError::Transport`] if an HTTP client cannot be
    /// built.
    #[cfg(feature = "vies")]
    pub fn from_config_with(
        config: &CheckerConfig,
        cache: Arc<dyn CacheStore>,
        notifier: Option<Arc<dyn Notifier>>,
    ) -> Result<Self, SetupError> {
        let vies = ViesRestTransport::new(&config.vies)?;
        let eu = configured_client(
            config,
            vies,
            Arc::clone(&cache),
            notifier.clone(),
            config.vies.deadline(),
        );

        let ch = if config.ch.enabled {
            let registry = JsonRegistryTransport::new(&config.ch)?;
            Some(Arc::new(configured_client(config, registry, cache, notifier, None)))
        } else {
            None
        };

        Ok(Self::new(ValidatorRegistry::with_defaults(Some(Arc::new(eu)), ch)))
    }

    /// Validate one identifier. Never fails: every outcome, including
    /// transport faults, is reported in the result.
    pub async fn check(&self, vat_number: &str) -> ValidationResult {
        let identifier = Identifier::parse(vat_number);

        let Some(validator) = self.registry.create_validator(&identifier.country_code) else {
            tracing::debug!(%identifier, "no validator for country");
            return ValidationResult::unsupported();
        };

        if !validator.validate_format(&identifier.normalized) {
            tracing::debug!(%identifier, "format check failed");
            return ValidationResult::malformed();
        }
        tracing::debug!(%identifier, "format check passed");

        let payload = validator.validate_external(&identifier.normalized).await;
        ValidationResult::from_external(payload)
    }

    /// Codes listed by the registry (the EU group).
    pub fn supported_countries(&self) -> Vec<String> {
        self.registry.supported_countries()
    }

    /// Whether any validator handles `country_code`.
    pub fn is_country_supported(&self, country_code: &str) -> bool {
        self.registry.is_country_supported(country_code)
    }

    /// Append a validator; codes already claimed keep their owner.
    pub fn register_validator<V: VatValidator + 'static>(&mut self, validator: V) -> &mut Self {
        self.registry.register(validator);
        self
    }

    /// The underlying registry.
    pub fn registry(&self) -> &ValidatorRegistry {
        &self.registry
    }
}

impl Default for VatChecker {
    fn default() -> Self {
        Self::offline()
    }
}

fn configured_client<T: VerificationTransport + 'static>(
    config: &CheckerConfig,
    transport: T,
    cache: Arc<dyn CacheStore>,
    notifier: Option<Arc<dyn Notifier>>,
    deadline: Option<Duration>,
) -> VerificationClient {
    let mut client = VerificationClient::new(transport).with_cache(cache, config.cache.clone());
    if let Some(notifier) = notifier {
        client = client.with_notifier(notifier, config.notifications.clone());
    }
    if let Some(deadline) = deadline {
        client = client.with_deadline(deadline);
    }
    client
}
