use std::sync::Arc;
use std::time::Duration;

use super::cache::{CacheStore, cache_key};
use super::notify::{NotificationEvent, Notifier};
use super::transport::VerificationTransport;
use crate::core::{CacheConfig, Identifier, NotificationConfig, TransportError, VerificationPayload};

/// Remote lookup for one jurisdiction group, with cache-assisted
/// resilience.
///
/// - success: error flags cleared, payload written to the cache (when
///   caching is enabled);
/// - failure: a detached notification is fired (when enabled), then the
///   last cached payload is returned with `is_error` forced on, or an
///   explicit failure payload when nothing is cached.
///
/// Exactly one remote attempt per call. A cached success is never
/// discarded because of a later failure.
pub struct VerificationClient {
    transport: Box<dyn VerificationTransport>,
    cache: Option<Arc<dyn CacheStore>>,
    cache_policy: CacheConfig,
    notifier: Option<Arc<dyn Notifier>>,
    notifications: NotificationConfig,
    deadline: Option<Duration>,
}

impl VerificationClient {
    /// Client with no cache, no notifications and no extra deadline.
    pub fn new<T: VerificationTransport + 'static>(transport: T) -> Self {
        Self {
            transport: Box::new(transport),
            cache: None,
            cache_policy: CacheConfig {
                enabled: false,
                ..CacheConfig::default()
            },
            notifier: None,
            notifications: NotificationConfig::default(),
            deadline: None,
        }
    }

    /// Attach a cache store and its policy.
    pub fn with_cache(mut self, store: Arc<dyn CacheStore>, policy: CacheConfig) -> Self {
        self.cache = Some(store);
        self.cache_policy = policy;
        self
    }

    /// Attach a notification channel and its policy.
    pub fn with_notifier(
        mut self,
        notifier: Arc<dyn Notifier>,
        policy: NotificationConfig,
    ) -> Self {
        self.notifier = Some(notifier);
        self.notifications = policy;
        self
    }

    /// Bound the whole remote call. A breach is reported as
    /// [`TransportError::Timeout`] and handled like any other failure.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    fn cache(&self) -> Option<&dyn CacheStore> {
        if self.cache_policy.enabled {
            self.cache.as_deref()
        } else {
            None
        }
    }

    /// Verify `identifier` against the remote registry.
    pub async fn check(&self, identifier: &Identifier) -> VerificationPayload {
        let key = cache_key(&identifier.normalized);

        match self.lookup(identifier).await {
            Ok(record) => {
                let payload = record.into_payload();
                if let Some(cache) = self.cache() {
                    let map = payload.to_map();
                    match self.cache_policy.ttl() {
                        None => cache.put_forever(&key, map),
                        Some(ttl) => cache.put(&key, map, ttl.as_secs()),
                    }
                    tracing::debug!(%identifier, "cached verification result");
                }
                payload
            }
            Err(err) => {
                let message = err.to_string();
                tracing::warn!(%identifier, error = %message, "remote verification failed");
                self.dispatch_notification(identifier, &message);

                let cached = self.cache().and_then(|cache| cache.get(&key));
                match cached {
                    Some(entry) => {
                        tracing::info!(
                            %identifier,
                            cached_at = %entry.written_at,
                            "serving stale cached verification"
                        );
                        let mut payload = VerificationPayload::from_map(entry.payload);
                        payload.is_error = true;
                        payload.error_description = Some(message);
                        payload.cached_at = Some(entry.written_at);
                        payload
                    }
                    None => VerificationPayload::failure(message),
                }
            }
        }
    }

    async fn lookup(
        &self,
        identifier: &Identifier,
    ) -> Result<super::RemoteRecord, TransportError> {
        let call = self
            .transport
            .check_identifier(&identifier.country_code, &identifier.national_number);
        match self.deadline {
            Some(deadline) => tokio::time::timeout(deadline, call)
                .await
                .unwrap_or(Err(TransportError::Timeout(deadline))),
            None => call.await,
        }
    }

    /// Fire-and-forget: the task is detached and its outcome only logged.
    fn dispatch_notification(&self, identifier: &Identifier, message: &str) {
        if !self.notifications.is_active() {
            return;
        }
        let Some(notifier) = self.notifier.clone() else {
            return;
        };
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::debug!(%identifier, "no async runtime, failure notification skipped");
            return;
        };
        let recipients = self.notifications.recipients.clone();
        let subject = self.notifications.subject.clone();
        let event = NotificationEvent::new(identifier.normalized.clone(), message);
        runtime.spawn(async move {
            if let Err(err) = notifier.notify(&recipients, &subject, &event).await {
                tracing::debug!(
                    identifier = %event.identifier,
                    error = %err,
                    "failure notification not delivered"
                );
            }
        });
    }
}

impl std::fmt::Debug for VerificationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerificationClient")
            .field("cache_policy", &self.cache_policy)
            .field("has_cache", &self.cache.is_some())
            .field("notifications", &self.notifications)
            .field("deadline", &self.deadline)
            .finish()
    }
}
