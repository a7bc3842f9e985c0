//! External verification: remote registry lookups with cache-assisted
//! resilience.
//!
//! A [`VerificationClient`] makes exactly one remote attempt per call. On
//! success it writes the answer to the cache. On failure it fires a
//! best-effort notification, then falls back to the last cached answer
//! (marked as an error) or to an explicit failure payload.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use vatcheck::core::{CacheConfig, Identifier};
//! use vatcheck::external::*;
//!
//! let transport = ViesRestTransport::new(&Default::default())?;
//! let client = VerificationClient::new(transport)
//!     .with_cache(Arc::new(MemoryCache::new()), CacheConfig::default());
//!
//! let payload = client.check(&Identifier::parse("IT00743110157")).await;
//! println!("valid = {}", payload.valid);
//! ```

mod cache;
mod client;
#[cfg(feature = "vies")]
mod http;
mod notify;
mod transport;

pub use cache::{CACHE_NAMESPACE, CacheEntry, CacheStore, MemoryCache, cache_key};
pub use client::VerificationClient;
#[cfg(feature = "vies")]
pub use http::{JsonRegistryTransport, ViesRestTransport};
pub use notify::{LogNotifier, NotificationEvent, Notifier};
pub use transport::{RemoteRecord, VerificationTransport};
