//! # vatcheck
//!
//! Two-stage validation of VAT-style business identifiers: a per-country
//! format and checksum check, followed by an optional lookup against an
//! authoritative registry (EU VIES) with cache-assisted fallback.
//!
//! Every call resolves to a [`ValidationResult`]. Transport faults,
//! unsupported countries and malformed input are all reported in the
//! payload rather than as Rust errors.
//!
//! ## Quick Start
//!
//! ```rust
//! use vatcheck::checksum::luhn_valid;
//! use vatcheck::validators::ValidatorRegistry;
//!
//! let registry = ValidatorRegistry::offline();
//! let validator = registry.create_validator("IT").unwrap();
//!
//! assert!(validator.validate_format("IT00743110157"));
//! assert!(!validator.validate_format("IT00743110158"));
//! assert!(luhn_valid("00743110157"));
//! assert!(registry.is_country_supported("NO"));
//! assert!(!registry.is_country_supported("ZZ"));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `vies` (default) | HTTP transports: VIES REST and generic JSON registry |
//! | `rates` (default) | Embedded VAT rates table |
//! | `all` | Everything |

pub mod checker;
pub mod checksum;
pub mod core;
pub mod external;
pub mod validators;

#[cfg(feature = "rates")]
pub mod rates;

pub use crate::checker::VatChecker;
pub use crate::core::*;
