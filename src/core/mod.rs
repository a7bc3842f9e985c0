//! Core value types: identifiers, validation results, configuration and errors.
//!
//! These types carry no I/O. The validators, the verification client and
//! the [`VatChecker`](crate::VatChecker) all speak in terms of them.

mod config;
mod error;
mod identifier;
mod result;

pub use config::*;
pub use error::*;
pub use identifier::*;
pub use result::*;
