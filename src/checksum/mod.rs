//! Pure check-digit algorithms.
//!
//! Every function fails closed: input with a non-digit character or the
//! wrong length is reported invalid, never a panic.

mod luhn;
mod mod11;
mod mod89;
mod mod97;

pub use luhn::{luhn_sum, luhn_valid};
pub use mod11::{
    MOD11_CH_WEIGHTS, MOD11_NO_WEIGHTS, mod11_check_digit, mod11_ch_valid, mod11_no_valid,
    mod11_valid,
};
pub use mod89::{ABN_WEIGHTS, abn_valid};
pub use mod97::{HMRC_WEIGHTS, Mod97Branch, hmrc_branch, hmrc_valid};

/// Parse exactly `N` ASCII digits.
pub(crate) fn digits<const N: usize>(s: &str) -> Option<[u32; N]> {
    let bytes = s.as_bytes();
    if bytes.len() != N {
        return None;
    }
    let mut out = [0u32; N];
    for (slot, &b) in out.iter_mut().zip(bytes) {
        if !b.is_ascii_digit() {
            return None;
        }
        *slot = u32::from(b - b'0');
    }
    Some(out)
}

/// Σ weight·digit over paired slices.
pub(crate) fn weighted_sum(digits: &[u32], weights: &[u32]) -> u32 {
    digits.iter().zip(weights).map(|(d, w)| d * w).sum()
}
