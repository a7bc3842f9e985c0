use super::{digits, weighted_sum};

/// Swiss UID (eCH-0097) weights over the first 8 digits.
pub const MOD11_CH_WEIGHTS: [u32; 8] = [5, 4, 3, 2, 7, 6, 5, 4];

/// Norwegian organisation number weights over the first 8 digits.
pub const MOD11_NO_WEIGHTS: [u32; 8] = [3, 2, 7, 6, 5, 4, 3, 2];

/// Expected check digit for an 8-digit body, or `None` when no digit can
/// satisfy the checksum (`11 - remainder == 10`) or the body is malformed.
pub fn mod11_check_digit(body: &str, weights: &[u32; 8]) -> Option<u32> {
    let d = digits::<8>(body)?;
    let check = 11 - weighted_sum(&d, weights) % 11;
    match check {
        10 => None,
        11 => Some(0),
        c => Some(c),
    }
}

/// Validate a 9-digit number whose last digit is a MOD-11 check digit.
pub fn mod11_valid(number: &str, weights: &[u32; 8]) -> bool {
    let Some(d) = digits::<9>(number) else {
        return false;
    };
    let Some(body) = number.get(..8) else {
        return false;
    };
    mod11_check_digit(body, weights) == Some(d[8])
}

/// Swiss UID check (MOD-11 variant A).
pub fn mod11_ch_valid(number: &str) -> bool {
    mod11_valid(number, &MOD11_CH_WEIGHTS)
}

/// Norwegian organisation number check (MOD-11 variant B).
pub fn mod11_no_valid(number: &str) -> bool {
    mod11_valid(number, &MOD11_NO_WEIGHTS)
}
