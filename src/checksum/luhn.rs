/// Luhn-variant sum used for Italian VAT numbers.
///
/// Digits are read left to right; every odd position (0-indexed) is
/// doubled, and a doubled value above 9 becomes `1 + (value % 10)`.
/// Returns `None` for empty input or any non-digit character.
pub fn luhn_sum(number: &str) -> Option<u32> {
    if number.is_empty() {
        return None;
    }
    number.bytes().enumerate().try_fold(0u32, |sum, (idx, b)| {
        if !b.is_ascii_digit() {
            return None;
        }
        let mut value = u32::from(b - b'0');
        if idx % 2 == 1 {
            value *= 2;
            if value > 9 {
                value = 1 + value % 10;
            }
        }
        Some(sum + value)
    })
}

/// Valid iff the Luhn-variant sum is a multiple of 10.
pub fn luhn_valid(number: &str) -> bool {
    luhn_sum(number).is_some_and(|sum| sum % 10 == 0)
}
