use super::digits;

/// ATO weights across all eleven ABN digits.
pub const ABN_WEIGHTS: [u32; 11] = [10, 1, 3, 5, 7, 9, 11, 13, 15, 17, 19];

/// Australian Business Number check: subtract 1 from the first digit,
/// weight all eleven digits, valid iff the sum is a multiple of 89.
pub fn abn_valid(number: &str) -> bool {
    let Some(d) = digits::<11>(number) else {
        return false;
    };
    // The first term may go negative when the leading digit is 0.
    let sum: i64 = d
        .iter()
        .zip(ABN_WEIGHTS)
        .enumerate()
        .map(|(idx, (&digit, weight))| {
            let digit = i64::from(digit) - i64::from(idx == 0);
            digit * i64::from(weight)
        })
        .sum();
    sum.rem_euclid(89) == 0
}
