use super::{digits, weighted_sum};

/// HMRC weights over all nine digits of a GB VAT number.
pub const HMRC_WEIGHTS: [u32; 9] = [8, 7, 6, 5, 4, 3, 2, 10, 1];

/// Which accepted range a GB number falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mod97Branch {
    /// `sum % 97 == 0` (numbers issued before 2010).
    Primary,
    /// `(sum + 55) % 97 == 0` (the newer "9755" range).
    Secondary,
}

/// Classify a 9-digit GB number, or `None` if it fails both ranges.
pub fn hmrc_branch(number: &str) -> Option<Mod97Branch> {
    let d = digits::<9>(number)?;
    let sum = weighted_sum(&d, &HMRC_WEIGHTS);
    if sum % 97 == 0 {
        Some(Mod97Branch::Primary)
    } else if (sum + 55) % 97 == 0 {
        Some(Mod97Branch::Secondary)
    } else {
        None
    }
}

/// Valid iff the number is in either accepted range.
pub fn hmrc_valid(number: &str) -> bool {
    hmrc_branch(number).is_some()
}
