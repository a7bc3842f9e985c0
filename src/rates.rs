//! Embedded VAT rates reference table.
//!
//! A small static subset (IT, DE, FR, GB, NO, CH). Rates are percentages.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// One rate with an optional scope note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rate {
    /// Percentage, e.g. `22` for 22 %.
    pub rate: Decimal,
    /// What the rate applies to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

const fn rate(rate: Decimal, note: &'static str) -> Rate {
    Rate {
        rate,
        note: Some(note),
    }
}

const fn bare(rate: Decimal) -> Rate {
    Rate { rate, note: None }
}

fn no_rates(band: &&[Rate]) -> bool {
    band.is_empty()
}

/// Rate bands of one country. Empty bands are not applicable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountryRates {
    /// Standard rate.
    pub standard: Rate,
    /// Reduced rates.
    #[serde(skip_serializing_if = "no_rates")]
    pub reduced: &'static [Rate],
    /// Super-reduced rates.
    #[serde(skip_serializing_if = "no_rates")]
    pub super_reduced: &'static [Rate],
    /// Special rates.
    #[serde(skip_serializing_if = "no_rates")]
    pub special: &'static [Rate],
    /// Zero rates.
    #[serde(skip_serializing_if = "no_rates")]
    pub zero: &'static [Rate],
}

const RATES: &[(&str, CountryRates)] = &[
    (
        "IT",
        CountryRates {
            standard: rate(dec!(22), "Standard"),
            reduced: &[
                rate(dec!(10), "Food, restaurants"),
                rate(dec!(5), "Specific goods/services"),
            ],
            super_reduced: &[rate(dec!(4), "Books, medical devices")],
            special: &[],
            zero: &[rate(dec!(0), "Exports, intra-EU supply")],
        },
    ),
    (
        "DE",
        CountryRates {
            standard: rate(dec!(19), "Standard"),
            reduced: &[rate(dec!(7), "Food, books, transport")],
            super_reduced: &[],
            special: &[],
            zero: &[rate(dec!(0), "Exports")],
        },
    ),
    (
        "FR",
        CountryRates {
            standard: bare(dec!(20)),
            reduced: &[
                rate(dec!(10), "Food services"),
                rate(dec!(5.5), "Basic necessities"),
            ],
            super_reduced: &[rate(dec!(2.1), "Press, medicines")],
            special: &[],
            zero: &[bare(dec!(0))],
        },
    ),
    (
        "GB",
        CountryRates {
            standard: bare(dec!(20)),
            reduced: &[rate(dec!(5), "Home energy, child car seats")],
            super_reduced: &[],
            special: &[],
            zero: &[rate(dec!(0), "Food, children clothing")],
        },
    ),
    (
        "NO",
        CountryRates {
            standard: bare(dec!(25)),
            reduced: &[
                rate(dec!(15), "Food"),
                rate(dec!(12), "Passenger transport, cinema"),
            ],
            super_reduced: &[],
            special: &[],
            zero: &[bare(dec!(0))],
        },
    ),
    (
        "CH",
        CountryRates {
            standard: bare(dec!(8.1)),
            reduced: &[rate(dec!(2.6), "Food, books")],
            super_reduced: &[],
            special: &[rate(dec!(3.8), "Accommodation (special)")],
            zero: &[bare(dec!(0))],
        },
    ),
];

/// Answer of [`get_rates`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatesLookup {
    /// The requested code, uppercased.
    pub country_code: String,
    /// Whether the table has the country.
    pub found: bool,
    /// The country's bands, when found.
    pub rates: Option<CountryRates>,
}

/// Codes present in the table, in table order.
pub fn list_countries() -> Vec<&'static str> {
    RATES.iter().map(|(code, _)| *code).collect()
}

/// Rates for `country_code`. Case-insensitive.
pub fn get_rates(country_code: &str) -> RatesLookup {
    let country_code = country_code.trim().to_uppercase();
    let rates = RATES
        .iter()
        .find(|(code, _)| *code == country_code)
        .map(|(_, rates)| *rates);
    RatesLookup {
        found: rates.is_some(),
        country_code,
        rates,
    }
}
