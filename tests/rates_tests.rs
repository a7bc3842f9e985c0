//! Run with: `cargo test --features rates --test rates_tests`

#![cfg(feature = "rates")]

use rust_decimal_macros::dec;
use vatcheck::rates::{get_rates, list_countries};

#[test]
fn every_listed_country_resolves() {
    for code in list_countries() {
        let lookup = get_rates(&code.to_lowercase());
        assert!(lookup.found, "{code}");
        assert_eq!(lookup.country_code, code);
    }
}

#[test]
fn standard_rates() {
    let standard = |code: &str| get_rates(code).rates.unwrap().standard.rate;
    assert_eq!(standard("IT"), dec!(22));
    assert_eq!(standard("DE"), dec!(19));
    assert_eq!(standard("FR"), dec!(20));
    assert_eq!(standard("GB"), dec!(20));
    assert_eq!(standard("NO"), dec!(25));
    assert_eq!(standard("CH"), dec!(8.1));
}

#[test]
fn unknown_country_wire_shape() {
    assert_eq!(
        serde_json::to_value(get_rates(" us ")).unwrap(),
        serde_json::json!({"countryCode": "US", "found": false, "rates": null})
    );
}
