use vatcheck::checksum::{abn_valid, hmrc_branch, luhn_valid, mod11_ch_valid};
use vatcheck::validators::ValidatorRegistry;

fn main() {
    println!("=== Format Validation (no network) ===\n");

    let registry = ValidatorRegistry::offline();
    let test_ids = [
        "IT00743110157",
        "it 00743110157",
        "IT00743110158",     // bad checksum
        "DE123456789",
        "NL123456789B01",
        "GB980780684",
        "GB100000034",       // secondary MOD-97 range
        "GBGD001",           // government department
        "CHE-116.281.710 MWST",
        "NO923609016MVA",
        "AU51824753556",
        "CA123456789RT0001",
        "NZ123456789",
        "ZZ123456789",       // unknown country
    ];

    for id in &test_ids {
        let country = vatcheck::extract_country_code(id);
        match registry.create_validator(&country) {
            Some(v) => println!("  {id:<24} => formatted={}", v.validate_format(id)),
            None => println!("  {id:<24} => country not supported"),
        }
    }

    println!("\n=== Checksums ===\n");
    println!("  luhn(00743110157)     = {}", luhn_valid("00743110157"));
    println!("  mod11_ch(116281710)   = {}", mod11_ch_valid("116281710"));
    println!("  hmrc(980780684)       = {:?}", hmrc_branch("980780684"));
    println!("  hmrc(100000034)       = {:?}", hmrc_branch("100000034"));
    println!("  abn(51824753556)      = {}", abn_valid("51824753556"));

    println!("\n  Listed: {}", registry.supported_countries().join(" "));
    println!("  Resolvable: {}", registry.resolvable_countries().join(" "));
}
