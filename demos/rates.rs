use vatcheck::rates::{get_rates, list_countries};

fn main() -> Result<(), serde_json::Error> {
    println!("=== Embedded VAT Rates ===\n");

    for code in list_countries() {
        let lookup = get_rates(code);
        if let Some(rates) = lookup.rates {
            let reduced: Vec<String> = rates.reduced.iter().map(|r| r.rate.to_string()).collect();
            println!(
                "  {code}: standard {}%, reduced [{}]",
                rates.standard.rate,
                reduced.join(", ")
            );
        }
    }

    println!("\n  {}", serde_json::to_string_pretty(&get_rates("ch"))?);
    println!("  {}", serde_json::to_string(&get_rates("US"))?);
    Ok(())
}
