//! Live VIES lookups. Needs network access.
//!
//! Run with: `RUST_LOG=vatcheck=debug cargo run --example vat_check -- IT00743110157`

use tracing_subscriber::EnvFilter;
use vatcheck::{CheckerConfig, VatChecker};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vatcheck=info")),
        )
        .init();

    let config = CheckerConfig::from_env()?;
    let checker = VatChecker::from_config(&config)?;

    let mut ids: Vec<String> = std::env::args().skip(1).collect();
    if ids.is_empty() {
        ids = vec![
            "IT00743110157".into(),
            "DE123456789".into(),
            "IT00743110158".into(), // bad checksum
            "ZZ123456789".into(),   // unsupported
        ];
    }

    for id in &ids {
        let result = checker.check(id).await;
        println!("{id} => {:?}", result.state());
        println!("  {}", serde_json::to_string(&result)?);
    }

    Ok(())
}
