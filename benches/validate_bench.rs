use criterion::{Criterion, black_box, criterion_group, criterion_main};

use vatcheck::checksum::{abn_valid, hmrc_valid, luhn_valid, mod11_ch_valid};
use vatcheck::validators::ValidatorRegistry;
use vatcheck::{Identifier, VatChecker};

const MIXED: [&str; 8] = [
    "IT00743110157",
    "DE123456789",
    "NL123456789B01",
    "GB980780684",
    "CHE-116.281.710 MWST",
    "NO923609016MVA",
    "AU51824753556",
    "ZZ123456789",
];

fn bench_checksums(c: &mut Criterion) {
    c.bench_function("luhn_it", |b| b.iter(|| luhn_valid(black_box("00743110157"))));
    c.bench_function("mod11_ch", |b| b.iter(|| mod11_ch_valid(black_box("116281710"))));
    c.bench_function("mod97_gb", |b| b.iter(|| hmrc_valid(black_box("980780684"))));
    c.bench_function("mod89_au", |b| b.iter(|| abn_valid(black_box("51824753556"))));
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("identifier_parse", |b| {
        b.iter(|| Identifier::parse(black_box("  it00743110157 ")))
    });
}

fn bench_format_mixed(c: &mut Criterion) {
    let registry = ValidatorRegistry::offline();
    c.bench_function("validate_format_mixed", |b| {
        b.iter(|| {
            MIXED
                .iter()
                .filter(|id| {
                    let cc = vatcheck::extract_country_code(id);
                    registry
                        .create_validator(&cc)
                        .is_some_and(|v| v.validate_format(black_box(id)))
                })
                .count()
        })
    });
}

fn bench_check_offline(c: &mut Criterion) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let checker = VatChecker::offline();
    c.bench_function("check_offline_mixed", |b| {
        b.iter(|| {
            rt.block_on(async {
                for id in MIXED {
                    black_box(checker.check(id).await);
                }
            })
        })
    });
}

criterion_group!(
    benches,
    bench_checksums,
    bench_parse,
    bench_format_mixed,
    bench_check_offline,
);
criterion_main!(benches);
