//! # Property Ledger Benchmarks
//!
//! | Operation | Cost driver |
//! |-----------|-------------|
//! | issuePropertyToken | linear index membership scan |
//! | transferPaper | three record encodes + puts |
//! | processRent | one account load/store per owner |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use pty_ledger::commands::{RentPaymentRequest, RentRateRequest, RenterRequest};
use pty_ledger::prelude::*;
use pty_ledger::test_utils::{issue_request, listing, transfer};

fn ledger() -> LedgerService<InMemoryKVStore> {
    let mut ledger = LedgerService::new(InMemoryKVStore::new(), LedgerConfig::default());
    ledger.init().unwrap();
    ledger
}

fn bench_issuance(c: &mut Criterion) {
    let mut group = c.benchmark_group("issuance");

    for indexed in [10u32, 100, 1_000] {
        group.bench_with_input(BenchmarkId::new("issue_with_index", indexed), &indexed, |b, &n| {
            let mut ledger = ledger();
            ledger.create_account("issuer").unwrap();
            for i in 0..n {
                ledger
                    .issue_property_token(issue_request(&format!("{i} Seed St"), "issuer", 10))
                    .unwrap();
            }
            let mut next = 0u64;
            b.iter(|| {
                next += 1;
                let request = issue_request(&format!("{next} Bench Rd"), "issuer", 10);
                black_box(ledger.issue_property_token(request).unwrap());
            });
        });
    }
    group.finish();
}

fn bench_transfer(c: &mut Criterion) {
    let mut ledger = ledger();
    ledger.create_account("seller").unwrap();
    ledger.create_account("buyer").unwrap();
    let asset = ledger
        .issue_property_token(issue_request("1 Main St", "seller", u64::from(u32::MAX)))
        .unwrap()
        .asset;
    ledger
        .set_for_sale(&listing(&asset, "seller", u64::from(u32::MAX), 0.0))
        .unwrap();

    c.bench_function("transfer_one_unit", |b| {
        b.iter(|| black_box(ledger.transfer_paper(&transfer(&asset, "seller", "buyer", 1)).unwrap()));
    });
}

fn bench_rent(c: &mut Criterion) {
    let mut group = c.benchmark_group("rent");

    for owners in [2u64, 20, 200] {
        let mut ledger = ledger();
        ledger.create_accounts(owners as u32).unwrap();
        ledger.create_account("tenant").unwrap();
        let asset = ledger
            .issue_property_token(issue_request("5 Rent Row", "company1", owners * 10))
            .unwrap()
            .asset;
        ledger
            .set_for_sale(&listing(&asset, "company1", owners * 10 - 10, 0.0))
            .unwrap();
        for n in 2..=owners {
            ledger
                .transfer_paper(&transfer(&asset, "company1", &format!("company{n}"), 10))
                .unwrap();
        }
        ledger
            .set_rent(&RentRateRequest {
                asset_id: asset.clone(),
                rate: 0.01,
                issuer: "company1".into(),
            })
            .unwrap();
        ledger
            .set_renters(&RenterRequest {
                asset_id: asset.clone(),
                action: "add".into(),
                renter: "tenant".into(),
            })
            .unwrap();

        let request = RentPaymentRequest {
            asset_id: asset,
            stated_payment: 0.0,
            payer: "tenant".into(),
        };
        group.bench_with_input(BenchmarkId::new("process_rent", owners), &owners, |b, _| {
            b.iter(|| black_box(ledger.process_rent(&request).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_issuance, bench_transfer, bench_rent);
criterion_main!(benches);
