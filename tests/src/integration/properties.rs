//! # Ledger Properties
//!
//! Random command sequences over a small market (three traders, one renter,
//! one property). After every command:
//!
//! - Σ ownership + Σ listings == issued quantity
//! - no account holds negative cash
//! - a rejected command left every record byte-identical

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use pty_ledger::commands::{
        ListingRequest, RentPaymentRequest, RentRateRequest, RenterRequest, TransferRequest,
    };
    use pty_ledger::domain::invariants::{check_non_negative_cash, check_quantity_conservation};
    use pty_ledger::prelude::*;
    use pty_ledger::test_utils::issue_request;

    const TRADERS: [&str; 3] = ["A", "B", "C"];
    const RENTER: &str = "R";
    const ISSUED: u64 = 120;

    #[derive(Clone, Debug)]
    enum Op {
        List { seller: usize, quantity: u64, price: u32 },
        Buy { seller: usize, buyer: usize, quantity: u64 },
        SetRent { rate: u32 },
        Rent { payer: usize, payment: u32 },
        Renter { add: bool, who: usize },
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => (0..3usize, 0..80u64, 0..400u32)
                .prop_map(|(seller, quantity, price)| Op::List { seller, quantity, price }),
            3 => (0..3usize, 0..3usize, 0..80u64)
                .prop_map(|(seller, buyer, quantity)| Op::Buy { seller, buyer, quantity }),
            1 => (0..20_000u32).prop_map(|rate| Op::SetRent { rate }),
            2 => (0..4usize, 0..20_000u32).prop_map(|(payer, payment)| Op::Rent { payer, payment }),
            1 => (any::<bool>(), 0..4usize).prop_map(|(add, who)| Op::Renter { add, who }),
        ]
    }

    fn account(i: usize) -> &'static str {
        TRADERS.get(i).copied().unwrap_or(RENTER)
    }

    fn command(asset: &str, op: &Op) -> Command {
        let asset_id = asset.to_string();
        match *op {
            Op::List { seller, quantity, price } => Command::SetForSale(ListingRequest {
                asset_id,
                seller: account(seller).into(),
                quantity,
                unit_price: f64::from(price),
            }),
            Op::Buy { seller, buyer, quantity } => Command::TransferPaper(TransferRequest {
                asset_id,
                seller: account(seller).into(),
                buyer: account(buyer).into(),
                quantity,
            }),
            Op::SetRent { rate } => Command::SetRent(RentRateRequest {
                asset_id,
                rate: f64::from(rate),
                issuer: "A".into(),
            }),
            Op::Rent { payer, payment } => Command::ProcessRent(RentPaymentRequest {
                asset_id,
                stated_payment: f64::from(payment),
                payer: account(payer).into(),
            }),
            Op::Renter { add, who } => Command::SetRenters(RenterRequest {
                asset_id,
                action: (if add { "add" } else { "remove" }).into(),
                renter: account(who).into(),
            }),
        }
    }

    fn market() -> (LedgerService<InMemoryKVStore>, String) {
        let mut ledger = LedgerService::new(
            InMemoryKVStore::new(),
            LedgerConfig::default().with_initial_cash_balance(5_000.0),
        );
        ledger.init().unwrap();
        for id in TRADERS.iter().chain([&RENTER]) {
            ledger.create_account(id).unwrap();
        }
        let asset = ledger
            .issue_property_token(issue_request("1 Main St", "A", ISSUED))
            .unwrap()
            .asset;
        (ledger, asset)
    }

    fn snapshot(store: &InMemoryKVStore) -> Vec<(String, Option<Vec<u8>>)> {
        store
            .keys()
            .into_iter()
            .map(|k| {
                let v = store.get(&k).unwrap();
                (k, v)
            })
            .collect()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn prop_records_stay_consistent(ops in prop::collection::vec(op(), 1..40)) {
            let (mut ledger, asset) = market();

            for op in &ops {
                let before = snapshot(ledger.store());
                let result = ledger.execute(command(&asset, op));

                if let Err(e) = &result {
                    prop_assert_ne!(e.kind(), ErrorKind::Persistence);
                    prop_assert_eq!(&snapshot(ledger.store()), &before, "rejected {:?} wrote records", op);
                }

                let token = ledger.get_asset(&asset).unwrap();
                prop_assert!(check_quantity_conservation(&token));
                prop_assert_eq!(token.quantity, ISSUED);

                for id in TRADERS.iter().chain([&RENTER]) {
                    let acct = ledger.get_account(id).unwrap();
                    prop_assert!(check_non_negative_cash(&acct), "{} has {}", id, acct.cash_balance);
                }
            }
        }

        #[test]
        fn prop_same_address_same_identifier(
            street in "[a-z0-9 ]{1,20}",
            city in "[a-z]{1,12}",
        ) {
            let mut ledger = LedgerService::new(InMemoryKVStore::new(), LedgerConfig::default());
            ledger.create_account("A").unwrap();

            let mut first = issue_request(&street, "A", 1);
            first.city = city.clone();
            let mut second = issue_request(&street.to_uppercase(), "A", 1);
            second.city = city.to_uppercase();

            let issued = ledger.issue_property_token(first).unwrap();
            let err = ledger.issue_property_token(second).unwrap_err();
            prop_assert!(
                matches!(&err, LedgerError::AssetExists { id } if *id == issued.asset),
                "unexpected {:?}",
                err
            );
        }
    }
}
