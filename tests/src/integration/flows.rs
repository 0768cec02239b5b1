//! # End-to-End Ledger Flows
//!
//! Complete command sequences driven through `LedgerService::execute`, the
//! way a host would drive the engine.
//!
//! ## Flows Tested
//!
//! 1. **Issue → list → transfer**: cash and units move together
//! 2. **Batch accounts**: `company1..N` with opening balances
//! 3. **Rent lifecycle**: valuation, renters, rent distributed pro rata
//! 4. **Partial commit**: store failure mid-transaction keeps earlier writes
//! 5. **Durability**: file-backed ledger reopened between commands

#[cfg(test)]
mod tests {
    use pty_ledger::commands::{
        ListingRequest, RentPaymentRequest, RentRateRequest, RenterRequest, TransferRequest,
        ValuationRequest,
    };
    use pty_ledger::domain::invariants::check_token_invariants;
    use pty_ledger::domain::keys::asset_key;
    use pty_ledger::prelude::*;
    use pty_ledger::test_utils::{issue_request, FailingStore};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn ledger_with_balance(balance: f64) -> LedgerService<InMemoryKVStore> {
        LedgerService::new(
            InMemoryKVStore::new(),
            LedgerConfig::default().with_initial_cash_balance(balance),
        )
    }

    fn run<S: KeyValueStore>(ledger: &mut LedgerService<S>, command: Command) -> Receipt {
        let name = command.name();
        ledger
            .execute(command)
            .unwrap_or_else(|e| panic!("{name} failed: {e}"))
    }

    fn issued_asset(receipt: &Receipt) -> String {
        match receipt.events.as_slice() {
            [LedgerEvent::AssetIssued(e)] => e.asset.clone(),
            other => panic!("expected AssetIssued, got {other:?}"),
        }
    }

    fn list(asset: &str, seller: &str, quantity: u64, unit_price: f64) -> Command {
        Command::SetForSale(ListingRequest {
            asset_id: asset.into(),
            seller: seller.into(),
            quantity,
            unit_price,
        })
    }

    fn buy(asset: &str, seller: &str, buyer: &str, quantity: u64) -> Command {
        Command::TransferPaper(TransferRequest {
            asset_id: asset.into(),
            seller: seller.into(),
            buyer: buyer.into(),
            quantity,
        })
    }

    fn cash<S: KeyValueStore>(ledger: &LedgerService<S>, id: &str) -> f64 {
        ledger.get_account(id).unwrap().cash_balance
    }

    // =============================================================================
    // FLOW 1: ISSUE → LIST → TRANSFER
    // =============================================================================

    #[test]
    fn test_issue_list_transfer_flow() {
        let mut ledger = ledger_with_balance(1_000.0);
        run(&mut ledger, Command::Init);
        run(&mut ledger, Command::CreateAccount { id: "A".into() });
        run(&mut ledger, Command::CreateAccount { id: "B".into() });

        let receipt = run(
            &mut ledger,
            Command::IssuePropertyToken(issue_request("1 Main St", "A", 100)),
        );
        let asset = issued_asset(&receipt);

        run(&mut ledger, list(&asset, "A", 40, 5.0));
        let receipt = run(&mut ledger, buy(&asset, "A", "B", 40));
        assert!(matches!(
            receipt.events.as_slice(),
            [LedgerEvent::TransferSettled(t)] if t.amount == 200.0
        ));

        assert_eq!(cash(&ledger, "B"), 800.0);
        assert_eq!(cash(&ledger, "A"), 1_200.0);

        let token = ledger.get_asset(&asset).unwrap();
        assert_eq!(token.owned_by("A"), 60);
        assert_eq!(token.listing_of("A").map(|l| l.quantity), Some(0));
        assert_eq!(token.owned_by("B"), 40);
        assert!(check_token_invariants(&token).is_valid());
    }

    // =============================================================================
    // FLOW 2: BATCH ACCOUNTS
    // =============================================================================

    #[test]
    fn test_batch_accounts_flow() {
        let mut ledger = ledger_with_balance(10_000_000.0);
        let receipt = run(&mut ledger, Command::CreateAccounts { count: 2 });
        assert_eq!(receipt.events.len(), 2);

        for id in ["company1", "company2"] {
            let account = ledger.get_account(id).unwrap();
            assert_eq!(account.cash_balance, 10_000_000.0);
            assert!(account.asset_ids.is_empty());
        }
        assert!(ledger.get_account("company3").is_err());
    }

    // =============================================================================
    // FLOW 3: RENT LIFECYCLE
    // =============================================================================

    #[test]
    fn test_rent_lifecycle_flow() {
        let mut ledger = ledger_with_balance(100_000.0);
        run(&mut ledger, Command::CreateAccounts { count: 4 });
        let asset = issued_asset(&run(
            &mut ledger,
            Command::IssuePropertyToken(issue_request("7 Harbour Way", "company1", 200)),
        ));

        run(
            &mut ledger,
            Command::UpdateMktVal(ValuationRequest {
                asset_id: asset.clone(),
                market_value: 400_000.0,
            }),
        );
        run(&mut ledger, list(&asset, "company1", 100, 10.0));
        run(&mut ledger, buy(&asset, "company1", "company2", 50));
        run(
            &mut ledger,
            Command::SetRent(RentRateRequest {
                asset_id: asset.clone(),
                rate: 2_000.0,
                issuer: "company1".into(),
            }),
        );
        for renter in ["company3", "company4"] {
            let receipt = run(
                &mut ledger,
                Command::SetRenters(RenterRequest {
                    asset_id: asset.clone(),
                    action: "add".into(),
                    renter: renter.into(),
                }),
            );
            assert!(matches!(receipt.events[0], LedgerEvent::RenterAdded(_)));
        }

        let before_asset = ledger.fetch_raw(&asset_key(&asset)).unwrap();
        let c1 = cash(&ledger, "company1");
        let c2 = cash(&ledger, "company2");

        let receipt = run(
            &mut ledger,
            Command::ProcessRent(RentPaymentRequest {
                asset_id: asset.clone(),
                stated_payment: 1_000.0,
                payer: "company3".into(),
            }),
        );
        let LedgerEvent::RentDistributed(paid) = &receipt.events[0] else {
            panic!("expected RentDistributed");
        };
        assert_eq!(paid.debited, 1_000.0);
        assert_eq!(paid.per_unit, 5.0);

        // company1: 100 owned + 50 still listed; company2: 50
        assert_eq!(cash(&ledger, "company1"), c1 + 750.0);
        assert_eq!(cash(&ledger, "company2"), c2 + 250.0);
        assert_eq!(cash(&ledger, "company3"), 99_000.0);
        assert_eq!(ledger.fetch_raw(&asset_key(&asset)).unwrap(), before_asset);

        let token = ledger.get_asset(&asset).unwrap();
        assert_eq!(token.status, AssetStatus::Approved);
        assert_eq!(ledger.get_account("company4").unwrap().renting, asset);
    }

    // =============================================================================
    // FLOW 4: PARTIAL COMMIT
    // =============================================================================

    #[test]
    fn test_rent_partial_commit_flow() {
        let mut ledger = LedgerService::new(FailingStore::default(), LedgerConfig::default());
        run(&mut ledger, Command::CreateAccounts { count: 3 });
        let asset = issued_asset(&run(
            &mut ledger,
            Command::IssuePropertyToken(issue_request("3 Quay St", "company1", 10)),
        ));
        run(&mut ledger, list(&asset, "company1", 5, 1.0));
        run(&mut ledger, buy(&asset, "company1", "company2", 5));
        run(
            &mut ledger,
            Command::SetRent(RentRateRequest {
                asset_id: asset.clone(),
                rate: 100.0,
                issuer: "company1".into(),
            }),
        );
        run(
            &mut ledger,
            Command::SetRenters(RenterRequest {
                asset_id: asset.clone(),
                action: "add".into(),
                renter: "company3".into(),
            }),
        );
        let c1 = cash(&ledger, "company1");
        let c2 = cash(&ledger, "company2");

        // payer write lands, first owner credit fails
        let store = std::mem::take(ledger.store_mut()).fail_on_put(2);
        *ledger.store_mut() = store;

        let err = ledger
            .execute(Command::ProcessRent(RentPaymentRequest {
                asset_id: asset,
                stated_payment: 100.0,
                payer: "company3".into(),
            }))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Persistence);

        assert_eq!(cash(&ledger, "company3"), 10_000_000.0 - 100.0);
        assert_eq!(cash(&ledger, "company1"), c1);
        assert_eq!(cash(&ledger, "company2"), c2);
    }

    // =============================================================================
    // FLOW 5: DURABILITY
    // =============================================================================

    #[test]
    fn test_file_backed_ledger_reopens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");

        let asset = {
            let store = FileBackedKVStore::open(&path).unwrap();
            let mut ledger = LedgerService::new(store, LedgerConfig::default());
            run(&mut ledger, Command::Init);
            run(&mut ledger, Command::CreateAccount { id: "A".into() });
            issued_asset(&run(
                &mut ledger,
                Command::IssuePropertyToken(issue_request("1 Main St", "A", 10)),
            ))
        };

        let store = FileBackedKVStore::open(&path).unwrap();
        let ledger = LedgerService::new(store, LedgerConfig::default());
        let assets = ledger.list_assets().unwrap();
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].id, asset);
        assert_eq!(ledger.get_asset(&asset).unwrap().owned_by("A"), 10);
    }
}
