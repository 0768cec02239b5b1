//! # Runtime Shell Integration
//!
//! Invocations through `pty_runtime::invoke`, sharing one ledger file.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use pty_ledger::prelude::*;
    use pty_runtime::{invoke, LedgerLock, RuntimeConfig, RuntimeError};

    fn config(dir: &tempfile::TempDir) -> RuntimeConfig {
        RuntimeConfig {
            data_file: dir.path().join("ledger.json"),
            ..Default::default()
        }
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_concurrent_invocations_are_serialized() {
        let dir = tempfile::tempdir().unwrap();
        let config = Arc::new(config(&dir));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let config = Arc::clone(&config);
                thread::spawn(move || {
                    invoke(&config, "createAccount", &args(&[format!("trader{i}").as_str()])).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // every read-modify-write of the file saw the previous one
        let store = FileBackedKVStore::open(&config.data_file).unwrap();
        let ledger = LedgerService::new(store, LedgerConfig::default());
        for i in 0..8 {
            assert!(ledger.get_account(&format!("trader{i}")).is_ok(), "trader{i} lost");
        }
    }

    #[test]
    fn test_lock_release_unblocks_invocations() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir);

        let lock = LedgerLock::try_acquire(&config.lock_file()).unwrap();
        assert!(LedgerLock::try_acquire(&config.lock_file()).is_err());
        drop(lock);

        let receipt = invoke(&config, "createAccounts", &args(&["3"])).unwrap();
        assert_eq!(receipt.events.len(), 3);
    }

    #[test]
    fn test_decode_errors_precede_locking() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir);

        let _held = LedgerLock::try_acquire(&config.lock_file()).unwrap();
        // would block forever if decoding came after the lock
        let err = invoke(&config, "setForSale", &args(&["not json"])).unwrap_err();
        assert!(matches!(err, RuntimeError::Ledger(e) if e.kind() == ErrorKind::InvalidRequest));
        assert!(!config.data_file.exists());
    }
}
