//! # Property Ledger Runtime
//!
//! ```text
//! pty-runtime createAccount alice
//! pty-runtime issuePropertyToken "{'adrStreet':'1 Main St', ... ,'quantity':100,'issuer':'alice'}"
//! pty-runtime listAssets
//! ```
//!
//! Logs go to stderr (filter with `PTY_LOG`); the receipt goes to stdout as
//! JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, info_span};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use uuid::Uuid;

use pty_runtime::{invoke, load_config};

/// Property ledger runtime: execute one ledger function.
#[derive(Parser, Debug)]
#[command(name = "pty-runtime")]
#[command(about = "Run one property ledger function against a ledger file")]
struct Args {
    /// Function name, e.g. createAccount, setForSale, processRent
    function: String,

    /// Function argument (JSON payload, or a raw id / count)
    args: Vec<String>,

    /// Ledger file (overrides PTY_DATA_FILE)
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Opening cash balance of new accounts (overrides PTY_INITIAL_BALANCE)
    #[arg(long)]
    initial_balance: Option<f64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_env("PTY_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Load configuration
    let mut config = load_config();
    if let Some(path) = args.data_file {
        config.data_file = path;
    }
    if let Some(balance) = args.initial_balance {
        anyhow::ensure!(
            balance.is_finite() && balance >= 0.0,
            "--initial-balance must be a non-negative number"
        );
        config.ledger.initial_cash_balance = balance;
    }

    let invocation = Uuid::new_v4();
    let span = info_span!("invocation", id = %invocation, function = %args.function);
    let _guard = span.enter();

    let receipt = match invoke(&config, &args.function, &args.args) {
        Ok(receipt) => receipt,
        Err(e) => {
            error!(error = %e, "Invocation failed");
            return Err(e).with_context(|| {
                format!("{} failed on {}", args.function, config.data_file.display())
            });
        }
    };

    let out = serde_json::to_string_pretty(&receipt).context("failed to encode receipt")?;
    println!("{out}");
    info!("Invocation complete");

    Ok(())
}
