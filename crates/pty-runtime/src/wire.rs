//! # Invocation Decoding
//!
//! Turns a function name plus its string arguments into a ledger `Command`.
//!
//! - `init` and `listAssets` take no argument; everything else takes one.
//! - `createAccount`, `getAccount`, `getAsset` and `fetchRaw` take the raw
//!   string; `createAccounts` takes a raw integer.
//! - Every other argument is JSON. Single quotes are accepted in place of
//!   double quotes, since shells make double quotes awkward.

use pty_ledger::commands::{Command, IssueRequest};
use pty_ledger::errors::{LedgerError, LedgerResult};
use serde::de::DeserializeOwned;

/// Every function name accepted by `decode_command`.
pub const FUNCTIONS: &[&str] = &[
    "init",
    "createAccount",
    "createAccounts",
    "issuePropertyToken",
    "setForSale",
    "transferPaper",
    "updateMktVal",
    "setRent",
    "processRent",
    "setRenters",
    "getAccount",
    "getAsset",
    "listAssets",
    "fetchRaw",
];

/// Decode one invocation.
///
/// # Errors
///
/// `InvalidRequest` for an unknown function, a wrong argument count or an
/// undecodable argument.
pub fn decode_command(function: &str, args: &[String]) -> LedgerResult<Command> {
    match function {
        "init" => no_args(function, args).map(|()| Command::Init),
        "listAssets" => no_args(function, args).map(|()| Command::ListAssets),
        "createAccount" => Ok(Command::CreateAccount {
            id: single(function, args)?.to_string(),
        }),
        "createAccounts" => {
            let raw = single(function, args)?;
            let count = raw.trim().parse::<u32>().map_err(|e| {
                LedgerError::invalid_request(format!("createAccounts expects a count, got {raw:?}: {e}"))
            })?;
            Ok(Command::CreateAccounts { count })
        }
        "issuePropertyToken" => {
            let mut request: IssueRequest = json(function, single(function, args)?)?;
            if request.issue_date.is_empty() {
                request.issue_date = chrono::Utc::now().timestamp_millis().to_string();
            }
            Ok(Command::IssuePropertyToken(request))
        }
        "setForSale" => Ok(Command::SetForSale(json(function, single(function, args)?)?)),
        "transferPaper" => Ok(Command::TransferPaper(json(function, single(function, args)?)?)),
        "updateMktVal" => Ok(Command::UpdateMktVal(json(function, single(function, args)?)?)),
        "setRent" => Ok(Command::SetRent(json(function, single(function, args)?)?)),
        "processRent" => Ok(Command::ProcessRent(json(function, single(function, args)?)?)),
        "setRenters" => Ok(Command::SetRenters(json(function, single(function, args)?)?)),
        "getAccount" => Ok(Command::GetAccount {
            id: single(function, args)?.to_string(),
        }),
        "getAsset" => Ok(Command::GetAsset {
            asset_id: single(function, args)?.to_string(),
        }),
        "fetchRaw" => Ok(Command::FetchRaw {
            key: single(function, args)?.to_string(),
        }),
        other => Err(LedgerError::invalid_request(format!(
            "unknown function '{other}'"
        ))),
    }
}

fn no_args(function: &str, args: &[String]) -> LedgerResult<()> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(arity(function, 0, args.len()))
    }
}

fn single<'a>(function: &str, args: &'a [String]) -> LedgerResult<&'a str> {
    match args {
        [arg] => Ok(arg.as_str()),
        _ => Err(arity(function, 1, args.len())),
    }
}

fn arity(function: &str, expected: usize, got: usize) -> LedgerError {
    LedgerError::invalid_request(format!(
        "{function} takes {expected} argument(s), got {got}"
    ))
}

fn json<T: DeserializeOwned>(function: &str, raw: &str) -> LedgerResult<T> {
    let text = raw.replace('\'', "\"");
    serde_json::from_str(&text)
        .map_err(|e| LedgerError::invalid_request(format!("{function}: malformed argument: {e}")))
}
