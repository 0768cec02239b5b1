//! # Ledger Commands
//!
//! Decoded request payloads and the closed `Command` type dispatched by
//! `LedgerService::execute`.
//!
//! Field names are the JSON names used on the wire. Unknown fields are
//! ignored, so a full property record submitted for issuance decodes into
//! `IssueRequest` with its ownership and listing data dropped.

use serde::{Deserialize, Serialize};

use crate::domain::entities::UrlLink;
use crate::errors::LedgerError;
use crate::events::LedgerEvent;

// =============================================================================
// PAYLOADS
// =============================================================================

/// `issuePropertyToken` payload.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueRequest {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "adrStreet", default)]
    pub street: String,
    #[serde(rename = "adrCity", default)]
    pub city: String,
    #[serde(rename = "adrPostcode", default)]
    pub postcode: String,
    #[serde(rename = "adrState", default)]
    pub state: String,
    #[serde(rename = "buyval", default)]
    pub buy_value: f64,
    #[serde(rename = "mktval", default)]
    pub market_value: f64,
    pub quantity: u64,
    pub issuer: String,
    #[serde(rename = "issueDate", default)]
    pub issue_date: String,
    #[serde(rename = "urlLink", default)]
    pub links: Option<Vec<UrlLink>>,
}

/// `setForSale` payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListingRequest {
    #[serde(rename = "cusip")]
    pub asset_id: String,
    #[serde(rename = "fromCompany")]
    pub seller: String,
    pub quantity: u64,
    #[serde(rename = "sellval")]
    pub unit_price: f64,
}

/// `transferPaper` payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    #[serde(rename = "cusip")]
    pub asset_id: String,
    #[serde(rename = "fromCompany")]
    pub seller: String,
    #[serde(rename = "toCompany")]
    pub buyer: String,
    pub quantity: u64,
}

/// `updateMktVal` payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValuationRequest {
    #[serde(rename = "cusip")]
    pub asset_id: String,
    #[serde(rename = "mktval")]
    pub market_value: f64,
}

/// `setRent` payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RentRateRequest {
    #[serde(rename = "cusip")]
    pub asset_id: String,
    #[serde(rename = "value")]
    pub rate: f64,
    #[serde(rename = "invid")]
    pub issuer: String,
}

/// `processRent` payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RentPaymentRequest {
    #[serde(rename = "cusip")]
    pub asset_id: String,
    /// Amount the payer claims to pay; only used for the sufficiency check.
    #[serde(rename = "payment")]
    pub stated_payment: f64,
    /// Paying account.
    #[serde(rename = "issuer")]
    pub payer: String,
}

/// `setRenters` payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenterRequest {
    #[serde(rename = "cusip")]
    pub asset_id: String,
    pub action: String,
    #[serde(rename = "invid")]
    pub renter: String,
}

/// Roster mutation requested by `setRenters`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenterAction {
    Add,
    Remove,
}

impl std::str::FromStr for RenterAction {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "add" => Ok(Self::Add),
            "remove" => Ok(Self::Remove),
            other => Err(LedgerError::invalid_request(format!(
                "unknown renter action '{other}', expected add or remove"
            ))),
        }
    }
}

// =============================================================================
// COMMAND
// =============================================================================

/// Every invocation the ledger accepts.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Create the global asset key index if absent.
    Init,
    CreateAccount { id: String },
    CreateAccounts { count: u32 },
    IssuePropertyToken(IssueRequest),
    SetForSale(ListingRequest),
    TransferPaper(TransferRequest),
    UpdateMktVal(ValuationRequest),
    SetRent(RentRateRequest),
    ProcessRent(RentPaymentRequest),
    SetRenters(RenterRequest),
    GetAccount { id: String },
    GetAsset { asset_id: String },
    ListAssets,
    /// Generic fetch of any key; output is the raw record.
    FetchRaw { key: String },
}

impl Command {
    /// Wire function name of this command.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::CreateAccount { .. } => "createAccount",
            Self::CreateAccounts { .. } => "createAccounts",
            Self::IssuePropertyToken(_) => "issuePropertyToken",
            Self::SetForSale(_) => "setForSale",
            Self::TransferPaper(_) => "transferPaper",
            Self::UpdateMktVal(_) => "updateMktVal",
            Self::SetRent(_) => "setRent",
            Self::ProcessRent(_) => "processRent",
            Self::SetRenters(_) => "setRenters",
            Self::GetAccount { .. } => "getAccount",
            Self::GetAsset { .. } => "getAsset",
            Self::ListAssets => "listAssets",
            Self::FetchRaw { .. } => "fetchRaw",
        }
    }

    /// True for commands that never write to the store.
    #[must_use]
    pub fn is_query(&self) -> bool {
        matches!(
            self,
            Self::GetAccount { .. } | Self::GetAsset { .. } | Self::ListAssets | Self::FetchRaw { .. }
        )
    }
}

/// Outcome of an executed command.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Receipt {
    /// Events emitted by a committed transaction, in commit order.
    pub events: Vec<LedgerEvent>,
    /// Query result, if the command was a query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<serde_json::Value>,
}

impl Receipt {
    pub fn with_events(events: Vec<LedgerEvent>) -> Self {
        Self {
            events,
            output: None,
        }
    }

    pub fn with_output(output: serde_json::Value) -> Self {
        Self {
            events: Vec::new(),
            output: Some(output),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_request_ignores_ownership_fields() {
        let json = r#"{"name":"Loft","adrStreet":"1 Main","adrCity":"Oslo","adrPostcode":"0150","adrState":"NO",
            "quantity":100,"issuer":"company1","issueDate":"1456161763790",
            "owner":[{"invid":"company9","quantity":5}]}"#;
        let req: IssueRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.quantity, 100);
        assert_eq!(req.issuer, "company1");
        assert!(req.links.is_none());
    }

    #[test]
    fn test_transfer_request_wire_names() {
        let req: TransferRequest = serde_json::from_str(
            r#"{"cusip":"abc","fromCompany":"A","toCompany":"B","quantity":4}"#,
        )
        .unwrap();
        assert_eq!(req.seller, "A");
        assert_eq!(req.buyer, "B");
    }

    #[test]
    fn test_negative_quantity_rejected_by_decoder() {
        let res: Result<ListingRequest, _> = serde_json::from_str(
            r#"{"cusip":"abc","fromCompany":"A","quantity":-4,"sellval":1.0}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn test_renter_action_parse() {
        assert_eq!("ADD".parse::<RenterAction>().unwrap(), RenterAction::Add);
        assert_eq!("remove".parse::<RenterAction>().unwrap(), RenterAction::Remove);
        assert!("evict".parse::<RenterAction>().is_err());
    }
}
