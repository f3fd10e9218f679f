//! pawaPay request inputs, response records and annotations
//!
//! Caller-facing inputs are plain records; the wire shapes they turn into live
//! in [`super::payload`]. Every response record carries the [`ApiAnnotation`]
//! of the exchange that produced it.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Monetary amount. Values are passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub value: String,
    /// ISO 4217 code (GHS, ZMW, UGX, etc.)
    pub currency: String,
}

impl Amount {
    pub fn new(value: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            currency: currency.into(),
        }
    }
}

/// Phone number split into calling code and subscriber number,
/// e.g. `233` and `247492147`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumber {
    pub country_code: String,
    pub number: String,
}

impl PhoneNumber {
    pub fn new(country_code: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            country_code: country_code.into(),
            number: number.into(),
        }
    }

    /// `country_code` followed by `number`, with no validation
    pub fn msisdn(&self) -> String {
        format!("{}{}", self.country_code, self.number)
    }
}

/// Payout request for sending money to a mobile wallet
#[derive(Debug, Clone)]
pub struct PayoutRequest {
    /// Caller-generated unique ID (UUIDv4 per pawaPay)
    pub payout_id: String,
    pub amount: Amount,
    /// Statement description, truncated to 22 characters on the wire
    pub description: String,
    pub phone_number: PhoneNumber,
    /// Mobile-money operator, e.g. MTN_MOMO_GHA
    pub correspondent: String,
}

/// Deposit request for collecting money from a mobile wallet
#[derive(Debug, Clone)]
pub struct DepositRequest {
    pub deposit_id: String,
    pub amount: Amount,
    pub description: String,
    pub phone_number: PhoneNumber,
    pub correspondent: String,
    /// Pre-authorisation code for correspondents that require one
    pub pre_auth_code: Option<String>,
}

/// Refund request for a completed deposit
#[derive(Debug, Clone)]
pub struct RefundRequest {
    pub refund_id: String,
    pub deposit_id: String,
    pub amount: Amount,
}

/// Record of one exchange with the provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAnnotation {
    /// Empty when running in the testing environment
    pub url: String,
    pub request_payload: String,
    pub response_payload: String,
    /// 0 when no response was received
    pub response_code: u16,
}

impl ApiAnnotation {
    pub fn is_success(&self) -> bool {
        matches!(self.response_code, 200 | 201 | 204)
    }
}

/// Decode an explicit `null` as the field's default value
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Type and address of a payout recipient or deposit payer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub party_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: Address,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureReason {
    #[serde(default, deserialize_with = "null_as_default")]
    pub failure_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub failure_message: String,
}

/// Reason given when pawaPay rejects a request outright
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectionReason {
    #[serde(default, deserialize_with = "null_as_default")]
    pub rejection_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rejection_message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePayoutResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub payout_id: String,
    /// ACCEPTED, REJECTED or DUPLICATE_IGNORED
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub rejection_reason: Option<RejectionReason>,
    #[serde(skip)]
    pub annotation: ApiAnnotation,
}

#[derive(Debug, Clone, Default)]
pub struct BulkPayoutResponse {
    pub results: Vec<CreatePayoutResponse>,
    pub annotation: ApiAnnotation,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDepositResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub deposit_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub rejection_reason: Option<RejectionReason>,
    #[serde(skip)]
    pub annotation: ApiAnnotation,
}

#[derive(Debug, Clone, Default)]
pub struct BulkDepositResponse {
    pub results: Vec<CreateDepositResponse>,
    pub annotation: ApiAnnotation,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRefundResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub refund_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub rejection_reason: Option<RejectionReason>,
    #[serde(skip)]
    pub annotation: ApiAnnotation,
}

/// Payout state as reported by pawaPay
///
/// Fields sent as `null` decode to their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Payout {
    #[serde(deserialize_with = "null_as_default")]
    pub payout_id: String,
    /// ACCEPTED, ENQUEUED, SUBMITTED, COMPLETED or FAILED
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub amount: String,
    #[serde(deserialize_with = "null_as_default")]
    pub currency: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(deserialize_with = "null_as_default")]
    pub correspondent: String,
    #[serde(deserialize_with = "null_as_default")]
    pub recipient: Party,
    #[serde(deserialize_with = "null_as_default")]
    pub customer_timestamp: String,
    #[serde(deserialize_with = "null_as_default")]
    pub statement_description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created: String,
    pub received_by_recipient: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub correspondent_ids: HashMap<String, serde_json::Value>,
    pub failure_reason: Option<FailureReason>,
    #[serde(skip)]
    pub annotation: ApiAnnotation,
}

/// Deposit state as reported by pawaPay
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Deposit {
    #[serde(deserialize_with = "null_as_default")]
    pub deposit_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub requested_amount: String,
    #[serde(deserialize_with = "null_as_default")]
    pub deposited_amount: String,
    #[serde(deserialize_with = "null_as_default")]
    pub currency: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(deserialize_with = "null_as_default")]
    pub payer: Party,
    #[serde(deserialize_with = "null_as_default")]
    pub correspondent: String,
    #[serde(deserialize_with = "null_as_default")]
    pub statement_description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub customer_timestamp: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created: String,
    pub responded_by_payer: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub correspondent_ids: HashMap<String, serde_json::Value>,
    /// Shape varies between correspondents, kept as raw JSON
    pub suspicious_activity_report: Option<serde_json::Value>,
    pub failure_reason: Option<FailureReason>,
    #[serde(skip)]
    pub annotation: ApiAnnotation,
}

/// Refund state as reported by pawaPay
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Refund {
    #[serde(deserialize_with = "null_as_default")]
    pub refund_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub deposit_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub amount: String,
    #[serde(deserialize_with = "null_as_default")]
    pub currency: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(deserialize_with = "null_as_default")]
    pub correspondent: String,
    #[serde(deserialize_with = "null_as_default")]
    pub recipient: Party,
    #[serde(deserialize_with = "null_as_default")]
    pub customer_timestamp: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created: String,
    pub received_by_recipient: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub correspondent_ids: HashMap<String, serde_json::Value>,
    pub failure_reason: Option<FailureReason>,
    #[serde(skip)]
    pub annotation: ApiAnnotation,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PayoutStatusResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub payout_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    pub rejection_reason: Option<RejectionReason>,
    #[serde(skip)]
    pub annotation: ApiAnnotation,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DepositStatusResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub deposit_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    pub rejection_reason: Option<RejectionReason>,
    #[serde(skip)]
    pub annotation: ApiAnnotation,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RefundStatusResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub refund_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    pub rejection_reason: Option<RejectionReason>,
    #[serde(skip)]
    pub annotation: ApiAnnotation,
}

/// Shared status predicates for records returned by the get operations
pub trait TransactionRecord {
    fn status(&self) -> &str;

    fn annotation(&self) -> &ApiAnnotation;

    fn is_successful(&self) -> bool {
        self.status().eq_ignore_ascii_case("completed")
    }

    fn is_failed(&self) -> bool {
        self.status().eq_ignore_ascii_case("failed")
    }

    fn is_pending(&self) -> bool {
        !self.is_successful() && !self.is_failed() && !self.status().is_empty()
    }

    /// pawaPay answers a lookup for an unknown ID with 200 and `[]`
    fn is_not_found(&self) -> bool {
        let annotation = self.annotation();
        annotation.response_code == 200
            && serde_json::from_str::<Vec<serde_json::Value>>(&annotation.response_payload)
                .map(|records| records.is_empty())
                .unwrap_or(false)
    }
}

impl TransactionRecord for Payout {
    fn status(&self) -> &str {
        &self.status
    }

    fn annotation(&self) -> &ApiAnnotation {
        &self.annotation
    }
}

impl TransactionRecord for Deposit {
    fn status(&self) -> &str {
        &self.status
    }

    fn annotation(&self) -> &ApiAnnotation {
        &self.annotation
    }
}

impl TransactionRecord for Refund {
    fn status(&self) -> &str {
        &self.status
    }

    fn annotation(&self) -> &ApiAnnotation {
        &self.annotation
    }
}
