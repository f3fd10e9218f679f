//! Wire shapes of the requests sent to pawaPay, and the rules used to build
//! them from caller inputs.

use crate::clock::Clock;
use crate::country::resolve_country;
use crate::error::PawaPayResult;
use crate::payments::types::{
    Address, DepositRequest, Party, PayoutRequest, PhoneNumber, RefundRequest,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Recipient/payer type for mobile subscriber numbers
pub const RECIPIENT_TYPE: &str = "MSISDN";

/// Longest statement description pawaPay accepts
pub const MAX_DESCRIPTION_LEN: usize = 22;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePayoutRequest {
    pub payout_id: String,
    pub amount: String,
    pub currency: String,
    pub country: String,
    pub correspondent: String,
    pub recipient: Party,
    pub customer_timestamp: String,
    pub statement_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDepositRequest {
    pub deposit_id: String,
    pub amount: String,
    pub currency: String,
    pub country: String,
    pub correspondent: String,
    pub payer: Party,
    pub customer_timestamp: String,
    pub statement_description: String,
    #[serde(
        rename = "preAuthorisationCode",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub pre_authorisation_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRefundRequest {
    pub refund_id: String,
    pub deposit_id: String,
    pub amount: String,
    pub currency: String,
}

/// Body of the resend-callback endpoints; exactly one ID is set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResendCallbackRequest {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub payout_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub deposit_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub refund_id: Option<String>,
}

impl ResendCallbackRequest {
    pub fn payout(payout_id: impl Into<String>) -> Self {
        Self {
            payout_id: Some(payout_id.into()),
            ..Default::default()
        }
    }

    pub fn deposit(deposit_id: impl Into<String>) -> Self {
        Self {
            deposit_id: Some(deposit_id.into()),
            ..Default::default()
        }
    }

    pub fn refund(refund_id: impl Into<String>) -> Self {
        Self {
            refund_id: Some(refund_id.into()),
            ..Default::default()
        }
    }
}

/// First 22 characters of `description`, or all of it when shorter
pub fn truncate_description(description: &str) -> String {
    description.chars().take(MAX_DESCRIPTION_LEN).collect()
}

pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.format(TIMESTAMP_FORMAT).to_string()
}

pub fn msisdn_party(phone: &PhoneNumber) -> Party {
    Party {
        party_type: RECIPIENT_TYPE.to_string(),
        address: Address {
            value: phone.msisdn(),
        },
    }
}

pub fn build_payout(clock: &dyn Clock, request: &PayoutRequest) -> PawaPayResult<CreatePayoutRequest> {
    let country = resolve_country(&request.phone_number.country_code)?;

    Ok(CreatePayoutRequest {
        payout_id: request.payout_id.clone(),
        amount: request.amount.value.clone(),
        currency: request.amount.currency.clone(),
        country: country.to_string(),
        correspondent: request.correspondent.clone(),
        recipient: msisdn_party(&request.phone_number),
        customer_timestamp: format_timestamp(clock.now()),
        statement_description: truncate_description(&request.description),
    })
}

pub fn build_deposit(clock: &dyn Clock, request: &DepositRequest) -> PawaPayResult<CreateDepositRequest> {
    let country = resolve_country(&request.phone_number.country_code)?;

    Ok(CreateDepositRequest {
        deposit_id: request.deposit_id.clone(),
        amount: request.amount.value.clone(),
        currency: request.amount.currency.clone(),
        country: country.to_string(),
        correspondent: request.correspondent.clone(),
        payer: msisdn_party(&request.phone_number),
        customer_timestamp: format_timestamp(clock.now()),
        statement_description: truncate_description(&request.description),
        pre_authorisation_code: request.pre_auth_code.clone(),
    })
}

pub fn build_refund(request: &RefundRequest) -> CreateRefundRequest {
    CreateRefundRequest {
        refund_id: request.refund_id.clone(),
        deposit_id: request.deposit_id.clone(),
        amount: request.amount.value.clone(),
        currency: request.amount.currency.clone(),
    }
}

/// Builds every payout in order; the first unresolvable country fails the
/// whole batch.
pub fn build_bulk_payouts(
    clock: &dyn Clock,
    requests: &[PayoutRequest],
) -> PawaPayResult<Vec<CreatePayoutRequest>> {
    requests
        .iter()
        .map(|request| build_payout(clock, request))
        .collect()
}

/// Deposit counterpart of [`build_bulk_payouts`]
pub fn build_bulk_deposits(
    clock: &dyn Clock,
    requests: &[DepositRequest],
) -> PawaPayResult<Vec<CreateDepositRequest>> {
    requests
        .iter()
        .map(|request| build_deposit(clock, request))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PawaPayError;
    use crate::payments::types::Amount;
    use chrono::TimeZone;

    fn new_year() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap()
    }

    fn payout(description: &str, country_code: &str) -> PayoutRequest {
        PayoutRequest {
            payout_id: "d334c312-6c18-4d7e-a0f1-097d398543d3".to_string(),
            amount: Amount::new("1000", "GHS"),
            description: description.to_string(),
            phone_number: PhoneNumber::new(country_code, "247492147"),
            correspondent: "MTN_MOMO_GHA".to_string(),
        }
    }

    #[test]
    fn test_truncate_description() {
        assert_eq!(truncate_description("test"), "test");
        assert_eq!(truncate_description(""), "");
        assert_eq!(
            truncate_description("exactly twenty-two ch."),
            "exactly twenty-two ch."
        );
        assert_eq!(
            truncate_description("sending money to all my children"),
            "sending money to all m"
        );
    }

    #[test]
    fn test_truncate_description_respects_char_boundaries() {
        let description = "paiement économique pour café";
        let truncated = truncate_description(description);
        assert_eq!(truncated.chars().count(), MAX_DESCRIPTION_LEN);
        assert!(description.starts_with(&truncated));
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(new_year()), "2021-01-01T00:00:00Z");
        let later = Utc.with_ymd_and_hms(2023, 11, 5, 17, 4, 9).unwrap();
        assert_eq!(format_timestamp(later), "2023-11-05T17:04:09Z");
    }

    #[test]
    fn test_build_payout() {
        let body = build_payout(&new_year, &payout("test", "233")).unwrap();
        assert_eq!(body.country, "GHA");
        assert_eq!(body.amount, "1000");
        assert_eq!(body.currency, "GHS");
        assert_eq!(body.recipient.party_type, "MSISDN");
        assert_eq!(body.recipient.address.value, "233247492147");
        assert_eq!(body.statement_description, "test");
        assert_eq!(body.customer_timestamp, "2021-01-01T00:00:00Z");
    }

    #[test]
    fn test_payout_wire_shape() {
        let body = build_payout(&new_year, &payout("test", "233")).unwrap();
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["payoutId"], "d334c312-6c18-4d7e-a0f1-097d398543d3");
        assert_eq!(json["recipient"]["type"], "MSISDN");
        assert_eq!(json["recipient"]["address"]["value"], "233247492147");
        assert_eq!(json["customerTimestamp"], "2021-01-01T00:00:00Z");
        assert_eq!(json["statementDescription"], "test");
    }

    #[test]
    fn test_deposit_omits_missing_pre_auth_code() {
        let request = DepositRequest {
            deposit_id: "dep-1".to_string(),
            amount: Amount::new("15", "ZMW"),
            description: "Note of 4 to 22 chars".to_string(),
            phone_number: PhoneNumber::new("260", "763456789"),
            correspondent: "MTN_MOMO_ZMB".to_string(),
            pre_auth_code: None,
        };
        let body = build_deposit(&new_year, &request).unwrap();
        assert_eq!(body.country, "ZMB");
        assert_eq!(body.payer.address.value, "260763456789");

        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("preAuthorisationCode").is_none());

        let request = DepositRequest {
            pre_auth_code: Some("QJS3RSK".to_string()),
            ..request
        };
        let json = serde_json::to_value(build_deposit(&new_year, &request).unwrap()).unwrap();
        assert_eq!(json["preAuthorisationCode"], "QJS3RSK");
    }

    #[test]
    fn test_bulk_payouts_abort_on_first_bad_country() {
        let requests = vec![payout("first", "233"), payout("second", "999"), payout("third", "233")];
        match build_bulk_payouts(&new_year, &requests) {
            Err(PawaPayError::UnknownCallingCode { calling_code }) => assert_eq!(calling_code, "999"),
            other => panic!("expected UnknownCallingCode, got {:?}", other),
        }
    }

    #[test]
    fn test_bulk_payouts_keep_order() {
        let requests = vec![payout("first", "233"), payout("second", "260")];
        let bodies = build_bulk_payouts(&new_year, &requests).unwrap();
        let descriptions: Vec<_> = bodies.iter().map(|b| b.statement_description.as_str()).collect();
        assert_eq!(descriptions, ["first", "second"]);
        assert_eq!(bodies[1].country, "ZMB");
    }

    #[test]
    fn test_resend_callback_serializes_single_id() {
        let json = serde_json::to_string(&ResendCallbackRequest::payout("p1")).unwrap();
        assert_eq!(json, r#"{"payoutId":"p1"}"#);
        let json = serde_json::to_string(&ResendCallbackRequest::refund("r1")).unwrap();
        assert_eq!(json, r#"{"refundId":"r1"}"#);
    }

    #[test]
    fn test_build_refund() {
        let request = RefundRequest {
            refund_id: "r1".to_string(),
            deposit_id: "d1".to_string(),
            amount: Amount::new("1000", "GHS"),
        };
        let json = serde_json::to_string(&build_refund(&request)).unwrap();
        assert_eq!(
            json,
            r#"{"refundId":"r1","depositId":"d1","amount":"1000","currency":"GHS"}"#
        );
    }
}
