//! Client for the pawaPay mobile-money API
//!
//! Builds typed payout, deposit and refund requests, sends them with a
//! bearer credential and decodes the responses. Every value returned, and
//! every error raised after a request went out, carries an [`ApiAnnotation`]
//! with the URL, the raw request and response payloads and the status code.
//!
//! ```rust,no_run
//! use pawapay::{Amount, MobileMoneyProvider, PawaPayConfig, PawaPayService, PayoutRequest, PhoneNumber, SystemClock};
//!
//! # async fn run() -> Result<(), pawapay::PawaPayError> {
//! let service = PawaPayService::new(PawaPayConfig::from_env()?)?;
//! let request = PayoutRequest {
//!     payout_id: "d334c312-6c18-4d7e-a0f1-097d398543d3".to_string(),
//!     amount: Amount::new("1000", "GHS"),
//!     description: "test".to_string(),
//!     phone_number: PhoneNumber::new("233", "247492147"),
//!     correspondent: "MTN_MOMO_GHA".to_string(),
//! };
//!
//! match service.create_payout(&SystemClock, &request).await {
//!     Ok(response) => println!("{} {}", response.payout_id, response.status),
//!     Err(err) if err.is_outcome_unknown() => {
//!         // Confirm through get_payout or the callback before retrying
//!     }
//!     Err(err) => return Err(err),
//! }
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod config;
pub mod correspondents;
pub mod country;
pub mod error;
pub mod payments;

pub use crate::clock::{Clock, SystemClock};
pub use crate::config::{Environment, PawaPayConfig};
pub use crate::correspondents::{CorrespondentCatalog, MomoMapping};
pub use crate::country::resolve_country;
pub use crate::error::{PawaPayError, PawaPayResult};
pub use crate::payments::providers::PawaPayService;
pub use crate::payments::traits::MobileMoneyProvider;
pub use crate::payments::types::{
    Amount, ApiAnnotation, BulkDepositResponse, BulkPayoutResponse, CreateDepositResponse,
    CreatePayoutResponse, CreateRefundResponse, Deposit, DepositRequest, DepositStatusResponse,
    Payout, PayoutRequest, PayoutStatusResponse, PhoneNumber, Refund, RefundRequest,
    RefundStatusResponse, TransactionRecord,
};
