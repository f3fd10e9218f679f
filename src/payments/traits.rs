//! Mobile-money provider trait definitions
//!
//! Defines the interface of a mobile-money provider, so applications can
//! swap the real client for a stub in their own tests.

use crate::clock::Clock;
use crate::error::PawaPayResult;
use crate::payments::types::{
    BulkDepositResponse, BulkPayoutResponse, CreateDepositResponse, CreatePayoutResponse,
    CreateRefundResponse, Deposit, DepositRequest, DepositStatusResponse, Payout, PayoutRequest,
    PayoutStatusResponse, Refund, RefundRequest, RefundStatusResponse,
};
use async_trait::async_trait;

/// One method per provider endpoint. Every call is a single request/response
/// exchange with no retries.
///
/// A transport or status error does not prove the provider ignored the
/// request (see [`crate::PawaPayError::is_outcome_unknown`]); confirm through
/// the matching get operation or the callback.
#[async_trait]
pub trait MobileMoneyProvider: Send + Sync {
    /// Send money to a mobile wallet
    ///
    /// # Arguments
    /// * `clock` - Source of the `customerTimestamp` field
    /// * `request` - Payout ID, amount, description, phone number and correspondent
    async fn create_payout(
        &self,
        clock: &dyn Clock,
        request: &PayoutRequest,
    ) -> PawaPayResult<CreatePayoutResponse>;

    /// Send several payouts in one request. The batch is rejected before
    /// sending if any phone number has an unknown calling code.
    async fn create_bulk_payout(
        &self,
        clock: &dyn Clock,
        requests: &[PayoutRequest],
    ) -> PawaPayResult<BulkPayoutResponse>;

    /// Look up a payout. An unknown ID yields a default record for which
    /// [`crate::TransactionRecord::is_not_found`] is true.
    async fn get_payout(&self, payout_id: &str) -> PawaPayResult<Payout>;

    async fn resend_payout_callback(&self, payout_id: &str) -> PawaPayResult<PayoutStatusResponse>;

    /// Force an enqueued payout into the failed state
    async fn fail_enqueued_payout(&self, payout_id: &str) -> PawaPayResult<PayoutStatusResponse>;

    /// Ask a payer to approve a deposit from their wallet
    async fn create_deposit(
        &self,
        clock: &dyn Clock,
        request: &DepositRequest,
    ) -> PawaPayResult<CreateDepositResponse>;

    async fn create_bulk_deposit(
        &self,
        clock: &dyn Clock,
        requests: &[DepositRequest],
    ) -> PawaPayResult<BulkDepositResponse>;

    async fn get_deposit(&self, deposit_id: &str) -> PawaPayResult<Deposit>;

    async fn resend_deposit_callback(
        &self,
        deposit_id: &str,
    ) -> PawaPayResult<DepositStatusResponse>;

    /// Refund a completed deposit
    async fn create_refund(&self, request: &RefundRequest) -> PawaPayResult<CreateRefundResponse>;

    async fn get_refund(&self, refund_id: &str) -> PawaPayResult<Refund>;

    async fn resend_refund_callback(&self, refund_id: &str) -> PawaPayResult<RefundStatusResponse>;
}
