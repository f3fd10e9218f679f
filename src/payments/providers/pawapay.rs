//! pawaPay provider implementation
//!
//! This module maps each documented pawaPay endpoint for payouts, deposits
//! and refunds onto [`MobileMoneyProvider`].

use crate::clock::Clock;
use crate::config::PawaPayConfig;
use crate::error::PawaPayResult;
use crate::payments::payload::{
    build_bulk_deposits, build_bulk_payouts, build_deposit, build_payout, build_refund,
    ResendCallbackRequest,
};
use crate::payments::traits::MobileMoneyProvider;
use crate::payments::transport::Transport;
use crate::payments::types::{
    ApiAnnotation, BulkDepositResponse, BulkPayoutResponse, CreateDepositResponse,
    CreatePayoutResponse, CreateRefundResponse, Deposit, DepositRequest, DepositStatusResponse,
    Payout, PayoutRequest, PayoutStatusResponse, Refund, RefundRequest, RefundStatusResponse,
};
use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use tracing::{info, warn};

/// pawaPay client
pub struct PawaPayService {
    transport: Transport,
}

impl PawaPayService {
    /// Create a new pawaPay service with its own HTTP client
    pub fn new(config: PawaPayConfig) -> PawaPayResult<Self> {
        config.validate()?;
        Ok(Self {
            transport: Transport::new(config)?,
        })
    }

    /// Create a service that shares `client` with the rest of the application.
    /// Requests still time out after
    /// [`REQUEST_TIMEOUT`](crate::payments::transport::REQUEST_TIMEOUT).
    pub fn with_client(config: PawaPayConfig, client: Client) -> PawaPayResult<Self> {
        config.validate()?;
        Ok(Self {
            transport: Transport::with_client(config, client),
        })
    }

    /// Create service from environment variables
    pub fn from_env() -> PawaPayResult<Self> {
        Self::new(PawaPayConfig::from_env()?)
    }

    pub fn config(&self) -> &PawaPayConfig {
        self.transport.config()
    }

    // pawaPay answers lookups with an array; the first element is the record.
    async fn lookup<T>(&self, path: &[&str]) -> PawaPayResult<(T, ApiAnnotation)>
    where
        T: DeserializeOwned + Default + Send,
    {
        let (records, annotation): (Vec<T>, _) = self
            .transport
            .execute(Method::GET, path, None::<&()>)
            .await?;

        if records.is_empty() {
            warn!("pawapay: no record found at {}", path.join("/"));
        }

        let record = records.into_iter().next().unwrap_or_default();
        Ok((record, annotation))
    }
}

#[async_trait]
impl MobileMoneyProvider for PawaPayService {
    async fn create_payout(
        &self,
        clock: &dyn Clock,
        request: &PayoutRequest,
    ) -> PawaPayResult<CreatePayoutResponse> {
        info!(
            "Creating pawaPay payout: {} {} {}",
            request.amount.value, request.amount.currency, request.payout_id
        );

        let payload = build_payout(clock, request)?;
        let (mut response, annotation): (CreatePayoutResponse, _) = self
            .transport
            .execute(Method::POST, &["payouts"], Some(&payload))
            .await?;
        response.annotation = annotation;

        info!(
            "pawaPay payout created: payout_id={}, status={}",
            response.payout_id, response.status
        );
        Ok(response)
    }

    async fn create_bulk_payout(
        &self,
        clock: &dyn Clock,
        requests: &[PayoutRequest],
    ) -> PawaPayResult<BulkPayoutResponse> {
        info!("Creating pawaPay bulk payout of {} items", requests.len());

        let payload = build_bulk_payouts(clock, requests)?;
        let (results, annotation): (Vec<CreatePayoutResponse>, _) = self
            .transport
            .execute(Method::POST, &["payouts", "bulk"], Some(&payload))
            .await?;

        info!("pawaPay bulk payout submitted: {} results", results.len());
        Ok(BulkPayoutResponse {
            results,
            annotation,
        })
    }

    async fn get_payout(&self, payout_id: &str) -> PawaPayResult<Payout> {
        info!("Retrieving pawaPay payout: payout_id={}", payout_id);

        let (mut payout, annotation): (Payout, _) =
            self.lookup(&["payouts", payout_id]).await?;
        payout.annotation = annotation;
        Ok(payout)
    }

    async fn resend_payout_callback(&self, payout_id: &str) -> PawaPayResult<PayoutStatusResponse> {
        info!("Resending pawaPay payout callback: payout_id={}", payout_id);

        let payload = ResendCallbackRequest::payout(payout_id);
        let (mut response, annotation): (PayoutStatusResponse, _) = self
            .transport
            .execute(Method::POST, &["payouts", "resend-callback"], Some(&payload))
            .await?;
        response.annotation = annotation;
        Ok(response)
    }

    async fn fail_enqueued_payout(&self, payout_id: &str) -> PawaPayResult<PayoutStatusResponse> {
        info!("Failing enqueued pawaPay payout: payout_id={}", payout_id);

        let (mut response, annotation): (PayoutStatusResponse, _) = self
            .transport
            .execute(
                Method::POST,
                &["payouts", "fail-enqueued", payout_id],
                None::<&()>,
            )
            .await?;
        response.annotation = annotation;

        info!(
            "pawaPay payout fail-enqueued: payout_id={}, status={}",
            payout_id, response.status
        );
        Ok(response)
    }

    async fn create_deposit(
        &self,
        clock: &dyn Clock,
        request: &DepositRequest,
    ) -> PawaPayResult<CreateDepositResponse> {
        info!(
            "Initiating pawaPay deposit: {} {} {}",
            request.amount.value, request.amount.currency, request.deposit_id
        );

        let payload = build_deposit(clock, request)?;
        let (mut response, annotation): (CreateDepositResponse, _) = self
            .transport
            .execute(Method::POST, &["deposits"], Some(&payload))
            .await?;
        response.annotation = annotation;

        info!(
            "pawaPay deposit initiated: deposit_id={}, status={}",
            response.deposit_id, response.status
        );
        Ok(response)
    }

    async fn create_bulk_deposit(
        &self,
        clock: &dyn Clock,
        requests: &[DepositRequest],
    ) -> PawaPayResult<BulkDepositResponse> {
        info!("Initiating pawaPay bulk deposit of {} items", requests.len());

        let payload = build_bulk_deposits(clock, requests)?;
        let (results, annotation): (Vec<CreateDepositResponse>, _) = self
            .transport
            .execute(Method::POST, &["deposits", "bulk"], Some(&payload))
            .await?;

        Ok(BulkDepositResponse {
            results,
            annotation,
        })
    }

    async fn get_deposit(&self, deposit_id: &str) -> PawaPayResult<Deposit> {
        info!("Retrieving pawaPay deposit: deposit_id={}", deposit_id);

        let (mut deposit, annotation): (Deposit, _) =
            self.lookup(&["deposits", deposit_id]).await?;
        deposit.annotation = annotation;
        Ok(deposit)
    }

    async fn resend_deposit_callback(
        &self,
        deposit_id: &str,
    ) -> PawaPayResult<DepositStatusResponse> {
        info!("Resending pawaPay deposit callback: deposit_id={}", deposit_id);

        let payload = ResendCallbackRequest::deposit(deposit_id);
        let (mut response, annotation): (DepositStatusResponse, _) = self
            .transport
            .execute(Method::POST, &["deposits", "resend-callback"], Some(&payload))
            .await?;
        response.annotation = annotation;
        Ok(response)
    }

    async fn create_refund(&self, request: &RefundRequest) -> PawaPayResult<CreateRefundResponse> {
        info!(
            "Requesting pawaPay refund: refund_id={}, deposit_id={}",
            request.refund_id, request.deposit_id
        );

        let payload = build_refund(request);
        let (mut response, annotation): (CreateRefundResponse, _) = self
            .transport
            .execute(Method::POST, &["refunds"], Some(&payload))
            .await?;
        response.annotation = annotation;

        info!(
            "pawaPay refund requested: refund_id={}, status={}",
            response.refund_id, response.status
        );
        Ok(response)
    }

    async fn get_refund(&self, refund_id: &str) -> PawaPayResult<Refund> {
        info!("Retrieving pawaPay refund: refund_id={}", refund_id);

        let (mut refund, annotation): (Refund, _) =
            self.lookup(&["refunds", refund_id]).await?;
        refund.annotation = annotation;
        Ok(refund)
    }

    async fn resend_refund_callback(&self, refund_id: &str) -> PawaPayResult<RefundStatusResponse> {
        info!("Resending pawaPay refund callback: refund_id={}", refund_id);

        let payload = ResendCallbackRequest::refund(refund_id);
        let (mut response, annotation): (RefundStatusResponse, _) = self
            .transport
            .execute(Method::POST, &["refunds", "resend-callback"], Some(&payload))
            .await?;
        response.annotation = annotation;
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PawaPayError;

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = PawaPayService::new(PawaPayConfig::new("https://api.sandbox.pawapay.cloud", ""));
        assert!(matches!(result, Err(PawaPayError::Config { .. })));
    }

    #[test]
    fn test_with_client_keeps_config() {
        let config = PawaPayConfig::new("http://127.0.0.1:8080", "key").allow_logging();
        let service = PawaPayService::with_client(config, Client::new()).unwrap();
        assert_eq!(service.config().base_url, "http://127.0.0.1:8080");
        assert!(service.config().log_request);
    }
}
