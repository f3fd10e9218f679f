use anyhow::Context;
use pawapay::{
    Amount, CorrespondentCatalog, MobileMoneyProvider, PawaPayConfig, PawaPayService,
    PayoutRequest, PhoneNumber, SystemClock,
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt::init();

    // Request logging is a debugging aid, the annotation already has the payload
    let config = PawaPayConfig::from_env()?.allow_request_logging();
    tracing::info!("Starting pawaPay demo");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!("API URL: {}", config.base_url);

    let service = PawaPayService::new(config)?;

    let phone_number = PhoneNumber::new("233", "247492147");
    let catalog = CorrespondentCatalog::from_env()?;
    let correspondent = catalog
        .mapping_for(&phone_number.country_code)?
        .correspondents
        .iter()
        .find(|c| c.is_operational("PAYOUT"))
        .context("no operational payout correspondent for Ghana")?
        .correspondent
        .clone();

    let request = PayoutRequest {
        payout_id: Uuid::new_v4().to_string(),
        amount: Amount::new("500", "GHS"),
        // Truncated to its first 22 characters on the wire
        description: "sending money to all my children".to_string(),
        phone_number,
        correspondent,
    };

    match service.create_payout(&SystemClock, &request).await {
        Ok(response) => {
            tracing::info!(
                "Payout {} accepted with status {} (HTTP {})",
                response.payout_id,
                response.status,
                response.annotation.response_code
            );
        }
        Err(err) => {
            if let Some(annotation) = err.annotation() {
                tracing::error!(
                    "Request failed with status code {}, response payload {}, error={}",
                    annotation.response_code,
                    annotation.response_payload,
                    err
                );
            } else {
                tracing::error!("Request failed before reaching pawaPay: {}", err);
            }

            if err.is_outcome_unknown() {
                tracing::warn!(
                    "Payout {} may still have been processed, confirm via get_payout or the callback",
                    request.payout_id
                );
            }
        }
    }

    Ok(())
}
