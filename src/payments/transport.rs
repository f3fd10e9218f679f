//! HTTP exchange with pawaPay
//!
//! [`Transport::execute`] performs exactly one request and returns the decoded
//! body together with the [`ApiAnnotation`] of the exchange. Failures carry
//! the annotation as well, so the provider's answer is never lost.

use crate::config::PawaPayConfig;
use crate::error::{PawaPayError, PawaPayResult};
use crate::payments::types::ApiAnnotation;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, info};

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub struct Transport {
    config: PawaPayConfig,
    client: Client,
}

impl Transport {
    pub fn new(config: PawaPayConfig) -> PawaPayResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("pawapay-rs/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PawaPayError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(config, client))
    }

    /// Reuse an existing client. [`REQUEST_TIMEOUT`] is still applied to
    /// every request.
    pub fn with_client(config: PawaPayConfig, client: Client) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &PawaPayConfig {
        &self.config
    }

    /// Base URL followed by `segments`, each percent-encoded as a single
    /// path segment
    pub fn url_for(&self, segments: &[&str]) -> PawaPayResult<Url> {
        let mut url = Url::parse(self.config.base_url.trim()).map_err(|e| {
            PawaPayError::config(format!("Invalid base URL {}: {}", self.config.base_url, e))
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                PawaPayError::config(format!("Base URL {} cannot carry a path", self.config.base_url))
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    fn request(&self, method: Method, url: Url, payload: Option<String>) -> RequestBuilder {
        let request = self
            .client
            .request(method, url)
            .timeout(REQUEST_TIMEOUT)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.config.api_key));

        match payload {
            Some(payload) => request.body(payload),
            None => request,
        }
    }

    /// Send `body` (if any) to the resource at `path` and decode the response as `T`.
    ///
    /// An empty response body is decoded as JSON `null`, so `T = ()` or
    /// `Option<_>` accept it while struct shapes fail with a decode error.
    pub async fn execute<B, T>(
        &self,
        method: Method,
        path: &[&str],
        body: Option<&B>,
    ) -> PawaPayResult<(T, ApiAnnotation)>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned + Send,
    {
        let url = self.url_for(path)?;

        let request_payload = match body {
            Some(body) => serde_json::to_string(body)?,
            None => String::new(),
        };

        if self.config.log_request {
            if request_payload.is_empty() {
                info!("pawapay: making {} request to route {}", method, url);
            } else {
                info!(
                    "pawapay: making {} request to route {} with payload {}",
                    method, url, request_payload
                );
            }
        }

        let mut annotation = ApiAnnotation {
            url: if self.config.is_testing() {
                String::new()
            } else {
                url.to_string()
            },
            request_payload,
            ..Default::default()
        };

        let payload = body.map(|_| annotation.request_payload.clone());
        let response = self
            .request(method, url.clone(), payload)
            .send().await.map_err(|e| {
            error!("pawapay: failed to execute request to {}: {}", url, e);
            let message = if e.is_timeout() {
                format!("request timed out after {} seconds", REQUEST_TIMEOUT.as_secs())
            } else {
                e.to_string()
            };
            PawaPayError::transport(message, annotation.clone())
        })?;

        annotation.response_code = response.status().as_u16();
        let response_payload = response.text().await.map_err(|e| {
            error!("pawapay: failed to read response body from {}: {}", url, e);
            PawaPayError::transport(format!("unable to read response body: {}", e), annotation.clone())
        })?;
        annotation.response_payload = response_payload;

        if self.config.log_response {
            info!(
                "pawapay: got response {} code {}",
                annotation.response_payload, annotation.response_code
            );
        }

        if !annotation.is_success() {
            if self.config.log_response {
                error!(
                    "pawapay: error response body: {} for request payload {}",
                    annotation.response_payload, annotation.request_payload
                );
            }
            return Err(PawaPayError::unexpected_status(annotation));
        }

        let raw = if annotation.response_payload.trim().is_empty() {
            "null"
        } else {
            annotation.response_payload.as_str()
        };

        match serde_json::from_str::<T>(raw) {
            Ok(decoded) => {
                debug!(
                    "pawapay: decoded {} response from {}",
                    annotation.response_code, url
                );
                Ok((decoded, annotation))
            }
            Err(e) => {
                error!("pawapay: unable to decode response from {}: {}", url, e);
                Err(PawaPayError::decode(e.to_string(), annotation))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(base_url: &str) -> Transport {
        Transport::new(PawaPayConfig::new(base_url, "key")).unwrap()
    }

    #[test]
    fn test_url_for_joins_with_single_slash() {
        assert_eq!(
            transport("https://api.sandbox.pawapay.cloud")
                .url_for(&["payouts"])
                .unwrap()
                .as_str(),
            "https://api.sandbox.pawapay.cloud/payouts"
        );
        assert_eq!(
            transport("https://api.sandbox.pawapay.cloud/")
                .url_for(&["payouts", "bulk"])
                .unwrap()
                .as_str(),
            "https://api.sandbox.pawapay.cloud/payouts/bulk"
        );
    }

    #[test]
    fn test_url_for_encodes_ids_as_one_segment() {
        let transport = transport("https://api.sandbox.pawapay.cloud");
        assert_eq!(
            transport.url_for(&["payouts", "abc?x=1"]).unwrap().path(),
            "/payouts/abc%3Fx=1"
        );
        assert_eq!(
            transport
                .url_for(&["payouts", "../deposits/zzz"])
                .unwrap()
                .path(),
            "/payouts/..%2Fdeposits%2Fzzz"
        );
    }

    #[test]
    fn test_url_for_rejects_unparseable_base() {
        let result = transport("not a url").url_for(&["payouts"]);
        assert!(matches!(result, Err(PawaPayError::Config { .. })));
    }

    #[test]
    fn test_shared_client_still_gets_request_timeout() {
        let transport = Transport::with_client(
            PawaPayConfig::new("https://api.sandbox.pawapay.cloud", "key"),
            Client::new(),
        );
        let url = transport.url_for(&["payouts"]).unwrap();
        let request = transport
            .request(Method::POST, url, Some("{}".to_string()))
            .build()
            .unwrap();

        assert_eq!(request.timeout(), Some(&REQUEST_TIMEOUT));
        assert_eq!(request.headers()["authorization"], "Bearer key");
        assert_eq!(request.headers()["content-type"], "application/json");
    }

    #[tokio::test]
    async fn test_connection_failure_keeps_request_evidence() {
        // Port 9 (discard) is not expected to accept connections locally
        let transport = transport("http://127.0.0.1:9");
        let body = serde_json::json!({"payoutId": "p1"});
        let result = transport
            .execute::<_, serde_json::Value>(Method::POST, &["payouts"], Some(&body))
            .await;

        match result {
            Err(err @ PawaPayError::Transport { .. }) => {
                let annotation = err.annotation().unwrap();
                assert_eq!(annotation.url, "http://127.0.0.1:9/payouts");
                assert_eq!(annotation.request_payload, r#"{"payoutId":"p1"}"#);
                assert_eq!(annotation.response_code, 0);
                assert!(annotation.response_payload.is_empty());
                assert!(err.is_outcome_unknown());
            }
            other => panic!("expected transport error, got {:?}", other),
        }
    }
}
