use crate::payments::types::ApiAnnotation;
use thiserror::Error;

pub type PawaPayResult<T> = Result<T, PawaPayError>;

/// Errors returned by the pawaPay client.
///
/// Variants that come out of an HTTP exchange carry the [`ApiAnnotation`]
/// recorded for it, so the provider's side of a failed call can still be
/// inspected.
#[derive(Debug, Error)]
pub enum PawaPayError {
    #[error("Unable to resolve country for calling code '{calling_code}'")]
    UnknownCallingCode { calling_code: String },

    #[error("Unable to serialize request body: {message}")]
    Serialization { message: String },

    #[error("Failed to execute request: {message}")]
    Transport {
        message: String,
        annotation: ApiAnnotation,
    },

    #[error("Invalid status code received, expected 200/201/204, got {status} with body {body}")]
    UnexpectedStatus {
        status: u16,
        body: String,
        annotation: ApiAnnotation,
    },

    #[error("Unable to decode response body: {message}")]
    Decode {
        message: String,
        annotation: ApiAnnotation,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl PawaPayError {
    pub fn unknown_calling_code(calling_code: impl Into<String>) -> Self {
        Self::UnknownCallingCode {
            calling_code: calling_code.into(),
        }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>, annotation: ApiAnnotation) -> Self {
        Self::Transport {
            message: message.into(),
            annotation,
        }
    }

    pub fn unexpected_status(annotation: ApiAnnotation) -> Self {
        Self::UnexpectedStatus {
            status: annotation.response_code,
            body: annotation.response_payload.clone(),
            annotation,
        }
    }

    pub fn decode(message: impl Into<String>, annotation: ApiAnnotation) -> Self {
        Self::Decode {
            message: message.into(),
            annotation,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// The exchange record, when the error happened during or after a request.
    pub fn annotation(&self) -> Option<&ApiAnnotation> {
        match self {
            Self::Transport { annotation, .. }
            | Self::UnexpectedStatus { annotation, .. }
            | Self::Decode { annotation, .. } => Some(annotation),
            _ => None,
        }
    }

    /// Whether the provider may have acted on the request despite the error.
    ///
    /// Callers must reconcile these through a status query or the callback
    /// webhook instead of assuming the operation did not happen.
    pub fn is_outcome_unknown(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::UnexpectedStatus { .. }
        )
    }

    /// Whether the error was raised before anything was sent.
    pub fn is_pre_flight(&self) -> bool {
        matches!(
            self,
            Self::UnknownCallingCode { .. } | Self::Serialization { .. } | Self::Config { .. }
        )
    }
}

impl From<serde_json::Error> for PawaPayError {
    fn from(err: serde_json::Error) -> Self {
        PawaPayError::serialization(format!("JSON error: {}", err))
    }
}

impl From<::config::ConfigError> for PawaPayError {
    fn from(err: ::config::ConfigError) -> Self {
        PawaPayError::config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected() -> ApiAnnotation {
        ApiAnnotation {
            url: "https://api.sandbox.pawapay.cloud/payouts".to_string(),
            request_payload: r#"{"payoutId":"abc"}"#.to_string(),
            response_payload: r#"{"errorMessage":"bad"}"#.to_string(),
            response_code: 400,
        }
    }

    #[test]
    fn test_unexpected_status_keeps_provider_evidence() {
        let err = PawaPayError::unexpected_status(rejected());
        match &err {
            PawaPayError::UnexpectedStatus { status, body, .. } => {
                assert_eq!(*status, 400);
                assert_eq!(body, r#"{"errorMessage":"bad"}"#);
            }
            other => panic!("unexpected variant: {:?}", other),
        }
        assert_eq!(err.annotation().unwrap().response_code, 400);
        assert!(err.to_string().contains("got 400"));
    }

    #[test]
    fn test_outcome_unknown_classification() {
        assert!(PawaPayError::unexpected_status(rejected()).is_outcome_unknown());
        assert!(PawaPayError::transport("timed out", ApiAnnotation::default()).is_outcome_unknown());
        assert!(!PawaPayError::decode("eof", rejected()).is_outcome_unknown());
        assert!(!PawaPayError::unknown_calling_code("999").is_outcome_unknown());
    }

    #[test]
    fn test_pre_flight_errors_have_no_annotation() {
        let err = PawaPayError::unknown_calling_code("999");
        assert!(err.is_pre_flight());
        assert!(err.annotation().is_none());
        assert_eq!(
            err.to_string(),
            "Unable to resolve country for calling code '999'"
        );
    }
}
