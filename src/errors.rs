//! Error types for the token endpoint and their JSON rendering.

use crate::models::ErrorResponse;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use livekit_api::access_token::AccessTokenError;

/// Generic message returned alongside every internal failure
pub const TOKEN_FAILURE_MESSAGE: &str = "Failed to generate token";

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Missing LiveKit configuration: {0}")]
    MissingConfiguration(String),

    #[error("Invalid LiveKit URL {0}")]
    InvalidUrl(String),

    #[error("Token TTL of {0} seconds is outside the supported range")]
    InvalidTokenTtl(u64),

    #[error("Token signing failed: {0}")]
    Signing(#[from] AccessTokenError),
}

impl TokenError {
    /// Short label used for metrics and audit logs
    pub fn reason(&self) -> &'static str {
        match self {
            TokenError::MethodNotAllowed => "method_not_allowed",
            TokenError::MissingConfiguration(_) => "missing_configuration",
            TokenError::InvalidUrl(_) => "invalid_url",
            TokenError::InvalidTokenTtl(_) => "invalid_token_ttl",
            TokenError::Signing(_) => "signing",
        }
    }
}

impl ResponseError for TokenError {
    fn status_code(&self) -> StatusCode {
        match self {
            TokenError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            TokenError::MethodNotAllowed => ErrorResponse {
                error: self.to_string(),
                message: None,
            },
            _ => ErrorResponse {
                error: TOKEN_FAILURE_MESSAGE.to_string(),
                message: Some(self.to_string()),
            },
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn test_method_not_allowed_body() {
        let resp = TokenError::MethodNotAllowed.error_response();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Method not allowed" }));
    }

    #[actix_web::test]
    async fn test_internal_failure_body_carries_error_text() {
        let err = TokenError::MissingConfiguration("LIVEKIT_URL".to_string());
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], TOKEN_FAILURE_MESSAGE);
        assert_eq!(json["message"], "Missing LiveKit configuration: LIVEKIT_URL");
    }

    #[test]
    fn test_signing_errors_are_internal() {
        let err = TokenError::from(AccessTokenError::InvalidKeys);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.reason(), "signing");
    }
}
