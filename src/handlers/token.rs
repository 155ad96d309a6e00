//! Access token endpoint handler.

use crate::{
    config::{LiveKitConfig, NamingConfig},
    errors::TokenError,
    middleware::RequestId,
    models::{TokenAuditEvent, TokenEventOutcome, TokenResponse},
    services::{AppMetrics, issue_room_token},
    utils::http::{extract_client_ip, extract_user_agent},
};
use actix_web::{Error, HttpRequest, HttpResponse, Result, http::Method, http::header, web};
use paperclip::actix::api_v2_operation;

/// Paths the token endpoint is served on: the API path, the serverless
/// function path existing clients call, and the local test server path.
pub const TOKEN_ROUTES: &[&str] = &["/api/token", "/.netlify/functions/get-token", "/get-token"];

/// Room access token endpoint
///
/// Accepts POST only. Creates a new room name and participant identity and
/// returns a token that lets that participant join, publish and subscribe.
#[api_v2_operation(
    summary = "Issue Room Access Token",
    description = "Creates a unique room and participant identity and returns a signed LiveKit access token for them.",
    tags("Token"),
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 405, description = "Method not allowed", body = ErrorResponse),
        (status = 500, description = "Missing configuration or signing failure", body = ErrorResponse)
    )
)]
pub async fn issue_token(req: HttpRequest) -> Result<HttpResponse, Error> {
    let audit = |outcome| {
        TokenAuditEvent::new(
            outcome,
            extract_client_ip(&req),
            req.method().to_string(),
            req.uri().path().to_string(),
        )
        .with_user_agent(extract_user_agent(&req))
        .with_request_id(RequestId::of(&req))
    };

    if req.method() != Method::POST {
        let err = TokenError::MethodNotAllowed;
        audit(TokenEventOutcome::Rejected)
            .with_reason(err.reason())
            .log();
        return Err(err.into());
    }

    let default_livekit = LiveKitConfig::default();
    let livekit = req
        .app_data::<web::Data<LiveKitConfig>>()
        .map(|config| config.get_ref())
        .unwrap_or(&default_livekit);

    let default_naming = NamingConfig::default();
    let naming = req
        .app_data::<web::Data<NamingConfig>>()
        .map(|config| config.get_ref())
        .unwrap_or(&default_naming);

    let metrics = req.app_data::<web::Data<AppMetrics>>();

    match issue_room_token(livekit, naming) {
        Ok(issued) => {
            audit(TokenEventOutcome::Issued)
                .with_participant(&issued.room_name, &issued.identity)
                .log();
            if let Some(metrics) = metrics {
                metrics.record_token_issued();
            }

            Ok(HttpResponse::Ok()
                .insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
                .json(TokenResponse::from(issued)))
        }
        Err(err) => {
            tracing::error!(error = %err, reason = err.reason(), "Error generating token");
            audit(TokenEventOutcome::Failed)
                .with_reason(err.reason())
                .log();
            if let Some(metrics) = metrics {
                metrics.record_token_failure(err.reason());
            }

            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test};

    #[actix_web::test]
    async fn test_missing_app_data_is_a_configuration_error() {
        let app = test::init_service(
            App::new().route("/api/token", actix_web::web::route().to(issue_token)),
        )
        .await;

        let req = test::TestRequest::post().uri("/api/token").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn test_put_is_rejected() {
        let app = test::init_service(
            App::new().route("/api/token", actix_web::web::route().to(issue_token)),
        )
        .await;

        let req = test::TestRequest::put().uri("/api/token").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
