//! Room Token API - issues short-lived LiveKit access tokens over HTTP
//!
//! A POST to `/api/token` creates a unique room name and participant
//! identity, signs a token granting join, publish and subscribe rights in that
//! room, and returns `{ token, url, roomName }`. Signing is done by the
//! LiveKit server SDK.
//!
//! ## Architecture
//!
//! - `config/` - Environment-driven configuration
//! - `services/` - Naming, token signing and metrics
//! - `handlers/` - HTTP handlers and the app factory
//! - `middleware/` - Request IDs and request metrics
//! - `models/` - Request/response bodies and audit records
//! - `errors` - Error type and its JSON rendering
//! - `telemetry` - Tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```no_run
//! use actix_web::HttpServer;
//! use room_token_api::{AppConfig, AppMetrics, create_app};
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let config = AppConfig::from_env();
//!     let metrics = AppMetrics::new().map_err(std::io::Error::other)?;
//!     HttpServer::new(move || create_app(config.clone(), metrics.clone()))
//!         .bind("127.0.0.1:8080")?
//!         .run()
//!         .await
//! }
//! ```

pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod telemetry;
pub mod utils;

pub use config::{AppConfig, LiveKitConfig, LiveKitCredentials, MetricsConfig, NamingConfig, ServerConfig};
pub use errors::{TOKEN_FAILURE_MESSAGE, TokenError};
pub use handlers::{
    TOKEN_ROUTES, create_app, create_base_app, create_openapi_spec, get_metrics, health, issue_token, version,
};
pub use middleware::{MetricsMiddleware, RequestId, RequestIdMiddleware};
pub use models::{
    ErrorResponse, HealthResponse, TokenAuditEvent, TokenEventOutcome, TokenResponse,
    VersionResponse,
};
pub use services::{
    AppMetrics, IssuedToken, RoomGrant, TokenIssuer, generate_participant_identity,
    generate_room_name, is_valid_participant_identity, is_valid_room_name, issue_room_token,
};
pub use telemetry::{TelemetryConfig, init_tracing};
