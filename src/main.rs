use actix_web::HttpServer;
use room_token_api::{AppConfig, AppMetrics, ServerConfig, TelemetryConfig, create_app, init_tracing};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let telemetry = TelemetryConfig::from_env();
    if let Err(e) = init_tracing(&telemetry) {
        eprintln!("Failed to initialize tracing: {e}");
    }

    let config = AppConfig::from_env();
    let server = ServerConfig::from_env();
    let metrics = AppMetrics::new().map_err(std::io::Error::other)?;

    // Not fatal: token requests report the problem until it is fixed
    let missing = config.livekit.missing_variables();
    if !missing.is_empty() {
        tracing::warn!(
            missing = ?missing,
            "LiveKit configuration incomplete, token requests will fail"
        );
    }

    tracing::info!(
        address = %server.bind_address(),
        token_ttl_seconds = config.livekit.token_ttl_seconds,
        "Starting room token API"
    );

    HttpServer::new(move || create_app(config.clone(), metrics.clone()))
        .bind((server.host.as_str(), server.port))?
        .run()
        .await
}
