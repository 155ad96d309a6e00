//! OpenAPI specification generation and app factory.

use crate::{
    config::AppConfig,
    handlers::{TOKEN_ROUTES, get_metrics, health, issue_token, version},
    middleware::{MetricsMiddleware, RequestIdMiddleware},
    services::AppMetrics,
};
use actix_web::App;
use paperclip::actix::{OpenApiExt, web};
use paperclip::v2::models::{DefaultApiRaw, Info};

pub const OPENAPI_SPEC_PATH: &str = "/api/spec/v2";

pub fn create_openapi_spec() -> DefaultApiRaw {
    DefaultApiRaw {
        info: Info {
            title: "Room Token API".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            description: Some(
                "Issues short-lived LiveKit access tokens.\n\n\
                ## Token endpoint\n\
                `POST /api/token` creates a unique room name and participant identity and \
                returns `{ token, url, roomName }`. The token grants join, publish and \
                subscribe rights in that room only.\n\
                \n\
                Any other method returns `405` with `{ \"error\": \"Method not allowed\" }`. \
                Missing configuration or a signing failure returns `500` with \
                `{ \"error\": \"Failed to generate token\", \"message\": \"...\" }`.\n\
                \n\
                **Configuration:**\n\
                - `LIVEKIT_API_KEY`, `LIVEKIT_API_SECRET`, `LIVEKIT_URL` (required)\n\
                - `LIVEKIT_TOKEN_TTL_SECONDS` (default: 21600)\n\
                - `ROOM_NAME_PREFIX` (default: `edy`), `PARTICIPANT_PREFIX` (default: `user`)"
                    .into(),
            ),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Build the application with configuration loaded from the environment.
///
/// Used by tests that exercise the environment path end to end; `main` builds
/// its metrics once and calls [`create_app`] per worker instead.
pub fn create_base_app() -> Result<
    App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    >,
    prometheus::Error,
> {
    Ok(create_app(AppConfig::from_env(), AppMetrics::new()?))
}

/// Build the application from explicit configuration.
///
/// `metrics` is passed in rather than created here so that every worker of an
/// `HttpServer` reports into the same registry.
pub fn create_app(
    config: AppConfig,
    metrics: AppMetrics,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let mut app = App::new()
        .wrap(RequestIdMiddleware)
        .wrap(MetricsMiddleware)
        .wrap_api_with_spec(create_openapi_spec())
        .app_data(web::Data::new(config.livekit))
        .app_data(web::Data::new(config.naming))
        .app_data(web::Data::new(config.metrics))
        .app_data(web::Data::new(metrics));

    // No method guard: the handler answers non-POST requests with a JSON 405
    for path in TOKEN_ROUTES {
        app = app.service(web::resource(*path).route(web::Route::new().to(issue_token)));
    }

    app.service(web::resource("/api/health").route(web::get().to(health)))
        .service(web::resource("/api/version").route(web::get().to(version)))
        .service(web::resource("/api/metrics").route(web::get().to(get_metrics)))
        .with_json_spec_at(OPENAPI_SPEC_PATH)
        .build()
}
