use axum::{routing::get, routing::post, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::WebConfig;

use super::api::aircraft as aircraft_handlers;
use super::api::airport as airport_handlers;
use super::api::display as display_handlers;
use super::api_doc::ApiDoc;
use super::state::AppState;
use super::ui::handlers as ui_handlers;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // UI routes
        .route("/", get(ui_handlers::display))
        // Data endpoints
        .route("/airport/{code}", get(airport_handlers::get_airport))
        .route(
            "/aircraft/{latitude}/{longitude}/{distance}",
            get(aircraft_handlers::get_aircraft),
        )
        // Display endpoints
        .route("/api/display", get(display_handlers::get_display))
        .route("/api/display/frame", get(display_handlers::get_frame))
        .route("/api/display/input", post(display_handlers::post_input))
        // Static files
        .nest_service("/static", ServeDir::new("src/web/static"))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: &WebConfig, state: AppState) -> std::io::Result<()> {
    let app = router(state);

    log::info!("Starting server on {}", config.bind);

    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutting down");
}
