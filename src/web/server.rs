use axum::{routing::get, routing::post, Router};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::clock::SystemClock;
use crate::config::Config;
use crate::tracker::{LogObserver, Tracker};

use super::api::tracker as tracker_handlers;
use super::api_doc::ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<Mutex<Tracker>>,
}

impl AppState {
    pub fn new(tracker: Tracker) -> Self {
        Self {
            tracker: Arc::new(Mutex::new(tracker)),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/tracker/run", post(tracker_handlers::run))
        .route("/api/tracker/stop", post(tracker_handlers::stop))
        .route("/api/tracker/status", get(tracker_handlers::status))
        .route(
            "/api/tracker/status/mode",
            get(tracker_handlers::status_mode),
        )
        .route(
            "/api/tracker/status/sample",
            get(tracker_handlers::status_sample),
        )
        .route(
            "/api/tracker/status/trajectory",
            get(tracker_handlers::status_trajectory),
        )
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();
    let tracker = Tracker::new(
        config.tracker,
        Arc::new(SystemClock),
        Arc::new(LogObserver),
    );
    let app = router(AppState::new(tracker));

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await
}
