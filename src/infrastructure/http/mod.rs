pub mod request_id;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::controllers::{health, podcast::PodcastController};
use crate::domain::podcast::PodcastService;
use crate::infrastructure::config::Config;

pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};

/// Room for multipart boundaries and the optional form fields on top of the file
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the application router with all routes and layers
pub fn build_router(
    podcast_service: Arc<PodcastService>,
    podcast_controller: Arc<PodcastController>,
    max_upload_bytes: usize,
) -> Router {
    let podcast_routes = Router::new()
        .route("/api/podcasts", post(PodcastController::create_podcast))
        .route("/api/podcasts/:podcastId", get(PodcastController::get_podcast))
        .with_state(podcast_controller)
        .layer(DefaultBodyLimit::max(
            max_upload_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES),
        ));

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(podcast_service)
        .merge(podcast_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn(request_id_middleware)),
        )
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    podcast_service: Arc<PodcastService>,
    podcast_controller: Arc<PodcastController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(podcast_service, podcast_controller, config.max_upload_bytes);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
