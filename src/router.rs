use axum::{
    extract::DefaultBodyLimit,
    handler::HandlerWithoutStateExt,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::handlers;
use crate::services::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let pages = ServeDir::new(&state.config.static_dir)
        .append_index_html_on_directories(true)
        .not_found_service(handlers::not_found.into_service());
    let media = ServeDir::new(state.uploads.upload_dir());
    let body_limit = state.config.max_upload_size;

    Router::new()
        // Emergency kits
        .route("/api/emergency-kit", post(handlers::kits::generate_emergency_kit))
        .route("/api/emergency-kit/:kit_id", get(handlers::kits::get_emergency_kit))
        // Incidents
        .route("/api/incident-report", post(handlers::incidents::submit_incident_report))
        .route(
            "/api/incident-report/:report_id/media",
            post(handlers::upload::upload_incident_media),
        )
        .route("/api/incidents", get(handlers::incidents::list_incidents))
        .route("/api/incidents/:report_id", put(handlers::incidents::update_incident_status))
        // Newsletter
        .route("/api/newsletter", post(handlers::newsletter::subscribe))
        .route("/api/newsletter/unsubscribe/:token", post(handlers::newsletter::unsubscribe))
        // Lookups
        .route("/api/weather-alerts", get(handlers::alerts::get_weather_alerts))
        .route("/api/safe-spots", get(handlers::safe_spots::get_safe_spots))
        // Health
        .route("/health", get(handlers::health::health_check))
        .nest_service("/uploads", media)
        .fallback_service(pages)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
