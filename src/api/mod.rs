pub mod errors;
pub mod models;
pub mod routes;

use std::path::PathBuf;

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Settings;
use crate::db::Database;
use crate::errors::{HoundError, RetryConfig};

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub artifacts_dir: PathBuf,
    pub retry: RetryConfig,
}

pub fn create_app_state(settings: &Settings) -> Result<AppState, HoundError> {
    let db = Database::new(&settings.db_path)?;
    Ok(AppState {
        db,
        artifacts_dir: PathBuf::from(&settings.artifacts_dir),
        retry: RetryConfig { max_retries: settings.write_retries },
    })
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(routes::health::health_check))
        .route("/api/filters", get(routes::filters::get_filters))
        .route("/api/search", post(routes::search::simple_search))
        .route("/api/search/suggested/:input", get(routes::search::suggested_search))
        .route("/api/search/advanced", post(routes::search::advanced_search))
        .route(
            "/api/search/advanced/suggested/:input/:operator/:type/:platform/:author/:port/:start_date/:end_date",
            get(routes::search::suggested_search_advanced),
        )
        .route("/api/exploits/:id", get(routes::records::view_exploit_code))
        .route("/api/shellcodes/:id", get(routes::records::view_shellcode_code))
        .route("/api/suggestions", get(routes::suggestions::list_suggestions).post(routes::suggestions::add_suggestion))
        .route("/api/suggestions/:id", delete(routes::suggestions::delete_suggestion))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Router with a permissive CORS layer, for UIs served from another origin.
pub fn build_router_with_cors(state: AppState) -> Router {
    build_router(state).layer(CorsLayer::permissive())
}
