use crate::config::db::DB;
use crate::config::AppConfig;
use crate::errors::{PageError, PAGE_500};
use axum::extract::FromRef;
use axum::handler::HandlerWithoutStateExt;
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::Router;
use axum_extra::extract::cookie::Key;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::error;

pub mod config;
pub mod errors;
pub mod model;
pub mod route;
pub mod service;
pub mod util;

// Application state shared across handlers
// Cloning AppState is cheap because it uses Arc internally to share the DB pool.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: Arc<DB>,
}

impl AppState {
    pub async fn new() -> Self {
        let config = AppConfig::from_env();

        let db = Arc::new(
            DB::new(&config.db.url, config.db.pool_size)
                .await
                .expect("Cannot connect to database"),
        );

        AppState {
            config: Arc::new(config),
            db,
        }
    }
}

// Signing key for the flash-message cookie jar, derived from the configured secret.
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        Key::derive_from(state.config.secret_key.as_bytes())
    }
}

// Application router creation
// Note: The order of layers is important.
// https://docs.rs/axum/latest/axum/middleware/index.html#ordering
pub async fn create_app(state: AppState) -> Router {
    let config = &state.config;

    let static_route = Router::new().nest_service(
        &config.static_url,
        ServeDir::new(config.static_path.clone()).not_found_service(handle_404.into_service()),
    );

    let mut app = Router::new()
        .merge(route::create_routes(config))
        .merge(static_route)
        .fallback(handle_404)
        .method_not_allowed_fallback(handle_405)
        .layer(ServiceBuilder::new().layer(CatchPanicLayer::custom(handle_panic)));

    if config.log.log_requests {
        app = app.layer(TraceLayer::new_for_http());
    }
    app.with_state(state)
}

pub async fn handle_404(_uri: Uri) -> PageError {
    PageError::NotFound
}

async fn handle_405() -> StatusCode {
    StatusCode::METHOD_NOT_ALLOWED
}

// Custom panic handler, logs the panic and returns a 500 response
fn handle_panic(panic: Box<dyn std::any::Any + Send>) -> Response {
    let panic_message = if let Some(s) = panic.downcast_ref::<&str>() {
        *s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else {
        "Unknown panic"
    };

    error!("App panicked: {}", panic_message);
    (StatusCode::INTERNAL_SERVER_ERROR, Html(PAGE_500)).into_response()
}
