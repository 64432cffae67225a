//! Route definitions for the millboard API.

pub mod auth;
pub mod dashboard;
pub mod health;

use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::errors::AppError;
use crate::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let origin = match HeaderValue::from_str(&state.config.frontend_url) {
        Ok(value) => AllowOrigin::exact(value),
        Err(_) => {
            tracing::warn!(frontend_url = %state.config.frontend_url, "Invalid FRONTEND_URL, CORS allows no origins");
            AllowOrigin::list(Vec::<HeaderValue>::new())
        }
    };
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let auth_routes = Router::new().route("/auth/me", get(auth::me));

    let dashboard_routes = Router::new()
        .route("/dashboard", get(dashboard::view))
        .route("/dashboard/stats", get(dashboard::stats))
        .route("/dashboard/stock-chart", get(dashboard::stock_chart));

    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .nest("/api/v1", auth_routes)
        .nest("/api/v1", dashboard_routes)
        .fallback(|| async { AppError::NotFound("Route not found".to_string()) })
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
