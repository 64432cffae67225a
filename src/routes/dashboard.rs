//! Dashboard routes: the role-gated view and its underlying statistics.

use axum::{extract::State, Json};
use chrono::Utc;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentUser;
use crate::middleware::rbac::{RequireManagement, RequireStockViewer};
use crate::models::dashboard::{DashboardData, DashboardView, StockChart};
use crate::services::dashboard;
use crate::services::view::build as build_view;
use crate::AppState;

async fn load_for(state: &AppState, user: &CurrentUser) -> DashboardData {
    dashboard::load(
        &state.client,
        user,
        state.config.dashboard_timeout(),
        Utc::now(),
    )
    .await
}

/// GET /api/v1/dashboard — the dashboard as the caller's role sees it.
pub async fn view(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<DashboardView>>, AppError> {
    let data = load_for(&state, &user).await;
    let view = build_view(user.role.as_ref(), user.name.as_deref(), &data);
    Ok(ApiResponse::success(view))
}

/// GET /api/v1/dashboard/stats — raw statistics and load report.
pub async fn stats(
    State(state): State<AppState>,
    RequireManagement(user): RequireManagement,
) -> Result<Json<ApiResponse<DashboardData>>, AppError> {
    let data = load_for(&state, &user).await;
    Ok(ApiResponse::success(data))
}

/// GET /api/v1/dashboard/stock-chart — material stock bar chart.
pub async fn stock_chart(
    State(state): State<AppState>,
    RequireStockViewer(user): RequireStockViewer,
) -> Result<Json<ApiResponse<Option<StockChart>>>, AppError> {
    let data = load_for(&state, &user).await;
    Ok(ApiResponse::success(data.stock_chart))
}
