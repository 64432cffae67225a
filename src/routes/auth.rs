//! Authentication routes.

use axum::Json;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentUser;
use crate::models::user::UserProfile;

/// GET /api/v1/auth/me — current user profile from the access token.
pub async fn me(current_user: CurrentUser) -> Result<Json<ApiResponse<UserProfile>>, AppError> {
    Ok(ApiResponse::success(current_user.profile()))
}
