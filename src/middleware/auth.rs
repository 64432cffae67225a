//! JWT authentication extractor for Axum handlers.

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::errors::AppError;
use crate::models::user::{UserProfile, UserRole};
use crate::services::auth as auth_service;
use crate::AppState;

/// Authenticated user extracted from the JWT Bearer token.
///
/// The raw token is kept so it can be forwarded to the upstream API:
/// ```ignore
/// async fn handler(current_user: CurrentUser) -> impl IntoResponse { ... }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub name: Option<String>,
    pub role: Option<UserRole>,
    pub token: String,
}

impl CurrentUser {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username.clone(),
            name: self.name.clone(),
            role: self.role.clone(),
        }
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::Unauthorized)?;

        let token = bearer.token().to_string();
        let claims = auth_service::validate_token(&token, &state.config.jwt_secret)?;

        if claims.token_type != "access" {
            return Err(AppError::Unauthorized);
        }

        let profile = claims.into_profile()?;

        Ok(CurrentUser {
            id: profile.id,
            username: profile.username,
            name: profile.name,
            role: profile.role,
            token,
        })
    }
}
