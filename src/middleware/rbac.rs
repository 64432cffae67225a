//! Role-based access control extractors for Axum handlers.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::errors::AppError;
use crate::middleware::auth::CurrentUser;
use crate::models::user::UserRole;
use crate::AppState;

/// Extractor that requires the ADMIN or MANAGER role.
#[derive(Debug, Clone)]
pub struct RequireManagement(pub CurrentUser);

impl FromRequestParts<AppState> for RequireManagement {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        match user.role {
            Some(UserRole::Admin | UserRole::Manager) => Ok(RequireManagement(user)),
            _ => Err(AppError::Forbidden(
                "Manager or admin access required".to_string(),
            )),
        }
    }
}

/// Extractor for roles that may see stock levels: ADMIN, MANAGER, or PURCHASING.
#[derive(Debug, Clone)]
pub struct RequireStockViewer(pub CurrentUser);

impl FromRequestParts<AppState> for RequireStockViewer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        match user.role {
            Some(UserRole::Admin | UserRole::Manager | UserRole::Purchasing) => {
                Ok(RequireStockViewer(user))
            }
            _ => Err(AppError::Forbidden(
                "Purchasing, manager, or admin access required".to_string(),
            )),
        }
    }
}
