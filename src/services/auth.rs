//! Access-token validation for tokens issued by the management API.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::id::RawId;
use crate::models::user::{UserProfile, UserRole};

/// JWT claims carried by access and refresh tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub user_id: RawId,
    pub token_type: String,
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl Claims {
    /// Build the user profile these claims describe.
    pub fn into_profile(self) -> Result<UserProfile, AppError> {
        let id = self.user_id.as_i64().ok_or(AppError::Unauthorized)?;
        let role = self
            .role
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(UserRole::from_label);
        Ok(UserProfile {
            id,
            username: self.username.unwrap_or_default(),
            name: self.name.filter(|n| !n.is_empty()),
            role,
        })
    }
}

/// Validate a JWT and return the claims.
pub fn validate_token(token: &str, jwt_secret: &str) -> Result<Claims, AppError> {
    let decoding_key = DecodingKey::from_secret(jwt_secret.as_bytes());
    let validation = Validation::default();

    jsonwebtoken::decode::<Claims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|e| {
            tracing::debug!(error = %e, "Rejected access token");
            AppError::Unauthorized
        })
}

/// Sign an access token for `profile`. Used by the mock upstream and tests.
pub fn issue_access_token(
    profile: &UserProfile,
    jwt_secret: &str,
    expiry_secs: i64,
) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        user_id: RawId::Int(profile.id),
        token_type: "access".to_string(),
        exp: (now + Duration::seconds(expiry_secs)).timestamp(),
        iat: Some(now.timestamp()),
        username: Some(profile.username.clone()),
        name: profile.name.clone(),
        role: profile.role.as_ref().map(|r| r.label().to_string()),
    };
    let encoding_key = EncodingKey::from_secret(jwt_secret.as_bytes());
    jsonwebtoken::encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| AppError::Internal(format!("Token generation failed: {e}")))
}
