//! API handlers for the Cabana REST endpoints

pub mod bookings;
pub mod cabins;
pub mod date_changes;
pub mod health;
pub mod openapi;
pub mod payments;
pub mod promos;
pub mod settings;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::{error::AppError, AppState};

/// Identity claims issued by the auth frontend. Session mechanics live
/// elsewhere; the booking core only consumes "who" and "is_admin".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    #[serde(default)]
    pub is_admin: bool,
    pub exp: usize,
}

/// Extractor for back-office endpoints: requires a valid token with the
/// admin flag set.
pub struct AdminUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        if !auth_header.starts_with("Bearer ") {
            return Err(AppError::Authentication(
                "Invalid authorization header format".to_string(),
            ));
        }

        let token = &auth_header[7..];

        let claims = decode::<UserClaims>(
            token,
            &DecodingKey::from_secret(state.config.auth.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| AppError::Authentication(e.to_string()))?
        .claims;

        if !claims.is_admin {
            return Err(AppError::Authorization("Admin access required".to_string()));
        }

        Ok(AdminUser(claims))
    }
}
