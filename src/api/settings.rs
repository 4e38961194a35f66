//! Settings endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::settings::{SystemSettings, UpdateSettings},
};

use super::AdminUser;

/// Get current settings. Public: the booking form needs fees and night
/// limits to preview prices.
#[utoipa::path(
    get,
    path = "/settings",
    tag = "settings",
    responses(
        (status = 200, description = "Current settings", body = SystemSettings)
    )
)]
pub async fn get_settings(
    State(state): State<crate::AppState>,
) -> AppResult<Json<SystemSettings>> {
    let settings = state.services.settings.get().await?;
    Ok(Json(settings))
}

/// Update settings (admin)
#[utoipa::path(
    put,
    path = "/settings",
    tag = "settings",
    security(("bearer_auth" = [])),
    request_body = UpdateSettings,
    responses(
        (status = 200, description = "Settings updated", body = SystemSettings),
        (status = 403, description = "Insufficient permissions")
    )
)]
pub async fn update_settings(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Json(request): Json<UpdateSettings>,
) -> AppResult<Json<SystemSettings>> {
    let settings = state.services.settings.update(request).await?;
    Ok(Json(settings))
}
