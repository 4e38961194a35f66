//! Cabin endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{error::AppResult, models::cabin::Cabin};

/// List bookable cabins
#[utoipa::path(
    get,
    path = "/cabins",
    tag = "cabins",
    responses(
        (status = 200, description = "Active cabins", body = Vec<Cabin>)
    )
)]
pub async fn list_cabins(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Cabin>>> {
    let cabins = state.services.cabins.list_active().await?;
    Ok(Json(cabins))
}

/// Get a cabin by ID
#[utoipa::path(
    get,
    path = "/cabins/{id}",
    tag = "cabins",
    params(
        ("id" = i32, Path, description = "Cabin ID")
    ),
    responses(
        (status = 200, description = "Cabin details", body = Cabin),
        (status = 404, description = "Cabin not found")
    )
)]
pub async fn get_cabin(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Cabin>> {
    let cabin = state.services.cabins.get_by_id(id).await?;
    Ok(Json(cabin))
}
