//! Promo code endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        enums::DiscountType,
        promo::{CreatePromoCode, PromoCode, UpdatePromoCode},
    },
};

use super::AdminUser;

/// Public promo validation request
#[derive(Deserialize, ToSchema)]
pub struct ValidatePromoRequest {
    pub code: String,
}

/// Public promo validation response; exposes only what the checkout form
/// needs to preview the discount
#[derive(Serialize, ToSchema)]
pub struct ValidatePromoResponse {
    pub valid: bool,
    pub code: String,
    pub discount_type: DiscountType,
    #[schema(value_type = f64)]
    pub discount_value: Decimal,
}

/// Validate a promo code for the checkout form
#[utoipa::path(
    post,
    path = "/promo-codes/validate",
    tag = "promo-codes",
    request_body = ValidatePromoRequest,
    responses(
        (status = 200, description = "Code is currently applicable", body = ValidatePromoResponse),
        (status = 422, description = "Code rejected, with reason")
    )
)]
pub async fn validate_promo(
    State(state): State<crate::AppState>,
    Json(request): Json<ValidatePromoRequest>,
) -> AppResult<Json<ValidatePromoResponse>> {
    let promo = state.services.promos.validate(&request.code).await?;
    Ok(Json(ValidatePromoResponse {
        valid: true,
        code: promo.code,
        discount_type: promo.discount_type,
        discount_value: promo.discount_value,
    }))
}

/// List promo codes (admin)
#[utoipa::path(
    get,
    path = "/promo-codes",
    tag = "promo-codes",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All promo codes", body = Vec<PromoCode>)
    )
)]
pub async fn list_promos(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
) -> AppResult<Json<Vec<PromoCode>>> {
    let promos = state.services.promos.list().await?;
    Ok(Json(promos))
}

/// Create a promo code (admin)
#[utoipa::path(
    post,
    path = "/promo-codes",
    tag = "promo-codes",
    security(("bearer_auth" = [])),
    request_body = CreatePromoCode,
    responses(
        (status = 201, description = "Promo code created", body = PromoCode),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Code already exists")
    )
)]
pub async fn create_promo(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Json(request): Json<CreatePromoCode>,
) -> AppResult<(StatusCode, Json<PromoCode>)> {
    let promo = state.services.promos.create(request).await?;
    Ok((StatusCode::CREATED, Json(promo)))
}

/// Update a promo code (admin)
#[utoipa::path(
    put,
    path = "/promo-codes/{id}",
    tag = "promo-codes",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Promo code ID")
    ),
    request_body = UpdatePromoCode,
    responses(
        (status = 200, description = "Promo code updated", body = PromoCode),
        (status = 404, description = "Promo code not found")
    )
)]
pub async fn update_promo(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdatePromoCode>,
) -> AppResult<Json<PromoCode>> {
    let promo = state.services.promos.update(id, request).await?;
    Ok(Json(promo))
}

/// Delete a promo code (admin)
#[utoipa::path(
    delete,
    path = "/promo-codes/{id}",
    tag = "promo-codes",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Promo code ID")
    ),
    responses(
        (status = 204, description = "Promo code deleted"),
        (status = 404, description = "Promo code not found")
    )
)]
pub async fn delete_promo(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.promos.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
