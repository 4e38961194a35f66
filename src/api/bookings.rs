//! Booking endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    models::booking::{Booking, CreateBooking, UpdateBooking},
};

use super::AdminUser;

/// Query for the unavailable-dates calendar feed
#[derive(Deserialize, IntoParams)]
pub struct UnavailableDatesQuery {
    /// Cabin ID
    pub cabin_id: i32,
}

/// Unavailable-dates response: every booked night as an ISO date
#[derive(Serialize, ToSchema)]
pub struct UnavailableDatesResponse {
    pub cabin_id: i32,
    pub dates: Vec<NaiveDate>,
}

/// Create a booking (guest flow)
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking created", body = Booking),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Cabin not found"),
        (status = 409, description = "Dates unavailable"),
        (status = 422, description = "Promo code rejected")
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateBooking>,
) -> AppResult<(StatusCode, Json<Booking>)> {
    let booking = state.services.bookings.create(request).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// List all bookings (admin)
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All bookings", body = Vec<Booking>)
    )
)]
pub async fn list_bookings(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
) -> AppResult<Json<Vec<Booking>>> {
    let bookings = state.services.bookings.list().await?;
    Ok(Json(bookings))
}

/// Get a booking by reference
#[utoipa::path(
    get,
    path = "/bookings/{reference}",
    tag = "bookings",
    params(
        ("reference" = String, Path, description = "Booking reference")
    ),
    responses(
        (status = 200, description = "Booking details", body = Booking),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<crate::AppState>,
    Path(reference): Path<String>,
) -> AppResult<Json<Booking>> {
    let booking = state.services.bookings.get_by_reference(&reference).await?;
    Ok(Json(booking))
}

/// Admin field correction; date edits re-check availability
#[utoipa::path(
    patch,
    path = "/bookings/{reference}",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(
        ("reference" = String, Path, description = "Booking reference")
    ),
    request_body = UpdateBooking,
    responses(
        (status = 200, description = "Booking updated", body = Booking),
        (status = 404, description = "Booking not found"),
        (status = 409, description = "New dates unavailable")
    )
)]
pub async fn update_booking(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Path(reference): Path<String>,
    Json(request): Json<UpdateBooking>,
) -> AppResult<Json<Booking>> {
    let booking = state.services.bookings.admin_update(&reference, request).await?;
    Ok(Json(booking))
}

/// Cancel a booking
#[utoipa::path(
    post,
    path = "/bookings/{reference}/cancel",
    tag = "bookings",
    params(
        ("reference" = String, Path, description = "Booking reference")
    ),
    responses(
        (status = 200, description = "Booking cancelled", body = Booking),
        (status = 404, description = "Booking not found"),
        (status = 422, description = "Already cancelled")
    )
)]
pub async fn cancel_booking(
    State(state): State<crate::AppState>,
    Path(reference): Path<String>,
) -> AppResult<Json<Booking>> {
    let booking = state.services.bookings.cancel(&reference).await?;
    Ok(Json(booking))
}

/// Confirm a pending booking (admin)
#[utoipa::path(
    post,
    path = "/bookings/{reference}/confirm",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(
        ("reference" = String, Path, description = "Booking reference")
    ),
    responses(
        (status = 200, description = "Booking confirmed", body = Booking),
        (status = 404, description = "Booking not found"),
        (status = 422, description = "Booking is cancelled")
    )
)]
pub async fn confirm_booking(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Path(reference): Path<String>,
) -> AppResult<Json<Booking>> {
    let booking = state.services.bookings.confirm(&reference).await?;
    Ok(Json(booking))
}

/// Refund a paid booking (admin)
#[utoipa::path(
    post,
    path = "/bookings/{reference}/refund",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(
        ("reference" = String, Path, description = "Booking reference")
    ),
    responses(
        (status = 200, description = "Booking refunded", body = Booking),
        (status = 404, description = "Booking not found"),
        (status = 422, description = "Booking is not paid")
    )
)]
pub async fn refund_booking(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Path(reference): Path<String>,
) -> AppResult<Json<Booking>> {
    let booking = state.services.bookings.refund(&reference).await?;
    Ok(Json(booking))
}

/// Delete a booking permanently (admin)
#[utoipa::path(
    delete,
    path = "/bookings/{reference}",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(
        ("reference" = String, Path, description = "Booking reference")
    ),
    responses(
        (status = 204, description = "Booking deleted"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn delete_booking(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Path(reference): Path<String>,
) -> AppResult<StatusCode> {
    state.services.bookings.delete(&reference).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Booked nights for a cabin (booking calendar feed)
#[utoipa::path(
    get,
    path = "/bookings/unavailable-dates",
    tag = "bookings",
    params(UnavailableDatesQuery),
    responses(
        (status = 200, description = "Booked nights", body = UnavailableDatesResponse),
        (status = 404, description = "Cabin not found")
    )
)]
pub async fn unavailable_dates(
    State(state): State<crate::AppState>,
    Query(query): Query<UnavailableDatesQuery>,
) -> AppResult<Json<UnavailableDatesResponse>> {
    let dates = state.services.bookings.unavailable_dates(query.cabin_id).await?;
    Ok(Json(UnavailableDatesResponse {
        cabin_id: query.cabin_id,
        dates: dates.into_iter().collect(),
    }))
}
