//! Date-change request endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppResult,
    models::{
        date_change::{DateChangeRequest, ProposeDateChange},
        enums::DateChangeStatus,
    },
};

use super::AdminUser;

/// Filter for the admin request list
#[derive(Deserialize, IntoParams)]
pub struct ListRequestsQuery {
    /// Only return requests with this status
    pub status: Option<DateChangeStatus>,
}

/// Propose new dates for an existing booking (guest flow)
#[utoipa::path(
    post,
    path = "/date-change-requests",
    tag = "date-changes",
    request_body = ProposeDateChange,
    responses(
        (status = 201, description = "Request created", body = DateChangeRequest),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Booking not found"),
        (status = 422, description = "Booking is cancelled")
    )
)]
pub async fn propose_date_change(
    State(state): State<crate::AppState>,
    Json(request): Json<ProposeDateChange>,
) -> AppResult<(StatusCode, Json<DateChangeRequest>)> {
    let created = state.services.date_changes.propose(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// List date-change requests (admin)
#[utoipa::path(
    get,
    path = "/date-change-requests",
    tag = "date-changes",
    security(("bearer_auth" = [])),
    params(ListRequestsQuery),
    responses(
        (status = 200, description = "Requests", body = Vec<DateChangeRequest>)
    )
)]
pub async fn list_date_changes(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Query(query): Query<ListRequestsQuery>,
) -> AppResult<Json<Vec<DateChangeRequest>>> {
    let requests = state.services.date_changes.list(query.status).await?;
    Ok(Json(requests))
}

/// Approve a pending request, moving the booking's dates (admin)
#[utoipa::path(
    post,
    path = "/date-change-requests/{id}/approve",
    tag = "date-changes",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Request ID")
    ),
    responses(
        (status = 200, description = "Request approved and booking moved", body = DateChangeRequest),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Requested dates no longer available"),
        (status = 422, description = "Request already decided")
    )
)]
pub async fn approve_date_change(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Path(id): Path<i32>,
) -> AppResult<Json<DateChangeRequest>> {
    let request = state.services.date_changes.approve(id).await?;
    Ok(Json(request))
}

/// Reject a pending request (admin)
#[utoipa::path(
    post,
    path = "/date-change-requests/{id}/reject",
    tag = "date-changes",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Request ID")
    ),
    responses(
        (status = 200, description = "Request rejected", body = DateChangeRequest),
        (status = 404, description = "Request not found"),
        (status = 422, description = "Request already decided")
    )
)]
pub async fn reject_date_change(
    State(state): State<crate::AppState>,
    AdminUser(_claims): AdminUser,
    Path(id): Path<i32>,
) -> AppResult<Json<DateChangeRequest>> {
    let request = state.services.date_changes.reject(id).await?;
    Ok(Json(request))
}
