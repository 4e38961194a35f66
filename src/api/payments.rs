//! Payment collaborator webhook
//!
//! The payment provider delivers a payment-succeeded event after checkout.
//! Signature verification happens at the gateway in front of this service;
//! here the event is applied idempotently to the booking.

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, services::bookings::PaymentEvent};

#[derive(Serialize, ToSchema)]
pub struct WebhookResponse {
    pub received: bool,
}

/// Apply a payment event to its booking
#[utoipa::path(
    post,
    path = "/payments/webhook",
    tag = "payments",
    request_body = PaymentEvent,
    responses(
        (status = 200, description = "Event applied (or replay ignored)", body = WebhookResponse),
        (status = 404, description = "Unknown booking reference")
    )
)]
pub async fn payment_webhook(
    State(state): State<crate::AppState>,
    Json(event): Json<PaymentEvent>,
) -> AppResult<Json<WebhookResponse>> {
    state.services.bookings.handle_payment_event(event).await?;
    Ok(Json(WebhookResponse { received: true }))
}
