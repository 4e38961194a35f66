//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{bookings, cabins, date_changes, health, payments, promos, settings};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cabana API",
        version = "1.0.0",
        description = "Vacation Cabin Booking REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "Cabana Afina", email = "contact@cabana-afina.ro")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Cabins
        cabins::list_cabins,
        cabins::get_cabin,
        // Bookings
        bookings::create_booking,
        bookings::list_bookings,
        bookings::get_booking,
        bookings::update_booking,
        bookings::cancel_booking,
        bookings::confirm_booking,
        bookings::refund_booking,
        bookings::delete_booking,
        bookings::unavailable_dates,
        // Promo codes
        promos::validate_promo,
        promos::list_promos,
        promos::create_promo,
        promos::update_promo,
        promos::delete_promo,
        // Date changes
        date_changes::propose_date_change,
        date_changes::list_date_changes,
        date_changes::approve_date_change,
        date_changes::reject_date_change,
        // Payments
        payments::payment_webhook,
        // Settings
        settings::get_settings,
        settings::update_settings,
    ),
    components(
        schemas(
            // Bookings
            crate::models::booking::Booking,
            crate::models::booking::CreateBooking,
            crate::models::booking::UpdateBooking,
            crate::models::booking::PriceBreakdown,
            bookings::UnavailableDatesResponse,
            // Cabins
            crate::models::cabin::Cabin,
            // Enums
            crate::models::enums::BookingStatus,
            crate::models::enums::PaymentStatus,
            crate::models::enums::DiscountType,
            crate::models::enums::DateChangeStatus,
            crate::models::enums::Language,
            // Promo codes
            crate::models::promo::PromoCode,
            crate::models::promo::PromoRejection,
            crate::models::promo::CreatePromoCode,
            crate::models::promo::UpdatePromoCode,
            promos::ValidatePromoRequest,
            promos::ValidatePromoResponse,
            // Date changes
            crate::models::date_change::DateChangeRequest,
            crate::models::date_change::ProposeDateChange,
            // Payments
            crate::services::bookings::PaymentEvent,
            payments::WebhookResponse,
            // Settings
            crate::models::settings::SystemSettings,
            crate::models::settings::UpdateSettings,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "cabins", description = "Cabin catalog"),
        (name = "bookings", description = "Booking lifecycle"),
        (name = "promo-codes", description = "Promo code validation and administration"),
        (name = "date-changes", description = "Date-change requests"),
        (name = "payments", description = "Payment provider webhook"),
        (name = "settings", description = "System settings")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
