//! Booking model and related request/response types

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::{BookingStatus, Language, PaymentStatus};

/// Booking model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Booking {
    pub id: i32,
    /// Human-shareable reference, e.g. `AF3K9ZQ2`
    pub booking_reference: String,
    pub cabin_id: i32,
    pub cabin_name: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: i32,
    pub guests: i32,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: Option<String>,
    pub special_requests: Option<String>,
    #[schema(value_type = f64)]
    pub base_price: Decimal,
    #[schema(value_type = f64)]
    pub cleaning_fee: Decimal,
    #[schema(value_type = f64)]
    pub service_fee: Decimal,
    #[schema(value_type = f64)]
    pub tax: Decimal,
    #[schema(value_type = f64)]
    pub discount: Decimal,
    #[schema(value_type = f64)]
    pub total: Decimal,
    pub promo_code: Option<String>,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub language: Language,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Guest booking request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBooking {
    pub cabin_id: i32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[validate(range(min = 1, message = "At least one guest is required"))]
    pub guests: i32,
    #[validate(length(min = 2, message = "Guest name is required"))]
    pub guest_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub guest_email: String,
    pub guest_phone: Option<String>,
    #[validate(length(max = 2000, message = "Special requests too long"))]
    pub special_requests: Option<String>,
    /// Optional promo code; validated and redeemed during creation
    pub promo_code: Option<String>,
    #[serde(default)]
    pub language: Language,
}

/// Admin booking correction. Only supplied fields are changed; a date change
/// re-runs the availability check against the new range.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBooking {
    #[validate(length(min = 2, message = "Guest name is required"))]
    pub guest_name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub guest_email: Option<String>,
    pub guest_phone: Option<String>,
    pub special_requests: Option<String>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    #[validate(range(min = 1, message = "At least one guest is required"))]
    pub guests: Option<i32>,
    pub status: Option<BookingStatus>,
    pub payment_status: Option<PaymentStatus>,
}

impl UpdateBooking {
    pub fn changes_dates(&self) -> bool {
        self.check_in.is_some() || self.check_out.is_some()
    }
}

/// Price breakdown for a stay, as returned by the pricing engine and stored
/// on the booking row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PriceBreakdown {
    #[schema(value_type = f64)]
    pub subtotal: Decimal,
    #[schema(value_type = f64)]
    pub cleaning_fee: Decimal,
    #[schema(value_type = f64)]
    pub service_fee: Decimal,
    #[schema(value_type = f64)]
    pub tax: Decimal,
    #[schema(value_type = f64)]
    pub total_before_discount: Decimal,
    #[schema(value_type = f64)]
    pub discount: Decimal,
    #[schema(value_type = f64)]
    pub total: Decimal,
}
