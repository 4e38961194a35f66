//! Promo code model and validation outcomes

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::DiscountType;

/// Promo code model from database. `code` is stored upper-case; lookups are
/// case-insensitive.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PromoCode {
    pub id: i32,
    pub code: String,
    pub discount_type: DiscountType,
    /// Percentage (1-100) or fixed amount in RON, depending on discount_type
    #[schema(value_type = f64)]
    pub discount_value: Decimal,
    pub max_uses: Option<i32>,
    pub current_uses: i32,
    pub valid_from: DateTime<Utc>,
    pub valid_until: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Reason a promo code cannot be applied. Returned in validation order:
/// the first failing check wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PromoRejection {
    NotFound,
    Disabled,
    NotYetValid,
    Expired,
    UsageLimitReached,
}

impl std::fmt::Display for PromoRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PromoRejection::NotFound => "not_found",
            PromoRejection::Disabled => "disabled",
            PromoRejection::NotYetValid => "not_yet_valid",
            PromoRejection::Expired => "expired",
            PromoRejection::UsageLimitReached => "usage_limit_reached",
        };
        write!(f, "{}", label)
    }
}

/// Admin create promo request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePromoCode {
    #[validate(length(min = 2, max = 32, message = "Code must be 2-32 characters"))]
    pub code: String,
    pub discount_type: DiscountType,
    #[schema(value_type = f64)]
    pub discount_value: Decimal,
    #[validate(range(min = 1, message = "max_uses must be positive"))]
    pub max_uses: Option<i32>,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_until: Option<DateTime<Utc>>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Admin update promo request. `current_uses` is deliberately absent: it is
/// only ever moved by redemption.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePromoCode {
    pub discount_type: Option<DiscountType>,
    #[schema(value_type = f64)]
    pub discount_value: Option<Decimal>,
    pub max_uses: Option<i32>,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_until: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
}
