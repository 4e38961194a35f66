//! System settings model (singleton row)

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// System-wide booking and pricing settings. Single row, admin-editable,
/// read-only input to the pricing engine. Percentages are stored as whole
/// numbers (19 means 19%).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SystemSettings {
    #[schema(value_type = f64)]
    pub cleaning_fee: Decimal,
    #[schema(value_type = f64)]
    pub service_fee_percent: Decimal,
    #[schema(value_type = f64)]
    pub tax_percent: Decimal,
    pub min_nights: i32,
    pub max_nights: i32,
    pub check_in_time: NaiveTime,
    pub check_out_time: NaiveTime,
    /// Deposit required at booking time, as a whole-number percentage of the
    /// total. 0 means full payment up front.
    #[schema(value_type = f64)]
    pub deposit_percent: Decimal,
    pub payment_methods: Vec<String>,
}

/// Admin settings update; only supplied fields are changed.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateSettings {
    #[schema(value_type = f64)]
    pub cleaning_fee: Option<Decimal>,
    #[schema(value_type = f64)]
    pub service_fee_percent: Option<Decimal>,
    #[schema(value_type = f64)]
    pub tax_percent: Option<Decimal>,
    #[validate(range(min = 1, message = "min_nights must be at least 1"))]
    pub min_nights: Option<i32>,
    #[validate(range(min = 1, message = "max_nights must be at least 1"))]
    pub max_nights: Option<i32>,
    pub check_in_time: Option<NaiveTime>,
    pub check_out_time: Option<NaiveTime>,
    #[schema(value_type = f64)]
    pub deposit_percent: Option<Decimal>,
    pub payment_methods: Option<Vec<String>>,
}
