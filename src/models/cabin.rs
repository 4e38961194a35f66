//! Cabin model
//!
//! Cabins are the bookable units. The catalog itself is seeded data; the
//! booking flow only needs read access to the nightly rate and capacity.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Cabin model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Cabin {
    pub id: i32,
    pub name: String,
    pub slug: String,
    #[schema(value_type = f64)]
    pub nightly_rate: Decimal,
    pub max_guests: i32,
    pub is_active: bool,
}
