//! Date-change request model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::DateChangeStatus;

/// A guest's proposal to move an existing booking's dates, subject to admin
/// approval. Original dates are snapshotted at proposal time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DateChangeRequest {
    pub id: i32,
    pub booking_reference: String,
    pub original_check_in: NaiveDate,
    pub original_check_out: NaiveDate,
    pub requested_check_in: NaiveDate,
    pub requested_check_out: NaiveDate,
    pub message: Option<String>,
    pub status: DateChangeStatus,
    pub created_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
}

/// Guest proposal payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ProposeDateChange {
    #[validate(length(min = 8, max = 8, message = "Invalid booking reference"))]
    pub booking_reference: String,
    pub requested_check_in: NaiveDate,
    pub requested_check_out: NaiveDate,
    #[validate(length(max = 2000, message = "Message too long"))]
    pub message: Option<String>,
}
