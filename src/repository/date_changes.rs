//! Date-change requests repository for database operations

use chrono::NaiveDate;
use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{date_change::DateChangeRequest, enums::DateChangeStatus},
};

#[derive(Clone)]
pub struct DateChangesRepository {
    pool: Pool<Postgres>,
}

impl DateChangesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get request by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<DateChangeRequest> {
        sqlx::query_as::<_, DateChangeRequest>(
            "SELECT * FROM date_change_requests WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Date-change request {} not found", id)))
    }

    /// List requests, optionally filtered by status, newest first
    pub async fn list(&self, status: Option<DateChangeStatus>) -> AppResult<Vec<DateChangeRequest>> {
        let requests = sqlx::query_as::<_, DateChangeRequest>(
            r#"
            SELECT * FROM date_change_requests
            WHERE ($1::date_change_status IS NULL OR status = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(requests)
    }

    /// Store a new pending request with the booking's current dates as the
    /// original snapshot
    pub async fn insert(
        &self,
        booking_reference: &str,
        original_check_in: NaiveDate,
        original_check_out: NaiveDate,
        requested_check_in: NaiveDate,
        requested_check_out: NaiveDate,
        message: Option<&str>,
    ) -> AppResult<DateChangeRequest> {
        let request = sqlx::query_as::<_, DateChangeRequest>(
            r#"
            INSERT INTO date_change_requests
                (booking_reference, original_check_in, original_check_out,
                 requested_check_in, requested_check_out, message, status)
            VALUES ($1, $2, $3, $4, $5, $6, 'pending')
            RETURNING *
            "#,
        )
        .bind(booking_reference)
        .bind(original_check_in)
        .bind(original_check_out)
        .bind(requested_check_in)
        .bind(requested_check_out)
        .bind(message)
        .fetch_one(&self.pool)
        .await?;
        Ok(request)
    }

    /// Move a pending request to a terminal state, inside the caller's
    /// transaction. Returns false if the request was no longer pending
    /// (already decided by another admin).
    pub async fn decide(
        conn: &mut PgConnection,
        id: i32,
        status: DateChangeStatus,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE date_change_requests
            SET status = $2, decided_at = NOW()
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(id)
        .bind(status)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}
