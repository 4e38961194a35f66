//! System settings repository (singleton row)

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::settings::{SystemSettings, UpdateSettings},
};

#[derive(Clone)]
pub struct SettingsRepository {
    pool: Pool<Postgres>,
}

impl SettingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Fetch the settings row. The migration seeds it, so absence is a
    /// deployment fault rather than a user error.
    pub async fn get(&self) -> AppResult<SystemSettings> {
        sqlx::query_as::<_, SystemSettings>(
            r#"
            SELECT cleaning_fee, service_fee_percent, tax_percent, min_nights,
                   max_nights, check_in_time, check_out_time, deposit_percent,
                   payment_methods
            FROM system_settings WHERE id = 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::Internal("System settings row missing".to_string()))
    }

    /// Partial update; unspecified fields keep their current values
    pub async fn update(&self, update: &UpdateSettings) -> AppResult<SystemSettings> {
        let settings = sqlx::query_as::<_, SystemSettings>(
            r#"
            UPDATE system_settings SET
                cleaning_fee = COALESCE($1, cleaning_fee),
                service_fee_percent = COALESCE($2, service_fee_percent),
                tax_percent = COALESCE($3, tax_percent),
                min_nights = COALESCE($4, min_nights),
                max_nights = COALESCE($5, max_nights),
                check_in_time = COALESCE($6, check_in_time),
                check_out_time = COALESCE($7, check_out_time),
                deposit_percent = COALESCE($8, deposit_percent),
                payment_methods = COALESCE($9, payment_methods),
                updated_at = NOW()
            WHERE id = 1
            RETURNING cleaning_fee, service_fee_percent, tax_percent, min_nights,
                      max_nights, check_in_time, check_out_time, deposit_percent,
                      payment_methods
            "#,
        )
        .bind(update.cleaning_fee)
        .bind(update.service_fee_percent)
        .bind(update.tax_percent)
        .bind(update.min_nights)
        .bind(update.max_nights)
        .bind(update.check_in_time)
        .bind(update.check_out_time)
        .bind(update.deposit_percent)
        .bind(update.payment_methods.as_deref())
        .fetch_one(&self.pool)
        .await?;
        Ok(settings)
    }
}
