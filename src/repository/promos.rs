//! Promo codes repository for database operations

use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::promo::{CreatePromoCode, PromoCode, UpdatePromoCode},
};

#[derive(Clone)]
pub struct PromosRepository {
    pool: Pool<Postgres>,
}

impl PromosRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Case-insensitive lookup; codes are stored upper-case
    pub async fn find_by_code(&self, code: &str) -> AppResult<Option<PromoCode>> {
        let promo = sqlx::query_as::<_, PromoCode>(
            "SELECT * FROM promo_codes WHERE code = UPPER($1)",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;
        Ok(promo)
    }

    /// Get promo by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<PromoCode> {
        sqlx::query_as::<_, PromoCode>("SELECT * FROM promo_codes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Promo code with id {} not found", id)))
    }

    /// List all promo codes
    pub async fn list(&self) -> AppResult<Vec<PromoCode>> {
        let promos = sqlx::query_as::<_, PromoCode>(
            "SELECT * FROM promo_codes ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(promos)
    }

    /// Consume one usage slot, inside the caller's transaction. The increment
    /// is conditional so the cap holds under concurrency: returns false when
    /// the code is already at max_uses at write time.
    pub async fn increment_usage(conn: &mut PgConnection, id: i32) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE promo_codes
            SET current_uses = current_uses + 1
            WHERE id = $1
              AND (max_uses IS NULL OR current_uses < max_uses)
            "#,
        )
        .bind(id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Create a promo code (admin). Code is upper-cased on the way in; a
    /// duplicate code surfaces as a conflict.
    pub async fn insert(&self, promo: &CreatePromoCode) -> AppResult<PromoCode> {
        let result = sqlx::query_as::<_, PromoCode>(
            r#"
            INSERT INTO promo_codes
                (code, discount_type, discount_value, max_uses, valid_from, valid_until, is_active)
            VALUES (UPPER($1), $2, $3, $4, COALESCE($5, NOW()), $6, $7)
            RETURNING *
            "#,
        )
        .bind(&promo.code)
        .bind(promo.discount_type)
        .bind(promo.discount_value)
        .bind(promo.max_uses)
        .bind(promo.valid_from)
        .bind(promo.valid_until)
        .bind(promo.is_active)
        .fetch_one(&self.pool)
        .await;

        result.map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                AppError::ConcurrencyConflict(format!(
                    "Promo code {} already exists",
                    promo.code.to_uppercase()
                ))
            }
            _ => AppError::Database(e),
        })
    }

    /// Update a promo code (admin)
    pub async fn update(&self, id: i32, update: &UpdatePromoCode) -> AppResult<PromoCode> {
        sqlx::query_as::<_, PromoCode>(
            r#"
            UPDATE promo_codes SET
                discount_type = COALESCE($2, discount_type),
                discount_value = COALESCE($3, discount_value),
                max_uses = COALESCE($4, max_uses),
                valid_from = COALESCE($5, valid_from),
                valid_until = COALESCE($6, valid_until),
                is_active = COALESCE($7, is_active)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(update.discount_type)
        .bind(update.discount_value)
        .bind(update.max_uses)
        .bind(update.valid_from)
        .bind(update.valid_until)
        .bind(update.is_active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Promo code with id {} not found", id)))
    }

    /// Delete a promo code (admin)
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM promo_codes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Promo code with id {} not found", id)));
        }
        Ok(())
    }
}
