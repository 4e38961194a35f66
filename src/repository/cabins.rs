//! Cabins repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::cabin::Cabin,
};

#[derive(Clone)]
pub struct CabinsRepository {
    pool: Pool<Postgres>,
}

impl CabinsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get cabin by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Cabin> {
        sqlx::query_as::<_, Cabin>("SELECT * FROM cabins WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Cabin with id {} not found", id)))
    }

    /// List active cabins
    pub async fn list_active(&self) -> AppResult<Vec<Cabin>> {
        let cabins = sqlx::query_as::<_, Cabin>(
            "SELECT * FROM cabins WHERE is_active ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(cabins)
    }
}
