//! Cabin catalog service

use crate::{error::AppResult, models::cabin::Cabin, repository::Repository};

#[derive(Clone)]
pub struct CabinsService {
    repository: Repository,
}

impl CabinsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get a cabin by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Cabin> {
        self.repository.cabins.get_by_id(id).await
    }

    /// List cabins currently open for booking
    pub async fn list_active(&self) -> AppResult<Vec<Cabin>> {
        self.repository.cabins.list_active().await
    }
}
