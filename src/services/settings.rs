//! System settings service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::settings::{SystemSettings, UpdateSettings},
    repository::Repository,
};

#[derive(Clone)]
pub struct SettingsService {
    repository: Repository,
}

impl SettingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get current settings
    pub async fn get(&self) -> AppResult<SystemSettings> {
        self.repository.settings.get().await
    }

    /// Update settings (admin). The resulting row must stay coherent:
    /// non-negative fees, percentages within 0-100, min <= max nights.
    pub async fn update(&self, request: UpdateSettings) -> AppResult<SystemSettings> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let current = self.repository.settings.get().await?;
        let min_nights = request.min_nights.unwrap_or(current.min_nights);
        let max_nights = request.max_nights.unwrap_or(current.max_nights);
        if min_nights > max_nights {
            return Err(AppError::Validation(
                "min_nights cannot exceed max_nights".to_string(),
            ));
        }

        for (name, value) in [
            ("cleaning_fee", request.cleaning_fee),
            ("service_fee_percent", request.service_fee_percent),
            ("tax_percent", request.tax_percent),
            ("deposit_percent", request.deposit_percent),
        ] {
            if let Some(value) = value {
                if value.is_sign_negative() {
                    return Err(AppError::Validation(format!("{} cannot be negative", name)));
                }
            }
        }

        let updated = self.repository.settings.update(&request).await?;
        tracing::info!("System settings updated");
        Ok(updated)
    }
}
