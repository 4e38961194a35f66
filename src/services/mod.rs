//! Business logic services

pub mod availability;
pub mod bookings;
pub mod cabins;
pub mod date_changes;
pub mod email;
pub mod pricing;
pub mod promos;
pub mod settings;

use crate::{config::EmailConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub bookings: bookings::BookingsService,
    pub cabins: cabins::CabinsService,
    pub promos: promos::PromosService,
    pub date_changes: date_changes::DateChangesService,
    pub settings: settings::SettingsService,
    pub email: email::EmailService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, email_config: EmailConfig) -> AppResult<Self> {
        let email = email::EmailService::new(email_config);
        Ok(Self {
            bookings: bookings::BookingsService::new(repository.clone(), email.clone()),
            cabins: cabins::CabinsService::new(repository.clone()),
            promos: promos::PromosService::new(repository.clone()),
            date_changes: date_changes::DateChangesService::new(repository.clone(), email.clone()),
            settings: settings::SettingsService::new(repository),
            email,
        })
    }
}
