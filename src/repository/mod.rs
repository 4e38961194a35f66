//! Repository layer for database operations

pub mod bookings;
pub mod cabins;
pub mod date_changes;
pub mod promos;
pub mod settings;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub bookings: bookings::BookingsRepository,
    pub cabins: cabins::CabinsRepository,
    pub promos: promos::PromosRepository,
    pub date_changes: date_changes::DateChangesRepository,
    pub settings: settings::SettingsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            bookings: bookings::BookingsRepository::new(pool.clone()),
            cabins: cabins::CabinsRepository::new(pool.clone()),
            promos: promos::PromosRepository::new(pool.clone()),
            date_changes: date_changes::DateChangesRepository::new(pool.clone()),
            settings: settings::SettingsRepository::new(pool.clone()),
            pool,
        }
    }
}
