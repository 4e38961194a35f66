//! Cabana Booking Server
//!
//! A Rust implementation of the Cabana Afina vacation-cabin booking backend,
//! providing a REST JSON API for availability, pricing, promo codes and the
//! booking lifecycle.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
