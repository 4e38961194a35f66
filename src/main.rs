//! Cabana Server - Vacation Cabin Booking System
//!
//! REST API backend for availability, pricing and the booking lifecycle.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cabana_server::{
    api,
    config::AppConfig,
    repository::Repository,
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("cabana_server={},tower_http=debug", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Cabana Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, config.email.clone())
        .expect("Failed to create services");

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Cabins
        .route("/cabins", get(api::cabins::list_cabins))
        .route("/cabins/:id", get(api::cabins::get_cabin))
        // Bookings
        .route("/bookings", post(api::bookings::create_booking))
        .route("/bookings", get(api::bookings::list_bookings))
        .route("/bookings/unavailable-dates", get(api::bookings::unavailable_dates))
        .route("/bookings/:reference", get(api::bookings::get_booking))
        .route("/bookings/:reference", patch(api::bookings::update_booking))
        .route("/bookings/:reference", delete(api::bookings::delete_booking))
        .route("/bookings/:reference/cancel", post(api::bookings::cancel_booking))
        .route("/bookings/:reference/confirm", post(api::bookings::confirm_booking))
        .route("/bookings/:reference/refund", post(api::bookings::refund_booking))
        // Promo codes
        .route("/promo-codes/validate", post(api::promos::validate_promo))
        .route("/promo-codes", get(api::promos::list_promos))
        .route("/promo-codes", post(api::promos::create_promo))
        .route("/promo-codes/:id", put(api::promos::update_promo))
        .route("/promo-codes/:id", delete(api::promos::delete_promo))
        // Date-change requests
        .route("/date-change-requests", post(api::date_changes::propose_date_change))
        .route("/date-change-requests", get(api::date_changes::list_date_changes))
        .route("/date-change-requests/:id/approve", post(api::date_changes::approve_date_change))
        .route("/date-change-requests/:id/reject", post(api::date_changes::reject_date_change))
        // Payments
        .route("/payments/webhook", post(api::payments::payment_webhook))
        // Settings
        .route("/settings", get(api::settings::get_settings))
        .route("/settings", put(api::settings::update_settings))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
