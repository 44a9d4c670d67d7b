//! Menagerie Server - Zoo Inventory Management System
//!
//! A Rust REST API server for zoo back-office inventory management.

use axum::{
    routing::{delete, get, post, put},
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

use menagerie_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("menagerie_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Menagerie Server v{}", env!("CARGO_PKG_VERSION"));

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
    let services = Services::new(repository);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(server_host.parse().expect("Invalid host address"), server_port);

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
        // Animal categories
        .route("/animal-categories", get(api::animals::list_categories))
        .route("/animal-categories", post(api::animals::create_category))
        .route("/animal-categories/:id", put(api::animals::update_category))
        // Species
        .route("/animals", get(api::animals::list_animals))
        .route("/animals", post(api::animals::create_animal))
        .route("/animals/:id", get(api::animals::get_animal))
        .route("/animals/:id", put(api::animals::update_animal))
        // Diets
        .route("/animals/:id/diet", get(api::diets::list_diet))
        .route("/animals/:id/diet", put(api::diets::replace_diet))
        .route("/diet-items/:id", put(api::diets::update_diet_item))
        .route("/diet-items/:id", delete(api::diets::delete_diet_item))
        // Population ledger
        .route("/animal-population", post(api::populations::create_record))
        .route("/animal-population/:id", get(api::populations::list_records))
        .route("/animal-population/:id", put(api::populations::update_record))
        // Feed catalog
        .route("/feed-items", get(api::feeds::list_feed_items))
        .route("/feed-items", post(api::feeds::create_feed_item))
        .route("/feed-items/:id", get(api::feeds::get_feed_item))
        .route("/feed-items/:id", put(api::feeds::update_feed_item))
        // Configuration
        .route("/configuration", get(api::configuration::get_configuration))
        .route("/configuration/feed-items", get(api::configuration::get_feed_items))
        // Estimates
        .route("/estimates/feed", post(api::estimates::estimate_feed))
        .route("/estimates/per-day", get(api::estimates::per_day_estimate))
        .route("/estimates/yearly", get(api::estimates::yearly_estimate))
        .route("/estimates/supply-order", post(api::estimates::generate_supply_order))
        .route("/estimates/pricing", post(api::estimates::generate_pricing_estimate))
        .route("/estimates/per-day/export", get(api::estimates::export_per_day_estimate))
        .route("/estimates/yearly/export", get(api::estimates::export_yearly_estimate))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
