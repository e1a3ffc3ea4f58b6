//! BizPulse API Server
//!
//! Main entry point for the BizPulse backend service.

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bizpulse_api::{AppState, create_router};
use bizpulse_core::{BusinessDataService, RecordStore};
use bizpulse_db::{SeaOrmStore, connect_with_pool, migration::Migrator};
use bizpulse_shared::{AppConfig, JwtConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bizpulse=debug,bizpulse_core=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    // Connect to database
    let db = connect_with_pool(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    )
    .await?;
    info!("Connected to database");

    if std::env::var("BIZPULSE_AUTO_MIGRATE").is_ok_and(|v| v == "1" || v == "true") {
        Migrator::up(&db, None).await?;
        info!("Migrations applied");
    }

    // Identity provider tokens
    let jwt_service = JwtService::new(JwtConfig::from(&config.auth));

    // Business data service over the database
    let store: Arc<dyn RecordStore> = Arc::new(SeaOrmStore::new(db));
    let formula = config.metrics.net_income_formula;
    info!(?formula, "Net income formula configured");

    let state = AppState {
        service: Arc::new(BusinessDataService::new(store, formula)),
        jwt_service: Arc::new(jwt_service),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
