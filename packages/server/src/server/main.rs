// Main entry point for the event registration API server

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use server_core::kernel::{BaseStatisticsService, NoopStatisticsService, ServerDeps, StatsAdapter};
use server_core::server::build_app;
use server_core::Config;
use stats_client::{StatsClient, StatsClientOptions};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting event registration API");

    let config = Config::from_env().context("Failed to load configuration")?;

    let statistics: Arc<dyn BaseStatisticsService> = match &config.stats_url {
        Some(url) => {
            tracing::info!("Using statistics server at {}", url);
            let client = StatsClient::new(StatsClientOptions {
                base_url: url.clone(),
            });
            Arc::new(StatsAdapter::new(Arc::new(client)))
        }
        None => {
            tracing::warn!("STATS_SERVER_URL not set, view counts will read as zero");
            Arc::new(NoopStatisticsService)
        }
    };

    let (deps, pool) = match &config.database_url {
        Some(database_url) => {
            tracing::info!("Connecting to database...");
            let pool = PgPoolOptions::new()
                .max_connections(10)
                .connect(database_url)
                .await
                .context("Failed to connect to database")?;

            tracing::info!("Running database migrations...");
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;

            (ServerDeps::postgres(pool.clone(), statistics), Some(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory storage");
            (ServerDeps::in_memory(statistics), None)
        }
    };

    let app = build_app(Arc::new(deps), pool);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
