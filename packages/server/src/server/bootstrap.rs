//! Process startup shared by both deployment binaries.

use std::str::FromStr;

use anyhow::{Context, Result};
use sms_gateway::SmsGatewayService;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, ServiceVariant};
use crate::kernel::ServerDeps;
use crate::server::app::build_app;

/// Initialize logging, respecting `RUST_LOG` when set
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,sqlx=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();
}

/// Open the pool eagerly so a bad connection string fails at startup.
pub async fn connect_database(config: &Config) -> Result<PgPool> {
    let options = PgConnectOptions::from_str(&config.database_url)
        .context("DATABASE_URL is not a valid Postgres connection string")?
        .ssl_mode(config.database_ssl_mode);

    PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect_with(options)
        .await
        .context("Failed to connect to database")
}

/// Load config, connect, and serve `variant` until the process is killed.
pub async fn run(variant: ServiceVariant) -> Result<()> {
    init_tracing();

    tracing::info!(?variant, table = %variant.table(), "Starting customer service");

    let config = Config::from_env(variant).context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    tracing::info!("Connecting to database...");
    let pool = connect_database(&config).await?;
    tracing::info!("Database connected");

    let sms_gateway = config
        .sms_gateway
        .clone()
        .map(SmsGatewayService::new)
        .transpose()
        .context("Failed to create SMS gateway client")?;

    let deps = ServerDeps::postgres(pool, variant.table(), sms_gateway);
    let app = build_app(variant, deps);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    tracing::info!("Server running on http://localhost:{}", config.port);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
