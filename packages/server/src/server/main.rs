// Main entry point for the SafetyNet API server

use std::sync::Arc;

use anyhow::{Context, Result};
use emailjs::{EmailJsOptions, EmailJsService};
use server_core::kernel::{
    BaseEmailService, CityTableGeocoder, EmailJsAdapter, PostgresResourceStore, ServerDeps,
};
use server_core::{server::build_app, Config};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

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

    tracing::info!("Starting SafetyNet API");

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        published_only = config.resources_published_only,
        geocoding = config.geocoding_enabled,
        contact_form = config.emailjs.is_some(),
        "Configuration loaded"
    );

    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    let email_service = config.emailjs.clone().map(|emailjs| {
        let service = EmailJsService::new(EmailJsOptions {
            service_id: emailjs.service_id,
            template_id: emailjs.template_id,
            public_key: emailjs.public_key,
        });
        Arc::new(EmailJsAdapter::new(Arc::new(service))) as Arc<dyn BaseEmailService>
    });
    if email_service.is_none() {
        tracing::warn!("EMAILJS_* not set, contact form disabled");
    }

    let deps = ServerDeps::new(
        Arc::new(PostgresResourceStore::new(pool.clone())),
        Arc::new(CityTableGeocoder::new(config.geocoding_enabled)),
        email_service,
        config.resources_published_only,
        config.map,
    );

    let app = build_app(pool, deps, &config.allowed_origins)?;

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("GraphQL endpoint: http://localhost:{}/graphql", config.port);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
