//! Test harness with testcontainers for integration testing.
//!
//! A single Postgres container is shared by every test in the binary.
//! The container starts and migrations run on first use.

use anyhow::{Context, Result};
use sqlx::PgPool;
use std::sync::Arc;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

use server_core::kernel::test_dependencies::{MockEmailService, MockGeocoder};
use server_core::kernel::{PostgresResourceStore, ServerDeps};
use server_core::domains::map::MapSettings;

use super::GraphQLClient;

struct SharedTestInfra {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!(
            "postgresql://postgres:postgres@{}:{}/postgres",
            pg_host, pg_port
        );

        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for migrations")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }
}

/// Test harness backed by the shared Postgres container.
///
/// Tests share one database, so assertions should be scoped to rows the
/// test itself created (unique organization names).
///
/// ```ignore
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let client = ctx.graphql();
/// }
/// ```
pub struct TestHarness {
    pub db_pool: PgPool,
    pub geocoder: Arc<MockGeocoder>,
    pub email: Arc<MockEmailService>,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {}
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        let infra = SharedTestInfra::get().await;

        let db_pool = PgPool::connect(&infra.db_url)
            .await
            .context("Failed to connect to test database")?;

        Ok(Self {
            db_pool,
            geocoder: Arc::new(
                MockGeocoder::new().with_place("Minneapolis, MN", 44.9778, -93.265),
            ),
            email: Arc::new(MockEmailService::new()),
        })
    }

    /// Dependencies wired to the real database and mock outbound services
    pub fn deps(&self) -> ServerDeps {
        ServerDeps::new(
            Arc::new(PostgresResourceStore::new(self.db_pool.clone())),
            self.geocoder.clone(),
            Some(self.email.clone()),
            false,
            MapSettings::default(),
        )
    }

    pub fn graphql(&self) -> GraphQLClient {
        GraphQLClient::new(self.deps())
    }
}
