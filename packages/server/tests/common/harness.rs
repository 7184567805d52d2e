//! Test harness with testcontainers for integration testing.
//!
//! One Postgres container is shared across all tests. Each harness gets its
//! own freshly created database with the customer schema applied, so tests
//! can count rows without seeing each other's data.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use server_core::kernel::{
    BaseSmsGateway, MockSmsGateway, PostgresCustomerStore, ServerDeps,
};
use server_core::server::build_app;
use server_core::ServiceVariant;
use sqlx::PgPool;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

use super::ApiClient;

const SCHEMA: &str = include_str!("../../schema.sql");

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    host: String,
    port: u16,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

/// Global shared infrastructure - initialized once, reused by all tests.
static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

static NEXT_DATABASE: AtomicUsize = AtomicUsize::new(0);

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .with_cmd(["-c", "max_connections=200"])
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let host = postgres.get_host().await?.to_string();
        let port = postgres.get_host_port_ipv4(5432).await?;

        Ok(Self {
            host,
            port,
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

    fn url(&self, database: &str) -> String {
        format!(
            "postgresql://postgres:postgres@{}:{}/{}",
            self.host, self.port, database
        )
    }
}

/// Test harness that manages test infrastructure.
///
/// # Example using test-context
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let client = ctx.client(ServiceVariant::Pj);
///     // ... test code
/// }
/// ```
pub struct TestHarness {
    /// Pool on this test's private database
    pub db_pool: PgPool,
    /// Gateway stand-in wired into `Pj` clients
    pub sms_gateway: Arc<MockSmsGateway>,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {
        self.db_pool.close().await;
    }
}

impl TestHarness {
    /// Creates a private database on the shared container and applies the schema.
    pub async fn new() -> Result<Self> {
        let infra = SharedTestInfra::get().await;

        let database = format!(
            "customers_test_{}_{}",
            std::process::id(),
            NEXT_DATABASE.fetch_add(1, Ordering::SeqCst)
        );

        let admin = PgPool::connect(&infra.url("postgres"))
            .await
            .context("Failed to connect to Postgres")?;
        sqlx::query(&format!("CREATE DATABASE {}", database))
            .execute(&admin)
            .await
            .context("Failed to create test database")?;
        admin.close().await;

        let db_pool = PgPool::connect(&infra.url(&database))
            .await
            .context("Failed to connect to test database")?;

        sqlx::raw_sql(SCHEMA)
            .execute(&db_pool)
            .await
            .context("Failed to apply schema")?;

        Ok(Self {
            db_pool,
            sms_gateway: Arc::new(MockSmsGateway::new()),
        })
    }

    /// Router for `variant` over this harness's database.
    pub fn client(&self, variant: ServiceVariant) -> ApiClient {
        let deps = ServerDeps::new(
            Arc::new(PostgresCustomerStore::new(
                self.db_pool.clone(),
                variant.table(),
            )),
            Some(self.sms_gateway.clone() as Arc<dyn BaseSmsGateway>),
        );
        ApiClient::new(build_app(variant, deps))
    }

    /// Rows currently stored for `variant`
    pub async fn row_count(&self, variant: ServiceVariant) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", variant.table()))
            .fetch_one(&self.db_pool)
            .await
            .unwrap()
    }
}
