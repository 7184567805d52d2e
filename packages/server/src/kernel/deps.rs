// Concrete infrastructure behind the kernel traits.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use sms_gateway::SmsGatewayService;
use sqlx::PgPool;

use crate::domains::customers::{Customer, CustomerTable, NewCustomer};
use crate::kernel::{BaseCustomerStore, BaseSmsGateway};

// =============================================================================
// PostgresCustomerStore (implements BaseCustomerStore trait)
// =============================================================================

/// Customer rows in one Postgres table, reached through a shared pool
#[derive(Clone)]
pub struct PostgresCustomerStore {
    pool: PgPool,
    table: CustomerTable,
}

impl PostgresCustomerStore {
    pub fn new(pool: PgPool, table: CustomerTable) -> Self {
        Self { pool, table }
    }
}

#[async_trait]
impl BaseCustomerStore for PostgresCustomerStore {
    async fn list_all(&self) -> Result<Vec<Customer>> {
        Customer::find_all(self.table, &self.pool).await
    }

    async fn count(&self) -> Result<i64> {
        Customer::count(self.table, &self.pool).await
    }

    async fn insert(&self, customer: NewCustomer) -> Result<Customer> {
        Customer::create(self.table, customer, &self.pool).await
    }

    async fn phone_exists(&self, phone: Option<&str>) -> Result<bool> {
        Customer::phone_exists(self.table, phone, &self.pool).await
    }
}

// =============================================================================
// SmsGatewayService Adapter (implements BaseSmsGateway trait)
// =============================================================================

/// Wrapper around SmsGatewayService that implements BaseSmsGateway trait
pub struct SmsGatewayAdapter(pub Arc<SmsGatewayService>);

impl SmsGatewayAdapter {
    pub fn new(service: Arc<SmsGatewayService>) -> Self {
        Self(service)
    }
}

#[async_trait]
impl BaseSmsGateway for SmsGatewayAdapter {
    async fn send_otp(&self, otp: &str, phone: &str) -> Result<Value> {
        // Keep the typed error so timeouts can be told apart upstream
        Ok(self.0.send_otp(otp, phone).await?)
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to handlers (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub customers: Arc<dyn BaseCustomerStore>,
    /// Only deployments with the OTP route carry a gateway
    pub sms_gateway: Option<Arc<dyn BaseSmsGateway>>,
}

impl ServerDeps {
    pub fn new(
        customers: Arc<dyn BaseCustomerStore>,
        sms_gateway: Option<Arc<dyn BaseSmsGateway>>,
    ) -> Self {
        Self {
            customers,
            sms_gateway,
        }
    }

    /// Postgres-backed deps for `table`, optionally with a live SMS gateway.
    pub fn postgres(
        pool: PgPool,
        table: CustomerTable,
        sms_gateway: Option<SmsGatewayService>,
    ) -> Self {
        Self::new(
            Arc::new(PostgresCustomerStore::new(pool, table)),
            sms_gateway.map(|service| {
                Arc::new(SmsGatewayAdapter::new(Arc::new(service))) as Arc<dyn BaseSmsGateway>
            }),
        )
    }
}
