// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no request shaping.
// Handlers receive them through ServerDeps so tests can swap in mocks.
//
// Naming convention: Base* for trait names (e.g., BaseCustomerStore)

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::domains::customers::{Customer, NewCustomer};

// =============================================================================
// Customer Store Trait (Infrastructure - one backing table)
// =============================================================================

#[async_trait]
pub trait BaseCustomerStore: Send + Sync {
    /// Every row, oldest first
    async fn list_all(&self) -> Result<Vec<Customer>>;

    async fn count(&self) -> Result<i64>;

    /// Insert a row and return it with its assigned id.
    async fn insert(&self, customer: NewCustomer) -> Result<Customer>;

    /// `None` never matches
    async fn phone_exists(&self, phone: Option<&str>) -> Result<bool>;
}

// =============================================================================
// SMS Gateway Trait (Infrastructure - OTP relay)
// =============================================================================

#[async_trait]
pub trait BaseSmsGateway: Send + Sync {
    /// Send an OTP and return the gateway's JSON reply verbatim.
    ///
    /// Timeouts surface as `sms_gateway::SmsGatewayError::Timeout` inside the
    /// returned `anyhow::Error`.
    async fn send_otp(&self, otp: &str, phone: &str) -> Result<Value>;
}
