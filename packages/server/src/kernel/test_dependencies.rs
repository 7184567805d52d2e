// TestDependencies - mock implementations for testing
//
// Provides in-memory stand-ins for the kernel traits so routers can be
// exercised without Postgres or a live SMS gateway.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use sms_gateway::SmsGatewayError;

use super::{BaseCustomerStore, BaseSmsGateway, ServerDeps};
use crate::domains::customers::{Customer, NewCustomer};

// =============================================================================
// Mock Customer Store
// =============================================================================

/// In-memory table assigning ids the way the real one does.
pub struct MockCustomerStore {
    rows: Arc<Mutex<Vec<Customer>>>,
    unavailable: Arc<AtomicBool>,
}

impl MockCustomerStore {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(Mutex::new(Vec::new())),
            unavailable: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Seed a row as if it had been inserted earlier
    pub fn with_customer(self, customer: NewCustomer) -> Self {
        {
            let mut rows = self.rows.lock().unwrap();
            let id = rows.len() as i64 + 1;
            rows.push(Customer {
                id,
                quality: customer.quality,
                service: customer.service,
                money_value: customer.money_value,
                phone: customer.phone,
            });
        }
        self
    }

    /// Simulate a database outage: every call fails until switched back.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Snapshot of every stored row
    pub fn rows(&self) -> Vec<Customer> {
        self.rows.lock().unwrap().clone()
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            anyhow::bail!("connection refused: mock database is down");
        }
        Ok(())
    }
}

impl Default for MockCustomerStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseCustomerStore for MockCustomerStore {
    async fn list_all(&self) -> Result<Vec<Customer>> {
        self.check_available()?;
        Ok(self.rows())
    }

    async fn count(&self) -> Result<i64> {
        self.check_available()?;
        Ok(self.rows.lock().unwrap().len() as i64)
    }

    async fn insert(&self, customer: NewCustomer) -> Result<Customer> {
        self.check_available()?;

        let mut rows = self.rows.lock().unwrap();
        let row = Customer {
            id: rows.len() as i64 + 1,
            quality: customer.quality,
            service: customer.service,
            money_value: customer.money_value,
            phone: customer.phone,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn phone_exists(&self, phone: Option<&str>) -> Result<bool> {
        self.check_available()?;

        let Some(phone) = phone else {
            return Ok(false);
        };
        Ok(self.rows.lock().unwrap().iter().any(|row| row.phone == phone))
    }
}

// =============================================================================
// Mock SMS Gateway
// =============================================================================

/// Arguments captured from a send_otp call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpCall {
    pub otp: String,
    pub phone: String,
}

enum MockReply {
    Json(Value),
    Timeout,
    Failure(String),
}

pub struct MockSmsGateway {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    calls: Arc<Mutex<Vec<OtpCall>>>,
}

impl MockSmsGateway {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a JSON reply
    pub fn with_reply(self, reply: Value) -> Self {
        self.replies.lock().unwrap().push_back(MockReply::Json(reply));
        self
    }

    /// Queue a timeout
    pub fn with_timeout(self) -> Self {
        self.replies.lock().unwrap().push_back(MockReply::Timeout);
        self
    }

    /// Queue a transport failure
    pub fn with_failure(self, message: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Failure(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<OtpCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockSmsGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseSmsGateway for MockSmsGateway {
    async fn send_otp(&self, otp: &str, phone: &str) -> Result<Value> {
        self.calls.lock().unwrap().push(OtpCall {
            otp: otp.to_string(),
            phone: phone.to_string(),
        });

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(MockReply::Json(value)) => Ok(value),
            Some(MockReply::Timeout) => {
                Err(SmsGatewayError::Timeout(Duration::from_secs(10)).into())
            }
            Some(MockReply::Failure(message)) => Err(anyhow::anyhow!(message)),
            None => Ok(json!({ "return": true, "message": ["SMS sent successfully."] })),
        }
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Mock deps plus handles for inspecting them after a request.
pub struct TestDependencies {
    pub customers: Arc<MockCustomerStore>,
    pub sms_gateway: Arc<MockSmsGateway>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            customers: Arc::new(MockCustomerStore::new()),
            sms_gateway: Arc::new(MockSmsGateway::new()),
        }
    }

    pub fn with_customers(mut self, customers: MockCustomerStore) -> Self {
        self.customers = Arc::new(customers);
        self
    }

    pub fn with_sms_gateway(mut self, sms_gateway: MockSmsGateway) -> Self {
        self.sms_gateway = Arc::new(sms_gateway);
        self
    }

    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(
            self.customers.clone(),
            Some(self.sms_gateway.clone() as Arc<dyn BaseSmsGateway>),
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
