//! Request payloads and seed rows shared across tests.

use serde_json::{json, Value};
use server_core::domains::customers::NewCustomer;

/// A complete add-customer body for `phone`
pub fn customer_payload(phone: &str) -> Value {
    json!({
        "quality": 4,
        "service": "5",
        "money_value": 3.5,
        "phone": phone
    })
}

/// A seed row for `phone`
pub fn new_customer(phone: &str) -> NewCustomer {
    NewCustomer {
        quality: json!(4),
        service: json!("5"),
        money_value: json!(3.5),
        phone: phone.to_string(),
    }
}
