use serde::Serialize;

use crate::domains::customers::models::Customer;

pub const CUSTOMER_ADDED_MESSAGE: &str = "Customer added successfully";

/// 201 body for `POST /add-customer`
#[derive(Debug, Clone, Serialize)]
pub struct AddCustomerResponse {
    pub message: &'static str,
    pub customer: Customer,
}

impl From<Customer> for AddCustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            message: CUSTOMER_ADDED_MESSAGE,
            customer,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PhoneExistsResponse {
    pub exists: bool,
}
