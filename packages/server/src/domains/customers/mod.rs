pub mod data;
pub mod models;

// Re-export commonly used types
pub use data::{
    AddCustomerRequest, AddCustomerResponse, CheckPhoneRequest, PhoneExistsResponse,
    SendOtpRequest, ValidationError,
};
pub use models::{Customer, CustomerTable, NewCustomer};
