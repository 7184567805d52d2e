pub mod requests;
pub mod responses;

pub use requests::{AddCustomerRequest, CheckPhoneRequest, SendOtpRequest, ValidationError};
pub use responses::{AddCustomerResponse, PhoneExistsResponse};
