// HTTP middleware
pub mod response_headers;

pub use response_headers::*;
