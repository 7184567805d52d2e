// HTTP routes
pub mod customers;
pub mod health;
pub mod otp;

pub use customers::*;
pub use health::*;
pub use otp::*;
