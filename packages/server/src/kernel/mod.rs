//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use deps::{PostgresCustomerStore, ServerDeps, SmsGatewayAdapter};
pub use test_dependencies::{MockCustomerStore, MockSmsGateway, OtpCall, TestDependencies};
pub use traits::*;
