// Customer Registry - API Core
//
// Backs two small deployments over a Postgres "customers" table: list, add,
// phone lookup, and an OTP relay to an external SMS gateway.
//
// Each binary in src/bin picks a ServiceVariant; everything else is shared.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
