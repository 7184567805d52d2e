//! Customer service backed by `pj_customers` (port 3001), with phone lookup
//! and OTP relay.

use anyhow::Result;
use server_core::{server::run, ServiceVariant};

#[tokio::main]
async fn main() -> Result<()> {
    run(ServiceVariant::Pj).await
}
