//! Customer service backed by `pg_customers` (port 3000).

use anyhow::Result;
use server_core::{server::run, ServiceVariant};

#[tokio::main]
async fn main() -> Result<()> {
    run(ServiceVariant::Pg).await
}
