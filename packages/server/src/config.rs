use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use sms_gateway::{SmsGatewayOptions, DEFAULT_GATEWAY_URL, DEFAULT_ROUTE};
use sqlx::postgres::PgSslMode;

use crate::domains::customers::CustomerTable;

/// Which of the two customer deployments a process serves.
///
/// Both share every code path; they differ only in backing table, default
/// port, route set and the shape of `GET /`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceVariant {
    /// `pg_customers` on port 3000: list, health, add
    Pg,
    /// `pj_customers` on port 3001: adds phone lookup and OTP relay
    Pj,
}

/// Response shape of `GET /`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListShape {
    /// JSON array of every row
    Rows,
    /// Bare JSON number with the row count
    Count,
}

impl ServiceVariant {
    pub fn table(self) -> CustomerTable {
        match self {
            ServiceVariant::Pg => CustomerTable::PgCustomers,
            ServiceVariant::Pj => CustomerTable::PjCustomers,
        }
    }

    pub fn default_port(self) -> u16 {
        match self {
            ServiceVariant::Pg => 3000,
            ServiceVariant::Pj => 3001,
        }
    }

    pub fn list_shape(self) -> ListShape {
        match self {
            ServiceVariant::Pg => ListShape::Rows,
            ServiceVariant::Pj => ListShape::Count,
        }
    }

    /// Whether `/check-phone` and `/send-otp` are mounted.
    pub fn has_phone_routes(self) -> bool {
        matches!(self, ServiceVariant::Pj)
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub variant: ServiceVariant,
    pub database_url: String,
    pub database_max_connections: u32,
    /// Certificates are never verified in any of the non-`verify-*` modes
    pub database_ssl_mode: PgSslMode,
    pub port: u16,
    /// Present only for deployments that relay OTPs
    pub sms_gateway: Option<SmsGatewayOptions>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env(variant: ServiceVariant) -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(variant, |name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(variant: ServiceVariant, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .or_else(|| lookup("POSTGRES_URL"))
            .context("DATABASE_URL (or POSTGRES_URL) must be set")?;

        let database_max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|| "5".to_string())
            .parse()
            .context("DATABASE_MAX_CONNECTIONS must be a valid number")?;

        let database_ssl_mode = lookup("DATABASE_SSL_MODE")
            .unwrap_or_else(|| "prefer".to_string())
            .parse::<PgSslMode>()
            .context("DATABASE_SSL_MODE must be a valid sslmode")?;

        let port = match lookup("PORT") {
            Some(port) => port.parse().context("PORT must be a valid number")?,
            None => variant.default_port(),
        };

        let sms_gateway = if variant.has_phone_routes() {
            let api_key = lookup("SMS_API_KEY").context("SMS_API_KEY must be set")?;
            let timeout_secs: u64 = lookup("SMS_GATEWAY_TIMEOUT_SECS")
                .unwrap_or_else(|| "10".to_string())
                .parse()
                .context("SMS_GATEWAY_TIMEOUT_SECS must be a valid number")?;

            Some(SmsGatewayOptions {
                api_key,
                url: lookup("SMS_GATEWAY_URL").unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string()),
                route: lookup("SMS_GATEWAY_ROUTE").unwrap_or_else(|| DEFAULT_ROUTE.to_string()),
                timeout: Duration::from_secs(timeout_secs),
            })
        } else {
            None
        };

        Ok(Self {
            variant,
            database_url,
            database_max_connections,
            database_ssl_mode,
            port,
            sms_gateway,
        })
    }
}
