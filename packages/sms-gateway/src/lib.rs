// Thin client for an HTTP SMS gateway's OTP route (Fast2SMS bulkV2 by default).
//
// The gateway's JSON reply is handed back untouched; callers relay it as-is.

use std::time::Duration;

pub mod models;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::models::OtpRequest;

pub const DEFAULT_GATEWAY_URL: &str = "https://www.fast2sms.com/dev/bulkV2";
pub const DEFAULT_ROUTE: &str = "otp";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct SmsGatewayOptions {
    pub api_key: String,
    pub url: String,
    /// Fixed route tag sent with every OTP request
    pub route: String,
    /// Upper bound for the whole outbound call (connect + body)
    pub timeout: Duration,
}

impl SmsGatewayOptions {
    /// Options pointing at the default gateway with the default route and timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            url: DEFAULT_GATEWAY_URL.to_string(),
            route: DEFAULT_ROUTE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SmsGatewayError {
    #[error("SMS gateway did not respond within {0:?}")]
    Timeout(Duration),

    #[error("request to SMS gateway failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("SMS gateway returned an unreadable body (status {status}): {source}")]
    InvalidResponse {
        status: StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build SMS gateway client: {0}")]
    Client(#[source] reqwest::Error),
}

impl SmsGatewayError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, SmsGatewayError::Timeout(_))
    }
}

#[derive(Debug, Clone)]
pub struct SmsGatewayService {
    options: SmsGatewayOptions,
    client: Client,
}

impl SmsGatewayService {
    pub fn new(options: SmsGatewayOptions) -> Result<Self, SmsGatewayError> {
        let client = Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(SmsGatewayError::Client)?;

        Ok(Self { options, client })
    }

    pub fn options(&self) -> &SmsGatewayOptions {
        &self.options
    }

    /// Send `otp` to `phone` and return the gateway's JSON reply verbatim.
    ///
    /// A non-2xx reply with a JSON body is still returned as `Ok`; only
    /// transport failures, timeouts and non-JSON bodies are errors.
    pub async fn send_otp(&self, otp: &str, phone: &str) -> Result<Value, SmsGatewayError> {
        let form_body = OtpRequest {
            variables_values: otp,
            route: &self.options.route,
            numbers: phone,
        };

        let response = self
            .client
            .post(&self.options.url)
            .bearer_auth(&self.options.api_key)
            .form(&form_body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "SMS gateway returned an error status");
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_timeout() {
                SmsGatewayError::Timeout(self.options.timeout)
            } else {
                SmsGatewayError::InvalidResponse { status, source: e }
            }
        })
    }

    fn classify(&self, error: reqwest::Error) -> SmsGatewayError {
        if error.is_timeout() {
            SmsGatewayError::Timeout(self.options.timeout)
        } else {
            SmsGatewayError::Request(error)
        }
    }
}
