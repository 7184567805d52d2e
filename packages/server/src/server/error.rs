//! HTTP error contract.
//!
//! Every failure leaves as `{"error": "<message>"}`. Backend detail is logged
//! and never sent to the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use sms_gateway::SmsGatewayError;

use crate::domains::customers::ValidationError;

pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";
pub const GATEWAY_TIMEOUT: &str = "Gateway Timeout";
pub const INVALID_BODY: &str = "Invalid request body";
pub const PAYLOAD_TOO_LARGE: &str = "Payload Too Large";

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("request body exceeds the size limit")]
    PayloadTooLarge,

    #[error("upstream timed out: {0:#}")]
    GatewayTimeout(anyhow::Error),

    #[error("internal error: {0:#}")]
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::GatewayTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match self {
            ApiError::BadRequest(message) => message.clone(),
            ApiError::PayloadTooLarge => PAYLOAD_TOO_LARGE.to_string(),
            ApiError::GatewayTimeout(_) => GATEWAY_TIMEOUT.to_string(),
            ApiError::Internal(_) => INTERNAL_SERVER_ERROR.to_string(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

/// Sort a backend failure into the status the caller should see.
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        if err
            .downcast_ref::<SmsGatewayError>()
            .is_some_and(SmsGatewayError::is_timeout)
        {
            return ApiError::GatewayTimeout(err);
        }

        ApiError::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal(e) => {
                tracing::error!(error = ?e, "Error executing request");
            }
            ApiError::GatewayTimeout(e) => {
                tracing::error!(error = %format!("{e:#}"), "Outbound call timed out");
            }
            ApiError::BadRequest(_) | ApiError::PayloadTooLarge => {
                tracing::debug!(error = %self, "Rejected request");
            }
        }

        let body = ErrorResponse {
            error: self.public_message(),
        };
        (self.status(), Json(body)).into_response()
    }
}
