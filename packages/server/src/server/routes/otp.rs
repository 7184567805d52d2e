use axum::{extract::Extension, Json};
use serde_json::Value;

use crate::domains::customers::SendOtpRequest;
use crate::server::app::AxumAppState;
use crate::server::error::ApiError;
use crate::server::extract::JsonBody;

/// `POST /send-otp`
///
/// Relays the OTP and phone to the SMS gateway and answers with whatever JSON
/// the gateway sent back. Neither value is validated here.
pub async fn send_otp_handler(
    Extension(state): Extension<AxumAppState>,
    JsonBody(request): JsonBody<SendOtpRequest>,
) -> Result<Json<Value>, ApiError> {
    let gateway = state
        .deps
        .sms_gateway
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("SMS gateway is not configured"))?;

    let reply = gateway.send_otp(&request.otp(), &request.phone()).await?;

    Ok(Json(reply))
}
