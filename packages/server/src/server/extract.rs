//! Body extractors with the service's lenient parsing rules.
//!
//! - `application/json`: parsed; an empty body counts as `{}`
//! - `application/x-www-form-urlencoded` (`JsonOrForm` only): every value is a string
//! - anything else: body ignored, treated as `{}`
//!
//! A JSON array names no fields and counts as `{}`. Malformed bodies and bare
//! JSON scalars are 400s; oversized bodies are 413s.

use std::collections::HashMap;

use axum::{
    async_trait,
    body::Bytes,
    extract::{rejection::BytesRejection, FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    Form,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::server::error::{ApiError, INVALID_BODY};

/// JSON request body
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

/// JSON or URL-encoded form request body
#[derive(Debug, Clone)]
pub struct JsonOrForm<T>(pub T);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Other,
}

fn body_kind(headers: &HeaderMap) -> BodyKind {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return BodyKind::Other;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if mime == "application/json" || mime.ends_with("+json") {
        BodyKind::Json
    } else if mime == "application/x-www-form-urlencoded" {
        BodyKind::Form
    } else {
        BodyKind::Other
    }
}

fn bytes_rejection(rejection: BytesRejection) -> ApiError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge
    } else {
        ApiError::BadRequest(INVALID_BODY.to_string())
    }
}

async fn read_json<S>(req: Request, state: &S) -> Result<Value, ApiError>
where
    S: Send + Sync,
{
    let bytes = Bytes::from_request(req, state)
        .await
        .map_err(bytes_rejection)?;

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }

    serde_json::from_slice(&bytes).map_err(|_| ApiError::BadRequest(INVALID_BODY.to_string()))
}

async fn read_form<S>(req: Request, state: &S) -> Result<Value, ApiError>
where
    S: Send + Sync,
{
    let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
        .await
        .map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ApiError::PayloadTooLarge
            } else {
                ApiError::BadRequest(INVALID_BODY.to_string())
            }
        })?;

    Ok(Value::Object(
        fields
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect(),
    ))
}

// Arrays parse but name no fields; bare scalars are not a request body.
fn into_payload<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    let value = match value {
        Value::Object(_) => value,
        Value::Array(_) => Value::Object(Map::new()),
        _ => return Err(ApiError::BadRequest(INVALID_BODY.to_string())),
    };
    serde_json::from_value(value).map_err(|_| ApiError::BadRequest(INVALID_BODY.to_string()))
}

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value = match body_kind(req.headers()) {
            BodyKind::Json => read_json(req, state).await?,
            BodyKind::Form | BodyKind::Other => Value::Object(Map::new()),
        };
        into_payload(value).map(JsonBody)
    }
}

#[async_trait]
impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value = match body_kind(req.headers()) {
            BodyKind::Json => read_json(req, state).await?,
            BodyKind::Form => read_form(req, state).await?,
            BodyKind::Other => Value::Object(Map::new()),
        };
        into_payload(value).map(JsonOrForm)
    }
}
