use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HelloResponse {
    message: &'static str,
}

/// Liveness check (`GET /test`)
///
/// Touches nothing; always `{"message":"hello world"}`.
pub async fn hello_handler() -> Json<HelloResponse> {
    Json(HelloResponse {
        message: "hello world",
    })
}
