use axum::{
    extract::Request,
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, SERVER,
        },
        HeaderValue,
    },
    middleware::Next,
    response::Response,
};

/// Middleware stamping the fixed cross-origin policy onto every response
///
/// - Access-Control-Allow-Origin: `*`
/// - Access-Control-Allow-Methods: `POST`
/// - Access-Control-Allow-Headers: `Content-Type`
///
/// Headers that identify the server software are removed.
pub async fn cors_response_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.remove("x-powered-by");
    headers.remove(SERVER);

    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static("POST"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );

    response
}
