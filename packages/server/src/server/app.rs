//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Extension},
    http::{header::CONTENT_TYPE, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServiceVariant;
use crate::kernel::ServerDeps;
use crate::server::middleware::cors_response_headers;
use crate::server::routes::{
    add_customer_handler, check_phone_handler, hello_handler, list_customers_handler,
    send_otp_handler,
};

/// Request bodies above this are rejected with 413.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub variant: ServiceVariant,
    pub deps: Arc<ServerDeps>,
}

/// Build the Axum application router
///
/// Every deployment gets `GET /`, `GET /test` and `POST /add-customer`;
/// `/check-phone` and `/send-otp` are mounted only where the variant asks
/// for them.
pub fn build_app(variant: ServiceVariant, deps: ServerDeps) -> Router {
    let app_state = AxumAppState {
        variant,
        deps: Arc::new(deps),
    };

    // Answers preflight; the header middleware below covers every other response
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::POST])
        .allow_headers([CONTENT_TYPE]);

    let mut router = Router::new()
        .route("/", get(list_customers_handler))
        .route("/test", get(hello_handler))
        .route("/add-customer", post(add_customer_handler));

    if variant.has_phone_routes() {
        router = router
            .route("/check-phone", post(check_phone_handler))
            .route("/send-otp", post(send_otp_handler));
    }

    router
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(Extension(app_state))
        .layer(cors)
        .layer(middleware::from_fn(cors_response_headers))
        .layer(TraceLayer::new_for_http())
}
