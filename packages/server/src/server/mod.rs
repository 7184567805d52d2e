// HTTP server setup (Axum)
pub mod app;
pub mod bootstrap;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;

pub use app::*;
pub use bootstrap::run;
pub use error::ApiError;
