//! HTTP API layer.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult, ErrorResponse};
pub use routes::{create_router, create_router_with_config};
pub use state::AppState;
