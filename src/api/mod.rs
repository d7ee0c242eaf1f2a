//! HTTP API module.

pub mod handlers;
pub mod routes;

pub use handlers::{AppError, AppState};
pub use routes::create_router;
