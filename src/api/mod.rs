//! HTTP API for the graph explorer

pub mod handlers;
pub mod routes;

pub use handlers::{AppState, ServerState};
pub use routes::create_router;
