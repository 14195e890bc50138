// HTTP boundary: routes GET/PUT on any path to the queue registry

pub mod error;
pub mod handler;
pub mod server;

pub use error::{ApiError, ServerError};
pub use server::{router, AppState, Server, ServerConfig};
