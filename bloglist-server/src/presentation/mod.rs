pub mod auth;
pub mod error;
pub mod http_handlers;
pub mod routes;

pub use routes::{configure_app, AppState};
