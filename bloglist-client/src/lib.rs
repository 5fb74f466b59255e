//! Typed HTTP client for the blog-list API.

pub mod error;
pub mod http_client;
pub mod models;

pub use error::ClientError;
pub use http_client::HttpClient;
