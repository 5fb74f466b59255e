pub mod config;
pub mod database;
pub mod jwt;
pub mod logging;

pub use config::{AppConfig, ConfigError};
pub use jwt::JwtService;
