//! Blog-list REST API: users, token login and blog management over
//! actix-web, with PostgreSQL and in-memory persistence behind the same
//! repository traits.

pub mod application;
pub mod data;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use presentation::{configure_app, AppState};
