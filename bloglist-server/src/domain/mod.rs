pub mod blog;
pub mod error;
pub mod user;
pub mod validation;

pub use blog::Blog;
pub use error::DomainError;
pub use user::User;
