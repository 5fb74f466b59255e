pub mod blog_repository;
pub mod memory;
pub mod user_repository;

pub use blog_repository::{BlogRepository, PostgresBlogRepository};
pub use memory::InMemoryDatabase;
pub use user_repository::{PostgresUserRepository, UserRepository};
