use crate::domain::validation::FieldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    MalformedInput(String),

    #[error("{0}")]
    Validation(#[from] FieldError),

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("{0}")]
    Unauthorized(String),

    #[error("user not found")]
    UserNotFound,

    #[error("blog not found")]
    BlogNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl DomainError {
    pub fn to_status_code(&self) -> u16 {
        match self {
            Self::MalformedInput(_) => 400,
            Self::InvalidCredentials | Self::Unauthorized(_) => 401,
            Self::UserNotFound | Self::BlogNotFound => 404,
            Self::Validation(_) => 422,
            Self::DatabaseError(_) | Self::InternalError(_) => 500,
        }
    }

    /// Message safe to hand to a client. Server-side failures are collapsed
    /// into a fixed text; the details stay in the log.
    pub fn public_message(&self) -> String {
        match self {
            Self::DatabaseError(_) | Self::InternalError(_) => "internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        Self::DatabaseError(err.to_string())
    }
}
