use crate::domain::user::UserRef;
use crate::domain::validation::require;
use crate::domain::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// The user-editable part of a blog, already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogFields {
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
}

/// Request body for both creation and replacement. Extra fields sent by
/// clients (`id`, `user`) are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct BlogPayload {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

impl BlogPayload {
    /// Parses a raw request body. An empty body means no payload was sent.
    pub fn from_body(body: &[u8]) -> Result<Option<Self>, DomainError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        serde_json::from_slice(body)
            .map(Some)
            .map_err(|e| DomainError::MalformedInput(e.to_string()))
    }

    pub fn into_fields(self) -> Result<BlogFields, DomainError> {
        Ok(BlogFields {
            title: require("title", self.title)?,
            author: self.author,
            url: require("url", self.url)?,
            likes: self.likes.unwrap_or(0),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct BlogResponse {
    pub id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
    pub user: UserRef,
}

impl BlogResponse {
    pub fn new(blog: Blog, user: UserRef) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            author: blog.author,
            url: blog.url,
            likes: blog.likes,
            user,
        }
    }
}

/// Blog as embedded in a user listing.
#[derive(Debug, Serialize)]
pub struct BlogSummary {
    pub id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
}

impl From<Blog> for BlogSummary {
    fn from(blog: Blog) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            author: blog.author,
            url: blog.url,
            likes: blog.likes,
        }
    }
}

/// Parses a path id. Anything that is not a UUID is a malformed request,
/// distinct from a well-formed id that matches nothing.
pub fn parse_id(raw: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw).map_err(|_| DomainError::MalformedInput("malformatted id".to_string()))
}
