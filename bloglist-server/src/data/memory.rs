//! In-memory stand-in for the PostgreSQL store.
//!
//! Implements the same repository traits as the SQL adapters so the HTTP
//! application can be driven end to end without a database server. The test
//! harness owns its lifecycle: [`InMemoryDatabase::connect`] before the suite,
//! [`InMemoryDatabase::clear`] between cases, [`InMemoryDatabase::close`] at
//! the end.

use crate::data::blog_repository::BlogRepository;
use crate::data::user_repository::UserRepository;
use crate::domain::blog::BlogFields;
use crate::domain::user::NewUser;
use crate::domain::validation::FieldError;
use crate::domain::{Blog, DomainError, User};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

#[derive(Debug, Default)]
struct Collections {
    users: Vec<User>,
    blogs: Vec<Blog>,
    closed: bool,
}

/// Cloning yields another handle onto the same collections.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDatabase {
    inner: Arc<RwLock<Collections>>,
}

impl InMemoryDatabase {
    pub fn connect() -> Self {
        tracing::debug!("In-memory database connected");
        Self::default()
    }

    /// Drops every document but keeps the connection usable.
    pub async fn clear(&self) {
        let mut db = self.inner.write().await;
        db.users.clear();
        db.blogs.clear();
    }

    /// Drops every document; later operations fail.
    pub async fn close(&self) {
        let mut db = self.inner.write().await;
        db.users.clear();
        db.blogs.clear();
        db.closed = true;
        tracing::debug!("In-memory database closed");
    }

    async fn read(&self) -> Result<RwLockReadGuard<'_, Collections>, DomainError> {
        let db = self.inner.read().await;
        if db.closed {
            return Err(closed());
        }
        Ok(db)
    }

    async fn write(&self) -> Result<RwLockWriteGuard<'_, Collections>, DomainError> {
        let db = self.inner.write().await;
        if db.closed {
            return Err(closed());
        }
        Ok(db)
    }
}

fn closed() -> DomainError {
    DomainError::DatabaseError("in-memory database is closed".to_string())
}

#[async_trait]
impl UserRepository for InMemoryDatabase {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut db = self.write().await?;
        if db.users.iter().any(|u| u.username == user.username) {
            return Err(DomainError::Validation(FieldError::unique("username")));
        }

        let user = User {
            id: Uuid::new_v4(),
            username: user.username,
            name: user.name,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        db.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<User, DomainError> {
        let db = self.read().await?;
        db.users
            .iter()
            .find(|u| u.username == username)
            .cloned()
            .ok_or(DomainError::UserNotFound)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<User, DomainError> {
        let db = self.read().await?;
        db.users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(DomainError::UserNotFound)
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.read().await?.users.clone())
    }
}

#[async_trait]
impl BlogRepository for InMemoryDatabase {
    async fn create(&self, user_id: Uuid, fields: BlogFields) -> Result<Blog, DomainError> {
        let mut db = self.write().await?;
        if !db.users.iter().any(|u| u.id == user_id) {
            return Err(DomainError::DatabaseError(format!(
                "blog references unknown user {}",
                user_id
            )));
        }

        let blog = Blog {
            id: Uuid::new_v4(),
            title: fields.title,
            author: fields.author,
            url: fields.url,
            likes: fields.likes,
            user_id,
            created_at: Utc::now(),
        };
        db.blogs.push(blog.clone());
        Ok(blog)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Blog, DomainError> {
        let db = self.read().await?;
        db.blogs
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or(DomainError::BlogNotFound)
    }

    async fn replace(&self, id: Uuid, fields: BlogFields) -> Result<Blog, DomainError> {
        let mut db = self.write().await?;
        let blog = db
            .blogs
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(DomainError::BlogNotFound)?;

        blog.title = fields.title;
        blog.author = fields.author;
        blog.url = fields.url;
        blog.likes = fields.likes;
        Ok(blog.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let mut db = self.write().await?;
        let before = db.blogs.len();
        db.blogs.retain(|b| b.id != id);
        if db.blogs.len() == before {
            Err(DomainError::BlogNotFound)
        } else {
            Ok(())
        }
    }

    async fn list(&self) -> Result<Vec<Blog>, DomainError> {
        Ok(self.read().await?.blogs.clone())
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Blog>, DomainError> {
        let db = self.read().await?;
        Ok(db
            .blogs
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            name: "Test User".to_string(),
            password_hash: "hash".to_string(),
        }
    }

    fn fields(title: &str) -> BlogFields {
        BlogFields {
            title: title.to_string(),
            author: None,
            url: format!("https://example.com/{}", title),
            likes: 0,
        }
    }

    #[tokio::test]
    async fn rejects_duplicate_usernames() {
        let db = InMemoryDatabase::connect();
        UserRepository::create(&db, new_user("hellas")).await.unwrap();

        let err = UserRepository::create(&db, new_user("hellas")).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref f) if f.field == "username"));
        assert_eq!(UserRepository::list(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn clear_empties_collections() {
        let db = InMemoryDatabase::connect();
        let user = UserRepository::create(&db, new_user("mluukkai")).await.unwrap();
        BlogRepository::create(&db, user.id, fields("first")).await.unwrap();

        db.clear().await;

        assert!(UserRepository::list(&db).await.unwrap().is_empty());
        assert!(BlogRepository::list(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn closed_database_refuses_operations() {
        let db = InMemoryDatabase::connect();
        db.close().await;

        let err = BlogRepository::list(&db).await.unwrap_err();
        assert_eq!(err.to_status_code(), 500);
    }

    #[tokio::test]
    async fn replace_keeps_owner_and_delete_reports_missing() {
        let db = InMemoryDatabase::connect();
        let user = UserRepository::create(&db, new_user("root")).await.unwrap();
        let blog = BlogRepository::create(&db, user.id, fields("draft")).await.unwrap();

        let replaced = BlogRepository::replace(
            &db,
            blog.id,
            BlogFields {
                likes: 12,
                ..fields("final")
            },
        )
        .await
        .unwrap();
        assert_eq!(replaced.user_id, user.id);
        assert_eq!(replaced.title, "final");
        assert_eq!(replaced.likes, 12);

        BlogRepository::delete(&db, blog.id).await.unwrap();
        assert!(matches!(
            BlogRepository::delete(&db, blog.id).await,
            Err(DomainError::BlogNotFound)
        ));
    }

    #[tokio::test]
    async fn blog_must_reference_existing_user() {
        let db = InMemoryDatabase::connect();
        let err = BlogRepository::create(&db, Uuid::new_v4(), fields("orphan"))
            .await
            .unwrap_err();
        assert_eq!(err.to_status_code(), 500);
    }
}
