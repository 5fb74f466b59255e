use crate::domain::blog::BlogFields;
use crate::domain::{Blog, DomainError};
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

#[async_trait]
pub trait BlogRepository: Send + Sync {
    async fn create(&self, user_id: Uuid, fields: BlogFields) -> Result<Blog, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Blog, DomainError>;
    /// Overwrites the editable fields; the owning user is kept.
    async fn replace(&self, id: Uuid, fields: BlogFields) -> Result<Blog, DomainError>;
    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
    async fn list(&self) -> Result<Vec<Blog>, DomainError>;
    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Blog>, DomainError>;
}

pub struct PostgresBlogRepository {
    pool: PgPool,
}

impl PostgresBlogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn blog_from_row(row: &PgRow) -> Result<Blog, DomainError> {
    Ok(Blog {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        author: row.try_get("author")?,
        url: row.try_get("url")?,
        likes: row.try_get("likes")?,
        user_id: row.try_get("user_id")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl BlogRepository for PostgresBlogRepository {
    async fn create(&self, user_id: Uuid, fields: BlogFields) -> Result<Blog, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO blogs (id, title, author, url, likes, user_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            RETURNING id, title, author, url, likes, user_id, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&fields.title)
        .bind(&fields.author)
        .bind(&fields.url)
        .bind(fields.likes)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create blog: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        blog_from_row(&row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Blog, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, author, url, likes, user_id, created_at
            FROM blogs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => blog_from_row(&row),
            None => Err(DomainError::BlogNotFound),
        }
    }

    async fn replace(&self, id: Uuid, fields: BlogFields) -> Result<Blog, DomainError> {
        let row = sqlx::query(
            r#"
            UPDATE blogs
            SET title = $1, author = $2, url = $3, likes = $4
            WHERE id = $5
            RETURNING id, title, author, url, likes, user_id, created_at
            "#,
        )
        .bind(&fields.title)
        .bind(&fields.author)
        .bind(&fields.url)
        .bind(fields.likes)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => blog_from_row(&row),
            None => Err(DomainError::BlogNotFound),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            Err(DomainError::BlogNotFound)
        } else {
            Ok(())
        }
    }

    async fn list(&self) -> Result<Vec<Blog>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, author, url, likes, user_id, created_at
            FROM blogs
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(blog_from_row).collect()
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Blog>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, author, url, likes, user_id, created_at
            FROM blogs
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(blog_from_row).collect()
    }
}
