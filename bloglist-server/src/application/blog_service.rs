use crate::data::{BlogRepository, UserRepository};
use crate::domain::blog::{parse_id, BlogPayload, BlogResponse};
use crate::domain::user::UserRef;
use crate::domain::{Blog, DomainError};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

pub struct BlogService {
    blog_repo: Arc<dyn BlogRepository>,
    user_repo: Arc<dyn UserRepository>,
}

impl BlogService {
    pub fn new(blog_repo: Arc<dyn BlogRepository>, user_repo: Arc<dyn UserRepository>) -> Self {
        Self {
            blog_repo,
            user_repo,
        }
    }

    pub async fn list_blogs(&self) -> Result<Vec<BlogResponse>, DomainError> {
        let blogs = self.blog_repo.list().await?;
        let owners: HashMap<Uuid, UserRef> = self
            .user_repo
            .list()
            .await?
            .iter()
            .map(|u| (u.id, UserRef::from(u)))
            .collect();

        blogs
            .into_iter()
            .map(|blog| -> Result<BlogResponse, DomainError> {
                let owner = owners
                    .get(&blog.user_id)
                    .cloned()
                    .ok_or_else(|| dangling_owner(&blog))?;
                Ok(BlogResponse::new(blog, owner))
            })
            .collect()
    }

    pub async fn get_blog(&self, id: &str) -> Result<BlogResponse, DomainError> {
        let id = parse_id(id)?;
        let blog = self.blog_repo.find_by_id(id).await?;
        self.populate(blog).await
    }

    pub async fn create_blog(
        &self,
        user_id: Uuid,
        payload: BlogPayload,
    ) -> Result<BlogResponse, DomainError> {
        let fields = payload.into_fields()?;

        let owner = match self.user_repo.find_by_id(user_id).await {
            Ok(user) => UserRef::from(&user),
            Err(DomainError::UserNotFound) => {
                tracing::warn!("Token subject {} no longer exists", user_id);
                return Err(DomainError::Unauthorized("token invalid".to_string()));
            }
            Err(e) => return Err(e),
        };

        let blog = self.blog_repo.create(user_id, fields).await?;

        tracing::info!("Blog created: id={}, user_id={}", blog.id, user_id);

        Ok(BlogResponse::new(blog, owner))
    }

    pub async fn delete_blog(&self, id: &str) -> Result<(), DomainError> {
        let id = parse_id(id)?;
        self.blog_repo.delete(id).await?;

        tracing::info!("Blog deleted: id={}", id);

        Ok(())
    }

    /// Existence is checked before the body is parsed, so any replacement
    /// aimed at an unknown id reports 404 rather than 400.
    pub async fn replace_blog(&self, id: &str, body: &[u8]) -> Result<BlogResponse, DomainError> {
        let id = parse_id(id)?;
        self.blog_repo.find_by_id(id).await?;

        let fields = BlogPayload::from_body(body)?
            .unwrap_or_default()
            .into_fields()?;
        let blog = self.blog_repo.replace(id, fields).await?;

        tracing::info!("Blog replaced: id={}, likes={}", blog.id, blog.likes);

        self.populate(blog).await
    }

    async fn populate(&self, blog: Blog) -> Result<BlogResponse, DomainError> {
        let owner = match self.user_repo.find_by_id(blog.user_id).await {
            Ok(user) => UserRef::from(&user),
            Err(DomainError::UserNotFound) => return Err(dangling_owner(&blog)),
            Err(e) => return Err(e),
        };
        Ok(BlogResponse::new(blog, owner))
    }
}

fn dangling_owner(blog: &Blog) -> DomainError {
    tracing::error!("Blog {} references missing user {}", blog.id, blog.user_id);
    DomainError::InternalError(format!("blog {} has no owner", blog.id))
}
