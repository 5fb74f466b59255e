use crate::application::{AuthService, BlogService};
use crate::domain::blog::BlogPayload;
use crate::domain::user::{LoginUserRequest, RegisterUserRequest};
use crate::domain::DomainError;
use crate::presentation::auth::AuthenticatedUser;
use crate::presentation::error::ErrorBody;
use actix_web::{web, HttpResponse};
use std::sync::Arc;

// ============== User Handlers ==============

pub async fn register(
    auth_service: web::Data<Arc<AuthService>>,
    req: web::Json<RegisterUserRequest>,
) -> Result<HttpResponse, DomainError> {
    let user = auth_service.register(req.into_inner()).await?;
    Ok(HttpResponse::Created().json(user))
}

pub async fn list_users(
    auth_service: web::Data<Arc<AuthService>>,
) -> Result<HttpResponse, DomainError> {
    let users = auth_service.list_users().await?;
    Ok(HttpResponse::Ok().json(users))
}

pub async fn login(
    auth_service: web::Data<Arc<AuthService>>,
    req: web::Json<LoginUserRequest>,
) -> Result<HttpResponse, DomainError> {
    let response = auth_service.login(req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

// ============== Blog Handlers ==============

pub async fn list_blogs(
    blog_service: web::Data<Arc<BlogService>>,
) -> Result<HttpResponse, DomainError> {
    let blogs = blog_service.list_blogs().await?;
    Ok(HttpResponse::Ok().json(blogs))
}

pub async fn get_blog(
    blog_service: web::Data<Arc<BlogService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, DomainError> {
    let blog_id = path.into_inner();

    tracing::debug!("Getting blog with id={}", blog_id);

    let blog = blog_service.get_blog(&blog_id).await?;
    Ok(HttpResponse::Ok().json(blog))
}

pub async fn create_blog(
    user: AuthenticatedUser,
    blog_service: web::Data<Arc<BlogService>>,
    payload: web::Json<BlogPayload>,
) -> Result<HttpResponse, DomainError> {
    tracing::info!("Creating blog for user {} ({})", user.username, user.id);

    let blog = blog_service
        .create_blog(user.id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(blog))
}

pub async fn delete_blog(
    blog_service: web::Data<Arc<BlogService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, DomainError> {
    let blog_id = path.into_inner();

    tracing::info!("Deleting blog id={}", blog_id);

    blog_service.delete_blog(&blog_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// The body is taken raw and parsed only after the id is known to exist,
/// so an unknown id is reported as 404 whatever was sent.
pub async fn replace_blog(
    blog_service: web::Data<Arc<BlogService>>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<HttpResponse, DomainError> {
    let blog_id = path.into_inner();

    tracing::info!("Replacing blog id={}", blog_id);

    let blog = blog_service.replace_blog(&blog_id, &body).await?;
    Ok(HttpResponse::Ok().json(blog))
}

pub async fn unknown_endpoint() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorBody::new("unknown endpoint"))
}
