use crate::domain::DomainError;
use crate::infrastructure::jwt::JwtService;
use actix_web::dev::Payload;
use actix_web::http::header::Header;
use actix_web::{web, FromRequest, HttpRequest};
use actix_web_httpauth::headers::authorization::{Authorization, Bearer};
use std::future::{ready, Ready};
use std::sync::Arc;
use uuid::Uuid;

/// Identity asserted by a valid `Authorization: Bearer <token>` header.
/// Handlers that take this extractor reject anonymous requests with 401.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub username: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = DomainError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, DomainError> {
    let jwt_service = req
        .app_data::<web::Data<Arc<JwtService>>>()
        .ok_or_else(|| DomainError::InternalError("JWT service not configured".to_string()))?;

    let bearer = Authorization::<Bearer>::parse(req)
        .map_err(|_| DomainError::Unauthorized("token missing or invalid".to_string()))?
        .into_scheme();

    let claims = jwt_service.verify_token(bearer.token())?;

    Ok(AuthenticatedUser {
        id: claims.id,
        username: claims.username,
    })
}
