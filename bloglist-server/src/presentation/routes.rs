use crate::application::{AuthService, BlogService};
use crate::data::{BlogRepository, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::jwt::JwtService;
use crate::presentation::http_handlers;
use actix_web::web;
use std::sync::Arc;

/// Services shared by every worker.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub blog_service: Arc<BlogService>,
    pub jwt_service: Arc<JwtService>,
}

impl AppState {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        blog_repo: Arc<dyn BlogRepository>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(
                user_repo.clone(),
                blog_repo.clone(),
                jwt_service.clone(),
            )),
            blog_service: Arc::new(BlogService::new(blog_repo, user_repo)),
            jwt_service,
        }
    }
}

/// Bodies that fail to parse are a malformed request, reported in the
/// common error shape.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| DomainError::MalformedInput(err.to_string()).into())
}

/// A resource whose methods all miss answers like an unknown path.
fn resource(path: &str) -> actix_web::Resource {
    web::resource(path).default_service(web::to(http_handlers::unknown_endpoint))
}

/// Registers app data and the `/api` routes. The unknown-endpoint fallback
/// for unmatched paths belongs on the `App` itself (see
/// [`http_handlers::unknown_endpoint`]).
pub fn configure_app(state: AppState) -> impl Fn(&mut web::ServiceConfig) + Clone {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::new(state.auth_service.clone()))
            .app_data(web::Data::new(state.blog_service.clone()))
            .app_data(web::Data::new(state.jwt_service.clone()))
            .app_data(json_config())
            .service(
                web::scope("/api")
                    .service(
                        resource("/users")
                            .route(web::get().to(http_handlers::list_users))
                            .route(web::post().to(http_handlers::register)),
                    )
                    .service(resource("/login").route(web::post().to(http_handlers::login)))
                    .service(
                        resource("/blogs")
                            .route(web::get().to(http_handlers::list_blogs))
                            .route(web::post().to(http_handlers::create_blog)),
                    )
                    .service(
                        resource("/blogs/{id}")
                            .route(web::get().to(http_handlers::get_blog))
                            .route(web::put().to(http_handlers::replace_blog))
                            .route(web::delete().to(http_handlers::delete_blog)),
                    ),
            );
    }
}
