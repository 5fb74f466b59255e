//! Shared fixtures for the API tests: a seeded in-memory database, a signed
//! token for the first user and an `App` wired exactly like production minus
//! CORS and access logging.

#![allow(dead_code)]

use actix_web::{web, App};
use bloglist_server::application::auth_service::hash_password;
use bloglist_server::data::{BlogRepository, InMemoryDatabase, UserRepository};
use bloglist_server::domain::blog::BlogFields;
use bloglist_server::domain::user::NewUser;
use bloglist_server::domain::{Blog, User};
use bloglist_server::infrastructure::JwtService;
use bloglist_server::presentation::http_handlers;
use bloglist_server::{configure_app, AppState};
use std::sync::Arc;
use uuid::Uuid;

pub const SECRET: &str = "integration-test-secret-with-enough-length";

pub struct PlainUser {
    pub username: &'static str,
    pub name: &'static str,
    pub password: &'static str,
}

pub const INITIAL_USERS: [PlainUser; 2] = [
    PlainUser {
        username: "root",
        name: "Superuser",
        password: "sekret",
    },
    PlainUser {
        username: "mluukkai",
        name: "Matti Luukkainen",
        password: "salainen",
    },
];

pub fn initial_blogs() -> Vec<BlogFields> {
    vec![
        BlogFields {
            title: "React patterns".to_string(),
            author: Some("Michael Chan".to_string()),
            url: "https://reactpatterns.com/".to_string(),
            likes: 7,
        },
        BlogFields {
            title: "Go To Statement Considered Harmful".to_string(),
            author: Some("Edsger W. Dijkstra".to_string()),
            url: "http://www.u.arizona.edu/~rubinson/copyright_violations/Go_To_Considered_Harmful.html"
                .to_string(),
            likes: 5,
        },
        BlogFields {
            title: "Canonical string reduction".to_string(),
            author: Some("Edsger W. Dijkstra".to_string()),
            url: "http://www.cs.utexas.edu/~EWD/transcriptions/EWD08xx/EWD808.html".to_string(),
            likes: 12,
        },
    ]
}

pub struct TestContext {
    pub db: InMemoryDatabase,
    pub jwt: Arc<JwtService>,
    pub state: AppState,
    /// Full header value, `Bearer <token>`, for the first initial user.
    pub token: String,
    pub token_user_id: Uuid,
}

impl TestContext {
    pub async fn setup() -> Self {
        let db = InMemoryDatabase::connect();
        let jwt = Arc::new(JwtService::new(SECRET, chrono::Duration::hours(1)).unwrap());

        let mut owner = None;
        for plain in &INITIAL_USERS {
            let user = UserRepository::create(
                &db,
                NewUser {
                    username: plain.username.to_string(),
                    name: plain.name.to_string(),
                    password_hash: hash_password(plain.password).unwrap(),
                },
            )
            .await
            .unwrap();
            owner.get_or_insert(user);
        }
        let owner = owner.unwrap();

        for fields in initial_blogs() {
            BlogRepository::create(&db, owner.id, fields).await.unwrap();
        }

        let token = jwt.generate_token(owner.id, &owner.username).unwrap();

        let state = AppState::new(Arc::new(db.clone()), Arc::new(db.clone()), jwt.clone());

        Self {
            db,
            jwt,
            state,
            token: format!("Bearer {}", token),
            token_user_id: owner.id,
        }
    }

    pub fn app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .configure(configure_app(self.state.clone()))
            .default_service(web::to(http_handlers::unknown_endpoint))
    }

    pub async fn users_in_db(&self) -> Vec<User> {
        UserRepository::list(&self.db).await.unwrap()
    }

    pub async fn blogs_in_db(&self) -> Vec<Blog> {
        BlogRepository::list(&self.db).await.unwrap()
    }

    /// An id that is well formed but no longer matches any blog.
    pub async fn deleted_valid_id(&self) -> Uuid {
        let blog = BlogRepository::create(
            &self.db,
            self.token_user_id,
            BlogFields {
                title: "willremovethissoon".to_string(),
                author: None,
                url: "https://example.com/soon-gone".to_string(),
                likes: 0,
            },
        )
        .await
        .unwrap();
        BlogRepository::delete(&self.db, blog.id).await.unwrap();
        blog.id
    }

    pub async fn teardown(self) {
        self.db.close().await;
    }
}
