use actix_web::{web, App, HttpServer};
use bloglist_client::models::NewBlog;
use bloglist_client::{ClientError, HttpClient};
use bloglist_server::data::InMemoryDatabase;
use bloglist_server::infrastructure::JwtService;
use bloglist_server::presentation::http_handlers;
use bloglist_server::{configure_app, AppState};
use std::sync::Arc;

const SECRET: &str = "client-test-secret-with-enough-length";

/// Boots the real server on an ephemeral port over an in-memory database.
fn spawn_server() -> (String, InMemoryDatabase) {
    let db = InMemoryDatabase::connect();
    let jwt = Arc::new(JwtService::new(SECRET, chrono::Duration::hours(1)).unwrap());
    let state = AppState::new(Arc::new(db.clone()), Arc::new(db.clone()), jwt);

    let server = HttpServer::new(move || {
        App::new()
            .configure(configure_app(state.clone()))
            .default_service(web::to(http_handlers::unknown_endpoint))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    actix_rt::spawn(server.run());

    (format!("http://{}", addr), db)
}

#[actix_rt::test]
async fn full_blog_lifecycle() {
    let (base_url, db) = spawn_server();
    let mut client = HttpClient::new(base_url).unwrap();

    let user = client.register("hellas", "Arto Hellas", "salainen").await.unwrap();
    assert_eq!(user.username, "hellas");
    assert!(user.blogs.is_empty());

    let login = client.login("hellas", "salainen").await.unwrap();
    assert_eq!(login.name, "Arto Hellas");
    assert_eq!(client.token(), Some(login.token.as_str()));

    let created = client
        .create_blog(&NewBlog {
            title: "Type wizards".to_string(),
            author: Some("Arto Hellas".to_string()),
            url: "https://example.com/type-wizards".to_string(),
            likes: None,
        })
        .await
        .unwrap();
    assert_eq!(created.likes, 0);
    assert_eq!(created.user.id, user.id);

    let liked = client.like_blog(created.id).await.unwrap();
    assert_eq!(liked.likes, 1);

    let blogs = client.list_blogs().await.unwrap();
    assert_eq!(blogs.len(), 1);
    assert_eq!(blogs[0].likes, 1);

    let users = client.list_users().await.unwrap();
    assert_eq!(users[0].blogs.len(), 1);

    client.delete_blog(created.id).await.unwrap();
    let err = client.get_blog(created.id).await.unwrap_err();
    assert!(err.is_not_found());

    db.close().await;
}

#[actix_rt::test]
async fn server_errors_are_typed() {
    let (base_url, db) = spawn_server();
    let mut client = HttpClient::new(base_url).unwrap();

    client.register("hellas", "Arto Hellas", "salainen").await.unwrap();

    let err = client
        .register("hellas", "Someone Else", "salainen")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Unprocessable(ref msg) if msg.contains("unique")));

    let err = client
        .register("ab", "Too Short", "salainen")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Unprocessable(_)));

    let blog = NewBlog {
        title: "Anonymous".to_string(),
        url: "https://example.com".to_string(),
        ..Default::default()
    };
    let err = client.create_blog(&blog).await.unwrap_err();
    assert!(err.is_unauthorized());

    let err = client.login("hellas", "wrong").await.unwrap_err();
    assert!(err.is_unauthorized());
    assert!(client.token().is_none());

    client.login("hellas", "salainen").await.unwrap();
    let err = client
        .create_blog(&NewBlog {
            url: "https://example.com".to_string(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::BadRequest(ref msg) if msg == "title is required"));

    db.close().await;
}
