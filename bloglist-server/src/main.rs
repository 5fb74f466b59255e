use anyhow::Context;
use bloglist_server::data::{PostgresBlogRepository, PostgresUserRepository};
use bloglist_server::infrastructure::{
    database::{create_pool, run_migrations},
    logging::{init_logging, DEFAULT_DIRECTIVES},
    AppConfig, JwtService,
};
use bloglist_server::presentation::http_handlers;
use bloglist_server::{configure_app, AppState};
use dotenvy::dotenv;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    init_logging(DEFAULT_DIRECTIVES)?;

    let config = AppConfig::from_env().context("invalid configuration")?;

    tracing::info!("Starting bloglist server...");
    tracing::debug!("Configuration: {:?}", config);

    tracing::info!("Connecting to database...");
    let pool = create_pool(&config).await?;

    tracing::info!("Running database migrations...");
    run_migrations(&pool).await?;

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt_secret,
        chrono::Duration::hours(config.token_ttl_hours),
    )?);

    let user_repo = Arc::new(PostgresUserRepository::new(pool.clone()));
    let blog_repo = Arc::new(PostgresBlogRepository::new(pool));

    let state = AppState::new(user_repo, blog_repo, jwt_service);

    tracing::info!("Services initialized successfully");

    run_http_server(&config, state).await?;

    tracing::info!("Shutting down...");
    Ok(())
}

/// Configure CORS for the HTTP server with the configured origins
fn configure_cors(allowed_origins: &[String]) -> actix_cors::Cors {
    use actix_cors::Cors;
    use actix_web::http::header;

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .max_age(3600);

    for origin in allowed_origins {
        cors = cors.allowed_origin(origin);
        tracing::debug!("Added allowed CORS origin: {}", origin);
    }

    cors
}

async fn run_http_server(config: &AppConfig, state: AppState) -> anyhow::Result<()> {
    use actix_web::{middleware::Logger, web, App, HttpServer};

    let addr = config.http_addr();
    let origins = config.cors_allowed_origins.clone();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(configure_cors(&origins))
            .configure(configure_app(state.clone()))
            .default_service(web::to(http_handlers::unknown_endpoint))
    })
    .bind(&addr)
    .with_context(|| format!("failed to bind {}", addr))?
    .run();

    tracing::info!("HTTP server running on {}", addr);

    server.await?;

    Ok(())
}
