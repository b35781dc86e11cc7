//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; application-level errors use
//! `kernel::error::AppError` and the identity crate's error types.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router, http,
    http::{Method, header},
};
use identity::domain::repository::SessionRepository;
use identity::infra::crypto::CryptoIdentityService;
use identity::{IdentityAuthConfig, IdentitySeed, PgIdentityRepository, SeedConfig, identity_router};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,identity=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let repo = PgIdentityRepository::new(pool.clone());

    // Startup cleanup: remove sessions with expired refresh tokens.
    // Errors here should not prevent server startup.
    match repo.cleanup_expired().await {
        Ok(sessions) => {
            tracing::info!(sessions_deleted = sessions, "Session cleanup completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Session cleanup failed, continuing anyway");
        }
    }

    // Auth configuration
    let auth_config = if cfg!(debug_assertions) {
        IdentityAuthConfig {
            url: env::var("AUTH_URL").unwrap_or_else(|_| "http://localhost:31114".to_string()),
            ..IdentityAuthConfig::development()
        }
    } else {
        // In production, the signing key must come from the environment
        IdentityAuthConfig {
            access_token_lifetime: env_seconds("ACCESS_TOKEN_LIFETIME", 3600),
            refresh_token_lifetime: env_seconds("REFRESH_TOKEN_LIFETIME", 30 * 24 * 3600),
            url: env::var("AUTH_URL").expect("AUTH_URL must be set in production"),
            crypto_key: env::var("CRYPTO_KEY").expect("CRYPTO_KEY must be set in production"),
        }
    };

    // Seed roles and the moderator test account when configured
    let crypto = Arc::new(CryptoIdentityService::new(Arc::new(auth_config.clone())));
    let seed = IdentitySeed::new(Arc::new(repo.clone()), Arc::new(repo.clone()), crypto);

    match (
        env::var("SEED_MODERATOR_EMAIL"),
        env::var("SEED_MODERATOR_PASSWORD"),
    ) {
        (Ok(moderator_email), Ok(moderator_password)) => {
            let seed_config = SeedConfig {
                moderator_email,
                moderator_password,
            };
            match seed.seed_data(&seed_config).await {
                Ok(()) => tracing::info!("Identity seeding completed"),
                Err(e) => tracing::warn!(error = %e, "Identity seeding failed, continuing anyway"),
            }
        }
        _ => {
            if let Err(e) = seed.seed_roles().await {
                tracing::warn!(error = %e, "Role seeding failed, continuing anyway");
            }
        }
    }

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:40922,http://127.0.0.1:40922".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest("/api/identity", identity_router(repo, auth_config))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], 31114));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn env_seconds(name: &str, default: u32) -> u32 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
