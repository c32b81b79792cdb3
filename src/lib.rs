pub mod auth;
pub mod config;
pub mod db;
pub mod directory;
pub mod errors;
pub mod http;
mod middleware;
pub mod models;
pub mod services;
pub mod state;

use axum::{Router, middleware as axum_middleware};
use sqlx::postgres::PgPoolOptions;
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::{
    auth::TokenVerifier,
    config::{Config, StorageBackend},
    db::{
        MemoryProfileStore, MemoryRatingStore, PgProfileStore, PgRatingStore, ProfileStore,
        RatingStore,
    },
    directory::{SeedDirectory, VenueDirectory},
    errors::AppError,
    middleware::{cors_layer, create_global_rate_limiter, rate_limit_middleware},
    services::{ProfileService, RatingService},
    state::AppState,
};

/// Wires services over the given stores and the built-in venue listing.
pub fn build_state(
    ratings: Arc<dyn RatingStore>,
    profiles: Arc<dyn ProfileStore>,
    config: &Config,
) -> AppState {
    let directory: Arc<dyn VenueDirectory> = Arc::new(SeedDirectory::default());

    AppState {
        ratings: RatingService::new(
            ratings,
            profiles.clone(),
            directory,
            config.store_timeout,
        ),
        profiles: ProfileService::new(profiles, config.store_timeout),
        tokens: Arc::new(TokenVerifier::new(&config.jwt_secret)),
    }
}

async fn connect_stores(
    config: &Config,
) -> Result<(Arc<dyn RatingStore>, Arc<dyn ProfileStore>), AppError> {
    match config.storage_backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, ratings will not survive a restart");
            Ok((
                Arc::new(MemoryRatingStore::new()),
                Arc::new(MemoryProfileStore::new()),
            ))
        }
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or_else(|| AppError::EnvError("DATABASE_URL must be set".into()))?;

            let postgres = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .acquire_timeout(config.store_timeout)
                .connect(database_url)
                .await
                .map_err(|e| AppError::Storage(format!("Failed to connect to Postgres: {}", e)))?;

            sqlx::migrate!("./migrations")
                .run(&postgres)
                .await
                .map_err(|e| AppError::Storage(format!("Failed to run migrations: {}", e)))?;

            Ok((
                Arc::new(PgRatingStore::new(postgres.clone())),
                Arc::new(PgProfileStore::new(postgres)),
            ))
        }
    }
}

pub async fn start_server() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load()?;
    tracing::info!("Starting with {} storage", config.storage_backend);

    let (ratings, profiles) = connect_stores(&config).await?;
    let state = build_state(ratings, profiles, &config);

    let global_rate_limiter = create_global_rate_limiter();

    let app = Router::new()
        .merge(http::create_http_routes(state))
        .layer(axum_middleware::from_fn(move |req, next| {
            rate_limit_middleware(global_rate_limiter.clone(), req, next)
        }))
        .layer(cors_layer(&config.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .fallback(|| async { "404 Not Found" });

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .map_err(|e| AppError::EnvError(format!("Failed to bind port {}: {}", config.port, e)))?;

    tracing::info!("Coffee ratings server running at http://0.0.0.0:{}", config.port);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| AppError::EnvError(format!("Server error: {}", e)))
}
