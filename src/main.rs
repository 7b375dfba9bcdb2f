// src/main.rs

use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use neoquiz::{
    config::Config,
    queue::RedisJobQueue,
    repositories::{PgQuizRepository, PgUserRepository},
    routes,
    state::AppState,
};
use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment (and .env, if present)
    let config = Config::from_env()?;

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    let pool = connect_database(&config).await?;
    tracing::info!("Database connected...");

    // Run Migrations Automatically
    tracing::info!("Running migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Migrations applied successfully.");

    let queue = RedisJobQueue::connect(&config.redis_url, config.job_queue.clone())
        .await
        .with_context(|| format!("Failed to connect to Redis at {}", config.redis_url))?;
    if !queue.ping().await.unwrap_or(false) {
        tracing::warn!("Redis did not answer PING; job submission may fail");
    }

    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .with_context(|| format!("Failed to create {}", config.upload_dir.display()))?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    let state = AppState::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgQuizRepository::new(pool)),
        Arc::new(queue),
        config,
    );

    // Create the Axum application router
    let app = routes::create_router(state);

    tracing::info!("NeoQuiz listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    // Start the server
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Connects to Postgres, retrying while the database is still starting up.
async fn connect_database(config: &Config) -> anyhow::Result<PgPool> {
    let mut retry_count = 0;
    loop {
        match PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
        {
            Ok(pool) => return Ok(pool),
            Err(e) => {
                retry_count += 1;
                if retry_count > 5 {
                    return Err(e).context("Failed to connect to database after 5 retries");
                }
                tracing::warn!(
                    "Database not ready, retrying in 2s... (Attempt {})",
                    retry_count
                );
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
        }
    }
}
