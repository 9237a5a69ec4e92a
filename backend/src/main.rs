//! User directory entry-point: loads settings, prepares the user store and
//! serves the REST API.

mod server;

use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server, drain, shutdown_signal};
use user_directory::inbound::http::health::HealthState;
use user_directory::outbound::persistence::{DbPool, PoolConfig, apply_migrations};
use user_directory::settings::DirectorySettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = DirectorySettings::load_from_iter(std::env::args_os())
        .map_err(|err| io::Error::other(err.to_string()))?;
    let mut config = ServerConfig::new(settings.listen_addr().map_err(io::Error::other)?);

    if let Some(database_url) = settings.database_url() {
        apply_migrations(database_url)
            .await
            .map_err(io::Error::other)?;
        let pool = DbPool::new(
            PoolConfig::new(database_url).with_max_size(settings.pool_max_size),
        )
        .await
        .map_err(io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let handle = server.handle();
    actix_web::rt::spawn(async move {
        match shutdown_signal().await {
            Ok(()) => drain(&health_state, handle).await,
            Err(err) => warn!(error = %err, "shutdown signal handler unavailable"),
        }
    });
    server.await
}
