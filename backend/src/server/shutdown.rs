//! Graceful shutdown: fail the health probes, then let in-flight requests finish.

use std::io;

use actix_web::dev::ServerHandle;
use tokio::signal;
use tracing::info;

use user_directory::inbound::http::health::HealthState;

/// Wait for Ctrl-C, or SIGTERM on Unix.
///
/// # Errors
/// Returns [`io::Error`] when a signal handler cannot be installed.
pub async fn shutdown_signal() -> io::Result<()> {
    #[cfg(unix)]
    {
        let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())?;
        tokio::select! {
            result = signal::ctrl_c() => {
                result?;
                info!("received Ctrl+C, draining");
            }
            _ = terminate.recv() => info!("received SIGTERM, draining"),
        }
    }

    #[cfg(not(unix))]
    {
        signal::ctrl_c().await?;
        info!("received Ctrl+C, draining");
    }

    Ok(())
}

/// Take the directory out of rotation and stop the server gracefully.
pub async fn drain(health_state: &HealthState, handle: ServerHandle) {
    health_state.mark_unhealthy();
    handle.stop(true).await;
    info!("user directory stopped");
}
