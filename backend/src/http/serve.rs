//! Serving with a bounded graceful shutdown.
//!
//! Once the shutdown future resolves the listener stops accepting, and
//! in-flight connections get `grace` to finish before serving is abandoned.

use std::future::Future;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{error, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
    #[error("server task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("graceful shutdown timed out after {0:?}")]
    ShutdownTimeout(Duration),
}

/// Serve `app` on `listener` until `shutdown` resolves, then drain.
///
/// Returns [`ServeError::ShutdownTimeout`] when connections are still open
/// after `grace`; the server task is aborted in that case.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    app: Router,
    shutdown: F,
    grace: Duration,
) -> Result<(), ServeError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (signalled_tx, signalled_rx) = oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown.await;
                let _ = signalled_tx.send(());
            })
            .await
    });

    tokio::select! {
        // Server stopped on its own (accept loop failure)
        result = &mut server => {
            result??;
            return Ok(());
        }
        Ok(()) = signalled_rx => {
            info!(grace_ms = grace.as_millis() as u64, "Shutdown requested, draining connections");
        }
    }

    match tokio::time::timeout(grace, &mut server).await {
        Ok(result) => {
            result??;
            info!("Server stopped");
            Ok(())
        }
        Err(_) => {
            warn!("In-flight requests did not finish in time");
            server.abort();
            Err(ServeError::ShutdownTimeout(grace))
        }
    }
}

/// Resolve when the process receives Ctrl+C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
