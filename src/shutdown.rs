//! Graceful shutdown shared by both binaries.

use std::fmt;
use std::future::{pending, Future};

use tokio::signal;

/// What ended a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stop {
    Interrupt,
    Terminate,
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stop::Interrupt => write!(f, "interrupt"),
            Stop::Terminate => write!(f, "terminate"),
        }
    }
}

/// Resolves once the process receives Ctrl+C or SIGTERM.
pub async fn on_signal(service: &'static str) {
    let trigger = async {
        tokio::select! {
            stop = interrupt() => stop,
            stop = terminate() => stop,
        }
    };
    until(service, trigger).await;
}

/// Resolves with `trigger`, logging which service is draining.
pub async fn until<F>(service: &'static str, trigger: F) -> Stop
where
    F: Future<Output = Stop>,
{
    let stop = trigger.await;
    tracing::info!("{service}: {stop} received, draining open connections");
    stop
}

// A handler that cannot be installed leaves the other signal in charge
// instead of aborting the server.
async fn interrupt() -> Stop {
    if let Err(e) = signal::ctrl_c().await {
        tracing::warn!("Ctrl+C handler unavailable: {e}");
        pending::<()>().await;
    }
    Stop::Interrupt
}

#[cfg(unix)]
async fn terminate() -> Stop {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            tracing::warn!("SIGTERM handler unavailable: {e}");
            pending::<()>().await;
        }
    }
    Stop::Terminate
}

#[cfg(not(unix))]
async fn terminate() -> Stop {
    pending().await
}
