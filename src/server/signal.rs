// Shutdown signal module
//
// Shutdown triggers:
// - ENTER on stdin (interactive sessions only)
// - SIGINT (Ctrl+C)
// - SIGTERM (Unix)

use std::fmt;
use std::future::pending;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::logger;

/// What ended the serving loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    Enter,
    Interrupt,
    Terminate,
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Enter => "ENTER pressed",
            Self::Interrupt => "SIGINT received",
            Self::Terminate => "SIGTERM received",
        })
    }
}

/// Resolve once the first shutdown trigger fires
///
/// When `watch_stdin` is false, or stdin reaches end of file, only signals
/// can stop the server.
pub async fn shutdown_signal(watch_stdin: bool) -> ShutdownReason {
    let reason = tokio::select! {
        () = enter_pressed(watch_stdin) => ShutdownReason::Enter,
        () = interrupt() => ShutdownReason::Interrupt,
        () = terminate() => ShutdownReason::Terminate,
    };
    logger::log_info(&format!("[Shutdown] {reason}, shutting down"));
    reason
}

async fn enter_pressed(watch_stdin: bool) {
    if !watch_stdin {
        return pending::<()>().await;
    }
    let mut line = String::new();
    match BufReader::new(tokio::io::stdin()).read_line(&mut line).await {
        Ok(n) if n > 0 => {}
        Ok(_) => pending::<()>().await,
        Err(e) => {
            logger::log_warning(&format!("Cannot read stdin: {e}"));
            pending::<()>().await;
        }
    }
}

async fn interrupt() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        logger::log_warning(&format!("Failed to listen for SIGINT: {e}"));
        pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            logger::log_warning(&format!("Failed to register SIGTERM handler: {e}"));
            pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    pending::<()>().await;
}
