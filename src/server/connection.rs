// Connection handling module
// Accepts a single TCP connection and serves it on its own task

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::{TokioIo, TokioTimer};
use hyper_util::server::graceful::GracefulShutdown;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Decrements the active connection counter when the serving task ends
struct ConnectionGuard(Arc<AtomicUsize>);

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Accept and process a connection, enforcing `max_connections`.
///
/// The connection is registered with `graceful` so shutdown can wait for
/// its in-flight request to finish. `connection_timeout` bounds how long a
/// client may take to send request headers, idle keep-alive included; a
/// response body already streaming is never cut off.
pub fn accept_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    state: &Arc<AppState>,
    active: &Arc<AtomicUsize>,
    graceful: &GracefulShutdown,
) {
    // Increment first, then check the limit
    let prev_count = active.fetch_add(1, Ordering::SeqCst);
    let guard = ConnectionGuard(Arc::clone(active));

    if let Some(max_conn) = state.config.performance.max_connections {
        if prev_count >= usize::try_from(max_conn).unwrap_or(usize::MAX) {
            logger::log_warning(&format!(
                "Max connections reached: {prev_count}/{max_conn}. Connection from {peer_addr} rejected."
            ));
            return;
        }
    }

    logger::log_connection_accepted(&peer_addr);

    let perf = &state.config.performance;
    let mut builder = http1::Builder::new();
    builder
        .keep_alive(perf.keep_alive)
        .timer(TokioTimer::new())
        .header_read_timeout(header_timeout(perf.connection_timeout));

    let service_state = Arc::clone(state);
    let conn = builder.serve_connection(
        TokioIo::new(stream),
        service_fn(move |req| handler::handle_request(req, Arc::clone(&service_state), peer_addr)),
    );
    let conn = graceful.watch(conn);

    tokio::spawn(async move {
        let _guard = guard;
        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}

/// `0` disables the header read timeout
fn header_timeout(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
