//! `chapel serve`: run the web server in the foreground.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::error::WebResult;
use crate::routes;
use crate::shutdown::Shutdown;
use crate::state::AppState;

/// Serves the site on `addr` until SIGTERM/SIGINT.
pub async fn run(state: Arc<AppState>, addr: SocketAddr) -> WebResult<()> {
    let shutdown = Shutdown::new();
    shutdown.spawn_listener();

    let listener = TcpListener::bind(addr).await?;
    info!(
        addr = %listener.local_addr()?,
        site = %state.site_name,
        revalidate_secs = state.revalidate_secs,
        "chapel web server listening"
    );

    let app = routes::router(state);
    let signal = shutdown.signal();
    axum::serve(listener, app)
        .with_graceful_shutdown(signal.wait())
        .await?;

    info!("server stopped");
    Ok(())
}
