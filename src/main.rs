//! backend-kit demo service.
//!
//! ```text
//! Client Request
//!     → TraceLayer → TimeoutLayer
//!     → transaction ID (txID header, RequestContext)
//!     → request/response logging
//!     → panic recovery
//!     → QueryRouter
//!         GET /api/v1/items?page=<digits>[&size=<digits>][&search=..]
//!         GET /api/v1/ids[?count=N][&caps=true]
//! ```
//!
//! Configuration is read from the TOML file named by `BACKEND_KIT_CONFIG`,
//! falling back to defaults.

use tokio::net::TcpListener;

use backend_kit::config::load_from_env;
use backend_kit::observability::init_logging;
use backend_kit::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_from_env()?;
    let _log_handle = init_logging(&config.logging)?;

    tracing::info!(
        bind_address = %config.server.bind_address,
        request_timeout_secs = config.server.request_timeout_secs,
        "backend-kit v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    let listener = TcpListener::bind(&config.server.bind_address).await?;

    let server = HttpServer::new(config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
