//! HTTP server setup.
//!
//! # Responsibilities
//! - Build the demo API with query-aware routes
//! - Wire up middleware (trace, timeout, transaction ID, request log, panic recovery)
//! - Bind to a listener and shut down gracefully on Ctrl+C

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Query,
    http::{header::InvalidHeaderName, Method, StatusCode},
    middleware::from_fn_with_state,
    response::{IntoResponse, Json},
    routing::get,
    Extension, Router,
};
use serde::Serialize;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{HidConfig, KitConfig};
use crate::hid::IdGenerator;
use crate::http::middleware::{
    log_request_response, recover_panic_layer, transaction_id_middleware, RequestLogSettings,
    TransactionSettings,
};
use crate::http::query::{get_optional_param, get_param, get_param_or, ParamError};
use crate::observability::{logger, LogLevel, NamedLogger};
use crate::routing::{QueryRouter, QueryVars, RouteBuilder, RouteError};

const DEFAULT_PAGE_SIZE: u32 = 20;
const MAX_IDS_PER_REQUEST: usize = 100;

/// Errors raised while building or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid transaction header: {0}")]
    TransactionHeader(#[from] InvalidHeaderName),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub ids: Arc<IdGenerator>,
    pub hid: HidConfig,
}

/// HTTP server for the demo API.
pub struct HttpServer {
    router: Router,
    config: KitConfig,
}

impl HttpServer {
    pub fn new(config: KitConfig) -> Result<Self, ServerError> {
        let state = AppState {
            ids: Arc::new(IdGenerator::new()),
            hid: config.hid.clone(),
        };

        let router = Self::build_router(&config, state)?;
        Ok(Self { router, config })
    }

    /// Routes plus the full middleware stack.
    fn build_router(config: &KitConfig, state: AppState) -> Result<Router, ServerError> {
        let route_logger = NamedLogger::new("routes", LogLevel::Debug);
        let mut routes = QueryRouter::new();

        RouteBuilder::new("/api/v1/items", get(list_items))
            .methods([Method::GET])
            .query("page", r"\d+", false)
            .query("size", r"\d+", true)
            .query("search", "", true)
            .logger(&route_logger)
            .create(&mut routes)?;

        RouteBuilder::new("/api/v1/ids", get(generate_ids))
            .methods([Method::GET])
            .logger(&route_logger)
            .create(&mut routes)?;

        let router = routes.into_router().layer(Extension(state));
        with_middleware(router, config)
    }

    /// The fully layered router; useful for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn config(&self) -> &KitConfig {
        &self.config
    }
}

/// Wrap `router` in the standard middleware stack.
///
/// Outermost first: trace, timeout, transaction ID, request log, panic
/// recovery. Request logging is skipped entirely when disabled.
pub fn with_middleware(router: Router, config: &KitConfig) -> Result<Router, ServerError> {
    let transaction = Arc::new(TransactionSettings::from_config(&config.transaction)?);

    let mut router = router.layer(recover_panic_layer());
    if config.request_log.enabled {
        let request_log = Arc::new(RequestLogSettings::from_config(&config.request_log));
        router = router.layer(from_fn_with_state(request_log, log_request_response));
    }

    Ok(router
        .layer(from_fn_with_state(transaction, transaction_id_middleware))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.server.request_timeout_secs),
        ))
        .layer(TraceLayer::new_for_http()))
}

#[derive(Debug, Serialize)]
struct ItemsPage {
    page: u32,
    size: u32,
    search: Option<String>,
}

// The route matcher only guarantees ASCII digits; the range is checked here.
async fn list_items(Extension(vars): Extension<QueryVars>) -> Result<Json<ItemsPage>, ParamError> {
    let page: u32 = get_param(&vars, "page", ",")?;
    let size: u32 = get_optional_param(&vars, "size", ",")?.unwrap_or(DEFAULT_PAGE_SIZE);
    let search = get_optional_param(&vars, "search", ",")?;

    logger::debug(format_args!("listing items page={page} size={size}"));
    Ok(Json(ItemsPage { page, size, search }))
}

#[derive(Debug, Serialize)]
struct GeneratedIds {
    ids: Vec<String>,
}

async fn generate_ids(
    Extension(state): Extension<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let count = get_param_or(&params, "count", ",", 1usize).clamp(1, MAX_IDS_PER_REQUEST);
    let hid = HidConfig {
        include_uppercase: get_param_or(&params, "caps", ",", state.hid.include_uppercase),
        ..state.hid.clone()
    };

    let ids = (0..count).map(|_| state.ids.generate_with(&hid)).collect();
    Json(GeneratedIds { ids })
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        logger::error(&e, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
