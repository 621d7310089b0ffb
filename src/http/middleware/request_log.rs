//! Request/response logging.
//!
//! # Responsibilities
//! - Log every request (URI, method, headers, body) before the handler runs
//! - Log the response (status, headers, body) and execution time after it
//! - Skip URIs that must never be logged (e.g. login)
//! - Record request metrics
//!
//! # Design Decisions
//! - Bodies are buffered so they can be logged and still be forwarded, so a
//!   buffered response reaches the client only once the handler finished it
//! - `text/event-stream` responses are never buffered; they are logged
//!   without a body and forwarded as they stream
//! - Events go through the context-aware logger, so they carry tx_id

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::config::RequestLogConfig;
use crate::observability::{logger, metrics};

/// Settings for [`log_request_response`].
#[derive(Debug, Clone, Default)]
pub struct RequestLogSettings {
    excluded_uris: Vec<String>,
}

impl RequestLogSettings {
    pub fn new(excluded_uris: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            excluded_uris: excluded_uris.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &RequestLogConfig) -> Self {
        Self::new(config.excluded_uris.iter().cloned())
    }

    /// True if `uri` contains any excluded fragment.
    pub fn is_excluded(&self, uri: &str) -> bool {
        self.excluded_uris.iter().any(|fragment| uri.contains(fragment.as_str()))
    }
}

#[derive(Debug, Serialize)]
struct LoggedRequest<'a> {
    uri: &'a str,
    method: &'a str,
    headers: BTreeMap<String, Vec<String>>,
    body: String,
}

#[derive(Debug, Serialize)]
struct LoggedResponse {
    status: u16,
    headers: BTreeMap<String, Vec<String>>,
    body: String,
}

fn header_map(headers: &HeaderMap) -> BTreeMap<String, Vec<String>> {
    let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in headers {
        map.entry(name.as_str().to_string())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    map
}

fn is_streaming(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("text/event-stream"))
}

fn internal_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
}

/// Middleware function logging each request and its response at debug level.
pub async fn log_request_response(
    State(settings): State<Arc<RequestLogSettings>>,
    req: Request,
    next: Next,
) -> Response {
    let uri = req.uri().to_string();
    if settings.is_excluded(&uri) {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().to_string();
    let (parts, body) = req.into_parts();

    let body = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            logger::error(&e, "could not read request body to log");
            return internal_error();
        }
    };

    let request_json = serde_json::to_string(&LoggedRequest {
        uri: &uri,
        method: &method,
        headers: header_map(&parts.headers),
        body: String::from_utf8_lossy(&body).into_owned(),
    })
    .unwrap_or_default();
    logger::debug(format_args!("New request: {request_json}"));

    let response = next.run(Request::from_parts(parts, Body::from(body))).await;

    if is_streaming(response.headers()) {
        let response_json = serde_json::to_string(&LoggedResponse {
            status: response.status().as_u16(),
            headers: header_map(response.headers()),
            body: String::new(),
        })
        .unwrap_or_default();
        logger::debug(format_args!(
            "Request streaming Request: {request_json} Response: {response_json} Execution took: {:?}",
            start.elapsed()
        ));
        metrics::record_request(&method, response.status().as_u16(), start);
        return response;
    }

    let (parts, body) = response.into_parts();

    let body = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            logger::error(&e, "could not read response body to log");
            metrics::record_request(&method, StatusCode::INTERNAL_SERVER_ERROR.as_u16(), start);
            return internal_error();
        }
    };

    let response_json = serde_json::to_string(&LoggedResponse {
        status: parts.status.as_u16(),
        headers: header_map(&parts.headers),
        body: String::from_utf8_lossy(&body).into_owned(),
    })
    .unwrap_or_default();

    logger::debug(format_args!(
        "Request finished Request: {request_json} Response: {response_json} Execution took: {:?}",
        start.elapsed()
    ));
    metrics::record_request(&method, parts.status.as_u16(), start);

    Response::from_parts(parts, Body::from(body))
}
