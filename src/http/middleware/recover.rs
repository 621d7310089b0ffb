//! Panic recovery.
//!
//! A panic in any inner service is caught, logged as an error with the
//! panic payload, and turned into a 500 response. The connection survives.

use std::any::Any;

use axum::http::{header, HeaderValue, Response, StatusCode};
use thiserror::Error;
use tower_http::catch_panic::CatchPanicLayer;

use crate::observability::logger;

/// Error logged when a panic is recovered.
#[derive(Debug, Error)]
#[error("caught panic stacktrace: {0}")]
pub struct RecoveredPanic(pub String);

pub type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response<String>;

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response<String> {
    let err = RecoveredPanic(panic_message(payload.as_ref()));
    logger::error(&err, "middleware recovering from panic error");

    let mut response = Response::new("Internal server error".to_string());
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}

/// Layer converting handler panics into logged 500 responses.
pub fn recover_panic_layer() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(handle_panic as PanicHandler)
}
