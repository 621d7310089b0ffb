//! Transaction ID injection.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::InvalidHeaderName, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::config::TransactionConfig;
use crate::context::RequestContext;

/// Transaction ID of the current request, available as an extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionId(pub String);

impl TransactionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Settings for [`transaction_id_middleware`].
#[derive(Debug, Clone)]
pub struct TransactionSettings {
    header: HeaderName,
}

impl TransactionSettings {
    pub fn new(header: &str) -> Result<Self, InvalidHeaderName> {
        Ok(Self {
            header: HeaderName::try_from(header)?,
        })
    }

    pub fn from_config(config: &TransactionConfig) -> Result<Self, InvalidHeaderName> {
        Self::new(&config.header)
    }

    pub fn header(&self) -> &HeaderName {
        &self.header
    }
}

impl Default for TransactionSettings {
    fn default() -> Self {
        Self {
            header: HeaderName::from_static("txid"),
        }
    }
}

/// Ensure every request carries a transaction ID.
///
/// Reuses the configured header when present and non-empty, otherwise
/// generates a UUID v4 and adds it to the request headers. The rest of the
/// stack runs with the ID in the active [`RequestContext`].
pub async fn transaction_id_middleware(
    State(settings): State<Arc<TransactionSettings>>,
    mut req: Request,
    next: Next,
) -> Response {
    let existing = req
        .headers()
        .get(&settings.header)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    let tx_id = match existing {
        Some(tx_id) => tx_id,
        None => {
            let tx_id = Uuid::new_v4().to_string();
            if let Ok(value) = HeaderValue::from_str(&tx_id) {
                req.headers_mut().insert(settings.header.clone(), value);
            }
            tx_id
        }
    };

    req.extensions_mut().insert(TransactionId(tx_id.clone()));

    RequestContext::current()
        .with_tx_id(tx_id)
        .scope(next.run(req))
        .await
}
