use std::collections::BTreeMap;
use std::future::Future;

use serde_json::Value;
use tokio::task::JoinHandle;

tokio::task_local! {
    static ACTIVE_CONTEXT: RequestContext;
}

/// Values carried alongside a request for log correlation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestContext {
    tx_id: Option<String>,
    identifier: Option<String>,
    log_info: Option<Value>,
    values: BTreeMap<String, String>,
}

impl RequestContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tx_id(mut self, tx_id: impl Into<String>) -> Self {
        self.tx_id = Some(tx_id.into());
        self
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn with_log_info(mut self, log_info: Value) -> Self {
        self.log_info = Some(log_info);
        self
    }

    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn tx_id(&self) -> Option<&str> {
        self.tx_id.as_deref()
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn log_info(&self) -> Option<&Value> {
        self.log_info.as_ref()
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// The context of the running task, or an empty one outside any scope.
    pub fn current() -> Self {
        ACTIVE_CONTEXT.try_with(Clone::clone).unwrap_or_default()
    }

    /// Run `fut` with this context active.
    pub async fn scope<F: Future>(self, fut: F) -> F::Output {
        ACTIVE_CONTEXT.scope(self, fut).await
    }

    /// Run a synchronous closure with this context active.
    pub fn in_scope<R>(self, f: impl FnOnce() -> R) -> R {
        ACTIVE_CONTEXT.sync_scope(self, f)
    }
}

/// Build a detached context holding the source's transaction ID and the
/// listed keys that are present in the source.
pub fn copy(source: &RequestContext, keys: &[&str]) -> RequestContext {
    let mut ctx = RequestContext::new();
    ctx.tx_id = source.tx_id.clone();

    for key in keys {
        if let Some(value) = source.values.get(*key) {
            ctx.values.insert((*key).to_string(), value.clone());
        }
    }

    ctx
}

/// Spawn `fut` on the runtime under a copy of the current context.
pub fn spawn_detached<F>(keys: &[&str], fut: F) -> JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    let ctx = copy(&RequestContext::current(), keys);
    tokio::spawn(ctx.scope(fut))
}
