//! axum adapter that matches routes on query parameters.
//!
//! # Responsibilities
//! - Act as the [`Registrar`] for [`MethodRouter`] handlers
//! - Group variants by path, keeping registration order
//! - Dispatch each request to the first variant it satisfies
//!
//! # Design Decisions
//! - Empty method list = any method
//! - Path known but no variant for the method → 405, otherwise → 404
//! - Matched values are inserted as a `QueryVars` extension

use std::sync::Arc;

use axum::{
    extract::Request,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, MethodRouter},
    Router,
};
use thiserror::Error;
use tower::ServiceExt;

use crate::routing::matcher::{capture_all, query_pairs, QueryCondition};
use crate::routing::registrar::{Registrar, RouteRegistration};

/// Errors raised while compiling a registration.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("invalid pattern for query parameter '{name}' on {path}: {source}")]
    InvalidPattern {
        path: String,
        name: String,
        #[source]
        source: regex::Error,
    },
}

#[derive(Clone)]
struct Variant {
    methods: Vec<Method>,
    conditions: Vec<QueryCondition>,
    handler: MethodRouter,
}

impl Variant {
    fn allows(&self, method: &Method) -> bool {
        self.methods.is_empty() || self.methods.contains(method)
    }
}

/// Collects query-aware registrations and builds an axum [`Router`].
#[derive(Default)]
pub struct QueryRouter {
    paths: Vec<(String, Vec<Variant>)>,
}

impl QueryRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered variants across all paths.
    pub fn len(&self) -> usize {
        self.paths.iter().map(|(_, variants)| variants.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Build the axum router; one axum route per distinct path.
    pub fn into_router(self) -> Router {
        self.paths
            .into_iter()
            .fold(Router::new(), |router, (path, variants)| {
                let variants: Arc<[Variant]> = variants.into();
                router.route(
                    &path,
                    any(move |req: Request| {
                        let variants = Arc::clone(&variants);
                        async move { dispatch(&variants, req).await }
                    }),
                )
            })
    }
}

impl Registrar<MethodRouter> for QueryRouter {
    type Error = RouteError;

    fn register(&mut self, registration: &RouteRegistration, handler: MethodRouter) -> Result<(), RouteError> {
        let conditions = registration
            .queries
            .iter()
            .map(|matcher| {
                QueryCondition::compile(matcher).map_err(|source| RouteError::InvalidPattern {
                    path: registration.path.clone(),
                    name: matcher.name.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let variant = Variant {
            methods: registration.methods.clone(),
            conditions,
            handler,
        };

        match self.paths.iter_mut().find(|(path, _)| *path == registration.path) {
            Some((_, variants)) => variants.push(variant),
            None => self.paths.push((registration.path.clone(), vec![variant])),
        }

        Ok(())
    }
}

async fn dispatch(variants: &[Variant], mut req: Request) -> Response {
    let query = query_pairs(req.uri());
    let mut method_allowed = false;

    for variant in variants {
        if !variant.allows(req.method()) {
            continue;
        }
        method_allowed = true;

        if let Some(vars) = capture_all(&variant.conditions, &query) {
            req.extensions_mut().insert(vars);
            return match variant.handler.clone().oneshot(req).await {
                Ok(response) => response,
                Err(never) => match never {},
            };
        }
    }

    if method_allowed {
        StatusCode::NOT_FOUND.into_response()
    } else {
        StatusCode::METHOD_NOT_ALLOWED.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{QueryVars, RouteBuilder};
    use axum::{body::Body, Extension};

    async fn echo(Extension(vars): Extension<QueryVars>) -> String {
        let mut keys: Vec<_> = vars.0.iter().map(|(k, v)| format!("{k}={v}")).collect();
        keys.sort();
        keys.join("&")
    }

    fn items_router() -> Router {
        let mut router = QueryRouter::new();
        let count = RouteBuilder::new("/items", any(echo))
            .methods([Method::GET])
            .query("page", r"\d+", false)
            .query("size", r"\d+", true)
            .query("search", "", true)
            .create(&mut router)
            .unwrap();
        assert_eq!(count, 4);
        assert_eq!(router.len(), 4);
        router.into_router()
    }

    async fn call(router: Router, method: Method, uri: &str) -> (StatusCode, String) {
        let req = axum::http::Request::builder().method(method).uri(uri).body(Body::empty()).unwrap();
        let response = router.oneshot(req).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_most_specific_variant_wins() {
        let (status, body) = call(items_router(), Method::GET, "/items?page=1&size=20&search=abc").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "page=1&search=abc&size=20");
    }

    #[tokio::test]
    async fn test_invalid_optional_falls_back() {
        let (status, body) = call(items_router(), Method::GET, "/items?page=3&size=big").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "page=3");
    }

    #[tokio::test]
    async fn test_missing_mandatory_is_not_found() {
        let (status, _) = call(items_router(), Method::GET, "/items?size=20").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = call(items_router(), Method::GET, "/items?page=one").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_wrong_method() {
        let (status, _) = call(items_router(), Method::DELETE, "/items?page=1").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_unknown_path() {
        let (status, _) = call(items_router(), Method::GET, "/other?page=1").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let mut router = QueryRouter::new();
        let err = RouteBuilder::new("/items", any(echo))
            .query("page", "([", false)
            .create(&mut router)
            .unwrap_err();

        assert!(matches!(err, RouteError::InvalidPattern { ref name, .. } if name == "page"));
        assert!(router.is_empty());
    }
}
