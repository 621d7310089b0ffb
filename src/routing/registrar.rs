//! Combinatorial registration of routes with optional query parameters.
//!
//! A router that matches query parameters only when present needs one route
//! per combination of optional parameters. Declaring
//!
//! ```text
//! RouteBuilder::new("/api/v1/something", handler)
//!     .methods([Method::GET])
//!     .query("page", r"\d+", true)
//!     .query("size", r"\d+", true)
//!     .query("search", "", true)
//!     .create(&mut router)
//! ```
//!
//! registers all eight variants, most specific first.

use std::fmt;

use axum::http::Method;
use itertools::Itertools;

use crate::observability::LogSink;
use crate::routing::matcher::QueryMatcher;

/// Declarative description of one logical endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteSpec {
    pub path: String,
    pub methods: Vec<Method>,
    /// Insertion ordered; names are unique.
    pub queries: Vec<QueryMatcher>,
}

impl RouteSpec {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Add a matcher, replacing any existing one with the same name in place.
    pub fn add_query(&mut self, matcher: QueryMatcher) {
        match self.queries.iter_mut().find(|q| q.name == matcher.name) {
            Some(existing) => *existing = matcher,
            None => self.queries.push(matcher),
        }
    }
}

/// One concrete route to hand to the underlying router.
///
/// Every matcher listed here is required for this registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRegistration {
    pub path: String,
    pub methods: Vec<Method>,
    pub queries: Vec<QueryMatcher>,
}

impl RouteRegistration {
    pub fn query_names(&self) -> Vec<&str> {
        self.queries.iter().map(|q| q.name.as_str()).collect()
    }
}

impl fmt::Display for RouteRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let methods = self.methods.iter().map(Method::as_str).join(" ");
        let queries = self
            .queries
            .iter()
            .map(|q| format!("{} {}", q.name, q.template()))
            .join(" ");
        write!(
            f,
            "{} with methods: [{}] and query parameters: [{}]",
            self.path, methods, queries
        )
    }
}

/// Expand a spec into its registrations.
///
/// Mandatory matchers appear in every registration, first and in
/// insertion order. Each non-empty subset of the optional matchers follows,
/// largest subsets first, and the mandatory-only registration comes last.
pub fn finalize(spec: &RouteSpec) -> Vec<RouteRegistration> {
    let (optional, mandatory): (Vec<&QueryMatcher>, Vec<&QueryMatcher>) =
        spec.queries.iter().partition(|q| q.optional);

    let registration = |extra: &[&QueryMatcher]| RouteRegistration {
        path: spec.path.clone(),
        methods: spec.methods.clone(),
        queries: mandatory
            .iter()
            .chain(extra.iter())
            .map(|q| (*q).clone())
            .collect(),
    };

    let mut registrations = Vec::with_capacity(1 << optional.len().min(16));
    for size in (1..=optional.len()).rev() {
        for subset in optional.iter().copied().combinations(size) {
            registrations.push(registration(&subset));
        }
    }
    registrations.push(registration(&[]));

    registrations
}

/// The underlying router: registers one handler for a path, method set
/// and required query matchers.
pub trait Registrar<H> {
    type Error;

    fn register(&mut self, registration: &RouteRegistration, handler: H) -> Result<(), Self::Error>;
}

/// Register every variant of `spec` with `registrar`, in [`finalize`] order.
///
/// Returns the number of routes registered. Errors come only from the
/// registrar itself.
pub fn create<H, R>(
    spec: &RouteSpec,
    handler: H,
    registrar: &mut R,
    logger: Option<&dyn LogSink>,
) -> Result<usize, R::Error>
where
    H: Clone,
    R: Registrar<H>,
{
    let registrations = finalize(spec);

    for registration in &registrations {
        registrar.register(registration, handler.clone())?;

        if let Some(logger) = logger {
            logger.log_line(&format!("Created endpoint {registration}"));
        }
    }

    Ok(registrations.len())
}

/// Fluent front end over [`RouteSpec`] and [`create`].
pub struct RouteBuilder<'a, H> {
    spec: RouteSpec,
    handler: H,
    logger: Option<&'a dyn LogSink>,
}

impl<'a, H: Clone> RouteBuilder<'a, H> {
    pub fn new(path: impl Into<String>, handler: H) -> Self {
        Self {
            spec: RouteSpec::new(path),
            handler,
            logger: None,
        }
    }

    /// Replace the allowed methods.
    pub fn methods(mut self, methods: impl IntoIterator<Item = Method>) -> Self {
        self.spec.methods = methods.into_iter().collect();
        self
    }

    /// Add a query matcher; an empty `pattern` accepts any value.
    pub fn query(mut self, name: impl Into<String>, pattern: &str, optional: bool) -> Self {
        self.spec.add_query(QueryMatcher::new(name, pattern, optional));
        self
    }

    /// Log one line per registered route.
    pub fn logger(mut self, logger: &'a dyn LogSink) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn spec(&self) -> &RouteSpec {
        &self.spec
    }

    /// Perform every registration.
    pub fn create<R: Registrar<H>>(self, registrar: &mut R) -> Result<usize, R::Error> {
        create(&self.spec, self.handler, registrar, self.logger)
    }
}
