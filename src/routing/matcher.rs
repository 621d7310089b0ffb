//! Query parameter matching.
//!
//! # Responsibilities
//! - Describe a named query matcher and its `{name}` / `{name:pattern}` template
//! - Compile templates into anchored regular expressions
//! - Evaluate a set of conditions with AND semantics, capturing values
//!
//! # Design Decisions
//! - A pattern must match the whole value
//! - No pattern accepts any value, including an empty one, but the key must be present
//! - Only the first occurrence of a repeated key is considered
//! - Extra query parameters never prevent a match
//! - Classes are ASCII-only (`\d` is `[0-9]`); patterns that need Unicode
//!   (`.`, non-ASCII literals) compile with Unicode enabled

use std::collections::HashMap;

use axum::extract::Query;
use axum::http::Uri;
use regex::{Regex, RegexBuilder};

/// A named query parameter requirement as declared by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryMatcher {
    pub name: String,
    pub pattern: Option<String>,
    pub optional: bool,
}

impl QueryMatcher {
    /// An empty `pattern` means "any value".
    pub fn new(name: impl Into<String>, pattern: &str, optional: bool) -> Self {
        Self {
            name: name.into(),
            pattern: (!pattern.is_empty()).then(|| pattern.to_string()),
            optional,
        }
    }

    /// Router-style template: `{name}` or `{name:pattern}`.
    pub fn template(&self) -> String {
        match &self.pattern {
            Some(pattern) => format!("{{{}:{}}}", self.name, pattern),
            None => format!("{{{}}}", self.name),
        }
    }
}

/// A compiled query condition.
#[derive(Debug, Clone)]
pub struct QueryCondition {
    name: String,
    regex: Option<Regex>,
}

impl QueryCondition {
    pub fn compile(matcher: &QueryMatcher) -> Result<Self, regex::Error> {
        let regex = matcher
            .pattern
            .as_deref()
            .map(|pattern| compile_anchored(&format!("^(?:{pattern})$")))
            .transpose()?;

        Ok(Self {
            name: matcher.name.clone(),
            regex,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The matching value of this parameter, if present and valid.
    pub fn capture<'q>(&self, query: &'q [(String, String)]) -> Option<&'q str> {
        let (_, value) = query.iter().find(|(key, _)| *key == self.name)?;
        match &self.regex {
            Some(regex) if !regex.is_match(value) => None,
            _ => Some(value.as_str()),
        }
    }
}

fn compile_anchored(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .unicode(false)
        .build()
        .or_else(|_| Regex::new(pattern))
}

/// Capture every condition (AND semantics); `None` if any fails.
pub fn capture_all(conditions: &[QueryCondition], query: &[(String, String)]) -> Option<QueryVars> {
    conditions
        .iter()
        .map(|condition| {
            condition
                .capture(query)
                .map(|value| (condition.name.clone(), value.to_string()))
        })
        .collect::<Option<HashMap<_, _>>>()
        .map(QueryVars)
}

/// Decoded query pairs of a URI; an unparsable query yields no pairs.
pub fn query_pairs(uri: &Uri) -> Vec<(String, String)> {
    Query::<Vec<(String, String)>>::try_from_uri(uri)
        .map(|Query(pairs)| pairs)
        .unwrap_or_default()
}

/// Query values captured by the route variant that matched a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryVars(pub HashMap<String, String>);

impl QueryVars {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}
