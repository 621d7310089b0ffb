//! Typed extraction of request parameters.
//!
//! # Responsibilities
//! - Look up the first value for a key in the common parameter containers
//! - Convert it to the requested type, including separated lists
//!
//! # Design Decisions
//! - Missing and unconvertible values are distinct errors
//! - `bool` accepts `true/t/1` and `false/f/0`, case-insensitive
//! - An empty list separator splits into single characters
//! - As a handler rejection, either error answers 400 with its message

use std::collections::HashMap;
use std::hash::BuildHasher;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use uuid::Uuid;

use crate::routing::QueryVars;

/// Errors raised while extracting a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    #[error("missing parameter: cannot find key: {key}")]
    NotFound { key: String },

    #[error("failed to convert to requested type {target}: {value}: {reason}")]
    Conversion {
        target: &'static str,
        value: String,
        reason: String,
    },
}

impl ParamError {
    fn conversion(target: &'static str, value: &str, reason: impl ToString) -> Self {
        ParamError::Conversion {
            target,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl IntoResponse for ParamError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}

/// A container of named request parameters.
pub trait ParamSource {
    /// First value stored under `key`.
    fn lookup(&self, key: &str) -> Option<&str>;
}

impl<S: BuildHasher> ParamSource for HashMap<String, String, S> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl<S: BuildHasher> ParamSource for HashMap<String, Vec<String>, S> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|values| values.first()).map(String::as_str)
    }
}

impl ParamSource for [(String, String)] {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }
}

impl ParamSource for Vec<(String, String)> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.as_slice().lookup(key)
    }
}

impl ParamSource for QueryVars {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key)
    }
}

/// Conversion from a raw parameter value.
pub trait FromParam: Sized {
    fn from_param(raw: &str, separator: &str) -> Result<Self, ParamError>;
}

/// Types allowed as elements of a separated list parameter.
pub trait ListItem: FromParam {}

macro_rules! impl_parse_param {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromParam for $ty {
                fn from_param(raw: &str, _separator: &str) -> Result<Self, ParamError> {
                    raw.parse::<$ty>()
                        .map_err(|e| ParamError::conversion(stringify!($ty), raw, e))
                }
            }

            impl ListItem for $ty {}
        )*
    };
}

impl_parse_param!(i32, i64, isize, u32, u64, usize, f32, f64);

impl FromParam for String {
    fn from_param(raw: &str, _separator: &str) -> Result<Self, ParamError> {
        Ok(raw.to_string())
    }
}

impl ListItem for String {}

impl FromParam for bool {
    fn from_param(raw: &str, _separator: &str) -> Result<Self, ParamError> {
        match raw.to_uppercase().as_str() {
            "TRUE" | "T" | "1" => Ok(true),
            "FALSE" | "F" | "0" => Ok(false),
            _ => Err(ParamError::conversion(
                "bool",
                raw,
                "not true/t/1/false/f/0 (case insensitive)",
            )),
        }
    }
}

impl FromParam for Uuid {
    fn from_param(raw: &str, _separator: &str) -> Result<Self, ParamError> {
        Uuid::parse_str(raw).map_err(|e| ParamError::conversion("uuid", raw, e))
    }
}

impl ListItem for Uuid {}

impl<T: ListItem> FromParam for Vec<T> {
    fn from_param(raw: &str, separator: &str) -> Result<Self, ParamError> {
        split(raw, separator)
            .into_iter()
            .map(|item| T::from_param(item, separator))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ParamError::conversion(std::any::type_name::<Self>(), raw, e))
    }
}

fn split<'a>(raw: &'a str, separator: &str) -> Vec<&'a str> {
    if separator.is_empty() {
        raw.char_indices()
            .map(|(i, c)| &raw[i..i + c.len_utf8()])
            .collect()
    } else {
        raw.split(separator).collect()
    }
}

/// Fetch `key` from `params` and convert it to `T`.
///
/// `separator` is only used by list targets.
pub fn get_param<T, P>(params: &P, key: &str, separator: &str) -> Result<T, ParamError>
where
    T: FromParam,
    P: ParamSource + ?Sized,
{
    let raw = params.lookup(key).ok_or_else(|| ParamError::NotFound {
        key: key.to_string(),
    })?;
    T::from_param(raw, separator)
}

/// Like [`get_param`], falling back to `default` on any error.
pub fn get_param_or<T, P>(params: &P, key: &str, separator: &str, default: T) -> T
where
    T: FromParam,
    P: ParamSource + ?Sized,
{
    get_param(params, key, separator).unwrap_or(default)
}

/// Like [`get_param`], but a missing key is `Ok(None)`.
///
/// Conversion failures are still reported.
pub fn get_optional_param<T, P>(params: &P, key: &str, separator: &str) -> Result<Option<T>, ParamError>
where
    T: FromParam,
    P: ParamSource + ?Sized,
{
    match get_param(params, key, separator) {
        Ok(value) => Ok(Some(value)),
        Err(ParamError::NotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}
