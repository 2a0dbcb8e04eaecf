//! Request handling for closest common manager lookups.
//!
//! Requests carry an `employees` parameter with one or two comma separated
//! keys. A single key asks for that employee's manager. Responses are JSON
//! envelopes: `{"data": {"manager": "<key>"}}` on success, or
//! `{"error": {"message": "<text>"}}` with a bad request status otherwise.
//!
//! The transport is left to the caller: [`closest_common_manager`] returns the
//! status code and a serializable body.
//!
//! # Example
//!
//! ```
//! # use orgtree::{AllPairs, Node, OrgTree};
//! # use orgtree::service::{closest_common_manager, STATUS_OK};
//! let root = Node::with_children("CEO", [Node::new("Alice"), Node::new("Bob")]);
//! let finder = AllPairs::new(OrgTree::new(&root).unwrap());
//!
//! let reply = closest_common_manager(&finder, Some("Alice,Bob"));
//! assert_eq!(reply.status, STATUS_OK);
//! assert_eq!(reply.body.data.unwrap().manager, "CEO");
//! ```

use serde::Serialize;
use thiserror::Error;

use crate::{Finder, Key};

/// Name of the query parameter holding the employee keys.
pub const EMPLOYEES_PARAM: &str = "employees";

/// Status code of a successful lookup.
pub const STATUS_OK: u16 = 200;

/// Status code of a rejected lookup.
pub const STATUS_BAD_REQUEST: u16 = 400;

/// The employees named by a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Employees {
    /// A single employee, asking for their manager.
    One(String),
    /// Two employees, asking for their closest common manager.
    Two(String, String),
}

impl Employees {
    /// Returns the pair of keys to look up. A single employee is paired with
    /// themselves.
    pub fn pair(&self) -> (&str, &str) {
        match self {
            Employees::One(a) => (a, a),
            Employees::Two(a, b) => (a, b),
        }
    }
}

/// Error produced when a request cannot be answered.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum QueryError {
    /// The `employees` parameter is absent or empty.
    #[error("The `{param}` parameter is required and must contain 1 or 2 keys delimited by comma.", param = EMPLOYEES_PARAM)]
    Missing,
    /// The `employees` parameter names more than two employees.
    #[error("The `{param}` parameter must contain 1 or 2 keys delimited by comma.", param = EMPLOYEES_PARAM)]
    TooMany {
        /// Number of keys found.
        count: usize,
    },
    /// One of the comma separated keys is empty.
    #[error("The `{param}` parameter must not contain empty keys.", param = EMPLOYEES_PARAM)]
    EmptyKey,
    /// No common manager exists for the two employees.
    #[error("Couldn't find the lowest manager between `{0}` and `{1}`. Please, check that both employees exist.")]
    PairNotFound(String, String),
    /// No manager exists for the employee.
    #[error("Couldn't find the manager of `{0}`. Please, check that the employee exists.")]
    ManagerNotFound(String),
}

/// Parses the value of the `employees` parameter.
///
/// Keys are taken verbatim, without trimming.
///
/// # Errors
///
///  - When the parameter is absent or empty.
///  - When it has more than two keys.
///  - When a key is empty.
pub fn parse_employees(param: Option<&str>) -> Result<Employees, QueryError> {
    let param = match param {
        Some(param) if !param.is_empty() => param,
        _ => return Err(QueryError::Missing),
    };

    let keys: Vec<&str> = param.split(',').collect();
    if keys.iter().any(|key| key.is_empty()) {
        return Err(QueryError::EmptyKey);
    }
    match keys[..] {
        [a] => Ok(Employees::One(a.to_owned())),
        [a, b] => Ok(Employees::Two(a.to_owned(), b.to_owned())),
        _ => Err(QueryError::TooMany { count: keys.len() }),
    }
}

/// Looks up the closest common manager named by a request.
///
/// # Errors
///
/// When the request is malformed, or names an unknown employee.
pub fn lookup<'f>(finder: &'f impl Finder, param: Option<&str>) -> Result<&'f Key, QueryError> {
    let employees = parse_employees(param)?;
    let (a, b) = employees.pair();
    finder.find(a, b).ok_or_else(|| match employees {
        Employees::One(a) => QueryError::ManagerNotFound(a),
        Employees::Two(a, b) => QueryError::PairNotFound(a, b),
    })
}

/// Response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response<T> {
    /// Set when the request failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RespError>,
    /// Set when the request succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Response<T> {
    /// A successful response carrying `data`.
    pub fn success(data: T) -> Self {
        Self {
            error: None,
            data: Some(data),
        }
    }

    /// A failed response with a message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(RespError {
                message: message.into(),
            }),
            data: None,
        }
    }
}

/// Error part of a response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RespError {
    /// Human readable description of the failure.
    pub message: String,
}

/// Payload of a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManagerData {
    /// The closest common manager.
    pub manager: Key,
}

/// Status code and body answering a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: Response<ManagerData>,
}

/// Answers a closest common manager request.
///
/// `param` is the raw value of the [`EMPLOYEES_PARAM`] parameter, if present.
pub fn closest_common_manager(finder: &impl Finder, param: Option<&str>) -> Reply {
    match lookup(finder, param) {
        Ok(manager) => Reply {
            status: STATUS_OK,
            body: Response::success(ManagerData {
                manager: manager.clone(),
            }),
        },
        Err(err) => Reply {
            status: STATUS_BAD_REQUEST,
            body: Response::error(err.to_string()),
        },
    }
}
