//! Routing error definitions.

use thiserror::Error;

/// Broad category of a routing failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Raised while registering routes; the route was not added.
    Configuration,
    /// Raised after a successful match when the target cannot be built.
    Resolution,
}

/// Errors that can occur while registering or dispatching routes.
#[derive(Debug, Error)]
pub enum RouteError {
    /// A required route argument was absent or empty.
    #[error("Route `{field}` is not set for template {template:?}")]
    MissingField {
        field: &'static str,
        template: String,
    },

    /// The compiled expression was rejected by the regex engine.
    #[error("Route {route:?} template {template:?} is not a valid regex {expression:?}: {source}")]
    InvalidPattern {
        route: String,
        template: String,
        expression: String,
        #[source]
        source: regex::Error,
    },

    /// The target template references a parameter that is absent or empty.
    #[error("Named param not defined for {{{token}}}, index: {index} (route {route:?})")]
    UnresolvedParam {
        route: String,
        token: String,
        index: usize,
    },
}

impl RouteError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RouteError::MissingField { .. } | RouteError::InvalidPattern { .. } => {
                ErrorKind::Configuration
            }
            RouteError::UnresolvedParam { .. } => ErrorKind::Resolution,
        }
    }
}

/// Result type for routing operations.
pub type RouteResult<T> = Result<T, RouteError>;
