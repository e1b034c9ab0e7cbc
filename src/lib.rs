//! URL path dispatcher library.
//!
//! Compiles declarative path templates (`/user/:uid`, `/user/{%d}`,
//! `/page/{about|contact}`, `$shortcut` fragments) into anchored regular
//! expressions and resolves request paths to a named route, its bound
//! parameters and a target identifier such as `/routes/user-$tab.php`.

pub mod config;
pub mod observability;
pub mod routing;

pub use config::schema::DispatchConfig;
pub use routing::{RouteArgs, RouteError, RouteMatch, Router, RouterBuilder, SharedRouter};
