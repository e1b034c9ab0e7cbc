//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (configuration phase):
//!     shortcut.rs (named regex fragments)
//!     template + RouteArgs
//!     → compiler.rs (template → anchored, case-insensitive regex)
//!     → table.rs (ordered name → variants)
//!     → router.rs build() → immutable Router
//!
//! Dispatch:
//!     raw URI
//!     → request.rs (decode, drop query, trim, strip base prefix)
//!     → matcher.rs (first variant whose regex matches)
//!     → binder.rs (captures → naturally ordered params)
//!     → resolver.rs (target template → resolved target)
//!     → Return: RouteMatch, no match, or resolution error
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: same input always matches same route
//! - First match wins (names in registration order, then variants)

pub mod binder;
pub mod compiler;
pub mod error;
pub mod matcher;
pub mod request;
pub mod resolver;
pub mod router;
pub mod shortcut;
pub mod table;

pub use binder::Params;
pub use compiler::{CompiledPattern, PatternCompiler, PatternInfo};
pub use error::{ErrorKind, RouteError, RouteResult};
pub use request::RequestPath;
pub use router::{RouteMatch, Router, RouterBuilder, SharedRouter};
pub use shortcut::ShortcutRegistry;
pub use table::{RouteArgs, RouteTable, RouteVariant};
