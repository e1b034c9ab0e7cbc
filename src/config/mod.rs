//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → DispatchConfig (validated, immutable)
//!     → build_router() → Router
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads and compiles new routes
//!     → atomic swap inside SharedRouter
//!     → in-flight matches finish on the old table
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, load_router, parse_config, ConfigError};
pub use schema::DispatchConfig;
pub use schema::LoggingConfig;
pub use schema::RouteDefinition;
