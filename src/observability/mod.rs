//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing (compile, match, resolve) and config (load, reload) produce:
//!     → logging.rs (structured log events via tracing)
//!
//! Consumers:
//!     → stderr, filtered by RUST_LOG or the configured level
//! ```
//!
//! # Design Decisions
//! - Structured fields (route, path, pattern) rather than formatted strings
//! - Per-attempt match events at trace level only

pub mod logging;
