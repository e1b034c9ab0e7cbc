//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Required route fields, non-empty templates
//! - Shortcut names usable as `$name` references
//! - Log level and base prefix sanity
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: DispatchConfig → Result<(), Vec<ValidationError>>
//! - Regex validity is left to route compilation

use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::config::schema::DispatchConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route #{index} ({template:?}) is missing `{field}`")]
    MissingRouteField {
        index: usize,
        template: String,
        field: &'static str,
    },

    #[error("route #{index} has an empty template")]
    EmptyTemplate { index: usize },

    #[error("shortcut name {0:?} must consist of letters, digits and underscores")]
    InvalidShortcutName(String),

    #[error("unknown log level {0:?}")]
    InvalidLogLevel(String),

    #[error("base prefix {0:?} must start with '/'")]
    InvalidBasePrefix(String),
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &DispatchConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Some(prefix) = &config.base_prefix {
        if !prefix.starts_with('/') {
            errors.push(ValidationError::InvalidBasePrefix(prefix.clone()));
        }
    }

    if !is_valid_level(&config.logging.level) {
        errors.push(ValidationError::InvalidLogLevel(config.logging.level.clone()));
    }

    for name in config.shortcuts.keys() {
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            errors.push(ValidationError::InvalidShortcutName(name.clone()));
        }
    }

    for (index, route) in config.routes.iter().enumerate() {
        if route.template.is_empty() {
            errors.push(ValidationError::EmptyTemplate { index });
        }
        for (field, value) in [("name", &route.name), ("target", &route.target)] {
            if value.as_deref().map_or(true, str::is_empty) {
                errors.push(ValidationError::MissingRouteField {
                    index,
                    template: route.template.clone(),
                    field,
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Accepts a bare level ("debug") or an `EnvFilter` directive list
/// ("path_dispatch=debug,warn") whose levels are all known.
fn is_valid_level(level: &str) -> bool {
    level.split(',').all(|directive| {
        let level = directive.rsplit('=').next().unwrap_or(directive).trim();
        level.parse::<LevelFilter>().is_ok()
    })
}
