//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! dispatcher. All types derive Serde traits for deserialization from config
//! files.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::routing::{RouteArgs, RouteResult, Router};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct DispatchConfig {
    /// Literal prefix stripped from request paths (e.g., "/router").
    pub base_prefix: Option<String>,

    /// Logging settings.
    pub logging: LoggingConfig,

    /// Shortcut fragments, referenced from templates as `$name`.
    pub shortcuts: IndexMap<String, String>,

    /// Route definitions, in matching priority order.
    pub routes: Vec<RouteDefinition>,
}

impl DispatchConfig {
    /// Register every shortcut, then every route in file order.
    pub fn build_router(&self) -> RouteResult<Router> {
        let mut builder = Router::builder();

        for (name, fragment) in &self.shortcuts {
            builder.add_shortcut(name.clone(), fragment.clone());
        }
        for route in &self.routes {
            builder.add_route(&route.template, route.args())?;
        }
        if let Some(prefix) = &self.base_prefix {
            builder.base_prefix(prefix.clone());
        }

        Ok(builder.build())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set (e.g., "info", "path_dispatch=debug").
    pub level: String,

    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Full,
        }
    }
}

/// Log line layout.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
}

/// One route variant as written in the config file.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RouteDefinition {
    /// Path template (e.g., "/user/{%d}").
    pub template: String,

    /// Route name; variants sharing a name are tried in file order.
    pub name: Option<String>,

    /// Target template with `$param` placeholders.
    pub target: Option<String>,

    /// Parameter names by token position.
    pub params: Vec<String>,
}

impl RouteDefinition {
    pub fn args(&self) -> RouteArgs {
        RouteArgs {
            name: self.name.clone(),
            target: self.target.clone(),
            params: self.params.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DispatchConfig::default();
        assert!(config.base_prefix.is_none());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Full);
        assert!(config.routes.is_empty());
    }

    #[test]
    fn test_build_router_registers_shortcuts_first() {
        let mut config = DispatchConfig::default();
        config.routes.push(RouteDefinition {
            template: "/user/$digits".into(),
            name: Some("user".into()),
            target: Some("/routes/user.php".into()),
            params: vec!["uid".into()],
        });
        config.shortcuts.insert("digits".into(), r"(\d+)".into());
        config.base_prefix = Some("/router".into());

        let router = config.build_router().unwrap();
        let m = router.dispatch("/router/user/15").unwrap().unwrap();
        assert_eq!(m.param("uid"), Some("15"));
    }
}
