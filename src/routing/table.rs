//! Ordered storage of compiled route variants.
//!
//! # Design Decisions
//! - Names keep first-registration order; variants keep registration order
//!   within their name. Together this is the matching priority.
//! - Variants are fully formed before insertion and never mutated afterwards

use indexmap::IndexMap;

use crate::routing::compiler::{CompiledPattern, PatternCompiler, PatternInfo};
use crate::routing::error::{RouteError, RouteResult};

/// Arguments accompanying a template at registration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteArgs {
    /// Route name, shared by alternative variants. Required.
    pub name: Option<String>,
    /// Target template with `$param` placeholders. Required.
    pub target: Option<String>,
    /// Parameter names by token position.
    pub params: Vec<String>,
}

impl RouteArgs {
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            target: Some(target.into()),
            params: Vec::new(),
        }
    }

    pub fn params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }
}

/// One compiled alternative of a named route.
#[derive(Debug, Clone)]
pub struct RouteVariant {
    name: String,
    target: String,
    params: Vec<String>,
    pattern: CompiledPattern,
}

impl RouteVariant {
    /// Validate `args` and compile `template` into a variant.
    pub fn compile(
        compiler: &PatternCompiler<'_>,
        template: &str,
        args: RouteArgs,
    ) -> RouteResult<Self> {
        let name = required(args.name, "name", template)?;
        let target = required(args.target, "target", template)?;

        let compiled = compiler.compile(&name, template, &args.params)?;

        Ok(Self {
            name,
            target,
            params: compiled.params,
            pattern: compiled.pattern,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unresolved target template.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Declared parameter names followed by discovered `:name` segments.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }
}

fn required(value: Option<String>, field: &'static str, template: &str) -> RouteResult<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| RouteError::MissingField {
            field,
            template: template.to_string(),
        })
}

/// Route name → variants, in registration order.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: IndexMap<String, Vec<RouteVariant>>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a variant after all previously registered variants of its name.
    pub fn insert(&mut self, variant: RouteVariant) {
        self.routes
            .entry(variant.name.clone())
            .or_default()
            .push(variant);
    }

    /// All variants in matching priority order.
    pub fn variants(&self) -> impl Iterator<Item = &RouteVariant> {
        self.routes.values().flatten()
    }

    /// Route names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    /// Number of variants across all names.
    pub fn len(&self) -> usize {
        self.routes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Source and expression of every variant, grouped by name.
    pub fn patterns(&self) -> IndexMap<String, Vec<PatternInfo>> {
        self.routes
            .iter()
            .map(|(name, variants)| {
                let infos = variants.iter().map(|v| v.pattern.info()).collect();
                (name.clone(), infos)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::shortcut::ShortcutRegistry;

    fn variant(template: &str, args: RouteArgs) -> RouteResult<RouteVariant> {
        let shortcuts = ShortcutRegistry::new();
        RouteVariant::compile(&PatternCompiler::new(&shortcuts), template, args)
    }

    #[test]
    fn test_missing_name() {
        let args = RouteArgs {
            target: Some("/routes/user.php".into()),
            ..Default::default()
        };
        let err = variant("/user", args).unwrap_err();
        assert!(matches!(err, RouteError::MissingField { field: "name", .. }));
    }

    #[test]
    fn test_missing_target() {
        let args = RouteArgs {
            name: Some("user".into()),
            target: Some(String::new()),
            ..Default::default()
        };
        let err = variant("/user", args).unwrap_err();
        assert!(matches!(err, RouteError::MissingField { field: "target", .. }));
    }

    #[test]
    fn test_registration_order() {
        let mut table = RouteTable::new();
        table.insert(variant("/user", RouteArgs::new("user", "/u.php")).unwrap());
        table.insert(variant("/{403|404}", RouteArgs::new("error", "/e.php")).unwrap());
        table.insert(variant("/user/:uid", RouteArgs::new("user", "/u.php")).unwrap());

        let sources: Vec<&str> = table.variants().map(|v| v.pattern().source()).collect();
        assert_eq!(sources, vec!["/user", "/user/:uid", "/{403|404}"]);
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["user", "error"]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.variants().filter(|v| v.name() == "user").count(), 2);
    }

    #[test]
    fn test_patterns_listing() {
        let mut table = RouteTable::new();
        let args = RouteArgs::new("user", "/u.php").params(["uid"]);
        table.insert(variant("/user/{%d}", args).unwrap());

        let patterns = table.patterns();
        assert_eq!(
            patterns["user"],
            vec![PatternInfo {
                source: "/user/{%d}".into(),
                regex: r"^/user/(?<uid>\d+)$".into(),
            }]
        );
    }
}
