//! Route registration and dispatch.
//!
//! # Responsibilities
//! - Collect shortcuts and route variants during a configuration phase
//! - Freeze them into an immutable [`Router`]
//! - Match a path, bind parameters and resolve the target
//!
//! # Design Decisions
//! - Immutable after `build()` (thread-safe without locks)
//! - Variants are compiled at registration against the shortcuts known at
//!   that moment; register shortcuts first
//! - Explicit no-match (`Ok(None)`) is distinct from an unresolvable target

use std::sync::Arc;

use arc_swap::ArcSwap;
use indexmap::IndexMap;
use serde::Serialize;

use crate::routing::binder::{self, Params};
use crate::routing::compiler::{PatternCompiler, PatternInfo};
use crate::routing::error::RouteResult;
use crate::routing::matcher;
use crate::routing::request::RequestPath;
use crate::routing::resolver;
use crate::routing::shortcut::ShortcutRegistry;
use crate::routing::table::{RouteArgs, RouteTable, RouteVariant};

/// Mutable configuration phase of a [`Router`].
#[derive(Debug, Default)]
pub struct RouterBuilder {
    shortcuts: ShortcutRegistry,
    table: RouteTable,
    base_prefix: Option<String>,
}

impl RouterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a `$name` shortcut for templates added after this call.
    pub fn add_shortcut(
        &mut self,
        name: impl Into<String>,
        fragment: impl Into<String>,
    ) -> &mut Self {
        self.shortcuts.register(name, fragment);
        self
    }

    /// Compile `template` and append it to the variants of `args.name`.
    ///
    /// Nothing is registered when this fails.
    pub fn add_route(&mut self, template: &str, args: RouteArgs) -> RouteResult<&mut Self> {
        let compiler = PatternCompiler::new(&self.shortcuts);
        let variant = RouteVariant::compile(&compiler, template, args)?;

        tracing::debug!(
            route = %variant.name(),
            template = %template,
            pattern = %variant.pattern().expression(),
            params = ?variant.params(),
            "Compiled route variant"
        );

        self.table.insert(variant);
        Ok(self)
    }

    /// Literal prefix removed from request URIs before matching.
    pub fn base_prefix(&mut self, prefix: impl Into<String>) -> &mut Self {
        self.base_prefix = Some(prefix.into());
        self
    }

    pub fn build(self) -> Router {
        tracing::info!(
            routes = self.table.names().count(),
            variants = self.table.len(),
            shortcuts = self.shortcuts.len(),
            "Route table built"
        );
        Router {
            table: self.table,
            base_prefix: self.base_prefix,
        }
    }
}

/// Immutable, shareable route table.
#[derive(Debug, Clone, Default)]
pub struct Router {
    table: RouteTable,
    base_prefix: Option<String>,
}

impl Router {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Match an already normalized path.
    pub fn match_path(&self, path: &str) -> RouteResult<Option<RouteMatch>> {
        let Some(hit) = matcher::first_match(&self.table, path, |_| {}) else {
            tracing::debug!(path = %path, "No route matched");
            return Ok(None);
        };

        let variant = hit.variant;
        let regex = variant.pattern().regex();
        let params = binder::bind(regex, &hit.captures, variant.params());

        let target = resolver::resolve(variant.name(), variant.target(), &params).map_err(|e| {
            tracing::warn!(path = %path, error = %e, "Matched route has unresolvable target");
            e
        })?;

        tracing::debug!(
            path = %path,
            route = %variant.name(),
            target = %target,
            "Route matched"
        );

        Ok(Some(RouteMatch {
            name: variant.name().to_string(),
            target,
            params,
            pattern: variant.pattern().info(),
        }))
    }

    /// Normalize a raw request URI, then match it.
    pub fn dispatch(&self, raw_uri: &str) -> RouteResult<Option<RouteMatch>> {
        let path = self.request_path(raw_uri);
        self.match_path(path.as_str())
    }

    /// Normalize a raw request URI using this router's base prefix.
    pub fn request_path(&self, raw_uri: &str) -> RequestPath {
        RequestPath::parse(raw_uri, self.base_prefix.as_deref())
    }

    /// Source and expression of every variant, grouped by route name.
    pub fn patterns(&self) -> IndexMap<String, Vec<PatternInfo>> {
        self.table.patterns()
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn base_prefix(&self) -> Option<&str> {
        self.base_prefix.as_deref()
    }
}

/// Outcome of a successful dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMatch {
    name: String,
    target: String,
    params: Params,
    pattern: PatternInfo,
}

impl RouteMatch {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Target with all placeholders substituted.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Bound parameters in natural key order.
    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn param_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.param(key).unwrap_or(default)
    }

    pub fn pattern(&self) -> &PatternInfo {
        &self.pattern
    }

    /// Template of the matched variant.
    pub fn source(&self) -> &str {
        &self.pattern.source
    }

    /// Compiled expression of the matched variant.
    pub fn expression(&self) -> &str {
        &self.pattern.regex
    }
}

/// Router handle whose table can be replaced while readers keep matching.
#[derive(Debug, Clone)]
pub struct SharedRouter {
    inner: Arc<ArcSwap<Router>>,
}

impl SharedRouter {
    pub fn new(router: Router) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(router)),
        }
    }

    /// Snapshot of the current router.
    pub fn load(&self) -> Arc<Router> {
        self.inner.load_full()
    }

    /// Atomically install a new router.
    pub fn replace(&self, router: Router) {
        tracing::info!(variants = router.table().len(), "Router replaced");
        self.inner.store(Arc::new(router));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::error::{ErrorKind, RouteError};

    fn user_router() -> Router {
        let mut builder = Router::builder();
        builder
            .add_route(
                "/user/{%d}/{followers|followees}",
                RouteArgs::new("user", "/routes/user-$tab.php").params(["uid", "tab"]),
            )
            .unwrap()
            .add_route("/user/:uid", RouteArgs::new("user", "/routes/user.php"))
            .unwrap()
            .add_route(
                "/{403|404}",
                RouteArgs::new("error", "/routes/errors/$code.php").params(["code"]),
            )
            .unwrap();
        builder.base_prefix("/router");
        builder.build()
    }

    #[test]
    fn test_match_binds_and_resolves() {
        let router = user_router();
        let m = router.match_path("/user/42/followers").unwrap().unwrap();

        assert_eq!(m.name(), "user");
        assert_eq!(m.target(), "/routes/user-followers.php");
        assert_eq!(m.param("uid"), Some("42"));
        assert_eq!(m.param("tab"), Some("followers"));
        assert_eq!(m.source(), "/user/{%d}/{followers|followees}");
    }

    #[test]
    fn test_named_segment() {
        let router = user_router();
        let m = router.match_path("/user/42").unwrap().unwrap();
        assert_eq!(m.param("uid"), Some("42"));
        assert_eq!(m.target(), "/routes/user.php");
        assert_eq!(m.params().len(), 1);
    }

    #[test]
    fn test_no_match_is_none() {
        let router = user_router();
        assert!(router.match_path("/nowhere").unwrap().is_none());
    }

    #[test]
    fn test_dispatch_normalizes() {
        let router = user_router();
        let m = router.dispatch("/router/403?from=home").unwrap().unwrap();
        assert_eq!(m.name(), "error");
        assert_eq!(m.target(), "/routes/errors/403.php");
    }

    #[test]
    fn test_unresolvable_target() {
        let mut builder = Router::builder();
        builder
            .add_route(
                "/user/{%d}",
                RouteArgs::new("user", "/routes/user-$tab.php").params(["uid"]),
            )
            .unwrap();
        let router = builder.build();

        let err = router.match_path("/user/1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Resolution);
    }

    #[test]
    fn test_failed_registration_adds_nothing() {
        let mut builder = Router::builder();
        let err = builder.add_route("/user", RouteArgs::default()).unwrap_err();
        assert!(matches!(err, RouteError::MissingField { field: "name", .. }));
        assert!(builder.build().table().is_empty());
    }

    #[test]
    fn test_shortcuts_apply_to_later_routes() {
        let mut builder = Router::builder();
        builder
            .add_route("/early/$digits", RouteArgs::new("early", "/e.php"))
            .unwrap();
        builder.add_shortcut("digits", r"(\d+)");
        builder
            .add_route("/late/$digits", RouteArgs::new("late", "/l.php"))
            .unwrap();
        let router = builder.build();

        let patterns = router.patterns();
        assert_eq!(patterns["early"][0].regex, "^/early/$digits$");
        assert_eq!(patterns["late"][0].regex, r"^/late/(\d+)$");
    }

    #[test]
    fn test_named_segment_mixed_with_short_declared_list() {
        // `:uid` takes token index 0, so the declared `tab` names no group
        let mut builder = Router::builder();
        builder
            .add_route(
                "/user/:uid/{followers|followees}",
                RouteArgs::new("user", "/routes/user.php").params(["tab"]),
            )
            .unwrap();
        let router = builder.build();

        let m = router.match_path("/user/42/followers").unwrap().unwrap();
        assert_eq!(m.param("uid"), Some("42"));
        assert_eq!(m.param("1"), Some("followers"));
        assert_eq!(m.param("tab"), None);
    }

    #[test]
    fn test_named_segment_with_positioned_declared_name() {
        let mut builder = Router::builder();
        builder
            .add_route(
                "/user/:uid/{followers|followees}",
                RouteArgs::new("user", "/routes/user-$tab.php").params(["", "tab"]),
            )
            .unwrap();
        let router = builder.build();

        let m = router.match_path("/user/42/followers").unwrap().unwrap();
        assert_eq!(m.param("uid"), Some("42"));
        assert_eq!(m.param("tab"), Some("followers"));
        assert_eq!(m.target(), "/routes/user-followers.php");
    }

    #[test]
    fn test_param_or_default() {
        let router = user_router();
        let m = router.match_path("/user/7").unwrap().unwrap();
        assert_eq!(m.param_or("tab", "profile"), "profile");
        assert_eq!(m.param_or("uid", "0"), "7");
    }

    #[test]
    fn test_shared_router_replace() {
        let shared = SharedRouter::new(Router::default());
        let before = shared.load();
        assert!(before.match_path("/user/1").unwrap().is_none());

        shared.replace(user_router());
        assert!(shared.load().match_path("/user/1").unwrap().is_some());
        // snapshots taken earlier keep the old table
        assert!(before.match_path("/user/1").unwrap().is_none());
    }

    #[test]
    fn test_router_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Router>();
        assert_send_sync::<SharedRouter>();
    }
}
