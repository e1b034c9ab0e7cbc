//! Shared fixtures for integration tests.

use path_dispatch::routing::{RouteArgs, Router, RouterBuilder};

/// Builder preloaded with the `digits` and `username` shortcuts.
pub fn builder_with_shortcuts() -> RouterBuilder {
    let mut builder = Router::builder();
    builder
        .add_shortcut("digits", r"(\d+)")
        .add_shortcut("username", "(?<username>[a-z]{1}[a-z0-9-]{2,10})");
    builder
}

/// Register `(template, name, target, params)` rows in order.
pub fn register(builder: &mut RouterBuilder, rows: &[(&str, &str, &str, &[&str])]) {
    for (template, name, target, params) in rows {
        builder
            .add_route(template, RouteArgs::new(*name, *target).params(params.iter().copied()))
            .unwrap();
    }
}

/// A user-profile style table exercising every token form.
#[allow(dead_code)]
pub fn profile_router() -> Router {
    let mut builder = builder_with_shortcuts();
    register(
        &mut builder,
        &[
            ("/user", "user", "/routes/user.php", &[]),
            ("/user/{%d}", "user", "/routes/user.php", &["uid"]),
            ("/user/{%d}/{followers|followees}", "user", "/routes/user-$tab.php", &["uid", "tab"]),
            ("/user/{login|logout|register}", "user", "/routes/user-$page.php", &["page"]),
            (
                "/user/$digits/message/$digits",
                "message",
                "/routes/user-message.php",
                &["uid", "mid"],
            ),
            ("/user/$username/{followers|followees}", "profile", "/routes/user-$tab.php", &["tab"]),
            ("/{403|404}", "error", "/routes/errors/$code.php", &["code"]),
        ],
    );
    builder.base_prefix("/router");
    builder.build()
}
