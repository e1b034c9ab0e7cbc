//! Target template resolution.
//!
//! Replaces `$name` placeholders in a route target (e.g.
//! `/routes/user-$tab.php`) with bound parameter values.

use std::sync::LazyLock;

use regex::Regex;

use crate::routing::binder::Params;
use crate::routing::error::{RouteError, RouteResult};

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$([0-9A-Za-z_]+)").expect("placeholder scanner must compile"));

/// Substitute every placeholder in `target`.
///
/// Fails on the first placeholder whose parameter is absent or empty. Any
/// non-empty value is accepted, including `"0"`. The reported index is the
/// placeholder's ordinal among all placeholders.
/// Substituted values are not scanned again.
pub fn resolve(route: &str, target: &str, params: &Params) -> RouteResult<String> {
    let mut resolved = String::with_capacity(target.len());
    let mut last = 0;

    for (index, caps) in PLACEHOLDER_RE.captures_iter(target).enumerate() {
        let (Some(whole), Some(token)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        let value = params
            .get(token.as_str())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| RouteError::UnresolvedParam {
                route: route.to_string(),
                token: token.as_str().to_string(),
                index,
            })?;

        resolved.push_str(&target[last..whole.start()]);
        resolved.push_str(value);
        last = whole.end();
    }

    resolved.push_str(&target[last..]);
    Ok(resolved)
}
