//! Route matching logic.
//!
//! # Responsibilities
//! - Walk the route table in priority order
//! - Stop at the first variant whose expression accepts the path
//! - Report no-match as `None`, never as an error
//!
//! # Design Decisions
//! - Pure function of (table, path); no match state is kept anywhere
//! - Linear scan, O(total variants) regex evaluations per lookup. Fine for
//!   tens of variants, not for thousands
//! - Every evaluation is reported to an observer so ordering can be verified

use regex::Captures;

use crate::routing::table::{RouteTable, RouteVariant};

/// The winning variant and its captures.
#[derive(Debug)]
pub struct Hit<'t, 'p> {
    pub variant: &'t RouteVariant,
    pub captures: Captures<'p>,
}

/// Find the first variant matching `path`.
///
/// `on_attempt` is invoked for each variant right before its expression is
/// evaluated.
pub fn first_match<'t, 'p, F>(
    table: &'t RouteTable,
    path: &'p str,
    mut on_attempt: F,
) -> Option<Hit<'t, 'p>>
where
    F: FnMut(&RouteVariant),
{
    for variant in table.variants() {
        on_attempt(variant);
        tracing::trace!(
            route = %variant.name(),
            pattern = %variant.pattern().expression(),
            path = %path,
            "Evaluating variant"
        );
        if let Some(captures) = variant.pattern().regex().captures(path) {
            return Some(Hit { variant, captures });
        }
    }
    None
}
