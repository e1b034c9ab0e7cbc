//! Capture → parameter binding.
//!
//! # Responsibilities
//! - Turn regex captures into a name → value map
//! - Fill unnamed groups from the variant's parameter list
//! - Order keys naturally so iteration order is stable per key set
//!
//! # Binding Policy
//! - A group carrying its own regex name (`:name` tokens, named `{}` tokens,
//!   hand-written `(?<name>...)`) is always bound under that name
//! - An anonymous group takes the parameter at the same position when that
//!   key is still free, else its 0-based position. With as many parameters
//!   as groups this is plain positional pairing
//! - Keys are never overwritten; groups that did not participate bind to ""

use std::cmp::Ordering;

use indexmap::IndexMap;
use regex::{Captures, Regex};

/// Bound parameters, naturally ordered by key.
pub type Params = IndexMap<String, String>;

/// Bind the captures of a successful match.
pub fn bind(regex: &Regex, caps: &Captures<'_>, names: &[String]) -> Params {
    let groups: Vec<(Option<&str>, &str)> = regex
        .capture_names()
        .zip(caps.iter())
        .skip(1)
        .map(|(name, value)| (name, value.map(|m| m.as_str()).unwrap_or("")))
        .collect();

    let mut params = Params::with_capacity(groups.len());

    for (index, (group_name, value)) in groups.iter().enumerate() {
        let key = group_name
            .map(str::to_string)
            .or_else(|| {
                names
                    .get(index)
                    .filter(|n| !n.is_empty() && !params.contains_key(n.as_str()))
                    .cloned()
            })
            .unwrap_or_else(|| index.to_string());
        params.entry(key).or_insert_with(|| value.to_string());
    }

    params.sort_by(|a, _, b, _| natural_cmp(a, b));
    params
}

/// Natural ordering: digit runs compare by numeric value, everything else by
/// character. Keys that compare equal this way fall back to byte order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let l_run = take_digits(&mut left);
                let r_run = take_digits(&mut right);
                let ord = compare_digit_runs(&l_run, &r_run);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(l), Some(r)) => {
                if l != r {
                    return l.cmp(&r);
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(|c| c.is_ascii_digit()) {
        run.push(c);
    }
    run
}

fn compare_digit_runs(l: &str, r: &str) -> Ordering {
    let l = l.trim_start_matches('0');
    let r = r.trim_start_matches('0');
    l.len().cmp(&r.len()).then_with(|| l.cmp(r))
}
