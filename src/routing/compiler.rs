//! Template → regular expression compilation.
//!
//! # Template Syntax
//! - `:name` → `(?<name>[^/]+)`, one path segment; `name` is added to the
//!   variant's parameter list
//! - `{%d}` → digits, `{%w}` → word characters, `{%x}` → lowercase hex
//! - `{%az+}` → `[a-z]+`; the third character selects the repeat: `-` exactly
//!   one, `*` zero or more, anything else one or more
//! - `{a|b}` → `(a|b)`, the content is inserted verbatim
//! - `$name` → the registered shortcut fragment, or left untouched
//!
//! Every `:` and `{}` token takes the next positional index. A non-empty
//! declared parameter at that index names the group produced by a `{}` token.
//! All other characters are copied as-is, so hand-written regex can be mixed
//! freely with tokens.
//!
//! # Design Decisions
//! - Single left-to-right scan; tokens are spliced at the position found
//! - Output is anchored (`^...$`) and case-insensitive
//! - The `regex` crate is automaton based, so no template can trigger
//!   catastrophic backtracking; compiled size is capped instead

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::routing::error::{RouteError, RouteResult};
use crate::routing::shortcut::ShortcutRegistry;

/// Upper bound on the compiled program size of a single route.
const MAX_ROUTE_REGEX_SIZE: usize = 1 << 20;

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(.+?)\}|:([0-9A-Za-z_]+)").expect("token scanner must compile")
});

static SHORTCUT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$([0-9A-Za-z_]+)").expect("shortcut scanner must compile"));

/// A compiled route template.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    source: String,
    expression: String,
    regex: Regex,
}

impl CompiledPattern {
    /// The template as it was registered.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The anchored expression handed to the regex engine.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Plain-data view for diagnostics.
    pub fn info(&self) -> PatternInfo {
        PatternInfo {
            source: self.source.clone(),
            regex: self.expression.clone(),
        }
    }
}

impl PartialEq for CompiledPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.expression == other.expression
    }
}

impl Eq for CompiledPattern {}

/// Source template and compiled expression of one variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternInfo {
    pub source: String,
    pub regex: String,
}

/// Result of the textual expansion step, before the regex engine is involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// Anchored expression.
    pub expression: String,
    /// Declared names followed by newly discovered `:name` tokens.
    pub params: Vec<String>,
    /// Number of `:` and `{}` tokens recognized.
    pub tokens: usize,
}

/// Output of a full compilation.
#[derive(Debug, Clone)]
pub struct Compiled {
    pub pattern: CompiledPattern,
    pub params: Vec<String>,
}

/// Compiles templates against a snapshot of the shortcut registry.
#[derive(Debug, Clone, Copy)]
pub struct PatternCompiler<'a> {
    shortcuts: &'a ShortcutRegistry,
}

impl<'a> PatternCompiler<'a> {
    pub fn new(shortcuts: &'a ShortcutRegistry) -> Self {
        Self { shortcuts }
    }

    /// Rewrite `template` into an anchored expression and finalize the
    /// parameter list. Never fails; validity is checked by [`compile`].
    ///
    /// [`compile`]: PatternCompiler::compile
    pub fn expand(&self, template: &str, declared: &[String]) -> Expansion {
        let mut params = declared.to_vec();
        let mut body = String::with_capacity(template.len() + 16);
        let mut last = 0;
        let mut tokens = 0;

        for (index, caps) in TOKEN_RE.captures_iter(template).enumerate() {
            let Some(whole) = caps.get(0) else { continue };
            body.push_str(&template[last..whole.start()]);
            last = whole.end();
            tokens += 1;

            if let Some(ident) = caps.get(2) {
                let ident = ident.as_str();
                body.push_str(&format!("(?<{ident}>[^/]+)"));
                if !params.iter().any(|p| p == ident) {
                    params.push(ident.to_string());
                }
                continue;
            }

            let named = declared
                .get(index)
                .filter(|name| !name.is_empty())
                .map(String::as_str);
            let content = whole.as_str().trim_matches(|c| c == '{' || c == '}');
            body.push_str(&brace_replacement(whole.as_str(), content, named));
        }
        body.push_str(&template[last..]);

        let body = self.substitute_shortcuts(&body);

        Expansion {
            expression: format!("^{body}$"),
            params,
            tokens,
        }
    }

    /// Expand and build the case-insensitive regex for a variant of `route`.
    pub fn compile(
        &self,
        route: &str,
        template: &str,
        declared: &[String],
    ) -> RouteResult<Compiled> {
        let expansion = self.expand(template, declared);

        let regex = RegexBuilder::new(&expansion.expression)
            .case_insensitive(true)
            .size_limit(MAX_ROUTE_REGEX_SIZE)
            .build()
            .map_err(|source| RouteError::InvalidPattern {
                route: route.to_string(),
                template: template.to_string(),
                expression: expansion.expression.clone(),
                source,
            })?;

        if expansion.tokens != declared.len() && !declared.is_empty() {
            tracing::debug!(
                route = %route,
                template = %template,
                tokens = expansion.tokens,
                declared = declared.len(),
                "Token count differs from declared params"
            );
        }

        Ok(Compiled {
            pattern: CompiledPattern {
                source: template.to_string(),
                expression: expansion.expression,
                regex,
            },
            params: expansion.params,
        })
    }

    fn substitute_shortcuts(&self, body: &str) -> String {
        if self.shortcuts.is_empty() {
            return body.to_string();
        }
        SHORTCUT_RE
            .replace_all(body, |caps: &regex::Captures<'_>| {
                match self.shortcuts.lookup(&caps[1]) {
                    Some(fragment) => fragment.to_string(),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }
}

fn brace_replacement(token: &str, content: &str, named: Option<&str>) -> String {
    let prefix = named.map(|n| format!("?<{n}>")).unwrap_or_default();
    let chars: Vec<char> = content.chars().collect();

    if chars.first() == Some(&'%') && chars.len() == 2 {
        let class = match chars[1] {
            'd' => r"\d+",
            'w' => r"\w+",
            'x' => "[a-f0-9]+",
            // unknown class letter: keep the token as literal text
            _ => return regex::escape(token),
        };
        return format!("({prefix}{class})");
    }

    if chars.first() == Some(&'%') && chars.len() > 2 {
        let (start, stop) = (chars[1], chars[2]);
        let repeat = match chars.get(3) {
            Some('-') => "",
            Some('*') => "*",
            _ => "+",
        };
        return format!("({prefix}[{start}-{stop}]{repeat})");
    }

    format!("({prefix}{content})")
}
