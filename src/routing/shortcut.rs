//! Named regex fragments referenced from templates as `$name`.

use std::collections::HashMap;

/// Registry of shortcut fragments.
///
/// Fragments are opaque regex text and are not validated here; a broken
/// fragment only surfaces when a template using it is compiled.
#[derive(Debug, Clone, Default)]
pub struct ShortcutRegistry {
    fragments: HashMap<String, String>,
}

impl ShortcutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a fragment, replacing any previous one with the same name.
    pub fn register(&mut self, name: impl Into<String>, fragment: impl Into<String>) {
        let name = name.into();
        let fragment = fragment.into();
        tracing::debug!(shortcut = %name, fragment = %fragment, "Registered shortcut");
        self.fragments.insert(name, fragment);
    }

    /// Look up the fragment registered under `name`.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.fragments.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}
