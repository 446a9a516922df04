//! `@import sdk("name");` expansion
//!
//! Imports are substituted textually before tokenizing. Imported content is
//! inserted as-is: imports inside it are not expanded again.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use rustc_hash::FxHashMap;

static IMPORT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"@import sdk\("([^"]*)"\);"#).expect("import pattern is valid")
});

/// Source of the stylesheet fragments referenced by `@import sdk("name");`
pub trait ImportProvider {
    /// Content for an import name, or `None` if it is unknown
    fn content(&self, name: &str) -> Option<String>;
}

impl<F> ImportProvider for F
where
    F: Fn(&str) -> Option<String>,
{
    fn content(&self, name: &str) -> Option<String> {
        self(name)
    }
}

/// Provider that knows no imports; every directive is removed
#[derive(Debug, Clone, Copy, Default)]
pub struct NoImports;

impl ImportProvider for NoImports {
    fn content(&self, _name: &str) -> Option<String> {
        None
    }
}

/// Replace every import directive with the provider's content
pub fn expand_imports<P: ImportProvider + ?Sized>(input: &str, provider: &P) -> String {
    if input.is_empty() {
        return String::new();
    }

    IMPORT_PATTERN
        .replace_all(input, |caps: &Captures<'_>| {
            let name = &caps[1];
            match provider.content(name) {
                Some(content) => content,
                None => {
                    log::debug!("Unresolved stylesheet import: {}", name);
                    String::new()
                }
            }
        })
        .into_owned()
}

/// In-memory registry of named stylesheet fragments
///
/// Names are case-insensitive. A meta import is a name that expands to the
/// concatenation of other registered fragments, in order.
#[derive(Debug, Clone, Default)]
pub struct StyleLibrary {
    styles: FxHashMap<String, String>,
    meta: FxHashMap<String, Vec<String>>,
}

impl StyleLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a stylesheet fragment
    pub fn add_style(&mut self, name: &str, content: impl Into<String>) {
        self.styles.insert(name.to_lowercase(), content.into());
    }

    /// Register a meta import made of other fragments
    pub fn add_meta<I, S>(&mut self, name: &str, parts: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parts = parts.into_iter().map(|p| p.as_ref().to_lowercase()).collect();
        self.meta.insert(name.to_lowercase(), parts);
    }

    /// Builder form of [`StyleLibrary::add_style`]
    pub fn with_style(mut self, name: &str, content: impl Into<String>) -> Self {
        self.add_style(name, content);
        self
    }

    /// Builder form of [`StyleLibrary::add_meta`]
    pub fn with_meta<I, S>(mut self, name: &str, parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.add_meta(name, parts);
        self
    }
}

impl ImportProvider for StyleLibrary {
    fn content(&self, name: &str) -> Option<String> {
        let name = name.to_lowercase();

        if let Some(parts) = self.meta.get(&name) {
            // Meta parts are plain fragments; a meta import cannot reference another.
            let full: String = parts
                .iter()
                .filter_map(|part| self.styles.get(part))
                .map(String::as_str)
                .collect();
            return if full.is_empty() { None } else { Some(full) };
        }

        self.styles.get(&name).cloned()
    }
}
