//! Parsed stylesheet model

use crate::error::CssResult;
use crate::imports::NoImports;
use crate::parser::Parser;

/// Wildcard selector: only its variables are used, by every node
pub const WILDCARD_SELECTOR: &str = "*";

/// Whether a declaration is a plain property or a `--variable`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Property,
    Variable,
}

/// A declaration (name: value)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub kind: DeclarationKind,
    /// Lowercased, trimmed name. Variables keep their leading `--`.
    pub name: String,
    /// Trimmed raw value, possibly a `var(...)` reference
    pub value: String,
}

impl Declaration {
    /// Create a declaration, tagging it as a variable when the name starts with `--`
    pub fn new(name: &str, value: impl Into<String>) -> Self {
        let name = name.trim().to_lowercase();
        let kind = if name.starts_with("--") {
            DeclarationKind::Variable
        } else {
            DeclarationKind::Property
        };
        Self {
            kind,
            name,
            value: value.into(),
        }
    }

    pub fn is_variable(&self) -> bool {
        self.kind == DeclarationKind::Variable
    }
}

/// A selector block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ruleset {
    /// Raw selector text (may be a comma separated list or `*`)
    pub selector: String,
    /// Declarations in source order
    pub declarations: Vec<Declaration>,
}

impl Ruleset {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            declarations: Vec::new(),
        }
    }

    /// Whether this is the `*` block
    pub fn is_wildcard(&self) -> bool {
        self.selector == WILDCARD_SELECTOR
    }
}

/// A conditional block (`@media ...` or `@android[-N]`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaQuery {
    /// Raw query text, starting with `@`
    pub rule: String,
    /// Rulesets scoped to this query
    pub rulesets: Vec<Ruleset>,
}

impl MediaQuery {
    pub fn new(rule: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            rulesets: Vec::new(),
        }
    }
}

/// A parsed stylesheet
///
/// Immutable once parsed: resolving styles only ever borrows it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Unconditional rulesets
    pub rulesets: Vec<Ruleset>,
    /// Media queries in source order
    pub media_queries: Vec<MediaQuery>,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a stylesheet that has no `@import` directives to resolve
    pub fn parse(input: &str) -> CssResult<Self> {
        Parser::new(NoImports).parse(input)
    }

    pub fn is_empty(&self) -> bool {
        self.rulesets.is_empty() && self.media_queries.is_empty()
    }
}
