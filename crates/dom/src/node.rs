//! Stylable node representation

use smallvec::SmallVec;
use std::fmt;

/// A stylable element of a message template, as seen by the style resolver
///
/// Nodes are plain values built right before resolving their style; they have
/// no identity beyond their identifier and classes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomNode {
    /// Template element type (e.g. "button"). Informational only, never matched.
    pub kind: Option<String>,
    /// Unique identifier, matched by `#id` selectors
    pub identifier: Option<String>,
    /// Class names in declaration order, matched by `.class` selectors
    pub classes: SmallVec<[String; 4]>,
}

impl DomNode {
    /// Create a node with the given identifier
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: Some(identifier.into()),
            ..Self::default()
        }
    }

    /// Create a node without an identifier
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Add a class
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Add several classes
    pub fn with_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classes.extend(classes.into_iter().map(Into::into));
        self
    }

    /// Set the element type
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Get the identifier
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// Check if the node has a class (case-insensitive)
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| eq_ignore_case(c, class))
    }
}

/// Unicode-aware case-insensitive comparison
pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

impl fmt::Display for DomNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(kind) = &self.kind {
            f.write_str(kind)?;
        }
        if let Some(id) = &self.identifier {
            write!(f, "#{}", id)?;
        }
        for class in &self.classes {
            write!(f, ".{}", class)?;
        }
        Ok(())
    }
}
