//! Selector matching
//!
//! Only two simple selectors exist: `#id` and `.class`. A selector string is a
//! comma separated list of them and matches when any entry matches.

use crate::node::{eq_ignore_case, DomNode};

/// A single `#id` or `.class` selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    /// `#value`
    Id(String),
    /// `.value`
    Class(String),
}

impl SimpleSelector {
    /// Parse one entry of a selector list
    ///
    /// Entries shorter than two characters or with another prefix are not
    /// selectors this engine understands and yield `None`.
    pub fn parse(input: &str) -> Option<Self> {
        let selector = input.trim().to_lowercase();
        let mut chars = selector.chars();
        let prefix = chars.next()?;
        let value = chars.as_str();
        if value.is_empty() {
            return None;
        }

        match prefix {
            '#' => Some(Self::Id(value.to_string())),
            '.' => Some(Self::Class(value.to_string())),
            _ => None,
        }
    }

    /// Parse a comma separated selector list, skipping unsupported entries
    pub fn parse_list(input: &str) -> impl Iterator<Item = SimpleSelector> + '_ {
        input.split(',').filter_map(Self::parse)
    }

    /// Check whether this selector matches a node
    pub fn matches(&self, node: &DomNode) -> bool {
        match self {
            Self::Id(id) => node.identifier().is_some_and(|ident| eq_ignore_case(id, ident)),
            Self::Class(class) => node.has_class(class),
        }
    }
}

impl DomNode {
    /// Check if a selector list matches this node
    pub fn matches_selector(&self, selector: &str) -> bool {
        if selector.is_empty() {
            return false;
        }
        SimpleSelector::parse_list(selector).any(|s| s.matches(self))
    }
}
