//! Style Cascade
//!
//! Collects the declarations that apply to a node, in cascade order: the
//! unconditional rulesets first, then every matching media query in source
//! order. Later declarations override earlier ones once flattened.

use inapp_css::{Declaration, Document, Ruleset};
use inapp_dom::DomNode;

use crate::flatten::{flatten, FlatRules};
use crate::media::{matches_media_query, MediaContext, ScreenSize};

/// Style resolution over a parsed stylesheet
///
/// Resolution only borrows the stylesheet, so one document can serve any
/// number of nodes, from any number of threads.
pub trait Cascade {
    /// Declarations applying to a node, in cascade order
    fn rules(&self, node: &DomNode, context: &MediaContext) -> Vec<&Declaration>;

    /// Flattened rules for a node
    fn flat_rules_in(&self, node: &DomNode, context: &MediaContext) -> FlatRules {
        flatten(self.rules(node, context))
    }

    /// Flattened rules for a node, on a screen of the given size
    fn flat_rules(&self, node: &DomNode, screen_size: Option<ScreenSize>) -> FlatRules {
        self.flat_rules_in(node, &MediaContext::from(screen_size))
    }
}

impl Cascade for Document {
    fn rules(&self, node: &DomNode, context: &MediaContext) -> Vec<&Declaration> {
        let mut declarations = Vec::new();

        collect_matching_declarations(node, &self.rulesets, &mut declarations);

        for query in &self.media_queries {
            if matches_media_query(&query.rule, context) {
                collect_matching_declarations(node, &query.rulesets, &mut declarations);
            } else {
                log::trace!("Media query {} does not apply", query.rule);
            }
        }

        declarations
    }
}

/// Collect declarations of the rulesets matching a node
///
/// The `*` ruleset is special: only its variables are collected, and they are
/// collected for every node.
fn collect_matching_declarations<'a>(
    node: &DomNode,
    rulesets: &'a [Ruleset],
    declarations: &mut Vec<&'a Declaration>,
) {
    for ruleset in rulesets {
        if ruleset.is_wildcard() {
            declarations.extend(ruleset.declarations.iter().filter(|d| d.is_variable()));
        } else if node.matches_selector(&ruleset.selector) {
            declarations.extend(ruleset.declarations.iter());
        }
    }
}
