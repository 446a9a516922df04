//! In-app Style Engine
//!
//! Cascade resolution for parsed in-app stylesheets: selector matching,
//! media queries, variable substitution and box shorthand expansion.
//!
//! ```
//! use inapp_css::Document;
//! use inapp_dom::DomNode;
//! use inapp_style::{Cascade, ScreenSize};
//!
//! let doc = Document::parse("* { --accent: #0af; }\n#title { color: var(--accent); padding: 4px; }").unwrap();
//! let rules = doc.flat_rules(&DomNode::new("title"), Some(ScreenSize::new(320, 640)));
//!
//! assert_eq!(rules["color"], "#0af");
//! assert_eq!(rules["padding-left"], "4px");
//! ```

pub mod cascade;
pub mod flatten;
pub mod media;

pub use cascade::Cascade;
pub use flatten::{flatten, FlatRules};
pub use media::{matches_media_query, Bound, Dimension, MediaContext, Platform, ScreenSize, SizeQuery};
