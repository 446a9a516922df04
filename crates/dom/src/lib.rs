//! In-app DOM
//!
//! Stylable nodes and `#id` / `.class` selector matching.

mod node;
mod selector;

pub use node::DomNode;
pub use selector::SimpleSelector;
