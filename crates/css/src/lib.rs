//! In-app CSS
//!
//! Tokenizer, parser and document model for the in-app message stylesheet
//! language: rulesets, `--variables`, media queries and `@import sdk("...")`.

mod document;
mod error;
mod imports;
mod parser;
mod tokenizer;

pub use document::{Declaration, DeclarationKind, Document, MediaQuery, Ruleset, WILDCARD_SELECTOR};
pub use error::{CssError, CssResult};
pub use imports::{expand_imports, ImportProvider, NoImports, StyleLibrary};
pub use parser::{ParseContext, Parser, Scope, Substate};
pub use tokenizer::{SpecialToken, Token, Tokenizer};
