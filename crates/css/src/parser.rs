//! Stylesheet Parser
//!
//! A two-axis state machine driven by the tokenizer's special tokens. The
//! scope axis tracks whether we are at the root or inside a media query; the
//! substate axis tracks whether we are reading a selector, a property name or
//! a property value. Text tokens only ever fill the pending token buffer.

use std::mem;

use crate::document::{Declaration, Document, MediaQuery, Ruleset};
use crate::error::{CssError, CssResult};
use crate::imports::{expand_imports, ImportProvider};
use crate::tokenizer::{SpecialToken, Token, Tokenizer};

/// Outer parsing scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Root,
    /// Inside `@... { }`. Media queries do not nest.
    MediaQuery,
}

/// Inner parsing state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Substate {
    Selector,
    /// Reserved for block-level extensions, never entered
    Ruleset,
    PropertyName,
    PropertyValue,
}

/// Stylesheet parser
///
/// Holds nothing but the import provider, so one parser can be reused for
/// any number of stylesheets.
#[derive(Debug, Clone, Default)]
pub struct Parser<P> {
    import_provider: P,
}

impl<P: ImportProvider> Parser<P> {
    /// Create a parser resolving `@import sdk("...")` through the given provider
    pub fn new(import_provider: P) -> Self {
        Self { import_provider }
    }

    /// Parse a stylesheet
    ///
    /// Fails as a whole on the first structural error; no partial document is
    /// ever returned.
    pub fn parse(&self, input: &str) -> CssResult<Document> {
        let expanded = expand_imports(input, &self.import_provider);

        let document = parse_tokens(&expanded)
            .inspect_err(|e| log::debug!("Stylesheet parsing failed: {}", e))?;
        log::trace!(
            "Parsed stylesheet: {} rulesets, {} media queries",
            document.rulesets.len(),
            document.media_queries.len()
        );
        Ok(document)
    }

    /// The import provider used by this parser
    pub fn import_provider(&self) -> &P {
        &self.import_provider
    }
}

fn parse_tokens(input: &str) -> CssResult<Document> {
    let mut context = ParseContext::new();
    for token in Tokenizer::new(input) {
        context.feed(token)?;
    }
    context.finish()
}

/// State of a single parse
///
/// Each special token is one transition method. A context is created for
/// every parse call and consumed by [`ParseContext::finish`].
#[derive(Debug)]
pub struct ParseContext {
    scope: Scope,
    substate: Substate,
    document: Document,
    media_query: Option<MediaQuery>,
    ruleset: Option<Ruleset>,
    declaration: Option<Declaration>,
    /// Pending text, already trimmed
    token: String,
    /// Set after a literal colon: the next text token is appended to the
    /// pending one instead of replacing it
    merge_next: bool,
}

impl Default for ParseContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ParseContext {
    pub fn new() -> Self {
        Self {
            scope: Scope::Root,
            substate: Substate::Selector,
            document: Document::new(),
            media_query: None,
            ruleset: None,
            declaration: None,
            token: String::new(),
            merge_next: false,
        }
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn substate(&self) -> Substate {
        self.substate
    }

    /// The pending text token
    pub fn pending_token(&self) -> &str {
        &self.token
    }

    /// Feed one token to the state machine
    pub fn feed(&mut self, token: Token<'_>) -> CssResult<()> {
        match token {
            Token::Text(text) => {
                self.consume_text(text);
                Ok(())
            }
            Token::Special(special) => self.consume_special(special),
        }
    }

    /// Close the parse, returning the document
    ///
    /// A ruleset or media query still open at end of input is an error.
    pub fn finish(self) -> CssResult<Document> {
        if self.ruleset.is_some() || self.media_query.is_some() || self.substate != Substate::Selector {
            return Err(CssError::unexpected_eof(self.describe()));
        }
        if !self.token.is_empty() {
            log::trace!("Ignoring trailing text: {}", self.token);
        }
        Ok(self.document)
    }

    fn consume_text(&mut self, text: &str) {
        if !self.merge_next {
            self.token.clear();
        }
        self.token.push_str(text.trim());
        self.merge_next = false;
    }

    fn consume_special(&mut self, token: SpecialToken) -> CssResult<()> {
        match token {
            SpecialToken::BlockStart => self.open_block(),
            SpecialToken::BlockEnd => self.close_block(),
            SpecialToken::PropertySeparator => self.close_property_name(),
            SpecialToken::PropertyEnd => self.close_property_value(SpecialToken::PropertyEnd),
            SpecialToken::NewLine => {
                self.recover_line_ending();
                Ok(())
            }
        }
    }

    fn take_token(&mut self) -> String {
        self.merge_next = false;
        mem::take(&mut self.token)
    }

    /// `{`: open a ruleset, or a media query if the selector starts with `@`
    fn open_block(&mut self) -> CssResult<()> {
        let token = SpecialToken::BlockStart;
        if self.substate != Substate::Selector || self.ruleset.is_some() {
            return Err(CssError::unexpected(token, self.describe()));
        }
        if self.token.is_empty() {
            return Err(CssError::empty(token));
        }

        let selector = self.take_token();
        if selector.starts_with('@') {
            if self.scope != Scope::Root {
                return Err(CssError::NestedMediaQuery { rule: selector });
            }
            if self.media_query.is_some() {
                return Err(CssError::unexpected(token, self.describe()));
            }

            log::trace!("Opening media query {}", selector);
            self.scope = Scope::MediaQuery;
            self.media_query = Some(MediaQuery::new(selector));
        } else {
            log::trace!("Opening ruleset {}", selector);
            self.ruleset = Some(Ruleset::new(selector));
            self.substate = Substate::PropertyName;
        }

        Ok(())
    }

    /// `}`: close the open ruleset, or the media query if no ruleset is open
    fn close_block(&mut self) -> CssResult<()> {
        let token = SpecialToken::BlockEnd;

        if self.substate == Substate::PropertyValue {
            // A missing ';' before '}' is tolerated
            self.close_property_value(token)?;
        }

        if self.substate != Substate::PropertyName && self.substate != Substate::Selector {
            return Err(CssError::unexpected(token, self.describe()));
        }

        match self.scope {
            Scope::MediaQuery => {
                if let Some(ruleset) = self.ruleset.take() {
                    let query = self
                        .media_query
                        .as_mut()
                        .ok_or_else(|| CssError::unexpected(token, "media query"))?;
                    query.rulesets.push(ruleset);
                } else {
                    let query = self
                        .media_query
                        .take()
                        .ok_or_else(|| CssError::unexpected(token, "media query"))?;
                    self.document.media_queries.push(query);
                    self.scope = Scope::Root;
                }
            }
            Scope::Root => {
                let ruleset = self
                    .ruleset
                    .take()
                    .ok_or_else(|| CssError::unexpected(token, self.describe()))?;
                self.document.rulesets.push(ruleset);
            }
        }

        self.substate = Substate::Selector;
        Ok(())
    }

    /// `:`: end of a property name, or a literal colon inside a media query condition
    fn close_property_name(&mut self) -> CssResult<()> {
        let token = SpecialToken::PropertySeparator;

        if self.scope == Scope::Root && self.substate == Substate::Selector {
            self.token.push(':');
            self.merge_next = true;
            return Ok(());
        }

        if self.substate != Substate::PropertyName || self.ruleset.is_none() || self.declaration.is_some() {
            return Err(CssError::unexpected(token, self.describe()));
        }
        if self.token.is_empty() {
            return Err(CssError::empty(token));
        }

        let name = self.take_token();
        self.declaration = Some(Declaration::new(&name, String::new()));
        self.substate = Substate::PropertyValue;
        Ok(())
    }

    /// `;` (or a synthesized one): end of a property value
    fn close_property_value(&mut self, token: SpecialToken) -> CssResult<()> {
        if self.substate != Substate::PropertyValue || self.ruleset.is_none() || self.declaration.is_none() {
            return Err(CssError::unexpected(token, self.describe()));
        }
        if self.token.is_empty() {
            return Err(CssError::empty(token));
        }

        let value = self.take_token();
        let mut declaration = self
            .declaration
            .take()
            .ok_or_else(|| CssError::unexpected(token, "property value"))?;
        declaration.value = value.trim().to_string();

        match self.ruleset.as_mut() {
            Some(ruleset) => ruleset.declarations.push(declaration),
            None => return Err(CssError::unexpected(token, "property value")),
        }

        self.substate = Substate::PropertyName;
        Ok(())
    }

    /// `\n`: a soft `;`. Nothing to close is not an error.
    fn recover_line_ending(&mut self) {
        if self.substate == Substate::PropertyValue {
            if let Err(e) = self.close_property_value(SpecialToken::NewLine) {
                log::trace!("Ignoring line ending: {}", e);
            }
        }
    }

    fn describe(&self) -> &'static str {
        match (self.scope, self.substate) {
            (Scope::Root, Substate::Selector) => "selector",
            (Scope::Root, Substate::Ruleset) => "ruleset",
            (Scope::Root, Substate::PropertyName) => "property name",
            (Scope::Root, Substate::PropertyValue) => "property value",
            (Scope::MediaQuery, Substate::Selector) => "media query selector",
            (Scope::MediaQuery, Substate::Ruleset) => "media query ruleset",
            (Scope::MediaQuery, Substate::PropertyName) => "media query property name",
            (Scope::MediaQuery, Substate::PropertyValue) => "media query property value",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DeclarationKind;
    use crate::imports::{NoImports, StyleLibrary};

    fn parse(css: &str) -> CssResult<Document> {
        Parser::new(NoImports).parse(css)
    }

    fn feed_all(context: &mut ParseContext, css: &str) -> CssResult<()> {
        for token in Tokenizer::new(css) {
            context.feed(token)?;
        }
        Ok(())
    }

    #[test]
    fn test_simple_ruleset() {
        let doc = parse("#id { color: red; }").unwrap();

        assert_eq!(doc.rulesets.len(), 1);
        assert_eq!(doc.rulesets[0].selector, "#id");
        assert_eq!(doc.rulesets[0].declarations, vec![Declaration::new("color", "red")]);
        assert!(doc.media_queries.is_empty());
    }

    #[test]
    fn test_multiple_declarations() {
        let doc = parse("#a { color: red; Font-Size: 16px; }").unwrap();

        let decls = &doc.rulesets[0].declarations;
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].name, "color");
        assert_eq!(decls[1].name, "font-size");
        assert_eq!(decls[1].value, "16px");
    }

    #[test]
    fn test_value_case_preserved() {
        let doc = parse("#a { font-family: Helvetica Neue; }").unwrap();
        assert_eq!(doc.rulesets[0].declarations[0].value, "Helvetica Neue");
    }

    #[test]
    fn test_variable_declaration() {
        let doc = parse("* { --Main-Color: blue; }").unwrap();

        let decl = &doc.rulesets[0].declarations[0];
        assert_eq!(decl.kind, DeclarationKind::Variable);
        assert_eq!(decl.name, "--main-color");
        assert_eq!(decl.value, "blue");
    }

    #[test]
    fn test_missing_final_semicolon() {
        let doc = parse("#a { color: red; margin: 0 }").unwrap();
        assert_eq!(doc.rulesets[0].declarations.len(), 2);
        assert_eq!(doc.rulesets[0].declarations[1].value, "0");
    }

    #[test]
    fn test_newline_terminates_value() {
        let doc = parse("#a {\n  color: red\n  margin: 4px\n}\n").unwrap();

        let decls = &doc.rulesets[0].declarations;
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].value, "red");
        assert_eq!(decls[1].value, "4px");
    }

    #[test]
    fn test_newline_after_colon_is_ignored() {
        let doc = parse("#a { color:\n red; }").unwrap();
        assert_eq!(doc.rulesets[0].declarations[0].value, "red");
    }

    #[test]
    fn test_empty_ruleset() {
        let doc = parse("#a {}\n.b { }").unwrap();
        assert_eq!(doc.rulesets.len(), 2);
        assert!(doc.rulesets[1].declarations.is_empty());
    }

    #[test]
    fn test_comma_selector_kept_raw() {
        let doc = parse(".a, .B { color: red; }").unwrap();
        assert_eq!(doc.rulesets[0].selector, ".a, .B");
    }

    #[test]
    fn test_media_query() {
        let css = "@media android and (max-width: 320) { #a { color: red; } .b { color: blue; } }";
        let doc = parse(css).unwrap();

        assert!(doc.rulesets.is_empty());
        assert_eq!(doc.media_queries.len(), 1);

        let query = &doc.media_queries[0];
        assert_eq!(query.rule, "@media android and (max-width:320)");
        assert_eq!(query.rulesets.len(), 2);
        assert_eq!(query.rulesets[1].selector, ".b");
    }

    #[test]
    fn test_api_level_query() {
        let doc = parse("#a { color: red; }\n@android-21 {\n #a { color: blue; }\n}\n#b { color: green; }").unwrap();

        assert_eq!(doc.rulesets.len(), 2);
        assert_eq!(doc.media_queries[0].rule, "@android-21");
        assert_eq!(doc.media_queries[0].rulesets[0].declarations[0].value, "blue");
    }

    #[test]
    fn test_empty_media_query() {
        let doc = parse("@android {}").unwrap();
        assert_eq!(doc.media_queries.len(), 1);
        assert!(doc.media_queries[0].rulesets.is_empty());
    }

    #[test]
    fn test_nested_media_query_fails() {
        let err = parse("@android { @android-21 { #a { color: red; } } }").unwrap_err();
        assert!(matches!(err, CssError::NestedMediaQuery { ref rule } if rule == "@android-21"));
    }

    #[test]
    fn test_missing_closing_brace_fails() {
        let err = parse("#a { color: red").unwrap_err();
        assert!(matches!(err, CssError::UnexpectedEof { .. }));
    }

    #[test]
    fn test_unclosed_media_query_fails() {
        assert!(parse("@android { #a { color: red; }").is_err());
    }

    #[test]
    fn test_end_of_input_errors_from_parser() {
        let parser = Parser::new(NoImports);

        let err = parser.parse("@android { #a { color: red; }").unwrap_err();
        assert_eq!(err, CssError::unexpected_eof("media query selector"));

        let err = parser.parse("#a { color: red").unwrap_err();
        assert_eq!(err, CssError::unexpected_eof("property value"));
    }

    #[test]
    fn test_stray_closing_brace_fails() {
        assert!(parse("}").is_err());
        assert!(parse("#a { color: red; } }").is_err());
    }

    #[test]
    fn test_nested_ruleset_fails() {
        assert!(parse("#a { #b { color: red; } }").is_err());
    }

    #[test]
    fn test_empty_selector_fails() {
        let err = parse("{ color: red; }").unwrap_err();
        assert_eq!(err, CssError::empty(SpecialToken::BlockStart));
    }

    #[test]
    fn test_empty_property_name_fails() {
        assert!(parse("#a { : red; }").is_err());
    }

    #[test]
    fn test_empty_value_fails() {
        assert_eq!(parse("#a { color: ; }").unwrap_err(), CssError::empty(SpecialToken::PropertyEnd));
        assert_eq!(parse("#a { color: }").unwrap_err(), CssError::empty(SpecialToken::BlockEnd));
    }

    #[test]
    fn test_semicolon_outside_value_fails() {
        assert!(parse("#a { color; }").is_err());
        assert!(parse("#a;").is_err());
    }

    #[test]
    fn test_colon_in_value_fails() {
        assert!(parse("#a { background: url(http://x); }").is_err());
    }

    #[test]
    fn test_colon_in_media_query_selector_fails() {
        assert!(parse("@android { #a:b { color: red; } }").is_err());
    }

    #[test]
    fn test_empty_stylesheet() {
        let doc = parse("  \n\n ").unwrap();
        assert!(doc.is_empty());
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn test_parser_reusable() {
        let parser = Parser::new(NoImports);

        assert!(parser.parse("#a { color: red").is_err());
        let doc = parser.parse("#b { color: blue; }").unwrap();
        assert_eq!(doc.rulesets.len(), 1);
        assert_eq!(doc.rulesets[0].selector, "#b");

        let doc = parser.parse("#c { color: green; }").unwrap();
        assert_eq!(doc.rulesets.len(), 1);
        assert_eq!(doc.rulesets[0].selector, "#c");
    }

    #[test]
    fn test_imports_expanded() {
        let library = StyleLibrary::new().with_style("base", "#a { color: red; }\n");
        let parser = Parser::new(library);

        let doc = parser.parse("@import sdk(\"base\");\n#b { color: blue; }").unwrap();
        assert_eq!(doc.rulesets.len(), 2);
        assert_eq!(doc.rulesets[0].selector, "#a");
    }

    #[test]
    fn test_import_with_closure_provider() {
        let parser = Parser::new(|name: &str| {
            (name == "vars").then(|| "* { --accent: #ff0000; }".to_string())
        });

        let doc = parser.parse("@import sdk(\"vars\");").unwrap();
        assert_eq!(doc.rulesets[0].declarations[0].value, "#ff0000");
    }

    #[test]
    fn test_context_transitions() {
        let mut context = ParseContext::new();
        assert_eq!(context.scope(), Scope::Root);
        assert_eq!(context.substate(), Substate::Selector);

        feed_all(&mut context, "#a {").unwrap();
        assert_eq!(context.substate(), Substate::PropertyName);
        assert_eq!(context.pending_token(), "");

        feed_all(&mut context, " color:").unwrap();
        assert_eq!(context.substate(), Substate::PropertyValue);

        feed_all(&mut context, " red;").unwrap();
        assert_eq!(context.substate(), Substate::PropertyName);

        feed_all(&mut context, "}").unwrap();
        assert_eq!(context.substate(), Substate::Selector);

        let doc = context.finish().unwrap();
        assert_eq!(doc.rulesets.len(), 1);
    }

    #[test]
    fn test_context_media_query_colon_merge() {
        let mut context = ParseContext::new();

        feed_all(&mut context, "@media * and (min-height:").unwrap();
        assert_eq!(context.substate(), Substate::Selector);
        assert_eq!(context.pending_token(), "@media * and (min-height:");

        feed_all(&mut context, " 480) ").unwrap();
        assert_eq!(context.pending_token(), "@media * and (min-height:480)");

        feed_all(&mut context, "{").unwrap();
        assert_eq!(context.scope(), Scope::MediaQuery);
        assert_eq!(context.substate(), Substate::Selector);
    }

    #[test]
    fn test_context_newline_is_soft() {
        let mut context = ParseContext::new();
        feed_all(&mut context, "#a { color:").unwrap();

        context.feed(Token::Special(SpecialToken::NewLine)).unwrap();
        assert_eq!(context.substate(), Substate::PropertyValue);

        let err = context.feed(Token::Special(SpecialToken::PropertyEnd)).unwrap_err();
        assert_eq!(err, CssError::empty(SpecialToken::PropertyEnd));
    }

    #[test]
    fn test_ruleset_substate_never_entered() {
        let mut context = ParseContext::new();
        let css = "* { --c: red; }\n@media * and (min-width: 1) {\n #a { color: var(--c) }\n}\n";

        for token in Tokenizer::new(css) {
            context.feed(token).unwrap();
            assert_ne!(context.substate(), Substate::Ruleset);
        }
        assert_eq!(context.finish().unwrap().media_queries.len(), 1);
    }

    #[test]
    fn test_context_eof_in_value() {
        let mut context = ParseContext::new();
        feed_all(&mut context, "#a { color: red").unwrap();
        assert!(context.finish().is_err());
    }
}
