//! Stylesheet Tokenizer
//!
//! Splits stylesheet text on the five structural characters `{ } : ; \n`.
//! Every structural character is its own token; any run of other characters
//! (whitespace included) is a single text token.

use std::fmt;

/// The structural tokens that drive the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialToken {
    /// `{`
    BlockStart,
    /// `}`
    BlockEnd,
    /// `:`
    PropertySeparator,
    /// `;`
    PropertyEnd,
    /// `\n`
    NewLine,
}

impl SpecialToken {
    /// Map a character to its special token, if it is one
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '{' => Some(Self::BlockStart),
            '}' => Some(Self::BlockEnd),
            ':' => Some(Self::PropertySeparator),
            ';' => Some(Self::PropertyEnd),
            '\n' => Some(Self::NewLine),
            _ => None,
        }
    }

    /// The source character of this token
    pub fn as_char(self) -> char {
        match self {
            Self::BlockStart => '{',
            Self::BlockEnd => '}',
            Self::PropertySeparator => ':',
            Self::PropertyEnd => ';',
            Self::NewLine => '\n',
        }
    }
}

impl fmt::Display for SpecialToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NewLine => f.write_str("'\\n'"),
            other => write!(f, "'{}'", other.as_char()),
        }
    }
}

/// A stylesheet token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Raw text between two special characters (not trimmed)
    Text(&'a str),
    /// One of `{ } : ; \n`
    Special(SpecialToken),
}

/// Stylesheet tokenizer
pub struct Tokenizer<'a> {
    input: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl<'a> Tokenizer<'a> {
    /// Create a new tokenizer
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    /// Get the next token, or `None` at end of input
    pub fn next_token(&mut self) -> Option<Token<'a>> {
        let &(start, c) = self.chars.peek()?;

        if let Some(special) = SpecialToken::from_char(c) {
            self.chars.next();
            return Some(Token::Special(special));
        }

        let mut end = self.input.len();
        while let Some(&(pos, c)) = self.chars.peek() {
            if SpecialToken::from_char(c).is_some() {
                end = pos;
                break;
            }
            self.chars.next();
        }

        Some(Token::Text(&self.input[start..end]))
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}
