//! Media Query Matching
//!
//! Two query grammars are understood:
//!
//! - size queries: `@media (ios|android|*) and (max|min)-(width|height): <int>`
//! - API level queries: `@android` and `@android-<N>`
//!
//! Any other query never matches. `ios` size queries are kept in shared
//! stylesheets but never apply here.

use std::sync::LazyLock;

use regex::Regex;

static MEDIA_QUERY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@media (ios|android|\*) and \((max|min)-(width|height):\s*([0-9]*)\)$")
        .expect("media query pattern is valid")
});

const ANDROID_QUERY: &str = "@android";

/// Screen dimensions, in the unit size queries are written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    pub width: i32,
    pub height: i32,
}

impl ScreenSize {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Environment media queries are evaluated against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MediaContext {
    /// Screen size; size queries never match without one
    pub screen_size: Option<ScreenSize>,
    /// Host OS API level; `@android-<N>` queries never match without one
    pub api_level: Option<u32>,
}

impl MediaContext {
    /// Create a context with no screen size and no API level
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the screen size
    pub fn with_screen_size(mut self, screen_size: ScreenSize) -> Self {
        self.screen_size = Some(screen_size);
        self
    }

    /// Set the host API level
    pub fn with_api_level(mut self, api_level: u32) -> Self {
        self.api_level = Some(api_level);
        self
    }
}

impl From<Option<ScreenSize>> for MediaContext {
    fn from(screen_size: Option<ScreenSize>) -> Self {
        Self {
            screen_size,
            api_level: None,
        }
    }
}

/// Platform part of a size query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Ios,
    Android,
    Any,
}

/// `max-` or `min-`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Max,
    Min,
}

/// `width` or `height`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Width,
    Height,
}

/// A parsed size query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeQuery {
    pub platform: Platform,
    pub bound: Bound,
    pub dimension: Dimension,
    pub size: i32,
}

impl SizeQuery {
    /// Parse a size query, if the rule is one and its size is a valid integer
    pub fn parse(rule: &str) -> Option<Self> {
        match parse_size_query(rule) {
            SizeQueryParse::Valid(query) => Some(query),
            _ => None,
        }
    }

    /// Check the query against a screen size
    pub fn matches(&self, screen: ScreenSize) -> bool {
        if self.platform == Platform::Ios {
            return false;
        }

        let compared = match self.dimension {
            Dimension::Width => screen.width,
            Dimension::Height => screen.height,
        };

        match self.bound {
            Bound::Max => compared <= self.size,
            Bound::Min => compared >= self.size,
        }
    }
}

/// Outcome of reading a rule as a size query
#[derive(Debug, Clone, PartialEq, Eq)]
enum SizeQueryParse {
    /// Not a size query at all
    NotSizeQuery,
    /// Size query shape with an unusable size
    InvalidSize(String),
    Valid(SizeQuery),
}

fn parse_size_query(rule: &str) -> SizeQueryParse {
    let Some(caps) = MEDIA_QUERY_PATTERN.captures(rule) else {
        return SizeQueryParse::NotSizeQuery;
    };

    let platform = match &caps[1] {
        "ios" => Platform::Ios,
        "android" => Platform::Android,
        _ => Platform::Any,
    };
    let bound = if &caps[2] == "max" { Bound::Max } else { Bound::Min };
    let dimension = if &caps[3] == "height" {
        Dimension::Height
    } else {
        Dimension::Width
    };

    match caps[4].parse::<i32>() {
        Ok(size) => SizeQueryParse::Valid(SizeQuery {
            platform,
            bound,
            dimension,
            size,
        }),
        Err(e) => SizeQueryParse::InvalidSize(format!("'{}': {}", &caps[4], e)),
    }
}

/// Check whether a media query rule applies in the given context
pub fn matches_media_query(rule: &str, context: &MediaContext) -> bool {
    if rule.is_empty() {
        return false;
    }

    if let Some(screen) = context.screen_size {
        match parse_size_query(rule) {
            SizeQueryParse::Valid(query) => return query.matches(screen),
            SizeQueryParse::InvalidSize(reason) => {
                log::debug!("Error while parsing a media query size rule {}", reason);
                return false;
            }
            SizeQueryParse::NotSizeQuery => {}
        }
    }

    matches_api_level_query(rule, context.api_level)
}

fn matches_api_level_query(rule: &str, api_level: Option<u32>) -> bool {
    if rule == ANDROID_QUERY {
        return true;
    }

    let Some(wanted) = rule
        .strip_prefix(ANDROID_QUERY)
        .and_then(|rest| rest.strip_prefix('-'))
    else {
        return false;
    };

    match (wanted.parse::<i64>(), api_level) {
        (Ok(wanted), Some(current)) => i64::from(current) >= wanted,
        _ => false,
    }
}
