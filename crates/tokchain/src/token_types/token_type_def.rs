//! # Token Type Definitions

use core::ops::Range;

use crate::{
    errors::TCResult,
    support::regex::{RegexPattern, RegexWrapper, alternate_choice_regex_pattern},
    token_types::TypeTag,
};

/// The Start sentinel character.
pub const START_TEXT: &str = "\u{2}";

/// The End sentinel character.
pub const END_TEXT: &str = "\u{3}";

/// How a token type recognizes text.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum TokenMatcher {
    /// A pattern-driven type.
    Regex {
        /// Finds matches anywhere in a buffer.
        scan: RegexWrapper,

        /// Matches an entire token text.
        whole: RegexWrapper,
    },

    /// A fixed set of literal strings, matched as ordinary content.
    Characters {
        /// The literal strings.
        characters: Vec<String>,

        /// Union of `characters`, longest first.
        scan: RegexWrapper,
    },

    /// A fixed set of sentinel strings.
    ///
    /// These are never found in scanned content; they only classify
    /// already-known token texts.
    Sentinel {
        /// The sentinel strings.
        characters: Vec<String>,
    },

    /// The fallback; matches nothing.
    Unknown,
}

impl TokenMatcher {
    /// Build a regex matcher.
    pub fn regex<P: Into<RegexPattern>>(pattern: P) -> TCResult<Self> {
        let pattern = pattern.into();
        Ok(Self::Regex {
            scan: pattern.compile()?,
            whole: pattern.anchored().compile()?,
        })
    }

    /// Build a literal-set matcher.
    pub fn characters<S: AsRef<str>>(characters: &[S]) -> TCResult<Self> {
        let characters = characters
            .iter()
            .map(|s| s.as_ref().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();
        let scan = alternate_choice_regex_pattern(&characters).compile()?;
        Ok(Self::Characters { characters, scan })
    }

    /// Does `text` match this matcher as one whole token?
    pub fn is_match(
        &self,
        text: &str,
    ) -> bool {
        match self {
            Self::Regex { whole, .. } => whole.is_match(text),
            Self::Characters { characters, .. } | Self::Sentinel { characters } => {
                characters.iter().any(|c| c == text)
            }
            Self::Unknown => false,
        }
    }

    /// All non-empty matches in `text`, in order.
    pub fn find_all(
        &self,
        text: &str,
    ) -> Vec<Range<usize>> {
        match self {
            Self::Regex { scan, .. } | Self::Characters { scan, .. } => scan
                .find_iter(text)
                .filter(|range| !range.is_empty())
                .collect(),
            Self::Sentinel { .. } | Self::Unknown => Vec::new(),
        }
    }
}

/// A registered token type: tag, priority, strip rule, and matcher.
///
/// Lower `priority` values scan first. When `strip` is set, the spans this
/// type claims are blanked out before lower-priority types scan.
#[derive(Debug, Clone)]
pub struct TokenTypeDef {
    tag: TypeTag,
    priority: i32,
    strip: bool,
    matcher: TokenMatcher,
}

impl TokenTypeDef {
    /// Create a new definition; `strip` defaults to `true`.
    pub fn new<T: Into<TypeTag>>(
        tag: T,
        priority: i32,
        matcher: TokenMatcher,
    ) -> Self {
        Self {
            tag: tag.into(),
            priority,
            strip: true,
            matcher,
        }
    }

    /// Create a regex-driven type.
    ///
    /// ## Errors
    /// Fails if the pattern does not compile.
    pub fn regex<T, P>(
        tag: T,
        pattern: P,
        priority: i32,
    ) -> TCResult<Self>
    where
        T: Into<TypeTag>,
        P: Into<RegexPattern>,
    {
        Ok(Self::new(tag, priority, TokenMatcher::regex(pattern)?))
    }

    /// Create a literal-set type.
    pub fn characters<T, S>(
        tag: T,
        characters: &[S],
        priority: i32,
    ) -> TCResult<Self>
    where
        T: Into<TypeTag>,
        S: AsRef<str>,
    {
        Ok(Self::new(
            tag,
            priority,
            TokenMatcher::characters(characters)?,
        ))
    }

    /// The built-in sentinel type holding the Start/End markers.
    pub fn special() -> Self {
        Self {
            tag: TypeTag::SPECIAL,
            priority: i32::MIN,
            strip: false,
            matcher: TokenMatcher::Sentinel {
                characters: vec![START_TEXT.to_string(), END_TEXT.to_string()],
            },
        }
    }

    /// The built-in fallback type.
    pub fn unknown() -> Self {
        Self {
            tag: TypeTag::UNKNOWN,
            priority: i32::MAX,
            strip: false,
            matcher: TokenMatcher::Unknown,
        }
    }

    /// Set the strip rule.
    pub fn with_strip(
        self,
        strip: bool,
    ) -> Self {
        Self { strip, ..self }
    }

    /// Get the tag.
    pub fn tag(&self) -> &TypeTag {
        &self.tag
    }

    /// Get the priority.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Get the strip rule.
    pub fn strip(&self) -> bool {
        self.strip
    }

    /// Get the matcher.
    pub fn matcher(&self) -> &TokenMatcher {
        &self.matcher
    }

    /// Does `text` match this type as one whole token?
    pub fn is_match(
        &self,
        text: &str,
    ) -> bool {
        self.matcher.is_match(text)
    }

    /// All matches in `text` as `(text, start_offset)` pairs.
    pub fn find_all<'t>(
        &self,
        text: &'t str,
    ) -> Vec<(&'t str, usize)> {
        self.find_ranges(text)
            .into_iter()
            .map(|range| (&text[range.clone()], range.start))
            .collect()
    }

    /// All match ranges in `text`.
    pub fn find_ranges(
        &self,
        text: &str,
    ) -> Vec<Range<usize>> {
        self.matcher.find_all(text)
    }
}
