//! # Regex Wrapper
//! This modules provides mechanisms to mix `regex` and `fancy_regex` types.

use core::ops::Range;

/// Error wrapper for regex patterns.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub enum RegexError {
    /// Error from `regex`.
    Basic(regex::Error),

    /// Error from `fancy_regex`.
    Fancy(fancy_regex::Error),
}

impl From<regex::Error> for RegexError {
    fn from(err: regex::Error) -> Self {
        Self::Basic(err)
    }
}

impl From<fancy_regex::Error> for RegexError {
    fn from(err: fancy_regex::Error) -> Self {
        Self::Fancy(err)
    }
}

impl core::fmt::Display for RegexError {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        match self {
            Self::Basic(err) => core::fmt::Display::fmt(err, f),
            Self::Fancy(err) => core::fmt::Display::fmt(err, f),
        }
    }
}

impl core::error::Error for RegexError {}

/// Label for regex patterns.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum RegexPattern {
    /// This is a pattern for the `regex` crate.
    Basic(String),

    /// This is a pattern for the `fancy_regex` crate.
    Fancy(String),

    /// This pattern will try the `regex` crate first,
    /// and fallback to `fancy_regex` if it fails.
    Adaptive(String),
}

impl<S: AsRef<str>> From<S> for RegexPattern {
    fn from(pattern: S) -> Self {
        Self::Adaptive(pattern.as_ref().to_string())
    }
}

impl RegexPattern {
    /// Get the underlying regex pattern.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Basic(pattern) => pattern,
            Self::Fancy(pattern) => pattern,
            Self::Adaptive(pattern) => pattern,
        }
    }

    /// The same pattern, anchored to match an entire haystack.
    ///
    /// Keeps the engine label.
    pub fn anchored(&self) -> Self {
        let anchored = format!(r"\A(?:{})\z", self.as_str());
        match self {
            Self::Basic(_) => Self::Basic(anchored),
            Self::Fancy(_) => Self::Fancy(anchored),
            Self::Adaptive(_) => Self::Adaptive(anchored),
        }
    }

    /// Compile the regex pattern into a `RegexWrapper`.
    pub fn compile(&self) -> Result<RegexWrapper, RegexError> {
        match self {
            Self::Basic(pattern) => regex::Regex::new(pattern)
                .map(RegexWrapper::from)
                .map_err(RegexError::from),
            Self::Fancy(pattern) => fancy_regex::Regex::new(pattern)
                .map(RegexWrapper::from)
                .map_err(RegexError::from),
            Self::Adaptive(pattern) => regex::Regex::new(pattern)
                .map(RegexWrapper::from)
                .or_else(|_| {
                    fancy_regex::Regex::new(pattern)
                        .map(RegexWrapper::from)
                        .map_err(RegexError::from)
                }),
        }
    }
}

/// Wrapper for compiled regex patterns.
#[derive(Debug, Clone)]
pub enum RegexWrapper {
    /// Wrapper for `regex::Regex`.
    Basic(regex::Regex),

    /// Wrapper for `fancy_regex::Regex`.
    Fancy(fancy_regex::Regex),
}

impl From<regex::Regex> for RegexWrapper {
    fn from(regex: regex::Regex) -> Self {
        Self::Basic(regex)
    }
}

impl From<fancy_regex::Regex> for RegexWrapper {
    fn from(regex: fancy_regex::Regex) -> Self {
        Self::Fancy(regex)
    }
}

impl RegexWrapper {
    /// Is this `Basic`?
    pub fn is_basic(&self) -> bool {
        matches!(self, Self::Basic(_))
    }

    /// Is this `Fancy`?
    pub fn is_fancy(&self) -> bool {
        matches!(self, Self::Fancy(_))
    }

    /// Get the underlying regex pattern.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Basic(regex) => regex.as_str(),
            Self::Fancy(regex) => regex.as_str(),
        }
    }

    /// Does the pattern match anywhere in `haystack`?
    ///
    /// A `fancy_regex` runtime failure (backtrack limit) counts as no match.
    pub fn is_match(
        &self,
        haystack: &str,
    ) -> bool {
        match self {
            Self::Basic(regex) => regex.is_match(haystack),
            Self::Fancy(regex) => match regex.is_match(haystack) {
                Ok(found) => found,
                Err(err) => {
                    log::warn!("regex {:?} failed on match: {err}", regex.as_str());
                    false
                }
            },
        }
    }

    /// Iterate over the byte ranges of all non-overlapping matches.
    ///
    /// A `fancy_regex` runtime failure ends the iteration early.
    pub fn find_iter<'r, 'h>(
        &'r self,
        haystack: &'h str,
    ) -> MatchRanges<'r, 'h> {
        match self {
            Self::Basic(regex) => MatchRanges::Basic(regex.find_iter(haystack)),
            Self::Fancy(regex) => MatchRanges::Fancy(regex.find_iter(haystack)),
        }
    }
}

/// Iterator over match ranges of a [`RegexWrapper`].
pub enum MatchRanges<'r, 'h> {
    /// Wrapper for `regex::Matches`.
    Basic(regex::Matches<'r, 'h>),

    /// Wrapper for `fancy_regex::Matches`.
    Fancy(fancy_regex::Matches<'r, 'h>),
}

impl Iterator for MatchRanges<'_, '_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Basic(matches) => matches.next().map(|m| m.range()),
            Self::Fancy(matches) => match matches.next()? {
                Ok(m) => Some(m.range()),
                Err(err) => {
                    log::warn!("regex scan aborted: {err}");
                    None
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adaptive_falls_up_to_fancy() {
        let basic = RegexPattern::from(r"\w+").compile().unwrap();
        assert!(basic.is_basic());

        // look-ahead is only supported by fancy_regex.
        let fancy = RegexPattern::from(r"\w+(?=!)").compile().unwrap();
        assert!(fancy.is_fancy());

        assert_eq!(
            fancy.find_iter("hey you!").collect::<Vec<_>>(),
            vec![4..7]
        );
    }

    #[test]
    fn test_basic_rejects_fancy_syntax() {
        let err = RegexPattern::Basic(r"\w+(?=!)".to_string()).compile();
        assert!(matches!(err, Err(RegexError::Basic(_))));
    }

    #[test]
    fn test_anchored() {
        let pattern = RegexPattern::from(r"a|ab");
        assert_eq!(pattern.anchored().as_str(), r"\A(?:a|ab)\z");

        let re = pattern.anchored().compile().unwrap();
        assert!(re.is_match("ab"));
        assert!(re.is_match("a"));
        assert!(!re.is_match("abc"));
    }

    #[test]
    fn test_find_iter() {
        let re = RegexPattern::from(r"\w+").compile().unwrap();
        assert_eq!(
            re.find_iter("see http://x now").collect::<Vec<_>>(),
            vec![0..3, 4..8, 11..12, 13..16]
        );
    }
}
