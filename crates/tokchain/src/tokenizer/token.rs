//! # Tokens

use compact_str::CompactString;

use crate::token_types::{END_TEXT, START_TEXT, TypeTag};

/// A classified piece of text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token {
    text: CompactString,
    tag: TypeTag,
}

/// The Start sentinel; opens every trained and generated sequence.
pub static START_TOKEN: Token = Token {
    text: CompactString::const_new(START_TEXT),
    tag: TypeTag::SPECIAL,
};

/// The End sentinel; closes every trained sequence and ends generation.
pub static END_TOKEN: Token = Token {
    text: CompactString::const_new(END_TEXT),
    tag: TypeTag::SPECIAL,
};

impl Token {
    /// Create a new token.
    pub fn new<S, T>(
        text: S,
        tag: T,
    ) -> Self
    where
        S: Into<CompactString>,
        T: Into<TypeTag>,
    {
        Self {
            text: text.into(),
            tag: tag.into(),
        }
    }

    /// The token text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The token type.
    pub fn tag(&self) -> &TypeTag {
        &self.tag
    }

    /// Is this a Start/End sentinel?
    pub fn is_sentinel(&self) -> bool {
        self.tag == TypeTag::SPECIAL
    }

    /// Is this the Start sentinel?
    pub fn is_start(&self) -> bool {
        self == &START_TOKEN
    }

    /// Is this the End sentinel?
    pub fn is_end(&self) -> bool {
        self == &END_TOKEN
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        self.text()
    }
}

impl core::fmt::Display for Token {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.write_str(self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels() {
        assert!(START_TOKEN.is_sentinel());
        assert!(START_TOKEN.is_start());
        assert!(!START_TOKEN.is_end());
        assert!(END_TOKEN.is_end());
        assert_ne!(START_TOKEN, END_TOKEN);

        let word = Token::new("hi", "word");
        assert!(!word.is_sentinel());
        assert_eq!(word.text(), "hi");
        assert_eq!(word.tag().as_str(), "word");
        assert_eq!(word.to_string(), "hi");
    }

    #[test]
    fn test_equality_includes_type() {
        assert_eq!(Token::new("a", "word"), Token::new("a", "word"));
        assert_ne!(Token::new("a", "word"), Token::new("a", "punct"));
    }
}
