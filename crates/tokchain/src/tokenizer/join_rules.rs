//! # Join Rules
//!
//! Separator selection for reassembling tokens into text.
//!
//! A [`JoinKey`] names a left type, a right type, and optionally the exact
//! text of one of the two tokens; `None` on either side matches anything,
//! including the virtual boundary before the first token and after the last.
//! Lookup for a concrete pair walks from the most specific key to the fully
//! generic one and takes the first key present:
//!
//! 1. `(left, right, LeftText(left text))`
//! 2. `(left, right, RightText(right text))`
//! 3. `(left, right)`
//! 4. `(left, None)`
//! 5. `(None, right)`
//! 6. `(None, None)`

use compact_str::CompactString;

use crate::{
    errors::{TCResult, TokchainError},
    token_types::TypeTag,
    tokenizer::Token,
    types::{TCHashMap, hash_map_new},
};

/// A token text refining a type-pair join key.
///
/// The refinement matches only when the whole token text is equal; a `'`
/// rule does not fire for a `!'` token.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Boundary {
    /// The exact text of the left token.
    LeftText(CompactString),

    /// The exact text of the right token.
    RightText(CompactString),
}

/// A join-table key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct JoinKey {
    /// The left type; `None` matches anything.
    pub left: Option<TypeTag>,

    /// The right type; `None` matches anything.
    pub right: Option<TypeTag>,

    /// Optional boundary refinement.
    pub boundary: Option<Boundary>,
}

impl JoinKey {
    /// The fully generic `(None, None)` key.
    pub fn any() -> Self {
        Self::default()
    }

    /// Key for `left` followed by `right`.
    pub fn between<L, R>(
        left: L,
        right: R,
    ) -> Self
    where
        L: Into<TypeTag>,
        R: Into<TypeTag>,
    {
        Self {
            left: Some(left.into()),
            right: Some(right.into()),
            boundary: None,
        }
    }

    /// Key for `left` followed by anything.
    pub fn after<L: Into<TypeTag>>(left: L) -> Self {
        Self {
            left: Some(left.into()),
            ..Self::default()
        }
    }

    /// Key for anything followed by `right`.
    pub fn before<R: Into<TypeTag>>(right: R) -> Self {
        Self {
            right: Some(right.into()),
            ..Self::default()
        }
    }

    /// Refine by the exact text of the left token.
    pub fn with_left_text<S: Into<CompactString>>(
        self,
        text: S,
    ) -> Self {
        Self {
            boundary: Some(Boundary::LeftText(text.into())),
            ..self
        }
    }

    /// Refine by the exact text of the right token.
    pub fn with_right_text<S: Into<CompactString>>(
        self,
        text: S,
    ) -> Self {
        Self {
            boundary: Some(Boundary::RightText(text.into())),
            ..self
        }
    }

    /// The lookup keys for an adjacent pair, most specific first.
    pub fn fallback_chain(
        left: Option<&Token>,
        right: Option<&Token>,
    ) -> Vec<JoinKey> {
        let left_tag = left.map(|t| t.tag().clone());
        let right_tag = right.map(|t| t.tag().clone());
        let pair = JoinKey {
            left: left_tag.clone(),
            right: right_tag.clone(),
            boundary: None,
        };

        let mut keys = Vec::with_capacity(6);
        if let Some(left) = left {
            keys.push(pair.clone().with_left_text(left.text()));
        }
        if let Some(right) = right {
            keys.push(pair.clone().with_right_text(right.text()));
        }
        keys.push(pair);
        keys.push(JoinKey {
            left: left_tag,
            ..JoinKey::default()
        });
        keys.push(JoinKey {
            right: right_tag,
            ..JoinKey::default()
        });
        keys.push(JoinKey::any());
        keys
    }
}

/// Separator table keyed by [`JoinKey`].
///
/// Always holds the `(None, None)` default.
#[derive(Clone, Debug, PartialEq)]
pub struct JoinTable {
    rules: TCHashMap<JoinKey, String>,
}

impl JoinTable {
    /// Build a table from rules.
    ///
    /// Later rules for the same key replace earlier ones.
    ///
    /// ## Errors
    /// [`TokchainError::MissingDefaultJoin`] when no `(None, None)` rule is given.
    pub fn new<I, S>(rules: I) -> TCResult<Self>
    where
        I: IntoIterator<Item = (JoinKey, S)>,
        S: Into<String>,
    {
        let mut table: TCHashMap<JoinKey, String> = hash_map_new();
        for (key, sep) in rules {
            table.insert(key, sep.into());
        }
        if !table.contains_key(&JoinKey::any()) {
            return Err(TokchainError::MissingDefaultJoin);
        }
        Ok(Self { rules: table })
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Always `false`; the default rule is always present.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The separator stored for exactly `key`, if any.
    pub fn get(
        &self,
        key: &JoinKey,
    ) -> Option<&str> {
        self.rules.get(key).map(String::as_str)
    }

    /// Resolve the separator between two adjacent tokens.
    ///
    /// `None` stands for the virtual boundary before the first / after the
    /// last token.
    pub fn separator(
        &self,
        left: Option<&Token>,
        right: Option<&Token>,
    ) -> &str {
        for key in JoinKey::fallback_chain(left, right) {
            if let Some(sep) = self.rules.get(&key) {
                return sep;
            }
        }
        // unreachable by construction; the chain ends with the default key.
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> JoinTable {
        JoinTable::new([
            (JoinKey::between("punct", "word").with_left_text("'"), ""),
            (JoinKey::between("punct", "word"), " "),
            (JoinKey::between("punct", "punct"), ""),
            (JoinKey::between("word", "word"), " "),
            (JoinKey::after("link"), " "),
            (JoinKey::before("link"), " "),
            (JoinKey::any(), ""),
        ])
        .unwrap()
    }

    #[test]
    fn test_missing_default() {
        let err = JoinTable::new([(JoinKey::between("word", "word"), " ")]).unwrap_err();
        assert!(matches!(err, TokchainError::MissingDefaultJoin));
    }

    #[test]
    fn test_fallback_chain_order() {
        let a = Token::new("ab", "word");
        let b = Token::new("cd", "punct");
        let keys = JoinKey::fallback_chain(Some(&a), Some(&b));
        assert_eq!(
            keys,
            vec![
                JoinKey::between("word", "punct").with_left_text("ab"),
                JoinKey::between("word", "punct").with_right_text("cd"),
                JoinKey::between("word", "punct"),
                JoinKey::after("word"),
                JoinKey::before("punct"),
                JoinKey::any(),
            ]
        );

        let keys = JoinKey::fallback_chain(None, Some(&b));
        assert_eq!(keys[0], JoinKey::before("punct").with_right_text("cd"));
        assert_eq!(keys.last(), Some(&JoinKey::any()));
    }

    #[test]
    fn test_separator_lookup() {
        let table = table();
        let word = Token::new("it", "word");
        let apos = Token::new("'", "punct");
        let comma = Token::new(",", "punct");
        let closing = Token::new("!'", "punct");
        let link = Token::new("http://x", "link");

        assert_eq!(table.separator(Some(&word), Some(&word)), " ");
        assert_eq!(table.separator(Some(&word), Some(&comma)), "");
        assert_eq!(table.separator(Some(&comma), Some(&word)), " ");
        assert_eq!(table.separator(Some(&apos), Some(&word)), "");
        // only an exact `'` token glues.
        assert_eq!(table.separator(Some(&closing), Some(&word)), " ");
        assert_eq!(table.separator(Some(&comma), Some(&apos)), "");
        assert_eq!(table.separator(Some(&link), Some(&comma)), " ");
        assert_eq!(table.separator(Some(&comma), Some(&link)), " ");
        assert_eq!(table.separator(None, Some(&word)), "");
        assert_eq!(table.separator(Some(&word), None), "");
    }
}
