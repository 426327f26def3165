//! # Token Type Registry

use core::ops::Range;

use crate::{
    errors::{TCResult, TokchainError},
    support::strings::blank_spans,
    token_types::{TokenTypeDef, TypeTag},
    types::TCHashSet,
};

/// A token found by [`TokenTypeRegistry::scan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedSpan {
    /// Byte range in the scanned text.
    pub range: Range<usize>,

    /// The matched text.
    ///
    /// Taken from the buffer the type scanned, which equals the original
    /// text outside of blanked spans.
    pub text: String,

    /// The type which claimed the span.
    pub tag: TypeTag,
}

/// An ordered set of token types.
///
/// Types are kept sorted by ascending priority; equal priorities (when
/// allowed) keep registration order. The built-in
/// [`TokenTypeDef::special`] and [`TokenTypeDef::unknown`] types are always
/// present, exactly once.
#[derive(Debug, Clone)]
pub struct TokenTypeRegistry {
    types: Vec<TokenTypeDef>,
}

impl TokenTypeRegistry {
    /// Build a registry from user types.
    ///
    /// ## Arguments
    /// * `defs` - the user types, in registration order.
    /// * `allow_priority_ties` - when `false`, two types sharing a priority is an error.
    ///
    /// ## Errors
    /// * [`TokchainError::DuplicateTokenType`] on a repeated or reserved tag.
    /// * [`TokchainError::PriorityCollision`] on a priority tie, unless allowed.
    pub fn new<I>(
        defs: I,
        allow_priority_ties: bool,
    ) -> TCResult<Self>
    where
        I: IntoIterator<Item = TokenTypeDef>,
    {
        let mut types = vec![TokenTypeDef::special()];
        let mut seen: TCHashSet<TypeTag> = [TypeTag::SPECIAL, TypeTag::UNKNOWN]
            .into_iter()
            .collect();

        for def in defs {
            if !seen.insert(def.tag().clone()) {
                return Err(TokchainError::DuplicateTokenType {
                    tag: def.tag().to_string(),
                });
            }
            types.push(def);
        }
        types.push(TokenTypeDef::unknown());

        // stable; ties keep registration order.
        types.sort_by_key(|def| def.priority());

        if !allow_priority_ties {
            for pair in types.windows(2) {
                if pair[0].priority() == pair[1].priority() {
                    return Err(TokchainError::PriorityCollision {
                        priority: pair[0].priority(),
                        first: pair[0].tag().to_string(),
                        second: pair[1].tag().to_string(),
                    });
                }
            }
        }

        Ok(Self { types })
    }

    /// The types, in scan order.
    pub fn types(&self) -> &[TokenTypeDef] {
        &self.types
    }

    /// Number of types, built-ins included.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Always `false`; the built-ins are always present.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Look up a type by tag.
    pub fn get(
        &self,
        tag: &TypeTag,
    ) -> Option<&TokenTypeDef> {
        self.types.iter().find(|def| def.tag() == tag)
    }

    /// The fallback type.
    pub fn unknown(&self) -> &TokenTypeDef {
        // the constructor always appends it; it sorts last.
        &self.types[self.types.len() - 1]
    }

    /// Classify a single, already-known token text.
    ///
    /// Returns the first type in priority order whose whole-token match
    /// succeeds, or the fallback type.
    pub fn token_of(
        &self,
        text: &str,
    ) -> &TokenTypeDef {
        self.types
            .iter()
            .find(|def| def.is_match(text))
            .unwrap_or_else(|| self.unknown())
    }

    /// Scan `text` into typed spans.
    ///
    /// Each type, in priority order, records all of its matches against the
    /// current buffer; strip-enabled types then blank their matches so
    /// lower-priority types cannot match inside them. The result is sorted
    /// by start offset; for equal offsets the earlier-priority match wins.
    pub fn scan(
        &self,
        text: &str,
    ) -> Vec<TypedSpan> {
        let mut buffer: Option<String> = None;
        let mut spans: Vec<TypedSpan> = Vec::new();

        for def in &self.types {
            let current = buffer.as_deref().unwrap_or(text);
            let ranges = def.find_ranges(current);
            if ranges.is_empty() {
                continue;
            }

            spans.extend(ranges.iter().map(|range| TypedSpan {
                range: range.clone(),
                text: current[range.clone()].to_string(),
                tag: def.tag().clone(),
            }));

            if def.strip() {
                buffer = Some(blank_spans(current, ranges));
            }
        }

        spans.sort_by_key(|span| span.range.start);
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link_word_registry() -> TokenTypeRegistry {
        TokenTypeRegistry::new(
            [
                TokenTypeDef::regex("word", r"\w+", 1).unwrap(),
                TokenTypeDef::regex("link", r"http://\w+", 0).unwrap(),
            ],
            false,
        )
        .unwrap()
    }

    #[test]
    fn test_priority_order() {
        let registry = link_word_registry();
        let tags = registry
            .types()
            .iter()
            .map(|def| def.tag().as_str())
            .collect::<Vec<_>>();
        assert_eq!(tags, vec!["special", "link", "word", "unknown"]);
        assert_eq!(registry.len(), 4);
        assert!(!registry.is_empty());
        assert_eq!(registry.unknown().tag(), &TypeTag::UNKNOWN);
    }

    #[test]
    fn test_scan_priority_and_strip() {
        let registry = link_word_registry();
        let spans = registry.scan("see http://x now");
        let texts = spans.iter().map(|s| s.text.as_str()).collect::<Vec<_>>();
        assert_eq!(texts, vec!["see", "http://x", "now"]);
        assert_eq!(spans[1].tag.as_str(), "link");
        assert_eq!(spans[1].range, 4..12);
    }

    #[test]
    fn test_scan_without_strip_keeps_fragments() {
        let registry = TokenTypeRegistry::new(
            [
                TokenTypeDef::regex("word", r"\w+", 1).unwrap(),
                TokenTypeDef::regex("link", r"http://\w+", 0)
                    .unwrap()
                    .with_strip(false),
            ],
            false,
        )
        .unwrap();

        let spans = registry.scan("see http://x now");
        let texts = spans.iter().map(|s| s.text.as_str()).collect::<Vec<_>>();
        // equal start offsets: the higher-priority link comes first.
        assert_eq!(texts, vec!["see", "http://x", "http", "x", "now"]);
    }

    #[test]
    fn test_token_of() {
        let registry = link_word_registry();
        assert_eq!(registry.token_of("http://x").tag().as_str(), "link");
        assert_eq!(registry.token_of("now").tag().as_str(), "word");
        assert_eq!(registry.token_of("?!").tag(), &TypeTag::UNKNOWN);
        assert_eq!(registry.token_of("\u{3}").tag(), &TypeTag::SPECIAL);
    }

    #[test]
    fn test_duplicate_tags() {
        let err = TokenTypeRegistry::new(
            [
                TokenTypeDef::regex("word", r"\w+", 1).unwrap(),
                TokenTypeDef::regex("word", r"\d+", 2).unwrap(),
            ],
            false,
        )
        .unwrap_err();
        assert!(matches!(err, TokchainError::DuplicateTokenType { .. }));

        let err = TokenTypeRegistry::new(
            [TokenTypeDef::regex("unknown", r"\w+", 1).unwrap()],
            false,
        )
        .unwrap_err();
        assert!(matches!(err, TokchainError::DuplicateTokenType { .. }));
    }

    #[test]
    fn test_priority_ties() {
        let defs = || {
            [
                TokenTypeDef::regex("word", r"\w+", 1).unwrap(),
                TokenTypeDef::regex("number", r"\d+", 1).unwrap(),
            ]
        };

        let err = TokenTypeRegistry::new(defs(), false).unwrap_err();
        assert!(matches!(
            err,
            TokchainError::PriorityCollision { priority: 1, .. }
        ));

        // ties allowed: registration order decides.
        let registry = TokenTypeRegistry::new(defs(), true).unwrap();
        assert_eq!(registry.token_of("42").tag().as_str(), "word");
        let spans = registry.scan("a 42");
        assert!(spans.iter().all(|s| s.tag.as_str() == "word"));
    }
}
