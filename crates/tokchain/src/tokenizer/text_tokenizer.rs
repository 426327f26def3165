//! # Tokenizer

use std::borrow::Cow;

use crate::{
    errors::TCResult,
    token_types::{END_TEXT, START_TEXT, TokenTypeDef, TokenTypeRegistry},
    tokenizer::{JoinKey, JoinTable, Token},
};

/// Case policy applied to text before matching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CaseFolding {
    /// Lower-case the text; tokens carry the folded form as their surface text.
    #[default]
    Fold,

    /// Match and emit the text as written.
    Preserve,
}

/// Splits text into typed [`Token`]s and joins them back.
///
/// ## Style Hints
///
/// Instance names should prefer `tokenizer`.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    registry: TokenTypeRegistry,
    joins: JoinTable,
    case_folding: CaseFolding,
}

impl Tokenizer {
    /// Start a [`TokenizerBuilder`].
    pub fn builder() -> TokenizerBuilder {
        TokenizerBuilder::default()
    }

    /// Create a tokenizer from validated parts.
    pub fn new(
        registry: TokenTypeRegistry,
        joins: JoinTable,
        case_folding: CaseFolding,
    ) -> Self {
        Self {
            registry,
            joins,
            case_folding,
        }
    }

    /// The token types.
    pub fn registry(&self) -> &TokenTypeRegistry {
        &self.registry
    }

    /// The join rules.
    pub fn joins(&self) -> &JoinTable {
        &self.joins
    }

    /// The case policy.
    pub fn case_folding(&self) -> CaseFolding {
        self.case_folding
    }

    /// Apply the case policy, and blank any sentinel characters.
    ///
    /// Sentinels mark sequence boundaries only; raw text never supplies them.
    pub fn normalize<'a>(
        &self,
        text: &'a str,
    ) -> Cow<'a, str> {
        let mut text = match self.case_folding {
            CaseFolding::Fold => Cow::Owned(text.to_lowercase()),
            CaseFolding::Preserve => Cow::Borrowed(text),
        };
        if text.contains(START_TEXT) || text.contains(END_TEXT) {
            text = Cow::Owned(text.replace(START_TEXT, " ").replace(END_TEXT, " "));
        }
        text
    }

    /// Split text into content tokens, in order.
    ///
    /// Sentinels are never produced here; the chain adds them.
    pub fn tokenize(
        &self,
        text: &str,
    ) -> Vec<Token> {
        let text = self.normalize(text);
        self.registry
            .scan(&text)
            .into_iter()
            .map(|span| Token::new(span.text, span.tag))
            .collect()
    }

    /// Classify a single token text.
    pub fn token_of(
        &self,
        text: &str,
    ) -> Token {
        let def = self.registry.token_of(text);
        Token::new(text, def.tag().clone())
    }

    /// Join tokens back into text.
    ///
    /// Walks every adjacent pair, including the virtual boundaries before the
    /// first and after the last token, and emits `separator + right_text`.
    /// Nothing is emitted for a boundary or sentinel on the right; sentinels
    /// still select separators as the left side of a pair.
    pub fn join<'t, I>(
        &self,
        tokens: I,
    ) -> String
    where
        I: IntoIterator<Item = &'t Token>,
    {
        let mut output = String::new();
        let mut left: Option<&Token> = None;
        for right in tokens {
            if !right.is_sentinel() {
                output.push_str(self.joins.separator(left, Some(right)));
                output.push_str(right.text());
            }
            left = Some(right);
        }
        output
    }
}

/// Builder for [`Tokenizer`].
///
/// Validation happens in [`TokenizerBuilder::build`]:
/// * tags must be unique and not reserved,
/// * priorities must be distinct unless ties are allowed,
/// * the join table must have a `(None, None)` default.
#[derive(Debug, Clone, Default)]
pub struct TokenizerBuilder {
    types: Vec<TokenTypeDef>,
    joins: Vec<(JoinKey, String)>,
    case_folding: CaseFolding,
    allow_priority_ties: bool,
}

impl TokenizerBuilder {
    /// Register a token type.
    pub fn with_type(
        mut self,
        def: TokenTypeDef,
    ) -> Self {
        self.types.push(def);
        self
    }

    /// Add a join rule.
    pub fn with_join<S: Into<String>>(
        mut self,
        key: JoinKey,
        separator: S,
    ) -> Self {
        self.joins.push((key, separator.into()));
        self
    }

    /// Set the case policy.
    pub fn with_case_folding(
        self,
        case_folding: CaseFolding,
    ) -> Self {
        Self {
            case_folding,
            ..self
        }
    }

    /// Allow equal priorities; registration order then breaks ties.
    pub fn with_priority_ties(
        self,
        allow_priority_ties: bool,
    ) -> Self {
        Self {
            allow_priority_ties,
            ..self
        }
    }

    /// Validate and build the [`Tokenizer`].
    pub fn build(self) -> TCResult<Tokenizer> {
        let registry = TokenTypeRegistry::new(self.types, self.allow_priority_ties)?;
        let joins = JoinTable::new(self.joins)?;
        log::debug!(
            "built tokenizer: {} types, {} join rules",
            registry.len(),
            joins.len()
        );
        Ok(Tokenizer::new(registry, joins, self.case_folding))
    }
}
