//! # Tokenizer Presets
//!
//! Ready-made [`Tokenizer`] configurations.
//!
//! ## Example
//! ```rust
//! use tokchain::tokenizer::presets;
//!
//! let tokenizer = presets::simple_english().unwrap();
//! let tokens = tokenizer.tokenize("It's a test, isn't it?");
//! assert_eq!(tokenizer.join(&tokens), "it's a test, isn't it?");
//! ```

use crate::{
    errors::TCResult,
    token_types::{TokenTypeDef, TypeTag},
    tokenizer::{JoinKey, Tokenizer},
};

/// Runs of word characters.
pub const WORD: TypeTag = TypeTag::from_static("word");

/// Runs of anything that is neither a word character nor whitespace.
pub const PUNCTUATION: TypeTag = TypeTag::from_static("punctuation");

/// Bare `http(s)://` links.
pub const LINK: TypeTag = TypeTag::from_static("link");

/// Markdown `[text](target)` links.
pub const MARKDOWN_LINK: TypeTag = TypeTag::from_static("markdown_link");

/// Markdown inline code spans.
pub const INLINE_CODE: TypeTag = TypeTag::from_static("inline_code");

/// Markdown `*emphasis*` and `**strong**` spans.
pub const EMPHASIS: TypeTag = TypeTag::from_static("emphasis");

const WORD_PATTERN: &str = r"\w+";
const PUNCTUATION_PATTERN: &str = r"[^\w\s\x02\x03]+";

fn word_type(priority: i32) -> TCResult<TokenTypeDef> {
    TokenTypeDef::regex(WORD, WORD_PATTERN, priority)
}

fn punctuation_type(priority: i32) -> TCResult<TokenTypeDef> {
    TokenTypeDef::regex(PUNCTUATION, PUNCTUATION_PATTERN, priority)
}

/// Words and punctuation.
///
/// Joins put a space between words and after punctuation, no space before
/// punctuation or inside punctuation runs, and glue a word to a preceding
/// apostrophe (`isn't`, `it's`).
pub fn simple_english() -> TCResult<Tokenizer> {
    Tokenizer::builder()
        .with_type(word_type(10)?)
        .with_type(punctuation_type(20)?)
        .with_join(JoinKey::between(PUNCTUATION, WORD).with_left_text("'"), "")
        .with_join(JoinKey::between(PUNCTUATION, WORD), " ")
        .with_join(JoinKey::between(PUNCTUATION, PUNCTUATION), "")
        .with_join(JoinKey::between(WORD, WORD), " ")
        .with_join(JoinKey::any(), "")
        .build()
}

/// [`simple_english`] plus markdown-ish spans kept whole.
///
/// Markdown links, bare links, inline code and emphasis are scanned first,
/// with strip on, so their inner words and punctuation never surface as
/// separate tokens. These spans join like words.
pub fn markdown_aware() -> TCResult<Tokenizer> {
    let wordish = [WORD, LINK, MARKDOWN_LINK, INLINE_CODE, EMPHASIS];

    let mut builder = Tokenizer::builder()
        .with_type(TokenTypeDef::regex(
            MARKDOWN_LINK,
            r"\[[^\]\n]+\]\([^)\s]+\)",
            1,
        )?)
        .with_type(TokenTypeDef::regex(
            LINK,
            r#"https?://[^\s<>()\[\]]*[^\s<>()\[\].,;:!?'"]"#,
            2,
        )?)
        .with_type(TokenTypeDef::regex(INLINE_CODE, r"`[^`\n]+`", 3)?)
        .with_type(TokenTypeDef::regex(
            EMPHASIS,
            r"\*\*[^*\n]+\*\*|\*[^*\s][^*\n]*\*",
            4,
        )?)
        .with_type(word_type(10)?)
        .with_type(punctuation_type(20)?);

    for left in &wordish {
        for right in &wordish {
            builder = builder.with_join(JoinKey::between(left.clone(), right.clone()), " ");
        }
    }
    for right in &wordish {
        builder = builder.with_join(JoinKey::between(PUNCTUATION, right.clone()), " ");
    }

    builder
        .with_join(JoinKey::between(PUNCTUATION, WORD).with_left_text("'"), "")
        .with_join(JoinKey::between(PUNCTUATION, PUNCTUATION), "")
        .with_join(JoinKey::any(), "")
        .build()
}
