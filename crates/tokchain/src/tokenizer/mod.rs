//! # Tokenizer
//!
//! [`Tokenizer::tokenize`] normalizes text and scans it through a
//! [`TokenTypeRegistry`](crate::token_types::TokenTypeRegistry) into typed
//! [`Token`]s. [`Tokenizer::join`] reverses the process, picking the separator
//! between every adjacent pair from a [`JoinTable`].
//!
//! Sentinels ([`START_TOKEN`], [`END_TOKEN`]) are never produced by
//! `tokenize`; sequences are framed by the chain.
//!
//! ## Example
//! ```rust
//! use tokchain::{
//!     token_types::TokenTypeDef,
//!     tokenizer::{JoinKey, Tokenizer},
//! };
//!
//! let tokenizer = Tokenizer::builder()
//!     .with_type(TokenTypeDef::regex("link", r"http://\w+", 0).unwrap())
//!     .with_type(TokenTypeDef::regex("word", r"\w+", 1).unwrap())
//!     .with_join(JoinKey::any(), " ")
//!     .build()
//!     .unwrap();
//!
//! let tokens = tokenizer.tokenize("see http://x now");
//! let texts: Vec<&str> = tokens.iter().map(|t| t.text()).collect();
//! assert_eq!(texts, vec!["see", "http://x", "now"]);
//! ```

mod join_rules;
pub mod presets;
mod text_tokenizer;
mod token;

#[doc(inline)]
pub use join_rules::*;
#[doc(inline)]
pub use text_tokenizer::*;
#[doc(inline)]
pub use token::*;
