//! # `tokchain` Tokenizing N-Gram Text Model
//!
//! `tokchain` segments text into typed tokens, trains a hashed, order-`N`
//! association table over token sequences, and generates new text by weighted
//! sampling over every known context order.
//!
//! See:
//! * [`token_types`] for the prioritized pattern matchers.
//! * [`tokenizer`] to split text into tokens and join tokens back into text.
//! * [`weighted`] for count merging and weighted choice.
//! * [`chain`] to train, persist, and generate from a model.
//!
//! Ready-made tokenizers are available through:
//! * [`tokenizer::presets`]
//!
//! ## Training and Generating
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use tokchain::{
//!     chain::{Chain, ChainOptions, GenerateOptions},
//!     tokenizer::presets,
//! };
//!
//! let tokenizer = Arc::new(presets::simple_english()?);
//! let mut chain = Chain::new(tokenizer, ChainOptions::default().with_order(3))?;
//!
//! chain.train_samples([
//!     "The quick brown fox jumps over the lazy dog.",
//!     "The lazy dog sleeps.",
//! ]);
//!
//! let text = chain.generate_text(
//!     GenerateOptions::default().with_max_length(32),
//!     &mut rand::rng(),
//! )?;
//! assert!(text.starts_with("the"));
//! # Ok::<(), tokchain::errors::TokchainError>(())
//! ```
//!
//! ## Crate Features
#![doc = document_features::document_features!()]
#![warn(missing_docs, unused)]

pub mod chain;
pub mod errors;
pub mod support;
pub mod token_types;
pub mod tokenizer;
pub mod types;
pub mod weighted;
