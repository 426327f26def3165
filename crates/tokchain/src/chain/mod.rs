//! # Chain
//!
//! The n-gram model. A [`Chain`] owns a [`ContextTable`] mapping hashed
//! contexts (the concatenated text of `1..=N` preceding tokens) to
//! next-token counts, and generates new token sequences by weighted
//! sampling over every known context order.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//!
//! use rand::{SeedableRng, rngs::StdRng};
//! use tokchain::{
//!     chain::{Chain, ChainOptions, GenerateOptions},
//!     tokenizer::presets,
//! };
//!
//! let tokenizer = Arc::new(presets::simple_english().unwrap());
//! let mut chain = Chain::new(tokenizer, ChainOptions::default().with_order(2)).unwrap();
//! chain.train("The cat sat on the mat.");
//!
//! let mut rng = StdRng::seed_from_u64(0);
//! let text = chain
//!     .generate_text(GenerateOptions::default().with_max_length(20), &mut rng)
//!     .unwrap();
//! assert!(!text.is_empty());
//! ```

mod chain_options;
mod context_table;
mod generation;
mod hashing;
mod model;

#[doc(inline)]
pub use chain_options::*;
#[doc(inline)]
pub use context_table::*;
#[doc(inline)]
pub use generation::*;
#[doc(inline)]
pub use hashing::*;
#[doc(inline)]
pub use model::*;
