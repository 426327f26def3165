//! # Token Types
//!
//! A [`TokenTypeRegistry`] holds pluggable pattern matchers ([`TokenTypeDef`]),
//! ordered by an explicit integer priority. Scanning text runs the types in
//! that order; strip-enabled types blank out what they claimed so that a narrow
//! high-priority type (a hyperlink, say) keeps its whole span as one token.
//!
//! Type identity is a plain [`TypeTag`] value.

mod registry;
mod token_type_def;
mod type_tag;

#[doc(inline)]
pub use registry::*;
#[doc(inline)]
pub use token_type_def::*;
#[doc(inline)]
pub use type_tag::*;
