//! # Regex Utilities
//!
//! Token type patterns are mostly plain regular expressions, and the [`regex`] crate
//! handles them fastest. Some patterns (look-around around markdown markers, for
//! instance) need the extended machinery of the [`fancy_regex`] crate; we only fall
//! up to it when the basic engine rejects the pattern.
//!
//! * Labeling Patterns - [`RegexPattern`]
//!   * [`RegexPattern::Basic`] - a pattern which was written for basic regular expressions.
//!   * [`RegexPattern::Fancy`] - a pattern which was written for regex extensions.
//!   * [`RegexPattern::Adaptive`] - unknown target, try basic; then fall-up to fancy.
//! * Wrapping Compiled Regex - [`RegexWrapper`]

mod alt_choice;
mod regex_wrapper;

#[doc(inline)]
pub use alt_choice::alternate_choice_regex_pattern;
#[doc(inline)]
pub use regex_wrapper::*;
