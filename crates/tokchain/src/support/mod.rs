//! # Support Utilities

pub mod regex;
pub mod strings;
