//! # Error Types

use crate::support::regex::RegexError;

/// Errors from tokchain operations.
#[derive(Debug, thiserror::Error)]
pub enum TokchainError {
    /// A weighted choice was asked to draw from an empty distribution,
    /// or from one whose total weight is not positive.
    #[error("empty distribution: no positive total weight to draw from")]
    EmptyDistribution,

    /// A weighted choice was handed a negative or non-finite weight.
    #[error("invalid weight: {weight}")]
    InvalidWeight {
        /// The offending weight.
        weight: f64,
    },

    /// Generation reached a token window with no trained context at any order.
    #[error("no candidates for context {context:?}")]
    NoCandidates {
        /// The token texts of the window that dead-ended.
        context: Vec<String>,
    },

    /// The join table has no fully-generic `(None, None)` entry.
    #[error("join table is missing the default (None, None) entry")]
    MissingDefaultJoin,

    /// Two token types were registered under the same tag.
    #[error("duplicate token type: {tag}")]
    DuplicateTokenType {
        /// The duplicated tag.
        tag: String,
    },

    /// Two token types share a priority while strict priority checking is on.
    #[error("token types {first} and {second} share priority {priority}")]
    PriorityCollision {
        /// The shared priority.
        priority: i32,

        /// The first registered type.
        first: String,

        /// The second registered type.
        second: String,
    },

    /// The chain order `N` must be positive.
    #[error("chain order must be >= 1, got {order}")]
    InvalidOrder {
        /// The rejected order.
        order: usize,
    },

    /// Two chains (or a chain and a stored table) disagree on their options.
    #[error("model mismatch: {0}")]
    ModelMismatch(String),

    /// A token type pattern failed to compile.
    #[error(transparent)]
    Regex(#[from] RegexError),

    /// Model (de)serialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] postcard::Error),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for tokchain operations.
pub type TCResult<T> = core::result::Result<T, TokchainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TokchainError::NoCandidates {
            context: vec!["z".to_string()],
        };
        assert_eq!(err.to_string(), r#"no candidates for context ["z"]"#);

        let err = TokchainError::PriorityCollision {
            priority: 3,
            first: "word".to_string(),
            second: "number".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "token types word and number share priority 3"
        );

        assert_eq!(
            TokchainError::InvalidOrder { order: 0 }.to_string(),
            "chain order must be >= 1, got 0"
        );
    }
}
