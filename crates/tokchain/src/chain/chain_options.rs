//! # Chain Options

use serde::{Deserialize, Serialize};

use crate::errors::{TCResult, TokchainError};

/// How candidate maps from different context orders are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderWeighting {
    /// Every order contributes its raw counts.
    #[default]
    Uniform,

    /// A context of length `L` contributes its counts multiplied by `L`,
    /// favoring longer, more specific contexts.
    ByOrder,
}

/// Case policy for the text that is hashed into a context key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContextCase {
    /// Lower-case context text before hashing.
    #[default]
    Folded,

    /// Hash context text as given.
    Verbatim,
}

/// Options for a [`Chain`](super::Chain).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainOptions {
    /// The maximum association order `N`.
    pub order: usize,

    /// How orders are combined during generation.
    pub weighting: OrderWeighting,

    /// Case policy for context keys.
    pub context_case: ContextCase,
}

impl Default for ChainOptions {
    fn default() -> Self {
        Self {
            order: 2,
            weighting: OrderWeighting::default(),
            context_case: ContextCase::default(),
        }
    }
}

impl ChainOptions {
    /// Set the order `N`.
    pub fn with_order(
        self,
        order: usize,
    ) -> Self {
        Self { order, ..self }
    }

    /// Set the order weighting.
    pub fn with_weighting(
        self,
        weighting: OrderWeighting,
    ) -> Self {
        Self { weighting, ..self }
    }

    /// Set the context case policy.
    pub fn with_context_case(
        self,
        context_case: ContextCase,
    ) -> Self {
        Self {
            context_case,
            ..self
        }
    }

    /// Check the options.
    ///
    /// ## Errors
    /// [`TokchainError::InvalidOrder`] when `order` is zero.
    pub fn validate(&self) -> TCResult<()> {
        if self.order == 0 {
            return Err(TokchainError::InvalidOrder { order: self.order });
        }
        Ok(())
    }

    /// The scale applied to a context of length `len` under this weighting.
    pub fn scale_for(
        &self,
        len: usize,
    ) -> u64 {
        match self.weighting {
            OrderWeighting::Uniform => 1,
            OrderWeighting::ByOrder => len as u64,
        }
    }

    /// Can tables built under `self` and `other` be merged?
    ///
    /// Weighting only affects generation, so it may differ.
    pub fn is_compatible(
        &self,
        other: &Self,
    ) -> bool {
        self.order == other.order && self.context_case == other.context_case
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ChainOptions::default();
        assert_eq!(options.order, 2);
        assert_eq!(options.weighting, OrderWeighting::Uniform);
        assert_eq!(options.context_case, ContextCase::Folded);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        let err = ChainOptions::default().with_order(0).validate().unwrap_err();
        assert!(matches!(err, TokchainError::InvalidOrder { order: 0 }));
    }

    #[test]
    fn test_scale_and_compat() {
        let uniform = ChainOptions::default().with_order(3);
        let by_order = uniform.with_weighting(OrderWeighting::ByOrder);

        assert_eq!(uniform.scale_for(3), 1);
        assert_eq!(by_order.scale_for(3), 3);

        assert!(uniform.is_compatible(&by_order));
        assert!(!uniform.is_compatible(&uniform.with_order(2)));
        assert!(!uniform.is_compatible(&uniform.with_context_case(ContextCase::Verbatim)));
    }
}
