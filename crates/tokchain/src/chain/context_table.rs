//! # Context Table
//!
//! The trained state of a chain: `context hash -> {next token text -> count}`.
//!
//! Contexts are keyed by a fixed-width hash of their concatenated text, not
//! by the text itself. Two distinct contexts which hash alike, or whose texts
//! concatenate alike (`"ab" + "c"` and `"a" + "bc"`), share one entry. That
//! noise is accepted; it keeps the table bounded by the number of distinct
//! keys rather than by context length.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::{
    chain::{ChainOptions, OrderWeighting},
    errors::{TCResult, TokchainError},
    types::{ContextHash, TCHashMap, hash_map_new},
    weighted::CountMap,
};

/// Per-context next-token counts.
pub type NextCounts = CountMap<CompactString, u64>;

/// The hashed, append-only count table behind a [`Chain`](super::Chain).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextTable {
    options: ChainOptions,
    contexts: TCHashMap<ContextHash, NextCounts>,
}

impl ContextTable {
    /// Create an empty table.
    ///
    /// ## Errors
    /// Fails if `options` do not validate.
    pub fn new(options: ChainOptions) -> TCResult<Self> {
        options.validate()?;
        Ok(Self::empty(options))
    }

    pub(crate) fn empty(options: ChainOptions) -> Self {
        Self {
            options,
            contexts: hash_map_new(),
        }
    }

    /// The options the table was built under.
    pub fn options(&self) -> &ChainOptions {
        &self.options
    }

    /// Change the generation weighting; counts are unaffected.
    pub fn set_weighting(
        &mut self,
        weighting: OrderWeighting,
    ) {
        self.options.weighting = weighting;
    }

    /// Record one observation of `next` following the context `key`.
    pub fn increment(
        &mut self,
        key: ContextHash,
        next: &str,
    ) {
        *self
            .contexts
            .entry(key)
            .or_default()
            .entry(CompactString::from(next))
            .or_default() += 1;
    }

    /// The next-token counts for a context, if it was ever observed.
    pub fn get(
        &self,
        key: ContextHash,
    ) -> Option<&NextCounts> {
        self.contexts.get(&key)
    }

    /// How often `next` followed the context `key`.
    pub fn count(
        &self,
        key: ContextHash,
        next: &str,
    ) -> u64 {
        self.get(key)
            .and_then(|counts| counts.get(next))
            .copied()
            .unwrap_or_default()
    }

    /// Number of distinct context keys.
    pub fn context_count(&self) -> usize {
        self.contexts.len()
    }

    /// Sum of all counts.
    pub fn observation_count(&self) -> u64 {
        self.contexts
            .values()
            .flat_map(|counts| counts.values())
            .sum()
    }

    /// Is the table empty?
    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    /// Iterate over `(key, counts)` entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (ContextHash, &NextCounts)> {
        self.contexts.iter().map(|(&key, counts)| (key, counts))
    }

    /// Add every count of `other` into this table.
    ///
    /// ## Errors
    /// [`TokchainError::ModelMismatch`] if the tables differ in order or
    /// context case policy.
    pub fn merge(
        &mut self,
        other: &ContextTable,
    ) -> TCResult<()> {
        self.check_compatible(other)?;
        for (&key, counts) in &other.contexts {
            let target = self.contexts.entry(key).or_default();
            for (next, &count) in counts {
                *target.entry(next.clone()).or_default() += count;
            }
        }
        Ok(())
    }

    /// [`ContextTable::merge`], consuming `other`.
    pub fn merge_owned(
        &mut self,
        other: ContextTable,
    ) -> TCResult<()> {
        self.check_compatible(&other)?;
        if self.contexts.is_empty() {
            self.contexts = other.contexts;
            return Ok(());
        }
        for (key, counts) in other.contexts {
            let target = self.contexts.entry(key).or_default();
            for (next, count) in counts {
                *target.entry(next).or_default() += count;
            }
        }
        Ok(())
    }

    fn check_compatible(
        &self,
        other: &ContextTable,
    ) -> TCResult<()> {
        if !self.options.is_compatible(&other.options) {
            return Err(TokchainError::ModelMismatch(format!(
                "cannot combine order {} / {:?} with order {} / {:?}",
                self.options.order,
                self.options.context_case,
                other.options.order,
                other.options.context_case,
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::ContextCase;

    #[test]
    fn test_increment_and_count() {
        let mut table = ContextTable::new(ChainOptions::default()).unwrap();
        assert!(table.is_empty());

        table.increment(1, "a");
        table.increment(1, "a");
        table.increment(1, "b");
        table.increment(2, "a");

        assert_eq!(table.count(1, "a"), 2);
        assert_eq!(table.count(1, "b"), 1);
        assert_eq!(table.count(2, "b"), 0);
        assert_eq!(table.count(3, "a"), 0);
        assert_eq!(table.context_count(), 2);
        assert_eq!(table.observation_count(), 4);
        assert_eq!(table.iter().count(), 2);
    }

    #[test]
    fn test_new_validates() {
        assert!(ContextTable::new(ChainOptions::default().with_order(0)).is_err());
    }

    #[test]
    fn test_merge() {
        let mut a = ContextTable::new(ChainOptions::default()).unwrap();
        a.increment(1, "x");

        let mut b = ContextTable::new(ChainOptions::default()).unwrap();
        b.increment(1, "x");
        b.increment(2, "y");

        let mut c = a.clone();
        c.merge(&b).unwrap();
        assert_eq!(c.count(1, "x"), 2);
        assert_eq!(c.count(2, "y"), 1);

        a.merge_owned(b).unwrap();
        assert_eq!(a, c);

        let mut empty = ContextTable::new(ChainOptions::default()).unwrap();
        empty.merge_owned(c.clone()).unwrap();
        assert_eq!(empty, c);
    }

    #[test]
    fn test_merge_mismatch() {
        let mut a = ContextTable::new(ChainOptions::default()).unwrap();
        let b =
            ContextTable::new(ChainOptions::default().with_context_case(ContextCase::Verbatim))
                .unwrap();
        assert!(matches!(
            a.merge(&b).unwrap_err(),
            TokchainError::ModelMismatch(_)
        ));

        // weighting may differ.
        let mut by_order = ContextTable::new(ChainOptions::default()).unwrap();
        by_order.set_weighting(OrderWeighting::ByOrder);
        assert!(a.merge(&by_order).is_ok());
    }
}
