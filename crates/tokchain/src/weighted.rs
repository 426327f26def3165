//! # Weighted Choice and Count Merging
//!
//! A [`CountMap`] is a discrete distribution: each key's weight is its
//! count. Candidate maps harvested from several context orders are summed
//! with [`merge_count_maps`] (or [`merge_scaled_count_maps`]) and sampled with
//! [`weighted_choice`].

use core::hash::Hash;

use num_traits::ToPrimitive;
use rand::Rng;

use crate::{
    errors::{TCResult, TokchainError},
    types::{CountType, TCHashMap, hash_map_new},
};

/// A map from key to its weight.
pub type CountMap<K, C> = TCHashMap<K, C>;

/// Sum any number of count maps into one.
///
/// Keys present in several maps have their counts summed; keys unique to one
/// map pass through unchanged.
pub fn merge_count_maps<'a, K, C, I>(maps: I) -> CountMap<K, C>
where
    K: 'a + Hash + Eq + Clone,
    C: CountType,
    I: IntoIterator<Item = &'a CountMap<K, C>>,
{
    merge_scaled_count_maps(maps.into_iter().map(|map| (map, C::one())))
}

/// Sum count maps, multiplying each map's counts by its own scale first.
///
/// ## Arguments
/// * `maps` - `(map, scale)` pairs.
pub fn merge_scaled_count_maps<'a, K, C, I>(maps: I) -> CountMap<K, C>
where
    K: 'a + Hash + Eq + Clone,
    C: CountType,
    I: IntoIterator<Item = (&'a CountMap<K, C>, C)>,
{
    let mut merged: CountMap<K, C> = hash_map_new();
    for (map, scale) in maps {
        for (key, &count) in map {
            *merged.entry(key.clone()).or_default() += count * scale;
        }
    }
    merged
}

/// Draw one key, with probability proportional to its weight.
///
/// Entries are laid out in key order, so a seeded `rng` gives reproducible
/// draws regardless of the map's iteration order. A uniform draw in
/// `[0, total)` selects the first entry whose cumulative weight reaches it.
/// Zero weights are never selected.
///
/// ## Errors
/// * [`TokchainError::InvalidWeight`] for a negative or non-finite weight.
/// * [`TokchainError::EmptyDistribution`] when the map is empty or its total weight is not positive.
pub fn weighted_choice<'m, K, W, R>(
    map: &'m TCHashMap<K, W>,
    rng: &mut R,
) -> TCResult<&'m K>
where
    K: Ord,
    W: ToPrimitive,
    R: Rng,
{
    let mut entries = Vec::with_capacity(map.len());
    for (key, weight) in map {
        let weight = weight.to_f64().unwrap_or(f64::NAN);
        if !weight.is_finite() || weight < 0.0 {
            return Err(TokchainError::InvalidWeight { weight });
        }
        if weight > 0.0 {
            entries.push((key, weight));
        }
    }
    if entries.is_empty() {
        return Err(TokchainError::EmptyDistribution);
    }
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

    let mut total = 0.0;
    let cumsum = entries
        .iter()
        .map(|&(_, weight)| {
            total += weight;
            total
        })
        .collect::<Vec<f64>>();

    let draw = rng.random::<f64>() * total;
    let idx = cumsum
        .partition_point(|&c| c < draw)
        .min(entries.len() - 1);

    Ok(entries[idx].0)
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn count_map(entries: &[(&'static str, u64)]) -> CountMap<&'static str, u64> {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_merge_count_maps() {
        let a = count_map(&[("x", 1), ("y", 2)]);
        let b = count_map(&[("y", 3), ("z", 4)]);

        let merged = merge_count_maps([&a, &b]);
        assert_eq!(merged, count_map(&[("x", 1), ("y", 5), ("z", 4)]));

        let merged = merge_count_maps(Vec::<&CountMap<&str, u64>>::new());
        assert!(merged.is_empty());
    }

    #[test]
    fn test_merge_scaled_count_maps() {
        let a = count_map(&[("x", 1), ("y", 2)]);
        let b = count_map(&[("y", 3)]);

        let merged = merge_scaled_count_maps([(&a, 1), (&b, 2)]);
        assert_eq!(merged, count_map(&[("x", 1), ("y", 8)]));
    }

    #[test]
    fn test_weighted_choice_errors() {
        let mut rng = StdRng::seed_from_u64(0);

        let empty: CountMap<&str, u64> = hash_map_new();
        assert!(matches!(
            weighted_choice(&empty, &mut rng),
            Err(TokchainError::EmptyDistribution)
        ));

        let zeros = count_map(&[("a", 0), ("b", 0)]);
        assert!(matches!(
            weighted_choice(&zeros, &mut rng),
            Err(TokchainError::EmptyDistribution)
        ));

        let negative: CountMap<&str, f64> = [("a", 1.0), ("b", -1.0)].into_iter().collect();
        assert!(matches!(
            weighted_choice(&negative, &mut rng),
            Err(TokchainError::InvalidWeight { .. })
        ));

        let nan: CountMap<&str, f64> = [("a", f64::NAN)].into_iter().collect();
        assert!(matches!(
            weighted_choice(&nan, &mut rng),
            Err(TokchainError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn test_weighted_choice_skips_zero_weights() {
        let mut rng = StdRng::seed_from_u64(1);
        let map = count_map(&[("a", 0), ("b", 5), ("c", 0)]);
        for _ in 0..100 {
            assert_eq!(weighted_choice(&map, &mut rng).unwrap(), &"b");
        }
    }

    #[test]
    fn test_weighted_choice_fidelity() {
        let mut rng = StdRng::seed_from_u64(42);
        let map = count_map(&[("a", 1), ("b", 3)]);

        let trials = 20_000;
        let mut b_count = 0;
        for _ in 0..trials {
            if *weighted_choice(&map, &mut rng).unwrap() == "b" {
                b_count += 1;
            }
        }
        let a_count = trials - b_count;
        let ratio = b_count as f64 / a_count as f64;
        assert!((2.7..3.3).contains(&ratio), "ratio: {ratio}");
    }

    /// Makes `random::<f64>()` return exactly `unit`, a multiple of `2^-53`.
    struct FixedRng {
        word: u64,
    }

    impl FixedRng {
        fn new(unit: f64) -> Self {
            Self {
                word: ((unit * (1u64 << 53) as f64) as u64) << 11,
            }
        }
    }

    impl rand::RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            (self.word >> 32) as u32
        }

        fn next_u64(&mut self) -> u64 {
            self.word
        }

        fn fill_bytes(
            &mut self,
            dst: &mut [u8],
        ) {
            for (i, byte) in dst.iter_mut().enumerate() {
                *byte = self.word.to_le_bytes()[i % 8];
            }
        }
    }

    #[test]
    fn test_weighted_choice_boundary_draws() {
        let mut rng = FixedRng::new(0.25);
        assert_eq!(rng.random::<f64>(), 0.25);

        // draw = 1.0 == cumsum[0]: the first index reaching the draw wins.
        let map = count_map(&[("a", 1), ("b", 3)]);
        assert_eq!(weighted_choice(&map, &mut rng).unwrap(), &"a");

        // draw = 2.0 == cumsum[1].
        let map = count_map(&[("a", 1), ("b", 1), ("c", 2)]);
        assert_eq!(
            weighted_choice(&map, &mut FixedRng::new(0.5)).unwrap(),
            &"b"
        );

        // draw = 0.0 never lands on a leading zero weight.
        let mut zero = FixedRng::new(0.0);
        assert_eq!(zero.random::<f64>(), 0.0);
        assert_eq!(weighted_choice(&map, &mut zero).unwrap(), &"a");
        let map = count_map(&[("a", 0), ("b", 0), ("c", 2), ("d", 1)]);
        assert_eq!(weighted_choice(&map, &mut zero).unwrap(), &"c");
    }

    #[test]
    fn test_weighted_choice_is_seeded() {
        let map = count_map(&[("a", 1), ("b", 2), ("c", 3), ("d", 4)]);
        let draws = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..32)
                .map(|_| *weighted_choice(&map, &mut rng).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(draws(7), draws(7));
    }
}
