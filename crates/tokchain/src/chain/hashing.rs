//! # Context Hashing

use crate::types::ContextHash;

/// Maps a context's concatenated text to a fixed-width chain key.
///
/// Must be deterministic; a chain saved under one hasher only loads
/// meaningfully under the same hasher. Distinct contexts hashing to the same
/// key share their counts.
///
/// Any `Fn(&[u8]) -> u32` closure or function is a hasher.
pub trait ContextHasher: Send + Sync {
    /// Hash the context bytes.
    fn hash_context(
        &self,
        bytes: &[u8],
    ) -> ContextHash;
}

/// The default hasher: CRC-32 (IEEE).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Crc32Hasher;

impl ContextHasher for Crc32Hasher {
    fn hash_context(
        &self,
        bytes: &[u8],
    ) -> ContextHash {
        crc32fast::hash(bytes)
    }
}

impl<F> ContextHasher for F
where
    F: Fn(&[u8]) -> ContextHash + Send + Sync,
{
    fn hash_context(
        &self,
        bytes: &[u8],
    ) -> ContextHash {
        self(bytes)
    }
}
