//! Stable hashing for report provenance.
//!
//! The advice report records a digest of the inlined DAG so two runs over the
//! same project state can be recognized as comparable.

use blake3::Hasher;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hash256(pub [u8; 32]);

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

/// Digest a sequence of byte chunks in order. Each chunk is length-prefixed
/// so `["ab", "c"]` and `["a", "bc"]` do not collide.
pub fn digest<I, B>(chunks: I) -> Hash256
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    let mut hasher = Hasher::new();
    for chunk in chunks {
        let bytes = chunk.as_ref();
        hasher.update(&(bytes.len() as u64).to_le_bytes());
        hasher.update(bytes);
    }
    Hash256(hasher.finalize().into())
}
