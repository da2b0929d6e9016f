//! `Hasher`: deterministic 64-bit hash of an encoded state, computed
//! chunk-wise so a batch never needs to materialize an intermediate hash
//! array larger than a configured chunk size.
//!
//! Uses `twox-hash`'s `XxHash64` (already present in the retrieval pack, in
//! `MystenLabs-sui`, as the crate's answer to "fast non-cryptographic 64-bit
//! hash") seeded with a fixed constant so hashes are stable across runs and
//! processes.

use twox_hash::XxHash64;
use std::hash::Hasher as _;

use crate::batch::EncodedBatch;

/// Fixed seed so hashes are reproducible across runs.
const SEED: u64 = 0x9E37_79B9_7F4A_7C15;

/// Hashes every row of `batch` independently.
pub fn hash(batch: &EncodedBatch) -> Vec<u64> {
    batch.iter_rows().map(hash_row).collect()
}

/// Same result as [`hash`], but processes the batch in tiles of at most
/// `chunk_size` rows, bounding peak scratch memory for very large batches.
pub fn hash_chunked(batch: &EncodedBatch, chunk_size: usize) -> Vec<u64> {
    let chunk_size = chunk_size.max(1);
    let mut out = Vec::with_capacity(batch.rows());
    let mut start = 0;
    let total = batch.rows();
    while start < total {
        let end = (start + chunk_size).min(total);
        let tile = batch.row_slice(start, end);
        out.extend(hash(&tile));
        start = end;
    }
    out
}

#[inline]
fn hash_row(row: &[u64]) -> u64 {
    let mut hasher = XxHash64::with_seed(SEED);
    for word in row {
        hasher.write(&word.to_le_bytes());
    }
    hasher.finish()
}
