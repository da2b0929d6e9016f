//! `FrontierDedup`: removes duplicates inside a candidate frontier and
//! removes states already seen in the previous two layers, using only
//! hashes — never state-content comparison (spec §9 design note: hash
//! equality is graph-vertex equality by design).
//!
//! Because generators are required to be inverse-closed, a state discovered
//! at distance `d+1` can only collide with its parents (layer `d`) or
//! grandparents (layer `d-1`); only those two hash sets need to be
//! consulted, bounding working memory to three concurrent layers.

use std::collections::HashMap;
use std::collections::HashSet;

use crate::batch::EncodedBatch;
use crate::codec::CodecMode;
use crate::hasher;

/// Hash membership for one stored/explored layer.
#[derive(Debug, Clone, Default)]
pub struct LayerHashSet {
    set: HashSet<u64>,
}

impl LayerHashSet {
    /// Builds a hash set from a slice of hashes.
    pub fn from_hashes(hashes: &[u64]) -> Self {
        Self {
            set: hashes.iter().copied().collect(),
        }
    }

    /// Empty set (used as the "layer -1" sentinel before BFS starts).
    pub fn empty() -> Self {
        Self { set: HashSet::new() }
    }

    /// `true` if `h` was seen in this layer.
    #[inline]
    pub fn contains(&self, h: u64) -> bool {
        self.set.contains(&h)
    }
}

/// Recovers, for candidate row `row_idx` in a `NeighborKernel::expand` output
/// of a frontier with `m` states and `g` generators, the index of the parent
/// state within that frontier (spec §4.2 ordering contract).
pub fn parent_index(row_idx: usize, m: usize, g: usize, mode: CodecMode) -> usize {
    match mode {
        CodecMode::Raw => row_idx / g,
        CodecMode::Packed { .. } => row_idx % m,
    }
}

/// Result of deduplicating one candidate frontier.
pub struct DedupOutcome {
    /// The next layer: unique states not present in either consulted layer.
    pub next_layer: EncodedBatch,
    /// Hashes of `next_layer`'s rows, same order.
    pub next_hashes: Vec<u64>,
    /// Unordered (parent_hash, child_hash) edges, deduplicated, emitted only
    /// when edge recording was requested. Self-loops are preserved.
    pub edges: Option<HashSet<(u64, u64)>>,
}

/// Deduplicates `candidates` (the raw `NeighborKernel::expand` output of
/// frontier layer `d`) against `layer_d` and `layer_d_minus_1`'s hash sets,
/// producing layer `d+1`.
///
/// `parent_hashes` gives, for each row of `candidates`, the hash of the
/// parent state that produced it (looked up by the caller via
/// [`parent_index`] against layer `d`'s hash list) — used only for edge
/// recording.
pub fn dedup_frontier(
    candidates: &EncodedBatch,
    parent_hashes: &[u64],
    layer_d: &LayerHashSet,
    layer_d_minus_1: &LayerHashSet,
    hash_chunk_size: usize,
    return_edges: bool,
) -> DedupOutcome {
    let candidate_hashes = hasher::hash_chunked(candidates, hash_chunk_size);

    let edges = if return_edges {
        let mut set = HashSet::with_capacity(candidate_hashes.len());
        for (row_idx, &h) in candidate_hashes.iter().enumerate() {
            let parent = parent_hashes[row_idx];
            let pair = if parent <= h { (parent, h) } else { (h, parent) };
            set.insert(pair);
        }
        Some(set)
    } else {
        None
    };

    // Intra-frontier dedup: keep one representative row per hash value.
    let mut first_row_for_hash: HashMap<u64, usize> = HashMap::with_capacity(candidate_hashes.len());
    for (row_idx, &h) in candidate_hashes.iter().enumerate() {
        first_row_for_hash.entry(h).or_insert(row_idx);
    }

    let mut next_layer = EncodedBatch::new(candidates.words_per_state());
    let mut next_hashes = Vec::new();
    let mut kept: Vec<(u64, usize)> = first_row_for_hash.into_iter().collect();
    kept.sort_unstable_by_key(|&(h, _)| h);
    for (h, row_idx) in kept {
        if layer_d.contains(h) || layer_d_minus_1.contains(h) {
            continue;
        }
        next_layer.push_row(candidates.row(row_idx));
        next_hashes.push(h);
    }

    DedupOutcome {
        next_layer,
        next_hashes,
        edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::StateBatch;
    use crate::codec::{BitEncodingWidth, StateCodec};

    #[test]
    fn removes_duplicates_and_seen_states() {
        let codec = StateCodec::new(2, BitEncodingWidth::None, 2).unwrap();
        let states = StateBatch::from_rows(&[vec![0, 1], vec![1, 0], vec![0, 1]]).unwrap();
        let encoded = codec.encode(&states).unwrap();
        let hashes = hasher::hash(&encoded);

        // Pretend [0,1] was already in layer d.
        let layer_d = LayerHashSet::from_hashes(&[hashes[0]]);
        let layer_d_minus_1 = LayerHashSet::empty();

        let parent_hashes = vec![hashes[0]; 3];
        let outcome = dedup_frontier(&encoded, &parent_hashes, &layer_d, &layer_d_minus_1, 1000, false);

        assert_eq!(outcome.next_layer.rows(), 1);
        let decoded = codec.decode(&outcome.next_layer).unwrap();
        assert_eq!(decoded.row(0), &[1, 0]);
    }

    #[test]
    fn parent_index_matches_kernel_orderings() {
        // raw: outer states, inner gens -> row = state*g + gen
        assert_eq!(parent_index(5, 3, 2, CodecMode::Raw), 2); // state 2, gen 1
        // packed: outer gens, inner states -> row = gen*m + state
        assert_eq!(parent_index(5, 3, 2, CodecMode::Packed { width: 3 }), 2); // gen 1, state 2
    }

    #[test]
    fn self_loop_edge_preserved() {
        let codec = StateCodec::new(2, BitEncodingWidth::None, 2).unwrap();
        let states = StateBatch::from_rows(&[vec![1, 1]]).unwrap();
        let encoded = codec.encode(&states).unwrap();
        let h = hasher::hash(&encoded)[0];
        let layer_d = LayerHashSet::empty();
        let layer_d_minus_1 = LayerHashSet::empty();
        let parent_hashes = vec![h];
        let outcome = dedup_frontier(&encoded, &parent_hashes, &layer_d, &layer_d_minus_1, 1000, true);
        let edges = outcome.edges.unwrap();
        assert!(edges.contains(&(h, h)));
    }
}
