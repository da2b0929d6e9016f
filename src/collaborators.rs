//! Interfaces the core depends on but does not implement: a named
//! permutation-group catalog, a puzzle-definition loader, and a
//! pre-computed growth-sequence dataset, all external collaborators per
//! the system's scope.

use crate::graph_def::CayleyGraphDef;

/// Resolves a named permutation-group family (e.g. `"lrx"`, `"top_spin"`,
/// `"all_transpositions"`) plus a size parameter to a graph definition.
pub trait GroupCatalog {
    /// Looks up `family` at size `n`, or `None` if unknown.
    fn graph_def(&self, family: &str, n: usize) -> Option<CayleyGraphDef>;
}

/// Resolves a puzzle identifier (e.g. a Rubik's-cube variant name) to a
/// graph definition.
pub trait PuzzleLoader {
    /// Looks up `id`, or `None` if unknown.
    fn load(&self, id: &str) -> Option<CayleyGraphDef>;
}

/// Exposes expected growth sequences (layer-size lists) for known graphs,
/// keyed by identifier; consumed only by tests that check a BFS run's
/// `layer_sizes` against a precomputed oracle.
pub trait GrowthDataset {
    /// Looks up the expected `layer_sizes` for `id`, or `None` if unknown.
    fn layer_sizes(&self, id: &str) -> Option<Vec<u64>>;
}
