//! `BfsResult`: the read-only record produced by one `BFSDriver` run.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::batch::StateBatch;
use crate::graph::EngineConfig;

/// Per-layer, per-edge, and summary data produced by one BFS run.
#[derive(Debug, Clone)]
pub struct BfsResult {
    pub(crate) layer_sizes: Vec<u64>,
    pub(crate) layers: BTreeMap<usize, StateBatch>,
    pub(crate) bfs_completed: bool,
    pub(crate) vertices_hashes: Option<BTreeMap<usize, Vec<u64>>>,
    pub(crate) hash_to_name: Option<HashMap<u64, String>>,
    pub(crate) edges: Option<HashSet<(u64, u64)>>,
    pub(crate) generator_names: Vec<String>,
    pub(crate) engine_config: EngineConfig,
}

impl BfsResult {
    /// Dense per-layer vertex counts, one entry per discovered layer.
    #[inline]
    pub fn layer_sizes(&self) -> &[u64] {
        &self.layer_sizes
    }

    /// Decoded states for layer `i`, when that layer was stored.
    #[inline]
    pub fn get_layer(&self, i: usize) -> Option<&StateBatch> {
        self.layers.get(&i)
    }

    /// The stored decoded batch for the last discovered layer, if stored.
    pub fn last_layer(&self) -> Option<&StateBatch> {
        self.layer_sizes
            .len()
            .checked_sub(1)
            .and_then(|d| self.layers.get(&d))
    }

    /// Index of the last discovered layer.
    #[inline]
    pub fn diameter(&self) -> usize {
        self.layer_sizes.len().saturating_sub(1)
    }

    /// Total number of discovered vertices across all layers.
    pub fn num_vertices(&self) -> u64 {
        self.layer_sizes.iter().sum()
    }

    /// `true` iff BFS stopped because the frontier became empty (not
    /// because a budget was reached).
    #[inline]
    pub fn bfs_completed(&self) -> bool {
        self.bfs_completed
    }

    /// Per-layer hash lists, present only when `return_all_hashes` was set.
    #[inline]
    pub fn vertices_hashes(&self) -> Option<&BTreeMap<usize, Vec<u64>>> {
        self.vertices_hashes.as_ref()
    }

    /// Decoded string name for every discovered vertex hash, present
    /// whenever `return_all_hashes` or `return_all_edges` was set.
    #[inline]
    pub fn vertex_names(&self) -> Option<&HashMap<u64, String>> {
        self.hash_to_name.as_ref()
    }

    /// Canonical (name, name) pairs for every recorded edge, present only
    /// when `return_all_edges` was set.
    pub fn named_undirected_edges(&self) -> Option<HashSet<(String, String)>> {
        let edges = self.edges.as_ref()?;
        let names = self.hash_to_name.as_ref()?;
        Some(
            edges
                .iter()
                .map(|&(a, b)| {
                    let na = names.get(&a).cloned().unwrap_or_default();
                    let nb = names.get(&b).cloned().unwrap_or_default();
                    if na <= nb { (na, nb) } else { (nb, na) }
                })
                .collect(),
        )
    }

    /// Display names of the graph's generators, in generator order.
    #[inline]
    pub fn generator_names(&self) -> &[String] {
        &self.generator_names
    }

    /// The `EngineConfig` the run was performed with.
    #[inline]
    pub fn engine_config(&self) -> &EngineConfig {
        &self.engine_config
    }
}
