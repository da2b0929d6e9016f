//! `BFSDriver`: the layer-by-layer expansion loop — `Init` → `Expand(d)` →
//! `Check(d+1)` → loop or `Done` — with budget enforcement and the optional
//! edge/hash outputs.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::batch::{EncodedBatch, StateBatch};
use crate::codec::{CodecMode, StateCodec};
use crate::dedup::{self, LayerHashSet};
use crate::error::{CayleyError, Result};
use crate::graph::CayleyGraph;
use crate::kernel::{self, GeneratorSet};
use crate::result::BfsResult;

/// Options for one BFS invocation (spec §4.5).
#[derive(Debug, Clone, Default)]
pub struct BfsOptions {
    /// Explicit start states; defaults to the graph's central state.
    pub start_states: Option<StateBatch>,
    /// Cap on the number of layers explored.
    pub max_diameter: Option<usize>,
    /// If a newly produced layer strictly exceeds this, BFS halts before
    /// expanding it; the layer is still counted but dropped from storage.
    pub max_layer_size_to_explore: Option<u64>,
    /// Layers larger than this are counted and used to continue expansion
    /// but are not retained in the result's decoded layer store. `None`
    /// retains every layer regardless of size.
    pub max_layer_size_to_store: Option<u64>,
    /// Record the explored edge set.
    pub return_all_edges: bool,
    /// Record per-layer hash lists.
    pub return_all_hashes: bool,
}

/// Runs BFS over `graph` with `options`, producing an independent
/// [`BfsResult`]. The graph itself is not mutated and may be reused.
pub fn run(graph: &CayleyGraph, options: BfsOptions) -> Result<BfsResult> {
    if !graph.def().generators_inverse_closed() {
        return Err(CayleyError::NotInverseClosed);
    }

    let gens = graph.def().generators();
    let codec = graph.codec();
    let n = graph.def().n();
    let mode = codec.mode();
    let config = graph.config();

    let start_batch = match options.start_states {
        Some(b) => b,
        None => {
            let cs = graph.def().central_state().ok_or(CayleyError::InvalidConfig {
                reason: "start_states omitted and graph has no central_state",
            })?;
            StateBatch::from_rows(&[cs.to_vec()])?
        }
    };
    let encoded_start = codec.encode(&start_batch)?;

    let want_names = options.return_all_edges || options.return_all_hashes;
    let mut hash_to_name: Option<HashMap<u64, String>> = want_names.then(HashMap::new);
    let mut edges: Option<HashSet<(u64, u64)>> = options.return_all_edges.then(HashSet::new);
    let mut vertices_hashes: Option<BTreeMap<usize, Vec<u64>>> = options.return_all_hashes.then(BTreeMap::new);
    let store_cap = options.max_layer_size_to_store;

    let dummy_parents = vec![0u64; encoded_start.rows()];
    let init = dedup::dedup_frontier(
        &encoded_start,
        &dummy_parents,
        &LayerHashSet::empty(),
        &LayerHashSet::empty(),
        config.hash_chunk_size,
        false,
    );

    let mut layer_sizes = vec![init.next_layer.rows() as u64];
    let mut layers = BTreeMap::new();
    record_names(&mut hash_to_name, codec, &init.next_layer, &init.next_hashes)?;
    if let Some(vh) = vertices_hashes.as_mut() {
        vh.insert(0, init.next_hashes.clone());
    }
    if should_store(layer_sizes[0], store_cap) {
        layers.insert(0, codec.decode(&init.next_layer)?);
    }

    if init.next_layer.is_empty() {
        return Ok(finish(true, layer_sizes, layers, vertices_hashes, hash_to_name, edges, graph));
    }

    let mut current_layer = init.next_layer;
    let mut current_hashes = init.next_hashes;
    let mut previous_hashes: Vec<u64> = Vec::new();
    let mut d = 0usize;
    let bfs_completed: bool;

    loop {
        let span = tracing::info_span!("bfs_layer", layer = d);
        let _enter = span.enter();

        let (candidates, parent_hashes) =
            expand_batched(&current_layer, gens, mode, n, config.batch_size, &current_hashes);
        tracing::debug!(candidates = candidates.rows(), "expanded layer");

        let layer_d = LayerHashSet::from_hashes(&current_hashes);
        let layer_d_minus_1 = LayerHashSet::from_hashes(&previous_hashes);
        let outcome = dedup::dedup_frontier(
            &candidates,
            &parent_hashes,
            &layer_d,
            &layer_d_minus_1,
            config.hash_chunk_size,
            options.return_all_edges,
        );

        if let Some(e) = outcome.edges {
            if let Some(global) = edges.as_mut() {
                global.extend(e);
            }
        }

        let next_size = outcome.next_layer.rows() as u64;
        let next_d = d + 1;
        tracing::debug!(layer = next_d, size = next_size, "post-dedup layer");

        if next_size == 0 {
            bfs_completed = true;
            break;
        }

        layer_sizes.push(next_size);
        record_names(&mut hash_to_name, codec, &outcome.next_layer, &outcome.next_hashes)?;
        if let Some(vh) = vertices_hashes.as_mut() {
            vh.insert(next_d, outcome.next_hashes.clone());
        }

        // Check order pinned to empty -> max_diameter -> max_layer_size_to_explore:
        // a layer that satisfies max_diameter is stored normally (subject to
        // max_layer_size_to_store) before BFS halts; only a layer that survives
        // that check and then exceeds max_layer_size_to_explore is dropped from
        // storage and left unexpanded.
        if let Some(max_d) = options.max_diameter {
            if next_d == max_d {
                if should_store(next_size, store_cap) {
                    layers.insert(next_d, codec.decode(&outcome.next_layer)?);
                }
                bfs_completed = false;
                break;
            }
        }

        if let Some(max_explore) = options.max_layer_size_to_explore {
            if next_size > max_explore {
                bfs_completed = false;
                break;
            }
        }

        if should_store(next_size, store_cap) {
            layers.insert(next_d, codec.decode(&outcome.next_layer)?);
        }

        previous_hashes = current_hashes;
        current_hashes = outcome.next_hashes;
        current_layer = outcome.next_layer;
        d = next_d;
    }

    Ok(finish(bfs_completed, layer_sizes, layers, vertices_hashes, hash_to_name, edges, graph))
}

#[inline]
fn should_store(size: u64, cap: Option<u64>) -> bool {
    match cap {
        None => true,
        Some(c) => size <= c,
    }
}

/// Expands `layer` in slices of at most `batch_size` rows, concatenating
/// the per-slice kernel outputs, and returns alongside a parallel array of
/// the hash of each candidate row's parent state.
fn expand_batched(
    layer: &EncodedBatch,
    gens: &GeneratorSet,
    mode: CodecMode,
    n: usize,
    batch_size: usize,
    layer_hashes: &[u64],
) -> (EncodedBatch, Vec<u64>) {
    let m = layer.rows();
    let g = gens.len();
    let mut combined = EncodedBatch::new(layer.words_per_state());
    let mut parent_hashes = Vec::with_capacity(m * g);

    let mut offset = 0;
    while offset < m {
        let end = (offset + batch_size).min(m);
        let slice = layer.row_slice(offset, end);
        let expanded = kernel::expand(&slice, gens, mode, n);
        combined.extend_from(&expanded);

        let sub_m = end - offset;
        for row_idx in 0..sub_m * g {
            let local_parent = dedup::parent_index(row_idx, sub_m, g, mode);
            parent_hashes.push(layer_hashes[offset + local_parent]);
        }
        offset = end;
    }

    (combined, parent_hashes)
}

fn record_names(
    hash_to_name: &mut Option<HashMap<u64, String>>,
    codec: &StateCodec,
    batch: &EncodedBatch,
    hashes: &[u64],
) -> Result<()> {
    if let Some(map) = hash_to_name.as_mut() {
        if !batch.is_empty() {
            let decoded = codec.decode(batch)?;
            for (i, name) in decoded.to_strings().into_iter().enumerate() {
                map.insert(hashes[i], name);
            }
        }
    }
    Ok(())
}

fn finish(
    bfs_completed: bool,
    layer_sizes: Vec<u64>,
    layers: BTreeMap<usize, StateBatch>,
    vertices_hashes: Option<BTreeMap<usize, Vec<u64>>>,
    hash_to_name: Option<HashMap<u64, String>>,
    edges: Option<HashSet<(u64, u64)>>,
    graph: &CayleyGraph,
) -> BfsResult {
    BfsResult {
        layer_sizes,
        layers,
        bfs_completed,
        vertices_hashes,
        hash_to_name,
        edges,
        generator_names: graph.def().generators().names().to_vec(),
        engine_config: *graph.config(),
    }
}
