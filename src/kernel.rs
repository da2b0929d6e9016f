//! `NeighborKernel`: expands a batch of encoded states into the batch of all
//! neighbors induced by a generator set.
//!
//! The two row orderings below are a public contract (spec §4.2), pinned
//! exactly against `original_source`'s `test_get_neighbors`:
//! - raw mode: outer loop over **states**, inner loop over **generators** —
//!   `[g0(s0), g1(s0), ..., g0(s1), g1(s1), ...]`.
//! - packed mode: outer loop over **generators**, inner loop over **states** —
//!   `[g0(s0), g0(s1), ..., g1(s0), g1(s1), ...]`.
//!
//! The packed-mode kernel is implemented by unpacking each row, permuting the
//! decoded elements, and repacking — reusing the same bit arithmetic as
//! [`crate::codec::StateCodec`] rather than a specialized in-place bit-shuffle
//! network (spec §4.2 explicitly allows either; see DESIGN.md).

use crate::batch::EncodedBatch;
use crate::codec::{pack_element, unpack_element, CodecMode};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// An ordered list of generators (each `new[i] = old[p[i]]`) plus their
/// display names.
#[derive(Debug, Clone)]
pub struct GeneratorSet {
    perms: Vec<Vec<u32>>,
    names: Vec<String>,
}

impl GeneratorSet {
    /// Builds a generator set, defaulting names to the comma-joined
    /// permutation when `names` is `None`.
    pub fn new(perms: Vec<Vec<u32>>, names: Option<Vec<String>>) -> Self {
        let names = names.unwrap_or_else(|| {
            perms
                .iter()
                .map(|p| p.iter().map(u32::to_string).collect::<Vec<_>>().join(","))
                .collect()
        });
        Self { perms, names }
    }

    /// Number of generators.
    #[inline]
    pub fn len(&self) -> usize {
        self.perms.len()
    }

    /// `true` if there are no generators.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.perms.is_empty()
    }

    /// Borrow the raw permutations.
    #[inline]
    pub fn perms(&self) -> &[Vec<u32>] {
        &self.perms
    }

    /// Borrow the generator display names.
    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// `true` iff every generator's inverse is also present in the set.
    pub fn is_inverse_closed(&self) -> bool {
        self.perms.iter().all(|p| {
            let inv = invert(p);
            self.perms.contains(&inv)
        })
    }
}

fn invert(p: &[u32]) -> Vec<u32> {
    let mut inv = vec![0u32; p.len()];
    for (i, &pi) in p.iter().enumerate() {
        inv[pi as usize] = i as u32;
    }
    inv
}

/// Applies `gens` to every row of `batch`, producing `gens.len() * batch.rows()`
/// neighbor rows in the ordering required by `mode`.
pub fn expand(batch: &EncodedBatch, gens: &GeneratorSet, mode: CodecMode, n: usize) -> EncodedBatch {
    match mode {
        CodecMode::Raw => expand_raw(batch, gens),
        CodecMode::Packed { width } => expand_packed(batch, gens, width, n),
    }
}

/// Raw-mode expansion: one word per element, so applying a generator is a
/// pure gather. Outer loop over states, inner loop over generators.
fn expand_raw(batch: &EncodedBatch, gens: &GeneratorSet) -> EncodedBatch {
    let w = batch.words_per_state();
    let m = batch.rows();
    let g = gens.len();

    let rows: Vec<Vec<u64>> = {
        let indices: Vec<(usize, usize)> = (0..m).flat_map(|s| (0..g).map(move |gi| (s, gi))).collect();
        apply_over_indices(&indices, |&(state_idx, gen_idx)| {
            let src = batch.row(state_idx);
            let perm = &gens.perms()[gen_idx];
            gather_words(src, perm)
        })
    };

    let mut out = EncodedBatch::with_capacity(m * g, w);
    for row in &rows {
        out.push_row(row);
    }
    out
}

/// Packed-mode expansion: decode each row to elements, gather-permute, and
/// repack. Outer loop over generators, inner loop over states.
fn expand_packed(batch: &EncodedBatch, gens: &GeneratorSet, width: u32, n: usize) -> EncodedBatch {
    let w = batch.words_per_state();
    let m = batch.rows();
    let g = gens.len();

    let decoded: Vec<Vec<u64>> = batch.iter_rows().map(|row| decode_row(row, width, n)).collect();

    let rows: Vec<Vec<u64>> = {
        let indices: Vec<(usize, usize)> = (0..g).flat_map(|gi| (0..m).map(move |s| (gi, s))).collect();
        apply_over_indices(&indices, |&(gen_idx, state_idx)| {
            let perm = &gens.perms()[gen_idx];
            let elems = gather_elems(&decoded[state_idx], perm);
            encode_row(&elems, width, w)
        })
    };

    let mut out = EncodedBatch::with_capacity(m * g, w);
    for row in &rows {
        out.push_row(row);
    }
    out
}

/// Maps `f` over `indices`, in parallel when the `parallel` feature is on.
fn apply_over_indices<T, F>(indices: &[T], f: F) -> Vec<Vec<u64>>
where
    T: Sync,
    F: Fn(&T) -> Vec<u64> + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        indices.par_iter().map(f).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        indices.iter().map(f).collect()
    }
}

#[inline]
fn gather_words(src: &[u64], perm: &[u32]) -> Vec<u64> {
    perm.iter().map(|&p| src[p as usize]).collect()
}

#[inline]
fn gather_elems(elems: &[u64], perm: &[u32]) -> Vec<u64> {
    perm.iter().map(|&p| elems[p as usize]).collect()
}

fn decode_row(words: &[u64], width: u32, n: usize) -> Vec<u64> {
    (0..n).map(|pos| unpack_element(words, pos, width)).collect()
}

fn encode_row(elems: &[u64], width: u32, words_per_state: usize) -> Vec<u64> {
    let mut words = vec![0u64; words_per_state];
    for (pos, &v) in elems.iter().enumerate() {
        pack_element(&mut words, pos, width, v);
    }
    words
}
