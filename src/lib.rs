//! Batched breadth-first exploration of large Cayley graphs of permutation
//! groups: a compact state codec, a data-parallel neighbor kernel, chunked
//! hashing, and a layer-by-layer BFS driver with budget controls.
//!
//! The core is deliberately small: this crate explores graphs, it does not
//! catalog them. Named generator families, puzzle definitions, and growth
//! datasets are consumed through the traits in [`collaborators`], not
//! implemented here.

#![warn(missing_docs, clippy::all)]

pub mod batch;
pub mod codec;
pub mod collaborators;
pub mod dedup;
pub mod driver;
pub mod error;
pub mod graph;
pub mod graph_def;
pub mod hasher;
pub mod kernel;
pub mod result;

pub use batch::{EncodedBatch, StateBatch};
pub use codec::{BitEncodingWidth, CodecMode, StateCodec};
pub use driver::{run, BfsOptions};
pub use error::{CayleyError, Result};
pub use graph::{BitEncodingChoice, CayleyGraph, EngineConfig};
pub use graph_def::{CayleyGraphDef, CentralState};
pub use kernel::GeneratorSet;
pub use result::BfsResult;
