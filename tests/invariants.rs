//! Property-based checks for the testable invariants of spec §8 that are
//! naturally expressed as "true for all inputs" rather than fixed scenarios.

mod common;

use proptest::prelude::*;

use cayleybfs::codec::{BitEncodingWidth, StateCodec};
use cayleybfs::graph::{BitEncodingChoice, EngineConfig};
use cayleybfs::{driver, BfsOptions, CayleyGraph, StateBatch};

proptest! {
    /// Invariant 1: encode/decode round trips in every codec mode.
    #[test]
    fn encode_decode_round_trips(
        n in 2usize..8,
        width in prop_oneof![Just(None), (1u32..6).prop_map(Some)],
        seed in 0u64..64,
    ) {
        let k: u64 = width.map(|w| 1u64 << w).unwrap_or(1 << 6);
        let codec_width = width.map(BitEncodingWidth::Fixed).unwrap_or(BitEncodingWidth::None);
        let codec = StateCodec::new(n, codec_width, k).unwrap();

        let row: Vec<u64> = (0..n as u64).map(|i| (seed.wrapping_mul(31).wrapping_add(i)) % k).collect();
        let states = StateBatch::from_rows(&[row.clone()]).unwrap();

        let encoded = codec.encode(&states).unwrap();
        let decoded = codec.decode(&encoded).unwrap();
        prop_assert_eq!(decoded.row(0), row.as_slice());
    }

    /// Invariant 7: BFS growth is independent of batch_size and hash_chunk_size.
    #[test]
    fn growth_independent_of_batching(n in 3usize..7, batch_size in 1usize..5, chunk_size in 1usize..5) {
        let identity: String = (0..n).map(|i| std::char::from_digit(i as u32, 10).unwrap()).collect();
        let def_a = common::lrx_def(n, Some(&identity));
        let def_b = common::lrx_def(n, Some(&identity));

        let config_a = EngineConfig::default();
        let config_b = EngineConfig::new(BitEncodingChoice::None, batch_size, chunk_size).unwrap();

        let graph_a = CayleyGraph::new(def_a, config_a).unwrap();
        let graph_b = CayleyGraph::new(def_b, config_b).unwrap();

        let result_a = driver::run(&graph_a, BfsOptions::default()).unwrap();
        let result_b = driver::run(&graph_b, BfsOptions::default()).unwrap();

        prop_assert_eq!(result_a.layer_sizes(), result_b.layer_sizes());
    }

    /// Invariant 8: packed and raw codec modes discover the same graph.
    #[test]
    fn packed_and_raw_agree(n in 3usize..7) {
        let identity: String = (0..n).map(|i| std::char::from_digit(i as u32, 10).unwrap()).collect();
        let def_raw = common::lrx_def(n, Some(&identity));
        let def_packed = common::lrx_def(n, Some(&identity));

        let raw_config = EngineConfig::new(BitEncodingChoice::None, 1 << 10, 1 << 10).unwrap();
        let packed_config = EngineConfig::new(BitEncodingChoice::Auto, 1 << 10, 1 << 10).unwrap();

        let graph_raw = CayleyGraph::new(def_raw, raw_config).unwrap();
        let graph_packed = CayleyGraph::new(def_packed, packed_config).unwrap();

        let result_raw = driver::run(&graph_raw, BfsOptions::default()).unwrap();
        let result_packed = driver::run(&graph_packed, BfsOptions::default()).unwrap();

        prop_assert_eq!(result_raw.layer_sizes(), result_packed.layer_sizes());
    }
}
