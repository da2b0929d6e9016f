//! `CayleyGraph`: an immutable pairing of a [`CayleyGraphDef`] with the
//! encoding/batching configuration used to run BFS over it.

use serde::{Deserialize, Serialize};

use crate::codec::{BitEncodingWidth, StateCodec};
use crate::error::{CayleyError, Result};
use crate::graph_def::CayleyGraphDef;

/// Bit encoding width, as requested by a caller at `CayleyGraph`
/// construction. Serializable so configs round-trip through JSON/TOML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BitEncodingChoice {
    /// Raw mode: one `u64` word per element.
    None,
    /// Packed mode with an explicit bit width.
    Fixed(u32),
    /// Packed mode, width auto-derived from the alphabet size.
    Auto,
}

impl From<BitEncodingChoice> for BitEncodingWidth {
    fn from(c: BitEncodingChoice) -> Self {
        match c {
            BitEncodingChoice::None => BitEncodingWidth::None,
            BitEncodingChoice::Fixed(w) => BitEncodingWidth::Fixed(w),
            BitEncodingChoice::Auto => BitEncodingWidth::Auto,
        }
    }
}

/// Plain, serializable engine configuration: codec mode plus the two
/// knobs that bound peak memory during BFS (spec §5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// How to choose the packed-mode bit width (or raw mode).
    pub bit_encoding_width: BitEncodingChoice,
    /// Maximum rows passed to the neighbor kernel per call.
    pub batch_size: usize,
    /// Maximum rows hashed per call.
    pub hash_chunk_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bit_encoding_width: BitEncodingChoice::None,
            batch_size: 1 << 20,
            hash_chunk_size: 1 << 20,
        }
    }
}

impl EngineConfig {
    /// Builds a config, rejecting non-positive batch/chunk sizes.
    pub fn new(bit_encoding_width: BitEncodingChoice, batch_size: usize, hash_chunk_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(CayleyError::InvalidConfig {
                reason: "batch_size must be positive",
            });
        }
        if hash_chunk_size == 0 {
            return Err(CayleyError::InvalidConfig {
                reason: "hash_chunk_size must be positive",
            });
        }
        Ok(Self {
            bit_encoding_width,
            batch_size,
            hash_chunk_size,
        })
    }
}

/// An immutable graph definition paired with the configuration used to run
/// BFS over it. Construction validates the definition and resolves the
/// codec; the object is then reusable across any number of `bfs()` calls.
#[derive(Debug, Clone)]
pub struct CayleyGraph {
    def: CayleyGraphDef,
    config: EngineConfig,
    codec: StateCodec,
}

impl CayleyGraph {
    /// Builds a graph from a definition and configuration, resolving the
    /// codec for `def.n()` and the definition's alphabet size (derived from
    /// `central_state`'s distinct values). `BitEncodingChoice::Auto` needs
    /// that alphabet size to derive a packed width and is rejected with
    /// `InvalidConfig` when `def` has no `central_state` — `start_states`
    /// supplied later at `bfs()` time cannot retroactively widen a codec
    /// already frozen here, so a caller in that position must either add a
    /// `central_state` or request `None`/`Fixed` explicitly. `None` and
    /// `Fixed` modes don't consult the alphabet size at all.
    pub fn new(def: CayleyGraphDef, config: EngineConfig) -> Result<Self> {
        let alphabet_size = match (config.bit_encoding_width, def.alphabet_size()) {
            (BitEncodingChoice::Auto, None) => {
                return Err(CayleyError::InvalidConfig {
                    reason: "BitEncodingChoice::Auto requires a central_state to derive the alphabet size; \
                             add one or use None/Fixed",
                })
            }
            (_, Some(k)) => k,
            (_, None) => 2,
        };
        let codec = StateCodec::new(def.n(), config.bit_encoding_width.into(), alphabet_size)?;
        Ok(Self { def, config, codec })
    }

    /// The underlying graph definition.
    #[inline]
    pub fn def(&self) -> &CayleyGraphDef {
        &self.def
    }

    /// The configuration this graph was built with.
    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The resolved state codec.
    #[inline]
    pub fn codec(&self) -> &StateCodec {
        &self.codec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_batch_size() {
        let err = EngineConfig::new(BitEncodingChoice::None, 0, 10).unwrap_err();
        assert!(matches!(err, CayleyError::InvalidConfig { .. }));
    }

    #[test]
    fn builds_codec_from_definition() {
        use crate::graph_def::CentralState;
        let def = CayleyGraphDef::create(vec![vec![1, 0]], None)
            .unwrap()
            .with_central_state(CentralState::Digits("01".to_string()))
            .unwrap();
        let graph = CayleyGraph::new(def, EngineConfig::default()).unwrap();
        assert_eq!(graph.codec().n(), 2);
    }

    #[test]
    fn auto_width_without_central_state_is_rejected() {
        let def = CayleyGraphDef::create(vec![vec![1, 0]], None).unwrap();
        let config = EngineConfig::new(BitEncodingChoice::Auto, 1024, 1024).unwrap();
        let err = CayleyGraph::new(def, config).unwrap_err();
        assert!(matches!(err, CayleyError::InvalidConfig { .. }));
    }

    #[test]
    fn fixed_width_without_central_state_is_accepted() {
        let def = CayleyGraphDef::create(vec![vec![1, 0]], None).unwrap();
        let config = EngineConfig::new(BitEncodingChoice::Fixed(3), 1024, 1024).unwrap();
        let graph = CayleyGraph::new(def, config).unwrap();
        assert_eq!(graph.codec().mode(), crate::codec::CodecMode::Packed { width: 3 });
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = EngineConfig::new(BitEncodingChoice::Fixed(6), 4096, 2048).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
