//! `CayleyGraphDef`: the immutable graph definition — generators, their
//! names, and (optionally) the central state that anchors the default
//! start set and defines the alphabet.

use crate::batch::StateBatch;
use crate::error::{CayleyError, Result};
use crate::kernel::GeneratorSet;

/// An immutable Cayley graph definition: state length, generator set, and an
/// optional central state.
#[derive(Debug, Clone)]
pub struct CayleyGraphDef {
    n: usize,
    generators: GeneratorSet,
    central_state: Option<Vec<u64>>,
    inverse_closed: bool,
}

impl CayleyGraphDef {
    /// Validates `generators` (each row must be a permutation of
    /// `0..n`), computes `generators_inverse_closed`, and builds the
    /// definition. `names` defaults to the comma-joined permutation per
    /// generator when `None`.
    pub fn create(generators: Vec<Vec<u32>>, names: Option<Vec<String>>) -> Result<Self> {
        if generators.is_empty() {
            return Err(CayleyError::InvalidConfig {
                reason: "at least one generator is required",
            });
        }
        let n = generators[0].len();
        if n == 0 {
            return Err(CayleyError::InvalidConfig {
                reason: "state length n must be positive",
            });
        }
        for (idx, gen) in generators.iter().enumerate() {
            if gen.len() != n {
                return Err(CayleyError::LengthMismatch {
                    expected: n,
                    found: gen.len(),
                });
            }
            if !is_permutation(gen, n) {
                return Err(CayleyError::NotAPermutation { generator_index: idx });
            }
        }
        let gens = GeneratorSet::new(generators, names);
        let inverse_closed = gens.is_inverse_closed();
        Ok(Self {
            n,
            generators: gens,
            central_state: None,
            inverse_closed,
        })
    }

    /// Attaches a central state, either a string of decimal digits (one
    /// digit per position) or an explicit integer sequence; either must
    /// have exactly `n` elements.
    pub fn with_central_state(mut self, state: CentralState) -> Result<Self> {
        let values = match state {
            CentralState::Digits(s) => StateBatch::from_string(&s)?.as_flat().to_vec(),
            CentralState::Values(v) => v,
        };
        if values.len() != self.n {
            return Err(CayleyError::LengthMismatch {
                expected: self.n,
                found: values.len(),
            });
        }
        self.central_state = Some(values);
        Ok(self)
    }

    /// State length.
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// The generator set.
    #[inline]
    pub fn generators(&self) -> &GeneratorSet {
        &self.generators
    }

    /// The central state, if one was attached.
    #[inline]
    pub fn central_state(&self) -> Option<&[u64]> {
        self.central_state.as_deref()
    }

    /// `true` iff every generator's inverse is present in the set.
    #[inline]
    pub fn generators_inverse_closed(&self) -> bool {
        self.inverse_closed
    }

    /// Alphabet size inferred from the distinct values of the central
    /// state, or `None` when no central state is attached.
    pub fn alphabet_size(&self) -> Option<u64> {
        self.central_state.as_ref().map(|cs| {
            cs.iter().copied().max().map(|m| m + 1).unwrap_or(1)
        })
    }
}

/// Input form accepted by [`CayleyGraphDef::with_central_state`].
pub enum CentralState {
    /// A string of decimal digits, one per position (alphabet size <= 10).
    Digits(String),
    /// An explicit sequence of small non-negative integers.
    Values(Vec<u64>),
}

fn is_permutation(row: &[u32], n: usize) -> bool {
    let mut seen = vec![false; n];
    for &v in row {
        let v = v as usize;
        if v >= n || seen[v] {
            return false;
        }
        seen[v] = true;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_permutation_rows() {
        let err = CayleyGraphDef::create(vec![vec![0, 0, 2]], None).unwrap_err();
        assert!(matches!(err, CayleyError::NotAPermutation { generator_index: 0 }));
    }

    #[test]
    fn detects_inverse_closed() {
        let def = CayleyGraphDef::create(vec![vec![1, 0, 2, 3]], None).unwrap();
        assert!(def.generators_inverse_closed());

        let def2 = CayleyGraphDef::create(vec![vec![1, 2, 3, 0]], None).unwrap();
        assert!(!def2.generators_inverse_closed());
    }

    #[test]
    fn default_generator_names_are_comma_joined() {
        let def = CayleyGraphDef::create(vec![vec![1, 0, 2, 3]], None).unwrap();
        assert_eq!(def.generators().names()[0], "1,0,2,3");
    }

    #[test]
    fn central_state_from_digit_string() {
        let def = CayleyGraphDef::create(vec![vec![1, 0]], None)
            .unwrap()
            .with_central_state(CentralState::Digits("01".to_string()))
            .unwrap();
        assert_eq!(def.central_state(), Some(&[0u64, 1u64][..]));
        assert_eq!(def.alphabet_size(), Some(2));
    }

    #[test]
    fn central_state_length_mismatch_rejected() {
        let def = CayleyGraphDef::create(vec![vec![1, 0]], None).unwrap();
        let err = def.with_central_state(CentralState::Digits("012".to_string())).unwrap_err();
        assert!(matches!(err, CayleyError::LengthMismatch { expected: 2, found: 3 }));
    }
}
