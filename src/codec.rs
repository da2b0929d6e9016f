//! `StateCodec`: encodes/decodes permutation-like states into a fixed-width
//! packed bit vector stored across 64-bit words.
//!
//! Two modes:
//! - [`CodecMode::Raw`]: one element per machine word (`words_per_state == n`).
//! - [`CodecMode::Packed`]: each element occupies `w` bits, packed high-to-low
//!   within each word (`words_per_state == ceil(n * w / 64)`). This bit order
//!   is a frozen part of the external contract: neighbor generation and
//!   hashing both depend on it.

use crate::batch::{EncodedBatch, StateBatch};
use crate::error::{CayleyError, Result};

/// How the caller asked for bit width to be chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitEncodingWidth {
    /// Raw mode: one `u64` per element.
    None,
    /// Packed mode with an explicit bit width.
    Fixed(u32),
    /// Packed mode, width derived from the alphabet size.
    Auto,
}

/// Resolved codec mode, after auto-derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecMode {
    /// One element per word.
    Raw,
    /// `width` bits per element, MSB-first within each word.
    Packed {
        /// Bits occupied by each element.
        width: u32,
    },
}

/// Smallest bit width that can represent alphabet size `k` (`k >= 1`).
pub fn auto_width(k: u64) -> u32 {
    if k <= 1 {
        1
    } else {
        64 - (k - 1).leading_zeros()
    }
}

/// Encodes/decodes batches of states under a fixed mode for a fixed `n`.
#[derive(Debug, Clone)]
pub struct StateCodec {
    n: usize,
    mode: CodecMode,
    words_per_state: usize,
}

impl StateCodec {
    /// Builds a codec for state length `n`, choosing the mode from
    /// `requested` and the alphabet size `k` (used only for `Auto`/`Fixed`
    /// width derivation; ignored in raw mode).
    pub fn new(n: usize, requested: BitEncodingWidth, alphabet_size: u64) -> Result<Self> {
        if n == 0 {
            return Err(CayleyError::InvalidConfig {
                reason: "state length n must be positive",
            });
        }
        let mode = match requested {
            BitEncodingWidth::None => CodecMode::Raw,
            BitEncodingWidth::Fixed(w) => {
                if w == 0 || w > 64 {
                    return Err(CayleyError::InvalidConfig {
                        reason: "packed bit width must be in 1..=64",
                    });
                }
                CodecMode::Packed { width: w }
            }
            BitEncodingWidth::Auto => CodecMode::Packed {
                width: auto_width(alphabet_size),
            },
        };
        let words_per_state = match mode {
            CodecMode::Raw => n,
            CodecMode::Packed { width } => ((n as u64 * width as u64) as usize + 63) / 64,
        };
        Ok(Self {
            n,
            mode,
            words_per_state,
        })
    }

    /// State length this codec was built for.
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Resolved codec mode.
    #[inline]
    pub fn mode(&self) -> CodecMode {
        self.mode
    }

    /// Words occupied by one encoded state.
    #[inline]
    pub fn words_per_state(&self) -> usize {
        self.words_per_state
    }

    /// Encodes a batch of decoded (small-integer) rows into packed words.
    pub fn encode(&self, states: &StateBatch) -> Result<EncodedBatch> {
        if states.n() != self.n {
            return Err(CayleyError::LengthMismatch {
                expected: self.n,
                found: states.n(),
            });
        }
        let mut out = EncodedBatch::with_capacity(states.rows(), self.words_per_state);
        match self.mode {
            CodecMode::Raw => {
                for row in states.iter_rows() {
                    out.push_row(row);
                }
            }
            CodecMode::Packed { width } => {
                let mut words = vec![0u64; self.words_per_state];
                for (state_index, row) in states.iter_rows().enumerate() {
                    words.iter_mut().for_each(|w| *w = 0);
                    for (position, &value) in row.iter().enumerate() {
                        if width < 64 && value >= (1u64 << width) {
                            return Err(CayleyError::ValueOutOfAlphabet {
                                state_index,
                                position,
                                value,
                                width,
                            });
                        }
                        pack_element(&mut words, position, width, value);
                    }
                    out.push_row(&words);
                }
            }
        }
        Ok(out)
    }

    /// Decodes a batch of packed words back into small-integer rows. Exact
    /// inverse of [`Self::encode`] on well-formed input.
    pub fn decode(&self, batch: &EncodedBatch) -> Result<StateBatch> {
        if batch.words_per_state() != self.words_per_state {
            return Err(CayleyError::LengthMismatch {
                expected: self.words_per_state,
                found: batch.words_per_state(),
            });
        }
        let mut flat = Vec::with_capacity(batch.rows() * self.n);
        match self.mode {
            CodecMode::Raw => {
                for row in batch.iter_rows() {
                    flat.extend_from_slice(row);
                }
            }
            CodecMode::Packed { width } => {
                for row in batch.iter_rows() {
                    for position in 0..self.n {
                        flat.push(unpack_element(row, position, width));
                    }
                }
            }
        }
        StateBatch::from_flat_with_n(flat, self.n)
    }
}

/// Writes `value` (must fit in `width` bits) into logical element slot
/// `position` of `words`, high bits of word 0 holding element 0, continuing
/// into subsequent words without gaps at word boundaries.
#[inline]
pub(crate) fn pack_element(words: &mut [u64], position: usize, width: u32, value: u64) {
    let bit_offset = position as u64 * width as u64;
    let word_bits = 64u64;
    let word_idx = (bit_offset / word_bits) as usize;
    let bit_in_word = bit_offset % word_bits;
    // Bits are placed MSB-first: the element occupies the bit range
    // [bit_in_word, bit_in_word + width) measured from the top of the word.
    let hi_start = word_bits as i64 - bit_in_word as i64 - width as i64;
    if hi_start >= 0 {
        words[word_idx] |= value << hi_start;
    } else {
        // Element straddles into the next word.
        let bits_in_first = width as u64 - (bit_in_word + width as u64 - word_bits);
        let bits_in_second = width as u64 - bits_in_first;
        let hi_part = value >> bits_in_second;
        words[word_idx] |= hi_part;
        let lo_part = value & ((1u64 << bits_in_second) - 1);
        words[word_idx + 1] |= lo_part << (word_bits - bits_in_second);
    }
}

/// Inverse of [`pack_element`].
#[inline]
pub(crate) fn unpack_element(words: &[u64], position: usize, width: u32) -> u64 {
    let bit_offset = position as u64 * width as u64;
    let word_bits = 64u64;
    let word_idx = (bit_offset / word_bits) as usize;
    let bit_in_word = bit_offset % word_bits;
    let mask = if width == 64 { u64::MAX } else { (1u64 << width) - 1 };
    let hi_start = word_bits as i64 - bit_in_word as i64 - width as i64;
    if hi_start >= 0 {
        (words[word_idx] >> hi_start) & mask
    } else {
        let bits_in_first = width as u64 - (bit_in_word + width as u64 - word_bits);
        let bits_in_second = width as u64 - bits_in_first;
        let hi_part = words[word_idx] & ((1u64 << bits_in_first) - 1);
        let lo_part = words[word_idx + 1] >> (word_bits - bits_in_second);
        (hi_part << bits_in_second) | lo_part
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_width_matches_log2_ceiling() {
        assert_eq!(auto_width(1), 1);
        assert_eq!(auto_width(2), 1);
        assert_eq!(auto_width(3), 2);
        assert_eq!(auto_width(4), 2);
        assert_eq!(auto_width(5), 3);
        assert_eq!(auto_width(64), 6);
        assert_eq!(auto_width(65), 7);
    }

    #[test]
    fn raw_mode_round_trip() {
        let codec = StateCodec::new(5, BitEncodingWidth::None, 3).unwrap();
        assert_eq!(codec.words_per_state(), 5);
        let states = StateBatch::from_rows(&[vec![0, 1, 2, 1, 0], vec![2, 1, 0, 0, 1]]).unwrap();
        let encoded = codec.encode(&states).unwrap();
        let decoded = codec.decode(&encoded).unwrap();
        assert_eq!(decoded, states);
    }

    #[test]
    fn packed_mode_round_trip_various_widths() {
        for width in [1u32, 2, 3, 5, 7, 9, 13, 31, 64] {
            let n = 9usize;
            let codec = StateCodec::new(n, BitEncodingWidth::Fixed(width), 1 << width.min(20)).unwrap();
            let max_val = if width >= 64 { u64::MAX } else { (1u64 << width) - 1 };
            let row: Vec<u64> = (0..n as u64).map(|i| (i * 7919) % (max_val + 1)).collect();
            let states = StateBatch::from_rows(&[row.clone()]).unwrap();
            let encoded = codec.encode(&states).unwrap();
            let decoded = codec.decode(&encoded).unwrap();
            assert_eq!(decoded.row(0), row.as_slice(), "round trip failed for width {width}");
        }
    }

    #[test]
    fn packed_mode_rejects_out_of_range_values() {
        let codec = StateCodec::new(2, BitEncodingWidth::Fixed(2), 4).unwrap();
        let states = StateBatch::from_rows(&[vec![0, 4]]).unwrap();
        let err = codec.encode(&states).unwrap_err();
        assert!(matches!(err, CayleyError::ValueOutOfAlphabet { .. }));
    }

    #[test]
    fn words_per_state_matches_spec_example() {
        // n=40, w=6 -> 240 bits -> 4 u64 words.
        let codec = StateCodec::new(40, BitEncodingWidth::Fixed(6), 40).unwrap();
        assert_eq!(codec.words_per_state(), 4);
    }

    /// Independent oracle for `pack_element`/`unpack_element`: builds the same
    /// MSB-first bit layout with `bitvec` instead of hand-written shift/mask,
    /// so a bug in the production packer can't also be baked into its own test.
    #[test]
    fn bitvec_oracle_confirms_msb_first_packing() {
        use bitvec::field::BitField;
        use bitvec::order::Msb0;
        use bitvec::vec::BitVec;

        let n = 9usize;
        let width = 5u32;
        let codec = StateCodec::new(n, BitEncodingWidth::Fixed(width), 1 << width).unwrap();
        let row: Vec<u64> = (0..n as u64).map(|i| (i * 13) % (1 << width)).collect();
        let states = StateBatch::from_rows(&[row.clone()]).unwrap();
        let encoded = codec.encode(&states).unwrap();

        let mut bits: BitVec<u64, Msb0> = BitVec::new();
        for &value in &row {
            for b in (0..width).rev() {
                bits.push((value >> b) & 1 == 1);
            }
        }
        bits.resize(codec.words_per_state() * 64, false);

        let oracle_words: Vec<u64> = bits.chunks(64).map(|chunk| chunk.load_be::<u64>()).collect();
        assert_eq!(oracle_words, encoded.row(0).to_vec());
    }
}
