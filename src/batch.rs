//! Canonical batch types: a 2-D matrix of decoded (small-integer) states and
//! its encoded (packed-word) counterpart.
//!
//! Rather than the dynamically-typed, overloaded constructor the original
//! implementation accepts (strings, nested lists, tensors), this crate
//! exposes one concrete matrix type per representation with a small set of
//! explicit constructors (spec §9 design note).

use crate::error::{CayleyError, Result};

/// A batch of decoded states: `rows` states, each `n` small non-negative
/// integers, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateBatch {
    data: Vec<u64>,
    n: usize,
}

impl StateBatch {
    /// Builds a single-row batch from a string of decimal digits, one digit
    /// per position (so alphabet size is implicitly bounded by 10).
    pub fn from_string(s: &str) -> Result<Self> {
        let mut data = Vec::with_capacity(s.len());
        for c in s.chars() {
            let d = c.to_digit(10).ok_or(CayleyError::InvalidConfig {
                reason: "central/start state string must be all decimal digits",
            })?;
            data.push(d as u64);
        }
        let n = data.len();
        Ok(Self { data, n })
    }

    /// Builds a batch from an explicit list of equal-length rows.
    pub fn from_rows(rows: &[Vec<u64>]) -> Result<Self> {
        let n = rows.first().map(Vec::len).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * n);
        for row in rows {
            if row.len() != n {
                return Err(CayleyError::LengthMismatch {
                    expected: n,
                    found: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self { data, n })
    }

    /// Builds a batch from a flat row-major buffer given the row width `n`.
    pub fn from_flat_with_n(flat: Vec<u64>, n: usize) -> Result<Self> {
        if n == 0 || flat.len() % n != 0 {
            return Err(CayleyError::LengthMismatch {
                expected: n,
                found: flat.len(),
            });
        }
        Ok(Self { data: flat, n })
    }

    /// Number of elements per state.
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of rows (states) in the batch.
    #[inline]
    pub fn rows(&self) -> usize {
        if self.n == 0 {
            0
        } else {
            self.data.len() / self.n
        }
    }

    /// Borrow a single row.
    #[inline]
    pub fn row(&self, i: usize) -> &[u64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    /// Iterate over all rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[u64]> {
        self.data.chunks_exact(self.n.max(1))
    }

    /// Append a single row. Panics if the row length doesn't match `n`.
    pub fn push_row(&mut self, row: &[u64]) {
        assert_eq!(row.len(), self.n, "row length must match batch width n");
        self.data.extend_from_slice(row);
    }

    /// Decimal-digit string form of each row (valid only when every element
    /// is a single digit, i.e. alphabet size <= 10).
    pub fn to_strings(&self) -> Vec<String> {
        self.iter_rows()
            .map(|row| row.iter().map(|v| char::from_digit(*v as u32, 10).unwrap_or('?')).collect())
            .collect()
    }

    /// Raw row-major backing storage.
    #[inline]
    pub fn as_flat(&self) -> &[u64] {
        &self.data
    }
}

/// A batch of encoded states: `rows` states, each `words_per_state` 64-bit
/// words, stored row-major. Produced by [`crate::codec::StateCodec::encode`]
/// and consumed by the neighbor kernel, hasher, and dedup stages.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EncodedBatch {
    data: Vec<u64>,
    words_per_state: usize,
}

impl EncodedBatch {
    /// An empty batch with the given row width.
    pub fn new(words_per_state: usize) -> Self {
        Self {
            data: Vec::new(),
            words_per_state,
        }
    }

    /// An empty batch with row capacity pre-reserved.
    pub fn with_capacity(rows: usize, words_per_state: usize) -> Self {
        Self {
            data: Vec::with_capacity(rows * words_per_state),
            words_per_state,
        }
    }

    /// Words per encoded state.
    #[inline]
    pub fn words_per_state(&self) -> usize {
        self.words_per_state
    }

    /// Number of rows (states) in the batch.
    #[inline]
    pub fn rows(&self) -> usize {
        if self.words_per_state == 0 {
            0
        } else {
            self.data.len() / self.words_per_state
        }
    }

    /// `true` if the batch holds no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows() == 0
    }

    /// Borrow a single encoded row.
    #[inline]
    pub fn row(&self, i: usize) -> &[u64] {
        let w = self.words_per_state;
        &self.data[i * w..(i + 1) * w]
    }

    /// Mutably borrow a single encoded row.
    #[inline]
    pub fn row_mut(&mut self, i: usize) -> &mut [u64] {
        let w = self.words_per_state;
        &mut self.data[i * w..(i + 1) * w]
    }

    /// Append a single encoded row.
    pub fn push_row(&mut self, words: &[u64]) {
        debug_assert_eq!(words.len(), self.words_per_state);
        self.data.extend_from_slice(words);
    }

    /// Append every row of `other` (must share `words_per_state`).
    pub fn extend_from(&mut self, other: &EncodedBatch) {
        debug_assert_eq!(self.words_per_state, other.words_per_state);
        self.data.extend_from_slice(&other.data);
    }

    /// Iterate over all rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[u64]> {
        self.data.chunks_exact(self.words_per_state.max(1))
    }

    /// A contiguous sub-range of rows, e.g. for `batch_size`-limited kernel
    /// invocations.
    pub fn row_slice(&self, start: usize, end: usize) -> EncodedBatch {
        let w = self.words_per_state;
        EncodedBatch {
            data: self.data[start * w..end * w].to_vec(),
            words_per_state: w,
        }
    }

    /// Raw row-major backing storage.
    #[inline]
    pub fn as_flat(&self) -> &[u64] {
        &self.data
    }
}
