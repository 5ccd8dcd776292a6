//! Linear algebra operations over GF(2)
//! Vectors are bit-packed, addition is XOR and matrices are stored row by row.

use std::fmt;
use std::ops::{Add, AddAssign, Index, IndexMut};
use std::str::FromStr;
use thiserror::Error;

const WORD_BITS: usize = u64::BITS as usize;

#[derive(Error, Debug, PartialEq)]
pub enum LinalgError {
    #[error("Invalid character {character:?} at position {position}, expected '0' or '1'")]
    InvalidInput { character: char, position: usize },
    #[error("Row length mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
}

/// Vector over GF(2) packed into 64-bit words
///
/// Bits past `len` in the last word are always zero, so derived equality
/// is element-wise equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BinaryVector {
    words: Vec<u64>,
    len: usize,
}

impl BinaryVector {
    /// Create an all-zero vector of the given length
    pub fn zeros(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(WORD_BITS)],
            len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, index: usize) -> bool {
        assert!(index < self.len, "bit index {index} out of range for length {}", self.len);
        self.words[index / WORD_BITS] >> (index % WORD_BITS) & 1 == 1
    }

    pub fn set(&mut self, index: usize, value: bool) {
        assert!(index < self.len, "bit index {index} out of range for length {}", self.len);
        let mask = 1u64 << (index % WORD_BITS);
        if value {
            self.words[index / WORD_BITS] |= mask;
        } else {
            self.words[index / WORD_BITS] &= !mask;
        }
    }

    pub fn flip(&mut self, index: usize) {
        assert!(index < self.len, "bit index {index} out of range for length {}", self.len);
        self.words[index / WORD_BITS] ^= 1u64 << (index % WORD_BITS);
    }

    /// Hamming weight
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| self.get(i))
    }

    /// Product `self × matrix`: XOR of the matrix rows selected by the set bits of `self`
    pub fn mul(&self, matrix: &BinaryMatrix) -> BinaryVector {
        assert_eq!(self.len, matrix.rows(), "vector length must match matrix row count");
        assert!(matrix.rows() != 0, "cannot multiply by an empty matrix");

        let mut result = BinaryVector::zeros(matrix.cols());
        for (i, row) in matrix.iter().enumerate() {
            if self.get(i) {
                result += row;
            }
        }
        result
    }
}

impl AddAssign<&BinaryVector> for BinaryVector {
    fn add_assign(&mut self, other: &BinaryVector) {
        assert_eq!(self.len, other.len, "vectors must have equal length");
        for (lhs, rhs) in self.words.iter_mut().zip(&other.words) {
            *lhs ^= rhs;
        }
    }
}

impl Add for &BinaryVector {
    type Output = BinaryVector;

    fn add(self, other: Self) -> BinaryVector {
        let mut result = self.clone();
        result += other;
        result
    }
}

impl Index<usize> for BinaryVector {
    type Output = bool;

    fn index(&self, index: usize) -> &bool {
        if self.get(index) {
            &true
        } else {
            &false
        }
    }
}

impl FromIterator<bool> for BinaryVector {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut words = Vec::new();
        let mut len = 0;
        for bit in iter {
            if len % WORD_BITS == 0 {
                words.push(0);
            }
            if bit {
                words[len / WORD_BITS] |= 1u64 << (len % WORD_BITS);
            }
            len += 1;
        }
        Self { words, len }
    }
}

impl FromStr for BinaryVector {
    type Err = LinalgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .map(|(position, character)| match character {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(LinalgError::InvalidInput { character, position }),
            })
            .collect()
    }
}

impl fmt::Display for BinaryVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Matrix over GF(2) (binary field) where operations are performed with XOR
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMatrix {
    cols: usize,
    data: Vec<BinaryVector>,
}

impl BinaryMatrix {
    /// Create a zero matrix with given dimensions
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            cols,
            data: vec![BinaryVector::zeros(cols); rows],
        }
    }

    /// Create an identity matrix of given size
    pub fn identity(size: usize) -> Self {
        let mut matrix = Self::new(size, size);
        for i in 0..size {
            matrix[i].set(i, true);
        }
        matrix
    }

    /// Build a matrix from rows that must all share one length
    pub fn from_rows(rows: Vec<BinaryVector>) -> Result<Self, LinalgError> {
        let cols = rows.first().map_or(0, BinaryVector::len);
        if let Some(bad) = rows.iter().find(|row| row.len() != cols) {
            return Err(LinalgError::DimensionMismatch {
                expected: cols,
                found: bad.len(),
            });
        }
        Ok(Self { cols, data: rows })
    }

    pub fn rows(&self) -> usize {
        self.data.len()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BinaryVector> {
        self.data.iter()
    }

    /// `row[target] += row[source]`
    fn add_row(&mut self, target: usize, source: usize) {
        debug_assert_ne!(target, source);
        let (target_row, source_row) = if target < source {
            let (head, tail) = self.data.split_at_mut(source);
            (&mut head[target], &tail[0])
        } else {
            let (head, tail) = self.data.split_at_mut(target);
            (&mut tail[0], &head[source])
        };
        *target_row += source_row;
    }

    /// Reduce the matrix in place to systematic form and return the pivot
    /// columns (the information set) in the order they were found.
    ///
    /// Columns are scanned left to right. A pivot found below row `p` is
    /// added into row `p` instead of swapped; the source row stays untouched,
    /// so this is still a sequence of elementary row operations. After column
    /// `j` is processed it is set only in its pivot row.
    ///
    /// A full row rank matrix yields exactly `rows()` pivots. Fewer pivots
    /// means the matrix is rank deficient.
    pub fn gaussian_elimination(&mut self) -> Vec<usize> {
        let mut pivots = Vec::with_capacity(self.rows());

        for col in 0..self.cols {
            let p = pivots.len();
            if p == self.rows() {
                break;
            }

            let Some(found) = (p..self.rows()).find(|&i| self.data[i].get(col)) else {
                continue;
            };
            if found != p {
                self.add_row(p, found);
            }
            debug_assert!(self.data[p].get(col));

            for i in 0..self.rows() {
                if i != p && self.data[i].get(col) {
                    self.add_row(i, p);
                }
            }

            pivots.push(col);
        }

        pivots
    }
}

impl Index<usize> for BinaryMatrix {
    type Output = BinaryVector;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl IndexMut<usize> for BinaryMatrix {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}
