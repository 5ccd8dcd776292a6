//! Index permutations and their application to sequences, vectors and matrix columns

use crate::linear_algebra::{BinaryMatrix, BinaryVector};
use std::ops::Index;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum PermutationError {
    #[error("Index {index} is out of range or repeated in a permutation of length {len}")]
    NotABijection { index: usize, len: usize },
}

/// Bijection on `0..len`. Applying it moves element `i` to position `self[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation(Vec<usize>);

impl Permutation {
    pub fn identity(len: usize) -> Self {
        Self((0..len).collect())
    }

    /// Wrap a list of indices, checking that every index in `0..len` appears once
    pub fn from_indices(indices: Vec<usize>) -> Result<Self, PermutationError> {
        let len = indices.len();
        let mut seen = vec![false; len];
        for &index in &indices {
            if index >= len || seen[index] {
                return Err(PermutationError::NotABijection { index, len });
            }
            seen[index] = true;
        }
        Ok(Self(indices))
    }

    /// Order positions by descending key. The result maps each rank to the
    /// original position holding it, so it is the inverse of the permutation
    /// that sorts the keys. Equal keys keep their original relative order.
    /// Keys are compared with `total_cmp`, so a NaN key ranks above every number.
    pub fn by_descending(keys: &[f64]) -> Self {
        let mut order: Vec<usize> = (0..keys.len()).collect();
        order.sort_by(|&a, &b| keys[b].total_cmp(&keys[a]));
        Self(order)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn invert(&self) -> Self {
        let mut inverse = vec![0; self.0.len()];
        for (i, &p) in self.0.iter().enumerate() {
            inverse[p] = i;
        }
        Self(inverse)
    }

    /// `result[self[i]] = seq[i]`
    pub fn apply<P: Permute + ?Sized>(&self, seq: &P) -> P::Output {
        seq.permute(self)
    }
}

impl Index<usize> for Permutation {
    type Output = usize;

    fn index(&self, index: usize) -> &usize {
        &self.0[index]
    }
}

/// Sequences a [`Permutation`] can rearrange
pub trait Permute {
    type Output;

    fn permute(&self, perm: &Permutation) -> Self::Output;
}

impl<T: Clone + Default> Permute for [T] {
    type Output = Vec<T>;

    fn permute(&self, perm: &Permutation) -> Vec<T> {
        assert_eq!(self.len(), perm.len(), "permutation length must match sequence length");
        let mut result = vec![T::default(); self.len()];
        for (i, value) in self.iter().enumerate() {
            result[perm[i]] = value.clone();
        }
        result
    }
}

impl Permute for BinaryVector {
    type Output = BinaryVector;

    fn permute(&self, perm: &Permutation) -> BinaryVector {
        assert_eq!(self.len(), perm.len(), "permutation length must match vector length");
        let mut result = BinaryVector::zeros(self.len());
        for (i, bit) in self.iter().enumerate() {
            if bit {
                result.set(perm[i], true);
            }
        }
        result
    }
}

/// Permutes the columns of every row. An empty matrix maps to itself.
impl Permute for BinaryMatrix {
    type Output = BinaryMatrix;

    fn permute(&self, perm: &Permutation) -> BinaryMatrix {
        let mut result = BinaryMatrix::new(self.rows(), self.cols());
        for (i, row) in self.iter().enumerate() {
            result[i] = row.permute(perm);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_indices_validates() {
        assert!(Permutation::from_indices(vec![2, 0, 1]).is_ok());
        assert_eq!(
            Permutation::from_indices(vec![0, 0, 1]),
            Err(PermutationError::NotABijection { index: 0, len: 3 })
        );
        assert_eq!(
            Permutation::from_indices(vec![0, 3, 1]),
            Err(PermutationError::NotABijection { index: 3, len: 3 })
        );
    }

    #[test]
    fn test_invert() {
        let perm = Permutation::from_indices(vec![2, 0, 3, 1]).unwrap();
        let inverse = perm.invert();
        assert_eq!(inverse.as_slice(), &[1, 3, 0, 2]);
        assert_eq!(inverse.invert(), perm);
    }

    #[test]
    fn test_apply_moves_elements() {
        let perm = Permutation::from_indices(vec![2, 0, 1]).unwrap();
        assert_eq!(perm.apply(&['a', 'b', 'c'][..]), vec!['b', 'c', 'a']);
    }

    #[test]
    fn test_round_trip() {
        let perm = Permutation::from_indices(vec![4, 1, 3, 0, 2]).unwrap();
        let seq = [0.5, -1.25, 3.0, 7.5, 0.0];

        let forward = perm.apply(&seq[..]);
        assert_eq!(perm.invert().apply(&forward[..]), seq.to_vec());

        let backward = perm.invert().apply(&seq[..]);
        assert_eq!(perm.apply(&backward[..]), seq.to_vec());
    }

    #[test]
    fn test_permute_binary_vector() {
        let perm = Permutation::from_indices(vec![3, 2, 1, 0, 4]).unwrap();
        let bits: BinaryVector = "11001".parse().unwrap();
        assert_eq!(perm.apply(&bits).to_string(), "00111");
        assert_eq!(perm.invert().apply(&perm.apply(&bits)), bits);
    }

    #[test]
    fn test_permute_columns() {
        let rows = vec!["110".parse().unwrap(), "011".parse().unwrap()];
        let matrix = BinaryMatrix::from_rows(rows).unwrap();
        let perm = Permutation::from_indices(vec![1, 2, 0]).unwrap();

        let shuffled = perm.apply(&matrix);
        assert_eq!(shuffled[0].to_string(), "011");
        assert_eq!(shuffled[1].to_string(), "101");

        let empty = BinaryMatrix::new(0, 0);
        assert_eq!(Permutation::identity(0).apply(&empty), empty);
    }

    #[test]
    fn test_by_descending() {
        let order = Permutation::by_descending(&[0.1, 0.9, 0.5, 0.9]);
        assert_eq!(order.as_slice(), &[1, 3, 2, 0]);
    }

    #[test]
    fn test_by_descending_with_nan() {
        let keys: Vec<f64> = (0..200)
            .map(|i| if i % 7 == 3 { f64::NAN } else { (i * 37 % 101) as f64 / 10.0 })
            .collect();
        let order = Permutation::by_descending(&keys);

        assert!(Permutation::from_indices(order.as_slice().to_vec()).is_ok());
        let ranked: Vec<f64> = order.as_slice().iter().map(|&i| keys[i]).collect();
        let nan_count = keys.iter().filter(|k| k.is_nan()).count();
        assert!(ranked[..nan_count].iter().all(|k| k.is_nan()));
        assert!(ranked[nan_count..].windows(2).all(|w| w[0] >= w[1]));
    }
}
