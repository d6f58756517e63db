//! Sparse feature vectors.

use serde::{Deserialize, Serialize};

/// A sparse vector of non-negative weights.
///
/// Entries are sorted by ascending index with no duplicates. Every index is
/// below `dim` unless the vector was built by hand with [`SparseVector::from_entries`]
/// for a different vocabulary; consumers skip out-of-range indices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    dim: usize,
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Create the all-zero vector of the given dimension.
    pub fn zeros(dim: usize) -> Self {
        SparseVector {
            dim,
            entries: Vec::new(),
        }
    }

    /// Create a vector from `(index, weight)` pairs.
    ///
    /// Pairs are sorted by index, weights of repeated indices are summed and
    /// zero weights are dropped.
    pub fn from_entries(dim: usize, mut entries: Vec<(usize, f64)>) -> Self {
        entries.sort_by_key(|&(index, _)| index);
        let mut merged: Vec<(usize, f64)> = Vec::with_capacity(entries.len());
        for (index, weight) in entries {
            match merged.last_mut() {
                Some((last, acc)) if *last == index => *acc += weight,
                _ => merged.push((index, weight)),
            }
        }
        merged.retain(|&(_, weight)| weight != 0.0);
        SparseVector {
            dim,
            entries: merged,
        }
    }

    /// Create a vector from a dense slice, keeping non-zero components.
    pub fn from_dense(values: &[f64]) -> Self {
        SparseVector {
            dim: values.len(),
            entries: values
                .iter()
                .enumerate()
                .filter(|&(_, &v)| v != 0.0)
                .map(|(i, &v)| (i, v))
                .collect(),
        }
    }

    /// Get the dimension (vocabulary size).
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Get the stored entries in ascending index order.
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Iterate over `(index, weight)` pairs in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of stored (non-zero) entries.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Check whether every component is zero.
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the weight at an index (0.0 when absent).
    pub fn get(&self, index: usize) -> f64 {
        self.entries
            .binary_search_by_key(&index, |&(i, _)| i)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    /// Euclidean norm, summed in ascending index order.
    pub fn norm(&self) -> f64 {
        self.entries
            .iter()
            .map(|&(_, w)| w * w)
            .sum::<f64>()
            .sqrt()
    }

    /// Dot product with a dense vector. Indices past its end are ignored.
    pub fn dot_dense(&self, dense: &[f64]) -> f64 {
        self.entries
            .iter()
            .filter_map(|&(i, w)| dense.get(i).map(|d| w * d))
            .sum()
    }

    /// Expand into a dense vector of length `dim`.
    pub fn to_dense(&self) -> Vec<f64> {
        let mut dense = vec![0.0; self.dim];
        for &(i, w) in &self.entries {
            if i < self.dim {
                dense[i] = w;
            }
        }
        dense
    }
}
