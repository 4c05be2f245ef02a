use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A sparse vector of f32 weights over a fixed-dimension vocabulary.
///
/// Entries are kept sorted by column with no duplicates and no explicit zeros.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SparseVector {
    dim: usize,
    indices: Vec<u32>,
    values: Vec<f32>,
}

impl SparseVector {
    /// Builds a vector from `(column, weight)` pairs in any order.
    /// Weights for a repeated column are summed; zero weights are dropped.
    pub fn from_entries(dim: usize, mut entries: Vec<(u32, f32)>) -> Result<Self> {
        entries.sort_unstable_by_key(|&(idx, _)| idx);

        let mut indices = Vec::with_capacity(entries.len());
        let mut values: Vec<f32> = Vec::with_capacity(entries.len());
        for (idx, value) in entries {
            if idx as usize >= dim {
                return Err(Error::DimensionMismatch {
                    expected: dim,
                    actual: idx as usize + 1,
                });
            }
            if indices.last() == Some(&idx) {
                if let Some(last) = values.last_mut() {
                    *last += value;
                }
            } else {
                indices.push(idx);
                values.push(value);
            }
        }

        let mut v = Self { dim, indices, values };
        v.prune_zeros();
        Ok(v)
    }

    #[inline]
    #[must_use]
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored (non-zero) entries
    #[inline]
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.indices.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (u32, f32)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Weight stored at `idx`, zero if absent
    pub fn get(&self, idx: u32) -> f32 {
        match self.indices.binary_search(&idx) {
            Ok(pos) => self.values[pos],
            Err(_) => 0.0,
        }
    }

    #[inline]
    pub fn norm(&self) -> f32 {
        self.values.iter().map(|v| v * v).sum::<f32>().sqrt()
    }

    /// Normalize the vector to unit length. Zero vectors stay zero.
    #[inline]
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > f32::EPSILON {
            let inv_norm = 1.0 / norm;
            for x in &mut self.values {
                *x *= inv_norm;
            }
        }
    }

    /// Get normalized copy
    #[inline]
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut v = self.clone();
        v.normalize();
        v
    }

    /// Sparse dot product via merge of the sorted index lists
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += self.values[i] * other.values[j];
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Compute L2 (Euclidean) distance
    pub fn l2_distance(&self, other: &SparseVector) -> f32 {
        l2_from_dot(self.dot(other), self.norm_squared(), other.norm_squared())
    }

    /// Compute cosine similarity with another vector; zero if either is zero
    pub fn cosine_similarity(&self, other: &SparseVector) -> f32 {
        cosine_from_dot(self.dot(other), self.norm_squared(), other.norm_squared())
    }

    #[inline]
    pub(crate) fn norm_squared(&self) -> f32 {
        self.values.iter().map(|v| v * v).sum()
    }

    fn prune_zeros(&mut self) {
        if self.values.iter().all(|&v| v != 0.0) {
            return;
        }
        let (indices, values): (Vec<u32>, Vec<f32>) = self
            .iter()
            .filter(|&(_, v)| v != 0.0)
            .unzip();
        self.indices = indices;
        self.values = values;
    }
}

/// Euclidean distance from a dot product and both squared norms.
#[inline]
pub(crate) fn l2_from_dot(dot: f32, a_sq: f32, b_sq: f32) -> f32 {
    (a_sq + b_sq - 2.0 * dot).max(0.0).sqrt()
}

/// Cosine similarity from a dot product and both squared norms; zero if
/// either vector is zero.
#[inline]
pub(crate) fn cosine_from_dot(dot: f32, a_sq: f32, b_sq: f32) -> f32 {
    if a_sq == 0.0 || b_sq == 0.0 {
        return 0.0;
    }
    dot / (a_sq.sqrt() * b_sq.sqrt())
}
