use crate::config::Distance;
use crate::vector::{cosine_from_dot, l2_from_dot, SparseVector};
use crate::{Error, Result};
use ordered_float::OrderedFloat;

/// Nearest reference row for one query vector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub row: usize,
    pub distance: f32,
}

/// Exact nearest-neighbor index over sparse reference vectors.
///
/// Reference vectors are stored as per-column posting lists so a query only
/// touches the rows that share at least one column with it; every other row
/// contributes a dot product of zero. Rows keep insertion order and ties on
/// distance go to the lowest row.
#[derive(Debug, Clone)]
pub struct NeighborIndex {
    dim: usize,
    distance: Distance,
    // column -> (row, weight)
    postings: Vec<Vec<(u32, f32)>>,
    norms_sq: Vec<f32>,
}

impl NeighborIndex {
    pub fn build(vectors: &[SparseVector], distance: Distance) -> Result<Self> {
        let first = vectors.first().ok_or(Error::EmptyCatalog)?;
        let dim = first.dim();

        let mut postings: Vec<Vec<(u32, f32)>> = vec![Vec::new(); dim];
        let mut norms_sq = Vec::with_capacity(vectors.len());
        for (row, vector) in vectors.iter().enumerate() {
            if vector.dim() != dim {
                return Err(Error::DimensionMismatch {
                    expected: dim,
                    actual: vector.dim(),
                });
            }
            for (col, weight) in vector.iter() {
                postings[col as usize].push((row as u32, weight));
            }
            norms_sq.push(vector.norm_squared());
        }

        tracing::debug!(rows = vectors.len(), dim, ?distance, "built neighbor index");
        Ok(Self {
            dim,
            distance,
            postings,
            norms_sq,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.norms_sq.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.norms_sq.is_empty()
    }

    #[inline]
    pub fn distance(&self) -> Distance {
        self.distance
    }

    /// Single nearest row for every query, in query order.
    pub fn query(&self, queries: &[SparseVector]) -> Result<Vec<Neighbor>> {
        queries.iter().map(|q| self.query_one(q)).collect()
    }

    /// Nearest row for one query. A zero query is equidistant from every
    /// row of equal norm and resolves to the lowest such row.
    pub fn query_one(&self, query: &SparseVector) -> Result<Neighbor> {
        self.distances(query)?
            .into_iter()
            .enumerate()
            .map(|(row, distance)| Neighbor { row, distance })
            .min_by_key(|n| (OrderedFloat(n.distance), n.row))
            .ok_or(Error::EmptyCatalog)
    }

    /// Queries every fragment independently and keeps the fragment whose
    /// nearest row is closest overall. Returns `(fragment, neighbor)`; the
    /// earliest fragment wins ties. `None` when `queries` is empty.
    pub fn nearest_overall(&self, queries: &[SparseVector]) -> Result<Option<(usize, Neighbor)>> {
        let neighbors = self.query(queries)?;
        Ok(neighbors
            .into_iter()
            .enumerate()
            .min_by_key(|(fragment, n)| (OrderedFloat(n.distance), *fragment)))
    }

    fn distances(&self, query: &SparseVector) -> Result<Vec<f32>> {
        if query.dim() != self.dim {
            return Err(Error::DimensionMismatch {
                expected: self.dim,
                actual: query.dim(),
            });
        }

        let mut dots = vec![0.0f32; self.len()];
        for (col, q) in query.iter() {
            for &(row, weight) in &self.postings[col as usize] {
                dots[row as usize] += q * weight;
            }
        }

        let q_sq = query.norm_squared();
        let distances = dots
            .iter()
            .zip(&self.norms_sq)
            .map(|(&dot, &r_sq)| match self.distance {
                Distance::Euclidean => l2_from_dot(dot, q_sq, r_sq),
                Distance::Cosine => 1.0 - cosine_from_dot(dot, q_sq, r_sq),
            })
            .collect();
        Ok(distances)
    }
}
