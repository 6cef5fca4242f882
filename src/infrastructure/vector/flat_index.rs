//! Exact flat L2 vector index
//!
//! Stores vectors row-major in one contiguous buffer and answers
//! nearest-neighbour queries by a linear scan. Distances are squared
//! Euclidean, matching the usual flat-L2 index convention. Row `i` is the
//! `i`-th vector added, which keeps the index aligned with the metadata table.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainResult, RetrievalError};

/// A neighbour slot returned by [`FlatL2Index::search`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Matched row, or `None` when fewer than `k` rows exist
    pub row: Option<usize>,

    /// Squared L2 distance (`f32::INFINITY` for empty slots)
    pub distance: f32,
}

impl Neighbor {
    const fn hit(row: usize, distance: f32) -> Self {
        Self {
            row: Some(row),
            distance,
        }
    }

    /// The "no such neighbour" marker
    pub const fn sentinel() -> Self {
        Self {
            row: None,
            distance: f32::INFINITY,
        }
    }
}

/// Exact (brute-force) L2 index over fixed-dimension vectors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatL2Index {
    dimension: usize,
    data: Vec<f32>,
}

impl FlatL2Index {
    /// Create an empty index for `dimension`-length vectors
    pub const fn new(dimension: usize) -> Self {
        Self {
            dimension,
            data: Vec::new(),
        }
    }

    /// Vector dimension
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of stored vectors
    pub fn len(&self) -> usize {
        if self.dimension == 0 {
            0
        } else {
            self.data.len() / self.dimension
        }
    }

    /// Returns true if no vectors are stored
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Append a vector as the next row
    pub fn add(&mut self, vector: &[f32]) -> DomainResult<()> {
        if vector.len() != self.dimension {
            return Err(RetrievalError::DimensionMismatch {
                expected: self.dimension,
                found: vector.len(),
                row: self.len(),
            });
        }
        self.data.extend_from_slice(vector);
        Ok(())
    }

    /// The stored vector at `row`
    pub fn vector(&self, row: usize) -> Option<&[f32]> {
        if row >= self.len() {
            return None;
        }
        let start = row * self.dimension;
        Some(&self.data[start..start + self.dimension])
    }

    /// Check that the buffer holds a whole number of rows
    pub fn validate(&self) -> Result<(), String> {
        if self.dimension == 0 {
            return Err("dimension must be greater than 0".to_string());
        }
        if self.data.len() % self.dimension != 0 {
            return Err(format!(
                "{} values do not form rows of dimension {}",
                self.data.len(),
                self.dimension
            ));
        }
        Ok(())
    }

    /// The `k` nearest rows to `query` over the whole index
    ///
    /// Always returns exactly `k` slots; when `k` exceeds the row count the
    /// tail is padded with [`Neighbor::sentinel`] entries.
    pub fn search(&self, query: &[f32], k: usize) -> DomainResult<Vec<Neighbor>> {
        self.check_query(query)?;

        let mut neighbors = self.rank(query, 0..self.len(), k);
        neighbors.resize(k, Neighbor::sentinel());
        Ok(neighbors)
    }

    /// The `k` nearest rows to `query`, considering only `rows`
    ///
    /// Rows outside the index are ignored. No sentinel padding is added.
    pub fn search_rows<I>(&self, query: &[f32], rows: I, k: usize) -> DomainResult<Vec<Neighbor>>
    where
        I: IntoIterator<Item = usize>,
    {
        self.check_query(query)?;

        let len = self.len();
        Ok(self.rank(query, rows.into_iter().filter(|&row| row < len), k))
    }

    fn check_query(&self, query: &[f32]) -> DomainResult<()> {
        if query.len() == self.dimension {
            Ok(())
        } else {
            Err(RetrievalError::DimensionMismatch {
                expected: self.dimension,
                found: query.len(),
                row: 0,
            })
        }
    }

    fn rank(&self, query: &[f32], rows: impl Iterator<Item = usize>, k: usize) -> Vec<Neighbor> {
        if k == 0 {
            return Vec::new();
        }

        let mut scored: Vec<Neighbor> = rows
            .filter_map(|row| {
                self.vector(row)
                    .map(|v| Neighbor::hit(row, squared_l2(query, v)))
            })
            .collect();

        if scored.len() > k {
            scored.select_nth_unstable_by(k - 1, compare_neighbors);
            scored.truncate(k);
        }
        scored.sort_by(compare_neighbors);
        scored
    }
}

/// Ascending distance, ties broken by row
fn compare_neighbors(a: &Neighbor, b: &Neighbor) -> Ordering {
    a.distance
        .total_cmp(&b.distance)
        .then_with(|| a.row.cmp(&b.row))
}

/// Squared Euclidean distance between two equal-length vectors
pub fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}
