use std::time::Instant;

use rayon::prelude::*;
use tracing::info;

use crate::vectorizer::{
    compute::compare::{Compare, UnitCompare},
    DocumentVector,
};

/// Dense N×N cosine similarity matrix over a fixed document set.
///
/// Only the upper triangle is computed; the lower triangle is a copy of it,
/// so `get(i, j) == get(j, i)` holds exactly. Entries are clamped to
/// `[0, 1]`. A zero vector has similarity 0 with every document, itself
/// included.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    n: usize,
    /// row-major
    data: Vec<f64>,
}

impl SimilarityMatrix {
    /// Build from unit-length vectors (cosine == dot product)
    pub fn build(vectors: &[DocumentVector]) -> Self {
        Self::build_with::<UnitCompare>(vectors)
    }

    /// Build with an explicit comparison
    pub fn build_with<C>(vectors: &[DocumentVector]) -> Self
    where
        C: Compare<f64>,
    {
        let start = Instant::now();
        let n = vectors.len();

        // row i holds entries (i, i..n)
        let upper: Vec<Vec<f64>> = (0..n)
            .into_par_iter()
            .map(|i| {
                let a = &vectors[i];
                vectors[i..]
                    .iter()
                    .map(|b| {
                        if a.is_zero_vector() || b.is_zero_vector() {
                            0.0
                        } else {
                            C::cosine_similarity(a, b).clamp(0.0, 1.0)
                        }
                    })
                    .collect()
            })
            .collect();

        let mut data = vec![0.0; n * n];
        for (i, row) in upper.iter().enumerate() {
            for (offset, &score) in row.iter().enumerate() {
                let j = i + offset;
                data[i * n + j] = score;
                data[j * n + i] = score;
            }
        }
        info!(
            documents = n,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "similarity matrix built"
        );
        Self { n, data }
    }

    /// Number of rows (== columns)
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.n && j < self.n {
            Some(self.data[i * self.n + j])
        } else {
            None
        }
    }

    /// Similarities of document `i` to every document
    #[inline]
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        if i < self.n {
            Some(&self.data[i * self.n..(i + 1) * self.n])
        } else {
            None
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks(0) panics
        self.data.chunks(self.n.max(1))
    }
}
