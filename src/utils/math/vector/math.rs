use std::cmp::Ordering;

use num::{Float, Num, NumCast};

use super::ZeroSpVec;

impl<N> ZeroSpVec<N>
where
    N: Num + Copy + Into<f64>,
{
    /// Dot product by merging the two sorted index lists.
    /// Cost is O(nnz(self) + nnz(other)).
    ///
    /// # Arguments
    /// * `other` - vector of the same dimensionality
    pub fn dot(&self, other: &Self) -> f64 {
        debug_assert_eq!(
            self.len(),
            other.len(),
            "Vectors must be of the same length to compute dot product."
        );
        let (a_inds, a_vals) = self.parts();
        let (b_inds, b_vals) = other.parts();
        let mut i = 0;
        let mut j = 0;
        let mut result = 0_f64;
        while i < a_inds.len() && j < b_inds.len() {
            match a_inds[i].cmp(&b_inds[j]) {
                Ordering::Equal => {
                    result += a_vals[i].into() * b_vals[j].into();
                    i += 1;
                    j += 1;
                }
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
            }
        }
        result
    }

    /// Euclidean (L2) norm
    pub fn l2_norm(&self) -> f64 {
        self.raw_iter()
            .map(|(_, v)| {
                let v: f64 = v.into();
                v * v
            })
            .sum::<f64>()
            .sqrt()
    }
}

impl<N> ZeroSpVec<N>
where
    N: Float + Into<f64>,
{
    /// Scale to unit L2 norm. The zero vector is left unchanged.
    pub fn l2_normalize(&mut self) -> &mut Self {
        let norm = self.l2_norm();
        if norm > 0.0 {
            if let Some(norm) = <N as NumCast>::from(norm) {
                for v in self.values_mut() {
                    *v = *v / norm;
                }
            }
        }
        self
    }
}
