use num::Num;

use crate::utils::math::vector::ZeroSpVec;

/// Pairwise comparison of sparse vectors
pub trait Compare<N>
where
    N: Num + Copy,
{
    /// dot積
    /// d(a, b) = Σ(a_i * b_i)
    fn dot(a: &ZeroSpVec<N>, b: &ZeroSpVec<N>) -> f64;
    /// コサイン類似度
    /// cos(θ) = Σ(a_i * b_i) / (||a|| * ||b||)
    /// 0.0 when either side is the zero vector
    fn cosine_similarity(a: &ZeroSpVec<N>, b: &ZeroSpVec<N>) -> f64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCompare;

impl<N> Compare<N> for DefaultCompare
where
    N: Num + Copy + Into<f64>,
{
    #[inline]
    fn dot(a: &ZeroSpVec<N>, b: &ZeroSpVec<N>) -> f64 {
        a.dot(b)
    }

    #[inline]
    fn cosine_similarity(a: &ZeroSpVec<N>, b: &ZeroSpVec<N>) -> f64 {
        let norm = a.l2_norm() * b.l2_norm();
        if norm == 0.0 {
            0.0
        } else {
            a.dot(b) / norm
        }
    }
}

/// Compare for vectors already scaled to unit length:
/// cosine similarity reduces to the dot product.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitCompare;

impl<N> Compare<N> for UnitCompare
where
    N: Num + Copy + Into<f64>,
{
    #[inline]
    fn dot(a: &ZeroSpVec<N>, b: &ZeroSpVec<N>) -> f64 {
        a.dot(b)
    }

    #[inline]
    fn cosine_similarity(a: &ZeroSpVec<N>, b: &ZeroSpVec<N>) -> f64 {
        a.dot(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_ignores_magnitude() {
        let a = ZeroSpVec::from_pairs(3, vec![(0u32, 1.0f64), (1, 1.0)]).unwrap();
        let b = ZeroSpVec::from_pairs(3, vec![(0u32, 5.0f64), (1, 5.0)]).unwrap();
        let c = ZeroSpVec::from_pairs(3, vec![(2u32, 2.0f64)]).unwrap();
        assert!((DefaultCompare::cosine_similarity(&a, &b) - 1.0).abs() < 1e-12);
        assert_eq!(DefaultCompare::cosine_similarity(&a, &c), 0.0);
        assert_eq!(DefaultCompare::cosine_similarity(&a, &ZeroSpVec::new(3)), 0.0);
    }

    #[test]
    fn dot_sums_shared_entries() {
        let a = ZeroSpVec::from_pairs(4, vec![(0u32, 2.0f64), (2, 3.0)]).unwrap();
        let b = ZeroSpVec::from_pairs(4, vec![(2u32, 4.0f64), (3, 1.0)]).unwrap();
        assert_eq!(DefaultCompare::dot(&a, &b), 12.0);
        assert_eq!(UnitCompare::dot(&a, &b), 12.0);
        assert_eq!(DefaultCompare::dot(&a, &ZeroSpVec::new(4)), 0.0);
    }

    #[test]
    fn unit_compare_matches_default_on_unit_vectors() {
        let mut a = ZeroSpVec::from_pairs(4, vec![(0u32, 3.0f64), (3, 4.0)]).unwrap();
        let mut b = ZeroSpVec::from_pairs(4, vec![(0u32, 1.0f64), (1, 1.0)]).unwrap();
        a.l2_normalize();
        b.l2_normalize();
        let unit = UnitCompare::cosine_similarity(&a, &b);
        let full = DefaultCompare::cosine_similarity(&a, &b);
        assert!((unit - full).abs() < 1e-12);
    }
}
