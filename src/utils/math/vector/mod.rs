pub mod math;

use num::Num;

use crate::utils::sort::radix_sort_u32_soa;

/// Sparse vector that stores only non-zero entries.
///
/// `inds` holds the positions and `vals` the values; entries are kept in
/// ascending index order and every index is `< len`.
#[derive(Debug, Clone, PartialEq)]
pub struct ZeroSpVec<N>
where
    N: Num + Copy,
{
    inds: Vec<u32>,
    vals: Vec<N>,
    len: usize,
}

impl<N> ZeroSpVec<N>
where
    N: Num + Copy,
{
    /// All-zero vector of dimensionality `len`
    #[inline]
    pub fn new(len: usize) -> Self {
        Self {
            inds: Vec::new(),
            vals: Vec::new(),
            len,
        }
    }

    /// Build from unordered `(index, value)` pairs.
    /// Zero values are dropped. Returns `None` when an index is out of range
    /// or appears twice.
    pub fn from_pairs(len: usize, pairs: impl IntoIterator<Item = (u32, N)>) -> Option<Self> {
        let (mut inds, mut vals): (Vec<u32>, Vec<N>) = pairs
            .into_iter()
            .filter(|(_, v)| !v.is_zero())
            .unzip();
        radix_sort_u32_soa(&mut inds, &mut vals);
        let in_range = inds.last().map_or(true, |&last| (last as usize) < len);
        let distinct = inds.windows(2).all(|w| w[0] < w[1]);
        if !(in_range && distinct) {
            return None;
        }
        Some(Self { inds, vals, len })
    }

    /// Dimensionality
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of stored (non-zero) entries
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    #[inline]
    pub fn is_zero_vector(&self) -> bool {
        self.inds.is_empty()
    }

    /// Value at `index`; zero when not stored, `None` when out of range
    pub fn get(&self, index: usize) -> Option<N> {
        if index >= self.len {
            return None;
        }
        match self.inds.binary_search(&(index as u32)) {
            Ok(pos) => Some(self.vals[pos]),
            Err(_) => Some(N::zero()),
        }
    }

    /// Largest stored index
    #[inline]
    pub fn max_index(&self) -> Option<usize> {
        self.inds.last().map(|&i| i as usize)
    }

    /// Iterate stored entries in ascending index order
    #[inline]
    pub fn raw_iter(&self) -> impl Iterator<Item = (usize, N)> + '_ {
        self.inds.iter().zip(self.vals.iter()).map(|(&i, &v)| (i as usize, v))
    }

    #[inline]
    pub(crate) fn values_mut(&mut self) -> &mut [N] {
        &mut self.vals
    }

    #[inline]
    pub(crate) fn parts(&self) -> (&[u32], &[N]) {
        (&self.inds, &self.vals)
    }
}
