use std::fmt::Debug;

use serde::Serialize;

use crate::{utils::sort::rank_cmp, vectorizer::corpus::{Corpus, Document}};

/// One ranked result
#[derive(Clone, PartialEq, Serialize)]
pub struct HitEntry {
    pub document: Document,
    /// cosine similarity to the anchor, in [0, 1]
    pub score: f64,
}

impl HitEntry {
    /// Score as a percentage (0 - 100)
    #[inline]
    pub fn percent(&self) -> f64 {
        self.score * 100.0
    }
}

impl Debug for HitEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {:.6}", self.document.index, self.score)
    }
}

/// Structure to store ranked results
#[derive(Clone, PartialEq, Serialize, Default)]
#[serde(transparent)]
pub struct Hits {
    pub list: Vec<HitEntry>,
}

impl Hits {
    /// Rank `(index, score)` pairs: score descending, ties by ascending index.
    /// `exclude` is left out; at most `top_k` pairs are kept.
    pub fn rank(scores: &[f64], exclude: Option<usize>, top_k: usize) -> Vec<(usize, f64)> {
        let mut candidates: Vec<(usize, f64)> = scores
            .iter()
            .copied()
            .enumerate()
            .filter(|&(i, _)| Some(i) != exclude)
            .collect();
        if top_k == 0 {
            return Vec::new();
        }
        if top_k < candidates.len() {
            // partition, then sort only the head
            candidates.select_nth_unstable_by(top_k - 1, |a, b| rank_cmp(*a, *b));
            candidates.truncate(top_k);
        }
        candidates.sort_by(|a, b| rank_cmp(*a, *b));
        candidates
    }

    /// Attach corpus documents to ranked pairs. Unknown indices are skipped.
    pub fn from_ranked(corpus: &Corpus, ranked: &[(usize, f64)]) -> Self {
        let list = ranked
            .iter()
            .filter_map(|&(index, score)| {
                corpus.get(index).map(|doc| HitEntry {
                    document: doc.clone(),
                    score,
                })
            })
            .collect();
        Hits { list }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HitEntry> {
        self.list.iter()
    }

    /// Document indices in rank order
    pub fn indices(&self) -> Vec<usize> {
        self.list.iter().map(|h| h.document.index).collect()
    }
}

impl<'a> IntoIterator for &'a Hits {
    type Item = &'a HitEntry;
    type IntoIter = std::slice::Iter<'a, HitEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.iter()
    }
}

impl Debug for Hits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            // one hit per line
            writeln!(f, "Hits [")?;
            for hit in &self.list {
                writeln!(f, "    {:?}: {:.6}", hit.document.index, hit.score)?;
            }
            write!(f, "]")
        } else {
            f.debug_list().entries(&self.list).finish()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::normalizer::TextNormalizer;
    use crate::vectorizer::corpus::CorpusRecord;
    use proptest::prelude::*;

    #[test]
    fn rank_excludes_and_breaks_ties_by_index() {
        let scores = [1.0, 0.3, 0.7, 0.3, 0.0];
        let ranked = Hits::rank(&scores, Some(0), 5);
        assert_eq!(ranked, vec![(2, 0.7), (1, 0.3), (3, 0.3), (4, 0.0)]);
    }

    #[test]
    fn rank_truncates_to_top_k() {
        let scores = [0.1, 0.9, 0.5, 0.9, 0.2, 1.0];
        let ranked = Hits::rank(&scores, Some(5), 3);
        assert_eq!(ranked, vec![(1, 0.9), (3, 0.9), (2, 0.5)]);
        assert!(Hits::rank(&scores, None, 0).is_empty());
    }

    #[test]
    fn from_ranked_attaches_documents() {
        let corpus = Corpus::from_records(
            vec![CorpusRecord::raw("Murah"), CorpusRecord::raw("Awet")],
            &TextNormalizer::default(),
        );
        let hits = Hits::from_ranked(&corpus, &[(1, 0.5), (7, 0.4)]);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits.list[0].document.raw_text, "Awet");
        assert_eq!(hits.list[0].percent(), 50.0);
        assert_eq!(format!("{:?}", hits), "[#1 0.500000]");
    }

    proptest! {
        #[test]
        fn rank_matches_full_sort(
            scores in prop::collection::vec(0u8..5, 0..40),
            k in 0usize..10,
            ex in 0usize..40,
        ) {
            let scores: Vec<f64> = scores.into_iter().map(|s| s as f64 / 4.0).collect();
            let ranked = Hits::rank(&scores, Some(ex), k);

            let mut expected: Vec<(usize, f64)> = scores
                .iter()
                .copied()
                .enumerate()
                .filter(|&(i, _)| i != ex)
                .collect();
            expected.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
            expected.truncate(k);
            prop_assert_eq!(ranked, expected);
        }
    }
}
