use crate::vectorizer::term::TermFrequency;

/// TF-IDF weighting strategy used by `TFIDFVectorizer<E>`.
///
/// The vectorizer handles vocabulary lookup, sparsity and normalization;
/// an engine only decides the two scalar weights. Documents are weighted
/// in parallel, so engines must be `Send + Sync`.
pub trait TFIDFEngine: Send + Sync {
    /// Inverse document frequency of a term
    ///
    /// # Arguments
    /// * `doc_num` - number of documents in the corpus
    /// * `doc_freq` - number of documents containing the term
    fn idf(doc_num: u64, doc_freq: u64) -> f64;

    /// Term frequency weight of `term` inside `freq`
    fn tf(freq: &TermFrequency, term: &str) -> f64;
}

/// Default engine
/// - tf: raw count
/// - idf: smoothed, `ln((1 + N) / (1 + df)) + 1`
///
/// The `+1` terms behave as if one extra document contained every term,
/// so idf stays finite and positive even for `df == N`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl TFIDFEngine for DefaultTFIDFEngine {
    #[inline]
    fn idf(doc_num: u64, doc_freq: u64) -> f64 {
        ((1.0 + doc_num as f64) / (1.0 + doc_freq as f64)).ln() + 1.0
    }

    #[inline]
    fn tf(freq: &TermFrequency, term: &str) -> f64 {
        freq.term_count(term) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smooth_idf_values() {
        // term in every document
        assert!((DefaultTFIDFEngine::idf(3, 3) - 1.0).abs() < 1e-12);
        // term in one of three documents
        let expected = (4.0_f64 / 2.0).ln() + 1.0;
        assert!((DefaultTFIDFEngine::idf(3, 1) - expected).abs() < 1e-12);
        assert!(DefaultTFIDFEngine::idf(3, 1) > DefaultTFIDFEngine::idf(3, 2));
    }

    #[test]
    fn tf_is_raw_count() {
        let freq = TermFrequency::from_terms(&["awet", "awet", "murah"]);
        assert_eq!(DefaultTFIDFEngine::tf(&freq, "awet"), 2.0);
        assert_eq!(DefaultTFIDFEngine::tf(&freq, "kamera"), 0.0);
    }
}
