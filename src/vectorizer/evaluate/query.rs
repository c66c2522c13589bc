use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::vectorizer::{
    corpus::{Corpus, Document},
    evaluate::scoring::Hits,
    similarity::SimilarityMatrix,
};

/// Document field the keyword is matched against when picking the anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchField {
    /// lowercased, stopword-filtered text (same text that was vectorized)
    #[default]
    Normalized,
    /// display text, compared case-insensitively
    Raw,
}

/// Anchor plus its most similar documents
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// keyword that selected the anchor; `None` for lookups by index
    pub keyword: Option<String>,
    pub anchor: Document,
    /// at most `top_k` entries, anchor excluded
    pub ranked: Hits,
}

/// Resolves a keyword to an anchor document and ranks the rest of the
/// corpus by similarity to it. Read-only over the built state.
#[derive(Debug, Clone, Copy)]
pub struct QueryResolver<'a> {
    corpus: &'a Corpus,
    matrix: &'a SimilarityMatrix,
    match_field: MatchField,
    top_k: usize,
}

impl<'a> QueryResolver<'a> {
    pub fn new(
        corpus: &'a Corpus,
        matrix: &'a SimilarityMatrix,
        match_field: MatchField,
        top_k: usize,
    ) -> Self {
        Self {
            corpus,
            matrix,
            match_field,
            top_k,
        }
    }

    /// Override the result count
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Lowest-index document containing `keyword` as a case-insensitive
    /// substring of the configured field.
    pub fn find_anchor(&self, keyword: &str) -> Result<&'a Document> {
        if keyword.trim().is_empty() {
            return Err(Error::EmptyQuery);
        }
        let needle = keyword.to_lowercase();
        let corpus = self.corpus;
        let found = match self.match_field {
            MatchField::Normalized => corpus
                .iter()
                .find(|doc| doc.normalized_text.contains(needle.as_str())),
            MatchField::Raw => corpus
                .iter()
                .find(|doc| doc.raw_text.to_lowercase().contains(needle.as_str())),
        };
        found.ok_or_else(|| Error::NoMatch {
            keyword: keyword.to_string(),
        })
    }

    /// Anchor for `keyword` and the `top_k` documents most similar to it
    pub fn resolve(&self, keyword: &str) -> Result<Recommendation> {
        let anchor = self.find_anchor(keyword)?;
        let ranked = self.rank_against(anchor)?;
        debug!(keyword, anchor = anchor.index, results = ranked.len(), "query resolved");
        Ok(Recommendation {
            keyword: Some(keyword.to_string()),
            anchor: anchor.clone(),
            ranked,
        })
    }

    /// Same ranking with the anchor chosen by index
    pub fn similar_to(&self, index: usize) -> Result<Recommendation> {
        let anchor = self.corpus.get(index).ok_or_else(|| Error::NoMatch {
            keyword: format!("#{index}"),
        })?;
        let ranked = self.rank_against(anchor)?;
        Ok(Recommendation {
            keyword: None,
            anchor: anchor.clone(),
            ranked,
        })
    }

    fn rank_against(&self, anchor: &Document) -> Result<Hits> {
        let row = self.matrix.row(anchor.index).ok_or_else(|| {
            Error::InternalVectorization(format!(
                "document {} has no similarity row (matrix size {})",
                anchor.index,
                self.matrix.len()
            ))
        })?;
        let ranked = Hits::rank(row, Some(anchor.index), self.top_k);
        Ok(Hits::from_ranked(self.corpus, &ranked))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::normalizer::TextNormalizer;
    use crate::vectorizer::{corpus::CorpusRecord, tfidf::DefaultTFIDFEngine, TFIDFVectorizer};

    fn fixture(pairs: &[(&str, &str)]) -> (Corpus, SimilarityMatrix) {
        let records = pairs
            .iter()
            .map(|(raw, text)| CorpusRecord::new(*raw, Some(text.to_string())))
            .collect();
        let corpus = Corpus::from_records(records, &TextNormalizer::new(["dan"], 2));
        let (_, vectors): (TFIDFVectorizer, _) = TFIDFVectorizer::fit_transform(&corpus).unwrap();
        let matrix = SimilarityMatrix::build(&vectors);
        (corpus, matrix)
    }

    fn gadgets() -> (Corpus, SimilarityMatrix) {
        fixture(&[
            ("Murah dan bagus", "murah dan bagus"),
            ("Kamera jernih", "kamera jernih"),
            ("Baterai awet, murah", "baterai awet murah"),
        ])
    }

    #[test]
    fn keyword_picks_first_match_and_ranks_rest() {
        let (corpus, matrix) = gadgets();
        let resolver = QueryResolver::new(&corpus, &matrix, MatchField::Normalized, 5);
        let rec = resolver.resolve("murah").unwrap();
        assert_eq!(rec.anchor.index, 0);
        assert_eq!(rec.ranked.indices(), vec![2, 1]);
        assert!(rec.ranked.list[0].score > rec.ranked.list[1].score);
        assert_eq!(rec.keyword.as_deref(), Some("murah"));
    }

    #[test]
    fn keyword_is_case_insensitive() {
        let (corpus, matrix) = gadgets();
        let resolver = QueryResolver::new(&corpus, &matrix, MatchField::Normalized, 5);
        assert_eq!(resolver.find_anchor("JERNIH").unwrap().index, 1);
        // substring, not whole word
        assert_eq!(resolver.find_anchor("ater").unwrap().index, 2);
    }

    #[test]
    fn empty_and_whitespace_keywords_are_rejected() {
        let (corpus, matrix) = gadgets();
        let resolver = QueryResolver::new(&corpus, &matrix, MatchField::Normalized, 5);
        assert_eq!(resolver.resolve("").unwrap_err(), Error::EmptyQuery);
        assert_eq!(resolver.resolve(" \t\n").unwrap_err(), Error::EmptyQuery);
    }

    #[test]
    fn unknown_keyword_is_no_match() {
        let (corpus, matrix) = gadgets();
        let resolver = QueryResolver::new(&corpus, &matrix, MatchField::Normalized, 5);
        let err = resolver.resolve("xyz123").unwrap_err();
        assert_eq!(err, Error::NoMatch { keyword: "xyz123".into() });
        assert!(!err.is_fatal());
    }

    #[test]
    fn supplied_text_matches_with_stopwords() {
        let (corpus, matrix) = gadgets();
        let resolver = QueryResolver::new(&corpus, &matrix, MatchField::Normalized, 5);
        assert_eq!(resolver.find_anchor("murah dan").unwrap().index, 0);
        assert_eq!(resolver.find_anchor("dan bagus").unwrap().index, 0);
        // punctuation lives only in the display text
        assert!(matches!(resolver.find_anchor("awet,"), Err(Error::NoMatch { .. })));
    }

    #[test]
    fn raw_mode_matches_display_text() {
        let (corpus, matrix) = gadgets();
        let raw = QueryResolver::new(&corpus, &matrix, MatchField::Raw, 5);
        assert_eq!(raw.find_anchor("DAN").unwrap().index, 0);
        assert_eq!(raw.find_anchor("awet,").unwrap().index, 2);
    }

    #[test]
    fn normalized_raw_text_drops_stopwords() {
        let records = vec![
            CorpusRecord::raw("Murah dan bagus"),
            CorpusRecord::raw("Kamera jernih"),
        ];
        let corpus = Corpus::from_records(records, &TextNormalizer::new(["dan"], 2));
        let (_, vectors) =
            TFIDFVectorizer::<DefaultTFIDFEngine>::fit_transform(&corpus).unwrap();
        let matrix = SimilarityMatrix::build(&vectors);
        let resolver = QueryResolver::new(&corpus, &matrix, MatchField::Normalized, 5);
        assert_eq!(resolver.find_anchor("murah bagus").unwrap().index, 0);
        assert!(matches!(resolver.find_anchor("dan"), Err(Error::NoMatch { .. })));
    }

    #[test]
    fn result_length_is_min_of_k_and_rest() {
        let (corpus, matrix) = fixture(&[
            ("a", "hp murah"),
            ("b", "hp awet"),
            ("c", "hp kamera"),
            ("d", "hp layar"),
        ]);
        let resolver = QueryResolver::new(&corpus, &matrix, MatchField::Normalized, 2);
        assert_eq!(resolver.resolve("hp").unwrap().ranked.len(), 2);
        assert_eq!(resolver.with_top_k(10).resolve("hp").unwrap().ranked.len(), 3);
    }

    #[test]
    fn equal_scores_keep_index_order() {
        let (corpus, matrix) = fixture(&[
            ("a", "hp murah"),
            ("b", "kamera"),
            ("c", "layar"),
            ("d", "awet"),
        ]);
        let resolver = QueryResolver::new(&corpus, &matrix, MatchField::Normalized, 5);
        let rec = resolver.resolve("murah").unwrap();
        assert_eq!(rec.ranked.indices(), vec![1, 2, 3]);
        assert!(rec.ranked.iter().all(|h| h.score == 0.0));
    }

    #[test]
    fn single_document_corpus_has_no_neighbours() {
        let (corpus, matrix) = fixture(&[("a", "hp murah")]);
        let resolver = QueryResolver::new(&corpus, &matrix, MatchField::Normalized, 5);
        let rec = resolver.resolve("murah").unwrap();
        assert_eq!(rec.anchor.index, 0);
        assert!(rec.ranked.is_empty());
    }

    #[test]
    fn similar_to_by_index() {
        let (corpus, matrix) = gadgets();
        let resolver = QueryResolver::new(&corpus, &matrix, MatchField::Normalized, 5);
        let rec = resolver.similar_to(2).unwrap();
        assert_eq!(rec.anchor.index, 2);
        assert_eq!(rec.ranked.indices(), vec![0, 1]);
        assert_eq!(rec.keyword, None);
        assert!(matches!(resolver.similar_to(9), Err(Error::NoMatch { .. })));
    }

    #[test]
    fn repeated_queries_are_identical() {
        let (corpus, matrix) = gadgets();
        let resolver = QueryResolver::new(&corpus, &matrix, MatchField::Normalized, 5);
        assert_eq!(resolver.resolve("murah").unwrap(), resolver.resolve("murah").unwrap());
    }
}
