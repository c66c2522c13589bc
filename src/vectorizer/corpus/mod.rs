pub mod provider;

use serde::Serialize;
use tracing::info;

use crate::utils::normalizer::TextNormalizer;

pub use provider::{CorpusProvider, CsvCorpusProvider, MemoryCorpusProvider};

/// One input record as delivered by a corpus provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusRecord {
    /// display string
    pub raw_text: String,
    /// pre-cleaned text; `None` means the raw text is normalized instead
    pub text: Option<String>,
}

impl CorpusRecord {
    pub fn new(raw_text: impl Into<String>, text: Option<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            text,
        }
    }

    /// Record whose raw text doubles as the text to vectorize
    pub fn raw(raw_text: impl Into<String>) -> Self {
        Self::new(raw_text, None)
    }
}

/// A corpus entry. `index` is its zero-based position and never changes.
///
/// `normalized_text` is what keywords are matched against. `terms` are the
/// tokens that survive stopword filtering and feed the vectorizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub index: usize,
    pub raw_text: String,
    pub normalized_text: String,
    #[serde(skip)]
    pub terms: Vec<String>,
}

/// Ordered, immutable document set
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    documents: Vec<Document>,
}

impl Corpus {
    /// Assign indices in record order.
    ///
    /// Supplied cleaned text is kept as `normalized_text` (lowercased only);
    /// otherwise the raw text is normalized. Terms always go through the
    /// normalizer, so configured stopwords never reach the vocabulary.
    pub fn from_records(records: Vec<CorpusRecord>, normalizer: &TextNormalizer) -> Self {
        let documents: Vec<Document> = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let (normalized_text, terms) = match record.text.as_deref() {
                    Some(text) => (text.to_lowercase(), normalizer.tokens(text)),
                    None => {
                        let terms = normalizer.tokens(&record.raw_text);
                        (terms.join(" "), terms)
                    }
                };
                Document {
                    index,
                    raw_text: record.raw_text,
                    normalized_text,
                    terms,
                }
            })
            .collect();
        info!(documents = documents.len(), "corpus loaded");
        Self { documents }
    }

    /// Load every record from `provider`, then normalize.
    /// Any provider failure is returned as-is; no partial corpus is built.
    pub fn load<P>(provider: &P, normalizer: &TextNormalizer) -> crate::Result<Self>
    where
        P: CorpusProvider + ?Sized,
    {
        let records = provider.load()?;
        Ok(Self::from_records(records, normalizer))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Document> {
        self.documents.get(index)
    }

    #[inline]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_follow_record_order() {
        let normalizer = TextNormalizer::new(["dan"], 2);
        let corpus = Corpus::from_records(
            vec![
                CorpusRecord::new("Murah dan bagus!", Some("murah dan bagus".into())),
                CorpusRecord::raw("Kamera JERNIH"),
                CorpusRecord::new("???", Some(String::new())),
            ],
            &normalizer,
        );
        assert_eq!(corpus.len(), 3);
        let docs = corpus.documents();
        assert_eq!(docs[0].index, 0);
        assert_eq!(docs[0].normalized_text, "murah dan bagus");
        assert_eq!(docs[0].terms, vec!["murah", "bagus"]);
        assert_eq!(docs[0].raw_text, "Murah dan bagus!");
        assert_eq!(docs[1].normalized_text, "kamera jernih");
        assert_eq!(docs[1].terms, vec!["kamera", "jernih"]);
        assert_eq!(docs[2].normalized_text, "");
        assert!(docs[2].terms.is_empty());
        assert_eq!(corpus.get(3), None);
    }

    #[test]
    fn supplied_text_is_only_lowercased() {
        let normalizer = TextNormalizer::new(["dan"], 2);
        let corpus = Corpus::from_records(
            vec![CorpusRecord::new("x", Some("Murah DAN Bagus, ya".into()))],
            &normalizer,
        );
        let doc = corpus.get(0).unwrap();
        assert_eq!(doc.normalized_text, "murah dan bagus, ya");
        assert_eq!(doc.terms, vec!["murah", "bagus", "ya"]);
    }
}
