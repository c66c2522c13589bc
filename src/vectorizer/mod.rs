pub mod compute;
pub mod corpus;
pub mod evaluate;
pub mod similarity;
pub mod term;
pub mod tfidf;

use std::marker::PhantomData;

use indexmap::IndexSet;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::utils::math::vector::ZeroSpVec;
use crate::vectorizer::{
    corpus::{Corpus, Document},
    term::TermFrequency,
    tfidf::{DefaultTFIDFEngine, TFIDFEngine},
};

/// Unit-length TF-IDF vector of one document
pub type DocumentVector = ZeroSpVec<f64>;

/// Term to column mapping, fixed after fitting.
/// Columns are assigned in first-seen order over the corpus.
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    terms: IndexSet<Box<str>>,
    /// documents containing each term, by column
    doc_freq: Vec<u64>,
    /// corpus size at fit time
    doc_num: u64,
}

impl Vocabulary {
    fn fit(corpus: &Corpus) -> Self {
        let mut terms: IndexSet<Box<str>> = IndexSet::new();
        let mut doc_freq: Vec<u64> = Vec::new();
        for doc in corpus.iter() {
            let freq = document_terms(doc);
            for term in freq.term_set() {
                let (pos, inserted) = terms.insert_full(Box::from(term));
                if inserted {
                    doc_freq.push(1);
                } else {
                    doc_freq[pos] += 1;
                }
            }
        }
        Self {
            terms,
            doc_freq,
            doc_num: corpus.len() as u64,
        }
    }

    /// Number of columns
    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Column of `term`
    #[inline]
    pub fn position(&self, term: &str) -> Option<usize> {
        self.terms.get_index_of(term)
    }

    /// Term at column `pos`
    #[inline]
    pub fn term(&self, pos: usize) -> Option<&str> {
        self.terms.get_index(pos).map(|t| t.as_ref())
    }

    #[inline]
    pub fn doc_freq(&self, pos: usize) -> Option<u64> {
        self.doc_freq.get(pos).copied()
    }

    #[inline]
    pub fn doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Terms in column order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|t| t.as_ref())
    }
}

/// Term counts of a document's filtered terms
fn document_terms(doc: &Document) -> TermFrequency {
    TermFrequency::from_terms(doc.terms.as_slice())
}

/// TF-IDF Vectorizer
///
/// Two phases:
/// - `fit` scans the whole corpus once and fixes the `Vocabulary` and the
///   idf of every column.
/// - `transform` turns a document into a sparse vector of `tf * idf`
///   weights scaled to unit L2 norm. A document without vocabulary terms
///   becomes the zero vector.
///
/// `E` selects the weighting; see `TFIDFEngine`.
/// Output is deterministic for a fixed corpus and stopword set.
#[derive(Debug, Clone)]
pub struct TFIDFVectorizer<E = DefaultTFIDFEngine>
where
    E: TFIDFEngine,
{
    vocabulary: Vocabulary,
    idf: Vec<f64>,
    _marker: PhantomData<E>,
}

impl<E> TFIDFVectorizer<E>
where
    E: TFIDFEngine,
{
    /// Fit the vocabulary and idf over the whole corpus
    pub fn fit(corpus: &Corpus) -> Self {
        let vocabulary = Vocabulary::fit(corpus);
        let idf = vocabulary
            .doc_freq
            .iter()
            .map(|&df| E::idf(vocabulary.doc_num, df))
            .collect();
        info!(terms = vocabulary.len(), documents = vocabulary.doc_num, "vocabulary fitted");
        Self {
            vocabulary,
            idf,
            _marker: PhantomData,
        }
    }

    /// Fit, then transform every document of the same corpus
    pub fn fit_transform(corpus: &Corpus) -> Result<(Self, Vec<DocumentVector>)> {
        let vectorizer = Self::fit(corpus);
        let vectors = vectorizer.transform_corpus(corpus)?;
        Ok((vectorizer, vectors))
    }

    #[inline]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// idf of column `pos`
    #[inline]
    pub fn idf(&self, pos: usize) -> Option<f64> {
        self.idf.get(pos).copied()
    }

    /// Unit-length TF-IDF vector of `doc`.
    /// Terms missing from the vocabulary are ignored.
    pub fn transform(&self, doc: &Document) -> Result<DocumentVector> {
        let freq = document_terms(doc);
        let mut pairs = Vec::with_capacity(freq.unique_terms());
        for term in freq.term_set() {
            let Some(pos) = self.vocabulary.position(term) else {
                continue;
            };
            let idf = self.idf.get(pos).copied().ok_or_else(|| {
                Error::InternalVectorization(format!(
                    "no idf for column {pos} (vocabulary size {})",
                    self.vocabulary.len()
                ))
            })?;
            pairs.push((pos as u32, E::tf(&freq, term) * idf));
        }
        let mut vector = ZeroSpVec::from_pairs(self.vocabulary.len(), pairs).ok_or_else(|| {
            Error::InternalVectorization(format!(
                "document {} references a column outside vocabulary size {}",
                doc.index,
                self.vocabulary.len()
            ))
        })?;
        vector.l2_normalize();
        Ok(vector)
    }

    /// Transform every document, in corpus order
    pub fn transform_corpus(&self, corpus: &Corpus) -> Result<Vec<DocumentVector>> {
        let vectors = corpus
            .documents()
            .par_iter()
            .map(|doc| self.transform(doc))
            .collect::<Result<Vec<_>>>()?;
        let zero = vectors.iter().filter(|v| v.is_zero_vector()).count();
        if zero > 0 {
            warn!(documents = zero, "documents without vocabulary terms map to the zero vector");
        }
        self.validate(&vectors)?;
        Ok(vectors)
    }

    /// Check that vectors match the vocabulary: same dimensionality,
    /// in-range columns, unit or zero norm.
    pub fn validate(&self, vectors: &[DocumentVector]) -> Result<()> {
        let dim = self.vocabulary.len();
        for (i, v) in vectors.iter().enumerate() {
            if v.len() != dim {
                return Err(Error::InternalVectorization(format!(
                    "vector {i} has dimension {} but vocabulary has {dim} terms",
                    v.len()
                )));
            }
            if let Some(max) = v.max_index() {
                if max >= dim {
                    return Err(Error::InternalVectorization(format!(
                        "vector {i} references column {max} outside vocabulary size {dim}"
                    )));
                }
            }
            if !v.is_zero_vector() && (v.l2_norm() - 1.0).abs() > 1e-9 {
                return Err(Error::InternalVectorization(format!(
                    "vector {i} is not unit length (norm {})",
                    v.l2_norm()
                )));
            }
        }
        Ok(())
    }
}
