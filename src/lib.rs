//! This crate is a "find records like this one" engine using a TF-IDF
//! vector space model over a fixed corpus of short texts.
pub mod config;
pub mod error;
pub mod recommender;
pub mod utils;
pub mod vectorizer;

/// Recommender
/// The top-level struct of this crate. It owns the fully built, immutable
/// state and answers keyword queries.
///
/// Internally, it holds:
/// - The normalized corpus
/// - The fitted vocabulary and idf weights
/// - One unit-length sparse TF-IDF vector per document
/// - The N×N cosine similarity matrix
///
/// A query picks the first document containing the keyword (the anchor)
/// and returns the other documents ranked by similarity to it.
///
/// # Thread Safety
/// Read-only after `build`; share it freely across threads.
pub use recommender::{ModelStats, Recommender};

/// Shared Recommender
/// A process-wide, atomically replaceable handle to a `Recommender`.
/// Rebuilding swaps in a complete new state; readers keep the snapshot they
/// already hold.
pub use recommender::SharedRecommender;

/// TF-IDF Vectorizer
/// Fits a `Vocabulary` over the whole corpus and turns each document into a
/// unit-length sparse vector of `tf * idf` weights.
///
/// `TFIDFVectorizer<E>` takes the weighting engine as a type parameter;
/// `DefaultTFIDFEngine` uses raw counts and the smoothed idf
/// `ln((1 + N) / (1 + df)) + 1`.
pub use vectorizer::{DocumentVector, TFIDFVectorizer, Vocabulary};
pub use vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine};

/// Similarity Matrix
/// Symmetric N×N cosine similarities of all document pairs, built once.
pub use vectorizer::similarity::SimilarityMatrix;

/// Corpus and documents
/// `Corpus` is the ordered, immutable document set. Each `Document` keeps
/// its zero-based index, display text and normalized text.
/// Records come from a `CorpusProvider` such as `CsvCorpusProvider`.
pub use vectorizer::corpus::{
    Corpus, CorpusProvider, CorpusRecord, CsvCorpusProvider, Document, MemoryCorpusProvider,
};

/// Text Normalizer
/// Lowercases, tokenizes and removes configured stopwords.
pub use utils::normalizer::TextNormalizer;

/// Configuration
/// Stopwords, result count, anchor match field and minimum token length.
pub use config::RecommenderConfig;

/// Query types
/// - `MatchField`: which document text the keyword is matched against
/// - `Recommendation`: the anchor plus ranked `Hits`
/// - `HitEntry`: one `(document, score)` result
pub use vectorizer::evaluate::query::{MatchField, QueryResolver, Recommendation};
pub use vectorizer::evaluate::scoring::{HitEntry, Hits};

/// Errors
pub use error::{Error, Result};
