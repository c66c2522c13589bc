use std::sync::{Arc, OnceLock};

use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use tracing::{info, info_span, warn};

use crate::config::RecommenderConfig;
use crate::error::{Error, Result};
use crate::vectorizer::{
    corpus::{Corpus, CorpusProvider, Document},
    evaluate::query::{QueryResolver, Recommendation},
    similarity::SimilarityMatrix,
    DocumentVector, TFIDFVectorizer, Vocabulary,
};

/// Summary of a built model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelStats {
    pub documents: usize,
    pub vocabulary: usize,
    /// documents with no vocabulary terms
    pub zero_vectors: usize,
}

/// Fully built, immutable recommender state.
///
/// Built once by `build` (load → normalize → fit → transform → similarity
/// matrix). Queries only read it, so a `Recommender` can be shared across
/// threads without locking.
#[derive(Debug, Clone)]
pub struct Recommender {
    config: RecommenderConfig,
    corpus: Corpus,
    vectorizer: TFIDFVectorizer,
    vectors: Vec<DocumentVector>,
    matrix: SimilarityMatrix,
}

impl Recommender {
    /// Run the whole build pipeline. Any failure aborts the build; nothing
    /// partial is returned.
    pub fn build<P>(provider: &P, config: RecommenderConfig) -> Result<Self>
    where
        P: CorpusProvider + ?Sized,
    {
        let span = info_span!("build", source = %provider.name());
        let _guard = span.enter();
        config.validate()?;
        let normalizer = config.normalizer()?;
        let corpus = Corpus::load(provider, &normalizer)?;
        Self::from_corpus(corpus, config)
    }

    /// Build from an already loaded corpus
    pub fn from_corpus(corpus: Corpus, config: RecommenderConfig) -> Result<Self> {
        config.validate()?;
        if corpus.is_empty() {
            warn!("corpus is empty; every query will return no match");
        }
        let (vectorizer, vectors) = TFIDFVectorizer::fit_transform(&corpus)?;
        let matrix = SimilarityMatrix::build(&vectors);
        if matrix.len() != corpus.len() {
            return Err(Error::InternalVectorization(format!(
                "similarity matrix has {} rows for {} documents",
                matrix.len(),
                corpus.len()
            )));
        }
        let recommender = Self {
            config,
            corpus,
            vectorizer,
            vectors,
            matrix,
        };
        let stats = recommender.stats();
        info!(
            documents = stats.documents,
            vocabulary = stats.vocabulary,
            zero_vectors = stats.zero_vectors,
            "recommender ready"
        );
        Ok(recommender)
    }

    /// Query resolver over this state with the configured match field and K
    pub fn resolver(&self) -> QueryResolver<'_> {
        QueryResolver::new(&self.corpus, &self.matrix, self.config.match_field, self.config.top_k)
    }

    /// Anchor for `keyword` plus the configured number of similar documents
    pub fn recommend(&self, keyword: &str) -> Result<Recommendation> {
        self.resolver().resolve(keyword)
    }

    /// Like `recommend` with an explicit result count
    pub fn recommend_top(&self, keyword: &str, top_k: usize) -> Result<Recommendation> {
        self.resolver().with_top_k(top_k).resolve(keyword)
    }

    /// Documents most similar to the document at `index`
    pub fn similar_to(&self, index: usize) -> Result<Recommendation> {
        self.resolver().similar_to(index)
    }

    pub fn similar_to_top(&self, index: usize, top_k: usize) -> Result<Recommendation> {
        self.resolver().with_top_k(top_k).similar_to(index)
    }

    pub fn find_anchor(&self, keyword: &str) -> Result<&Document> {
        self.resolver().find_anchor(keyword)
    }

    pub fn stats(&self) -> ModelStats {
        ModelStats {
            documents: self.corpus.len(),
            vocabulary: self.vectorizer.vocabulary().len(),
            zero_vectors: self.vectors.iter().filter(|v| v.is_zero_vector()).count(),
        }
    }

    #[inline]
    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    #[inline]
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    #[inline]
    pub fn vocabulary(&self) -> &Vocabulary {
        self.vectorizer.vocabulary()
    }

    #[inline]
    pub fn vectorizer(&self) -> &TFIDFVectorizer {
        &self.vectorizer
    }

    #[inline]
    pub fn vectors(&self) -> &[DocumentVector] {
        &self.vectors
    }

    #[inline]
    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }
}

static GLOBAL: OnceLock<SharedRecommender> = OnceLock::new();

/// Handle to the current `Recommender` that can be swapped as a whole.
///
/// Readers take an `Arc` snapshot and work on it without holding the lock.
/// `rebuild` builds a complete new state before swapping it in; if the
/// build fails the old state stays in place.
#[derive(Debug)]
pub struct SharedRecommender {
    current: RwLock<Arc<Recommender>>,
    rebuild: Mutex<()>,
}

impl SharedRecommender {
    pub fn new(recommender: Recommender) -> Self {
        Self {
            current: RwLock::new(Arc::new(recommender)),
            rebuild: Mutex::new(()),
        }
    }

    /// Snapshot of the current state
    #[inline]
    pub fn current(&self) -> Arc<Recommender> {
        Arc::clone(&*self.current.read())
    }

    /// Swap in a new state and return the previous one
    pub fn replace(&self, recommender: Recommender) -> Arc<Recommender> {
        std::mem::replace(&mut *self.current.write(), Arc::new(recommender))
    }

    /// Rebuild from `provider`. Concurrent rebuilds run one after another.
    pub fn rebuild<P>(&self, provider: &P, config: RecommenderConfig) -> Result<Arc<Recommender>>
    where
        P: CorpusProvider + ?Sized,
    {
        let _rebuilding = self.rebuild.lock();
        let fresh = Recommender::build(provider, config)?;
        self.replace(fresh);
        Ok(self.current())
    }

    pub fn recommend(&self, keyword: &str) -> Result<Recommendation> {
        self.current().recommend(keyword)
    }

    /// Install the process-wide instance. Fails if one is already installed.
    pub fn install_global(recommender: Recommender) -> Result<&'static SharedRecommender> {
        let mut installed_now = false;
        let installed = GLOBAL.get_or_init(|| {
            installed_now = true;
            SharedRecommender::new(recommender)
        });
        if !installed_now {
            return Err(Error::Config("global recommender already installed".into()));
        }
        Ok(installed)
    }

    /// Process-wide instance, if installed
    pub fn global() -> Option<&'static SharedRecommender> {
        GLOBAL.get()
    }
}
