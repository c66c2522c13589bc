use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::utils::normalizer::TextNormalizer;
use crate::vectorizer::evaluate::query::MatchField;

/// Indonesian filler words used for gadget review text
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "dan", "yang", "di", "itu", "ini", "ke", "dari", "ada", "buat", "yg", "mau",
    "ga", "gak", "aku", "sama", "kalo", "lagi", "bisa", "karena", "jadi", "apa",
    "tapi", "suka", "udah", "banget", "ya", "dia", "kita", "untuk", "dengan",
    "pada", "atau", "adalah", "saya", "mereka", "kan", "juga", "aja", "kalau",
    "langsung", "banyak", "tp", "dr", "bgt", "sdh", "udh", "nih", "sih",
    "kok", "deh", "masih", "biar", "tetap", "pun", "doang", "nya",
];

pub const DEFAULT_TOP_K: usize = 5;
pub const DEFAULT_MIN_TOKEN_CHARS: usize = 2;

/// Tunables of the recommender core.
///
/// ```toml
/// top_k = 5
/// match_field = "normalized"   # or "raw"
/// min_token_chars = 2
/// stopwords = ["dan", "yang"]
/// stopwords_file = "stopwords.txt"   # optional, one word per line
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecommenderConfig {
    pub stopwords: Vec<String>,
    pub stopwords_file: Option<PathBuf>,
    pub top_k: usize,
    pub match_field: MatchField,
    pub min_token_chars: usize,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            stopwords: DEFAULT_STOPWORDS.iter().map(|w| w.to_string()).collect(),
            stopwords_file: None,
            top_k: DEFAULT_TOP_K,
            match_field: MatchField::default(),
            min_token_chars: DEFAULT_MIN_TOKEN_CHARS,
        }
    }
}

impl RecommenderConfig {
    /// Parse and validate TOML. Omitted keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| Error::Config(format!("invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file. A relative `stopwords_file` is resolved against
    /// the config file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        let mut config = Self::from_toml_str(&content)?;
        if let (Some(file), Some(dir)) = (config.stopwords_file.as_mut(), path.parent()) {
            if file.is_relative() {
                *file = dir.join(&*file);
            }
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(Error::Config("top_k must be at least 1".into()));
        }
        if self.min_token_chars == 0 {
            return Err(Error::Config("min_token_chars must be at least 1".into()));
        }
        Ok(())
    }

    /// Inline stopwords followed by those of `stopwords_file`
    pub fn resolved_stopwords(&self) -> Result<Vec<String>> {
        let mut words = self.stopwords.clone();
        if let Some(file) = &self.stopwords_file {
            let content = std::fs::read_to_string(file).map_err(|e| {
                Error::Config(format!("cannot read stopwords file {}: {e}", file.display()))
            })?;
            words.extend(
                content
                    .lines()
                    .map(str::trim)
                    .filter(|w| !w.is_empty())
                    .map(str::to_string),
            );
        }
        Ok(words)
    }

    /// Text normalizer for this configuration
    pub fn normalizer(&self) -> Result<TextNormalizer> {
        Ok(TextNormalizer::new(self.resolved_stopwords()?, self.min_token_chars))
    }
}
