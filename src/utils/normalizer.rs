use indexmap::IndexSet;

/// Lowercases text, splits it into word tokens and drops stopwords.
///
/// A token is a maximal run of alphanumeric characters (or `_`).
/// Tokens shorter than `min_token_chars` characters are dropped, as are
/// tokens found in the stopword set. Surviving tokens keep their order.
///
/// # Examples
/// ```
/// use tf_idf_recommender::TextNormalizer;
/// let normalizer = TextNormalizer::new(["dan", "yang"], 2);
/// assert_eq!(normalizer.normalize("Murah DAN bagus!"), "murah bagus");
/// ```
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    stopwords: IndexSet<Box<str>>,
    min_token_chars: usize,
}

impl TextNormalizer {
    /// Create a normalizer from a stopword list
    ///
    /// # Arguments
    /// * `stopwords` - filler words to drop, compared after lowercasing
    /// * `min_token_chars` - shortest token kept, in characters
    pub fn new<I, S>(stopwords: I, min_token_chars: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stopwords = stopwords
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .map(String::into_boxed_str)
            .collect();
        Self {
            stopwords,
            min_token_chars: min_token_chars.max(1),
        }
    }

    #[inline]
    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    pub fn stopword_count(&self) -> usize {
        self.stopwords.len()
    }

    /// Stopwords in configured order (duplicates collapsed)
    pub fn stopwords(&self) -> impl Iterator<Item = &str> {
        self.stopwords.iter().map(|w| w.as_ref())
    }

    /// Lowercased tokens of `text` that survive filtering
    pub fn tokens(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|tok| tok.chars().count() >= self.min_token_chars)
            .filter(|tok| !self.is_stopword(tok))
            .map(str::to_string)
            .collect()
    }

    /// Normalized text: surviving tokens joined by single spaces
    pub fn normalize(&self, text: &str) -> String {
        self.tokens(text).join(" ")
    }

    /// Absent text normalizes to the empty string
    pub fn normalize_opt(&self, text: Option<&str>) -> String {
        text.map(|t| self.normalize(t)).unwrap_or_default()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(std::iter::empty::<&str>(), 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indo() -> TextNormalizer {
        TextNormalizer::new(["dan", "yang", "nya", "banget"], 2)
    }

    #[test]
    fn lowercases_and_filters_stopwords() {
        let n = indo();
        assert_eq!(
            n.normalize("Kamera JERNIH dan Baterai yang awet"),
            "kamera jernih baterai awet"
        );
    }

    #[test]
    fn splits_on_punctuation() {
        let n = indo();
        assert_eq!(n.tokens("murah,bagus...awet!!"), vec!["murah", "bagus", "awet"]);
    }

    #[test]
    fn drops_short_tokens() {
        let n = indo();
        assert_eq!(n.normalize("a hp x bagus"), "hp bagus");
        let keep_all = TextNormalizer::new(std::iter::empty::<&str>(), 1);
        assert_eq!(keep_all.normalize("a hp"), "a hp");
    }

    #[test]
    fn stopwords_are_case_insensitive_and_deduplicated() {
        let n = TextNormalizer::new(["Dan", "dan", " kalo "], 2);
        assert_eq!(n.stopword_count(), 2);
        assert!(n.is_stopword("kalo"));
        assert_eq!(n.normalize("DAN kalo murah"), "murah");
    }

    #[test]
    fn missing_and_empty_input_is_empty() {
        let n = indo();
        assert_eq!(n.normalize_opt(None), "");
        assert_eq!(n.normalize(""), "");
        assert_eq!(n.normalize("dan yang banget"), "");
    }

    #[test]
    fn keeps_token_order_and_repeats() {
        let n = indo();
        assert_eq!(n.normalize("awet murah awet"), "awet murah awet");
    }
}
