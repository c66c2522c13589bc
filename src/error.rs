use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the build pipeline and of query resolution.
///
/// Build-time variants (`DataUnavailable`, `InternalVectorization`, `Config`)
/// mean no valid model exists and serving must not start.
/// Query-time variants (`EmptyQuery`, `NoMatch`) are ordinary outcomes
/// returned to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The corpus source could not be read
    #[error("corpus unavailable ({source_name}): {reason}")]
    DataUnavailable {
        source_name: String,
        reason: String,
    },

    /// Keyword was empty or whitespace only
    #[error("query keyword is empty")]
    EmptyQuery,

    /// No document contains the keyword
    #[error("no document contains '{keyword}'")]
    NoMatch { keyword: String },

    /// Vocabulary and vectors disagree on dimensions
    #[error("internal vectorization error: {0}")]
    InternalVectorization(String),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn data_unavailable(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Error::DataUnavailable {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether this error must halt initialization
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::DataUnavailable { .. } | Error::InternalVectorization(_) | Error::Config(_)
        )
    }
}
