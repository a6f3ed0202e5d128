use scout_core::errors::{DelegateError, SearchError};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("delegate error: {0}")]
    Delegate(#[from] DelegateError),

    #[error("search error: {0}")]
    Search(#[from] SearchError),

    #[error("{0}")]
    Internal(String),
}

impl PipelineError {
    /// Short classification string for logging.
    pub fn error_kind(&self) -> &'static str {
        match self {
            Self::Delegate(_) => "delegate",
            Self::Search(_) => "search",
            Self::Internal(_) => "internal",
        }
    }
}
