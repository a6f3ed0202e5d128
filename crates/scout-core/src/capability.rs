use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::{DelegateError, SearchError};

/// The external language-model capability: free-text prompt in, free-text
/// response out. Implementations may take arbitrary latency; callers block
/// on the future until it resolves or fails.
#[async_trait]
pub trait Delegate: Send + Sync {
    fn name(&self) -> &str;
    fn model(&self) -> &str;

    async fn complete(&self, prompt: &str) -> Result<String, DelegateError>;
}

/// One search result: title, URL, and the snippet text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// The external search capability: query plus a result-count bound in,
/// ordered snippets out.
#[async_trait]
pub trait Search: Send + Sync {
    fn name(&self) -> &str;

    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<Snippet>, SearchError>;
}
