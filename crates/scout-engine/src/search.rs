use async_trait::async_trait;
use parking_lot::Mutex;
use secrecy::{ExposeSecret, SecretString};

use scout_core::capability::{Search, Snippet};
use scout_core::errors::SearchError;

const SERPER_SEARCH_URL: &str = "https://google.serper.dev/search";

/// Search capability backed by the Serper.dev Google Search API.
pub struct SerperSearch {
    client: reqwest::Client,
    api_key: SecretString,
}

impl SerperSearch {
    pub fn new(api_key: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("Scout/0.1")
            .build()
            .unwrap_or_default();
        Self { client, api_key }
    }

    pub fn from_env() -> Result<Self, SearchError> {
        let api_key = std::env::var("SERPER_API_KEY")
            .map(SecretString::from)
            .map_err(|_| SearchError::AuthenticationFailed("SERPER_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }
}

#[async_trait]
impl Search for SerperSearch {
    fn name(&self) -> &str {
        "serper"
    }

    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<Snippet>, SearchError> {
        let body = serde_json::json!({
            "q": query,
            "num": max_results.min(20),
        });

        let response = self
            .client
            .post(SERPER_SEARCH_URL)
            .header("X-API-KEY", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| SearchError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::from_status(status.as_u16(), body));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| SearchError::MalformedResponse(e.to_string()))?;

        let snippets = parse_results(&body);
        tracing::debug!(results = snippets.len(), "search complete");
        Ok(snippets)
    }
}

/// Pull ordered snippets out of Serper's `organic` result list.
fn parse_results(body: &serde_json::Value) -> Vec<Snippet> {
    let Some(results) = body["organic"].as_array() else {
        return Vec::new();
    };
    results
        .iter()
        .map(|r| Snippet {
            title: r["title"].as_str().unwrap_or("(untitled)").to_string(),
            url: r["link"].as_str().unwrap_or("").to_string(),
            snippet: r["snippet"].as_str().unwrap_or("").to_string(),
        })
        .collect()
}

/// Mock search that returns fixed snippets (or a fixed error) and records
/// every query it was handed.
pub struct MockSearch {
    result: Result<Vec<Snippet>, SearchError>,
    queries: Mutex<Vec<(String, u32)>>,
}

impl MockSearch {
    pub fn with_snippets(snippets: Vec<Snippet>) -> Self {
        Self {
            result: Ok(snippets),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: SearchError) -> Self {
        Self {
            result: Err(error),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.queries.lock().len()
    }

    /// Every (query, max_results) pair observed, in call order.
    pub fn queries(&self) -> Vec<(String, u32)> {
        self.queries.lock().clone()
    }
}

#[async_trait]
impl Search for MockSearch {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<Snippet>, SearchError> {
        self.queries.lock().push((query.to_string(), max_results));
        self.result.clone()
    }
}
