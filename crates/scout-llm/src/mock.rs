use async_trait::async_trait;
use parking_lot::Mutex;

use scout_core::capability::Delegate;
use scout_core::errors::DelegateError;

/// Pre-programmed delegate replies for deterministic testing without API
/// calls.
#[derive(Clone, Debug)]
pub enum MockReply {
    Text(String),
    Error(DelegateError),
}

/// Mock delegate that returns pre-programmed replies in sequence and
/// records every prompt it was handed.
pub struct MockDelegate {
    replies: Mutex<Vec<MockReply>>,
    prompts: Mutex<Vec<String>>,
}

impl MockDelegate {
    pub fn new(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Mutex::new(replies),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Convenience: a sequence of plain text replies.
    pub fn with_texts(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| MockReply::Text(t.to_string())).collect())
    }

    /// Convenience: fail on the first call.
    pub fn failing(error: DelegateError) -> Self {
        Self::new(vec![MockReply::Error(error)])
    }

    /// How many times `complete` was invoked.
    pub fn call_count(&self) -> usize {
        self.prompts.lock().len()
    }

    /// Every prompt observed, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl Delegate for MockDelegate {
    fn name(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, prompt: &str) -> Result<String, DelegateError> {
        let idx = {
            let mut prompts = self.prompts.lock();
            prompts.push(prompt.to_string());
            prompts.len() - 1
        };

        let reply = {
            let replies = self.replies.lock();
            replies.get(idx).cloned()
        };

        match reply {
            Some(MockReply::Text(text)) => Ok(text),
            Some(MockReply::Error(e)) => Err(e),
            None => Err(DelegateError::InvalidRequest(format!(
                "MockDelegate: no reply configured for call {idx}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replies_in_sequence() {
        let mock = MockDelegate::with_texts(&["first", "second"]);
        assert_eq!(mock.complete("a").await.unwrap(), "first");
        assert_eq!(mock.complete("b").await.unwrap(), "second");
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn records_prompts() {
        let mock = MockDelegate::with_texts(&["reply"]);
        mock.complete("what is rust?").await.unwrap();
        assert_eq!(mock.prompts(), vec!["what is rust?".to_string()]);
    }

    #[tokio::test]
    async fn error_reply() {
        let mock = MockDelegate::failing(DelegateError::RateLimited);
        let result = mock.complete("anything").await;
        assert!(matches!(result, Err(DelegateError::RateLimited)));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn exhausted_replies() {
        let mock = MockDelegate::with_texts(&["only one"]);
        mock.complete("a").await.unwrap();
        let result = mock.complete("b").await;
        assert!(matches!(result, Err(DelegateError::InvalidRequest(_))));
    }

    #[test]
    fn delegate_metadata() {
        let mock = MockDelegate::new(vec![]);
        assert_eq!(mock.name(), "mock");
        assert_eq!(mock.model(), "mock-model");
        assert_eq!(mock.call_count(), 0);
    }
}
