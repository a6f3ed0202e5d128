use std::sync::Arc;

use serde::Serialize;
use tracing::{instrument, warn};

use scout_core::history::Speaker;
use scout_core::ids::SessionId;
use scout_core::query::{Query, QueryError};
use scout_engine::error::PipelineError;
use scout_engine::pipeline::Pipeline;
use scout_engine::runner::PipelineRunner;
use scout_store::sessions::SessionRepo;

/// Result of one submit interaction. `reply` is always present: pipeline
/// failures are folded into it as the recorded assistant turn, and the
/// session stays usable for the next submission.
#[derive(Clone, Debug, Serialize)]
pub struct SubmitOutcome {
    pub session_id: SessionId,
    pub reply: String,
    pub error: bool,
}

/// The submit event handler: reads the current input, invokes the runner,
/// and updates the session history — independent of any rendering pass.
pub struct ChatController {
    runner: PipelineRunner,
    store: Arc<SessionRepo>,
}

impl ChatController {
    pub fn new(runner: PipelineRunner, store: Arc<SessionRepo>) -> Self {
        Self { runner, store }
    }

    /// Run the two-stage research pipeline for a user query. Blank input
    /// is rejected here, before any session or capability touch.
    #[instrument(skip(self, raw_query))]
    pub async fn submit_research(
        &self,
        session_id: Option<SessionId>,
        raw_query: &str,
    ) -> Result<SubmitOutcome, QueryError> {
        let query = Query::parse(raw_query)?;
        let pipeline = Pipeline::research(&query);
        Ok(self.submit(session_id, query, pipeline).await)
    }

    /// Run the single-stage weather briefing for a location.
    #[instrument(skip(self, raw_location))]
    pub async fn submit_briefing(
        &self,
        session_id: Option<SessionId>,
        raw_location: &str,
    ) -> Result<SubmitOutcome, QueryError> {
        let location = Query::parse(raw_location)?;
        let pipeline = Pipeline::weather(&location);
        Ok(self.submit(session_id, location, pipeline).await)
    }

    /// The resource-allocation suggestion. Informational panel content, not
    /// a conversation turn — no session involved.
    pub async fn resource_plan(&self) -> Result<String, PipelineError> {
        let prompt = Query::parse("disaster resource allocation")
            .map_err(|e| PipelineError::Internal(e.to_string()))?;
        self.runner
            .run(&Pipeline::resource_allocation(), &prompt)
            .await
    }

    async fn submit(
        &self,
        session_id: Option<SessionId>,
        query: Query,
        pipeline: Pipeline,
    ) -> SubmitOutcome {
        let session_id = self.store.get_or_create(session_id.as_ref());
        self.store.append(&session_id, Speaker::User, query.as_str());

        match self.runner.run(&pipeline, &query).await {
            Ok(reply) => {
                self.store.append(&session_id, Speaker::Assistant, &reply);
                SubmitOutcome {
                    session_id,
                    reply,
                    error: false,
                }
            }
            Err(e) => {
                warn!(kind = e.error_kind(), "pipeline run failed: {e}");
                let reply = format!("An error occurred: {e}");
                self.store.append(&session_id, Speaker::Assistant, &reply);
                SubmitOutcome {
                    session_id,
                    reply,
                    error: true,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_core::capability::Snippet;
    use scout_core::errors::DelegateError;
    use scout_engine::search::MockSearch;
    use scout_llm::MockDelegate;

    fn controller(
        delegate: Arc<MockDelegate>,
        search: Arc<MockSearch>,
    ) -> (ChatController, Arc<SessionRepo>) {
        let store = Arc::new(SessionRepo::new());
        let runner = PipelineRunner::new(delegate, search);
        (ChatController::new(runner, Arc::clone(&store)), store)
    }

    fn snippet() -> Snippet {
        Snippet {
            title: "AI in radiology".into(),
            url: "https://example.com/radiology".into(),
            snippet: "recent findings".into(),
        }
    }

    #[tokio::test]
    async fn research_flow_records_two_turns() {
        let delegate = Arc::new(MockDelegate::with_texts(&["research notes", "final answer"]));
        let search = Arc::new(MockSearch::with_snippets(vec![snippet()]));
        let (controller, store) = controller(delegate.clone(), search.clone());

        let outcome = controller
            .submit_research(None, "impact of AI on radiology")
            .await
            .unwrap();

        assert!(!outcome.error);
        assert_eq!(outcome.reply, "final answer");
        assert_eq!(search.queries(), vec![("impact of AI on radiology".to_string(), 10)]);

        let history = store.history(&outcome.session_id).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].speaker, Speaker::User);
        assert_eq!(history[0].text, "impact of AI on radiology");
        assert_eq!(history[1].speaker, Speaker::Assistant);
        assert_eq!(history[1].text, "final answer");
    }

    #[tokio::test]
    async fn empty_query_rejected_without_capability_calls() {
        let delegate = Arc::new(MockDelegate::with_texts(&["unused"]));
        let search = Arc::new(MockSearch::with_snippets(vec![]));
        let (controller, store) = controller(delegate.clone(), search.clone());

        let result = controller.submit_research(None, "   \t  ").await;

        assert_eq!(result.unwrap_err(), QueryError::Empty);
        assert_eq!(delegate.call_count(), 0);
        assert_eq!(search.call_count(), 0);
        assert!(store.is_empty(), "no session should be created");
    }

    #[tokio::test]
    async fn delegate_failure_recorded_as_assistant_turn() {
        let delegate = Arc::new(MockDelegate::failing(DelegateError::ServerError {
            status: 503,
            body: "overloaded".into(),
        }));
        let search = Arc::new(MockSearch::with_snippets(vec![]));
        let (controller, store) = controller(delegate.clone(), search);

        let outcome = controller
            .submit_research(None, "impact of AI on radiology")
            .await
            .unwrap();

        assert!(outcome.error);
        assert!(outcome.reply.starts_with("An error occurred:"));
        assert_eq!(delegate.call_count(), 1, "writing stage must not run");

        let history = store.history(&outcome.session_id).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].speaker, Speaker::User);
        assert_eq!(history[1].speaker, Speaker::Assistant);
        assert!(history[1].text.contains("overloaded"));
    }

    #[tokio::test]
    async fn session_survives_failure_and_reuse() {
        let delegate = Arc::new(MockDelegate::new(vec![
            scout_llm::MockReply::Error(DelegateError::RateLimited),
            scout_llm::MockReply::Text("second research".into()),
            scout_llm::MockReply::Text("second answer".into()),
        ]));
        let search = Arc::new(MockSearch::with_snippets(vec![]));
        let (controller, store) = controller(delegate, search);

        let first = controller.submit_research(None, "first question").await.unwrap();
        assert!(first.error);

        let second = controller
            .submit_research(Some(first.session_id.clone()), "second question")
            .await
            .unwrap();
        assert!(!second.error);
        assert_eq!(second.session_id, first.session_id);

        let history = store.history(&first.session_id).unwrap();
        assert_eq!(history.len(), 4);
        assert_eq!(history[3].text, "second answer");
    }

    #[tokio::test]
    async fn briefing_runs_single_stage() {
        let delegate = Arc::new(MockDelegate::with_texts(&["heavy rain expected"]));
        let search = Arc::new(MockSearch::with_snippets(vec![snippet()]));
        let (controller, store) = controller(delegate.clone(), search.clone());

        let outcome = controller.submit_briefing(None, "Bhopal").await.unwrap();

        assert_eq!(outcome.reply, "heavy rain expected");
        assert_eq!(search.call_count(), 0);
        assert_eq!(delegate.call_count(), 1);
        assert_eq!(store.history(&outcome.session_id).unwrap().len(), 2);
    }

    #[tokio::test]
    async fn resource_plan_skips_history() {
        let delegate = Arc::new(MockDelegate::with_texts(&["2 rescue teams, 3 shelters"]));
        let search = Arc::new(MockSearch::with_snippets(vec![]));
        let (controller, store) = controller(delegate, search);

        let plan = controller.resource_plan().await.unwrap();
        assert_eq!(plan, "2 rescue teams, 3 shelters");
        assert!(store.is_empty());
    }
}
