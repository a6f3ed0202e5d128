use std::sync::Arc;

use tracing::{debug, instrument};

use scout_core::capability::{Delegate, Search, Snippet};
use scout_core::errors::DelegateError;
use scout_core::query::Query;

use crate::error::PipelineError;
use crate::pipeline::{Pipeline, Stage};

/// Executes a pipeline's stages in declared order, strictly sequentially:
/// stage n+1 only starts after stage n's delegate reply is in hand. No
/// retry, no timeout, no partial results — the first capability failure
/// aborts the run.
pub struct PipelineRunner {
    delegate: Arc<dyn Delegate>,
    search: Arc<dyn Search>,
}

impl PipelineRunner {
    pub fn new(delegate: Arc<dyn Delegate>, search: Arc<dyn Search>) -> Self {
        Self { delegate, search }
    }

    #[instrument(skip(self, pipeline, query), fields(stages = pipeline.stages().len()))]
    pub async fn run(&self, pipeline: &Pipeline, query: &Query) -> Result<String, PipelineError> {
        let mut previous: Option<String> = None;

        for stage in pipeline.stages() {
            if !stage.has_delegate() {
                return Err(PipelineError::Internal(format!(
                    "stage '{}' has no delegate bound",
                    stage.role
                )));
            }

            let mut instruction = stage_instruction(stage, query, previous.as_deref());

            if let Some(max_results) = stage.search_binding() {
                let snippets = self.search.search(query.as_str(), max_results).await?;
                instruction.push_str("\n\nSearch results:\n");
                instruction.push_str(&render_snippets(&snippets));
            }

            let output = self.delegate.complete(&instruction).await?;
            // A blank reply is never surfaced as a silent empty result.
            if output.trim().is_empty() {
                return Err(DelegateError::EmptyResponse.into());
            }
            debug!(stage = %stage.role, chars = output.len(), "stage complete");
            previous = Some(output);
        }

        previous.ok_or_else(|| PipelineError::Internal("pipeline has no stages".into()))
    }
}

/// Combine a stage's role, goal, and backstory with the original query and,
/// for stages after the first, the previous stage's output.
fn stage_instruction(stage: &Stage, query: &Query, previous: Option<&str>) -> String {
    let mut out = format!(
        "You are {role}. {backstory}\n\nYour goal: {goal}\n\nUser query: {query}\n",
        role = stage.role,
        backstory = stage.backstory,
        goal = stage.goal,
    );
    if let Some(prev) = previous {
        out.push_str("\nFindings from the previous stage:\n");
        out.push_str(prev);
        out.push('\n');
    }
    out
}

fn render_snippets(snippets: &[Snippet]) -> String {
    if snippets.is_empty() {
        return "No search results found.".to_string();
    }
    let mut output = String::new();
    for (i, s) in snippets.iter().enumerate() {
        output.push_str(&format!("{}. [{}]({})\n", i + 1, s.title, s.url));
        if !s.snippet.is_empty() {
            output.push_str(&format!("   {}\n", s.snippet));
        }
    }
    output
}
