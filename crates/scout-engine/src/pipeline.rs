use serde::Serialize;

use scout_core::query::Query;

/// A capability bound to a stage. When both are bound, search runs before
/// the delegate and its snippets are folded into the stage instruction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Capability {
    Search { max_results: u32 },
    Delegate,
}

/// A configured unit of delegated work. Static configuration assembled at
/// submission time — construction performs no I/O and stages are never
/// mutated afterwards.
#[derive(Clone, Debug, Serialize)]
pub struct Stage {
    pub role: String,
    pub goal: String,
    pub backstory: String,
    pub capabilities: Vec<Capability>,
}

impl Stage {
    /// The search binding's result-count bound, if search is bound.
    pub fn search_binding(&self) -> Option<u32> {
        self.capabilities.iter().find_map(|c| match c {
            Capability::Search { max_results } => Some(*max_results),
            Capability::Delegate => None,
        })
    }

    pub fn has_delegate(&self) -> bool {
        self.capabilities.contains(&Capability::Delegate)
    }
}

/// An ordered composition of stages, executed start-to-end with no
/// branching. Each stage after the first receives the prior stage's output.
#[derive(Clone, Debug, Serialize)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    pub fn new(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// The fixed two-stage research/writing plan, goals templated with the
    /// query text.
    pub fn research(query: &Query) -> Self {
        Self::research_with_query_text(query.as_str())
    }

    /// The research plan with a placeholder where the query goes — used to
    /// describe the pipeline without a live submission.
    pub fn research_description() -> Self {
        Self::research_with_query_text("{query}")
    }

    fn research_with_query_text(query: &str) -> Self {
        let research_analyst = Stage {
            role: "Senior Research Analyst".into(),
            goal: format!("Research and analyze information about: {query}"),
            backstory: "You're an expert research analyst who can find and analyze information \
                        on any topic. You focus on providing accurate, up-to-date information \
                        with proper citations."
                .into(),
            capabilities: vec![Capability::Search { max_results: 10 }, Capability::Delegate],
        };

        let content_writer = Stage {
            role: "Content Writer".into(),
            goal: "Transform research findings into clear, engaging responses.".into(),
            backstory: "You're a skilled writer who excels at making complex information \
                        accessible and engaging. You maintain accuracy while ensuring the \
                        content is easy to understand."
                .into(),
            capabilities: vec![Capability::Delegate],
        };

        Self {
            stages: vec![research_analyst, content_writer],
        }
    }

    /// Single-stage weather and disaster-warning briefing for a location.
    pub fn weather(location: &Query) -> Self {
        let stage = Stage {
            role: "Weather Analyst".into(),
            goal: format!(
                "Provide the current weather forecast and disaster warnings for {location}."
            ),
            backstory: "You monitor meteorological feeds and official advisories to brief \
                        emergency responders."
                .into(),
            capabilities: vec![Capability::Delegate],
        };
        Self { stages: vec![stage] }
    }

    /// Single-stage resource-allocation suggestion for disaster management.
    pub fn resource_allocation() -> Self {
        let stage = Stage {
            role: "Resource Coordinator".into(),
            goal: "Suggest optimal resource allocation for disaster management, including \
                   shelters, rescue teams, and ambulances."
                .into(),
            backstory: "You plan the staging of shelters, rescue teams, and ambulances during \
                        emergencies."
                .into(),
            capabilities: vec![Capability::Delegate],
        };
        Self { stages: vec![stage] }
    }
}
