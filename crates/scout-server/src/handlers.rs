use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use scout_core::history::HistoryEntry;
use scout_core::ids::SessionId;
use scout_engine::overlay::{build_overlay, DisasterArea, MapOverlay, ResourcePoint};
use scout_engine::pipeline::Pipeline;
use scout_store::sessions::SessionInfo;

use crate::controller::SubmitOutcome;
use crate::server::AppState;

/// Log an upstream failure and return a gateway error to the client. The
/// full error is logged server-side; the message itself is already the
/// capability's surface error text.
fn upstream_error(e: impl std::fmt::Display) -> (StatusCode, String) {
    let msg = e.to_string();
    tracing::warn!("upstream error: {msg}");
    (StatusCode::BAD_GATEWAY, msg)
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

// ============================================================
// Pipeline submissions
// ============================================================

#[derive(Debug, Deserialize)]
pub struct ResearchRequest {
    pub session_id: Option<SessionId>,
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct BriefingRequest {
    pub session_id: Option<SessionId>,
    pub location: String,
}

pub async fn submit_research(
    State(state): State<AppState>,
    Json(req): Json<ResearchRequest>,
) -> Result<Json<SubmitOutcome>, (StatusCode, String)> {
    state
        .controller
        .submit_research(req.session_id, &req.query)
        .await
        .map(Json)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))
}

pub async fn submit_briefing(
    State(state): State<AppState>,
    Json(req): Json<BriefingRequest>,
) -> Result<Json<SubmitOutcome>, (StatusCode, String)> {
    state
        .controller
        .submit_briefing(req.session_id, &req.location)
        .await
        .map(Json)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))
}

pub async fn resource_plan(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    state
        .controller
        .resource_plan()
        .await
        .map(|plan| Json(serde_json::json!({ "plan": plan })))
        .map_err(upstream_error)
}

// ============================================================
// Sessions
// ============================================================

pub async fn list_sessions(State(state): State<AppState>) -> Json<Vec<SessionInfo>> {
    Json(state.store.list())
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub session_id: SessionId,
    pub entries: Vec<HistoryEntry>,
}

pub async fn session_history(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<Json<HistoryResponse>, (StatusCode, String)> {
    state
        .store
        .history(&id)
        .map(|entries| {
            Json(HistoryResponse {
                session_id: id,
                entries,
            })
        })
        .map_err(|e| (StatusCode::NOT_FOUND, e.to_string()))
}

// ============================================================
// Pipeline description
// ============================================================

pub async fn pipeline_info() -> Json<Pipeline> {
    Json(Pipeline::research_description())
}

// ============================================================
// Demo map overlay
// ============================================================

// Example disaster-response data around Bhopal.
const DEMO_CENTER: (f64, f64) = (23.2599, 77.4126);

fn demo_disaster_areas() -> Vec<DisasterArea> {
    vec![
        DisasterArea { name: "Flood Zone".into(), latitude: 23.2599, longitude: 77.4126 },
        DisasterArea { name: "Fire Zone".into(), latitude: 23.2699, longitude: 77.4426 },
    ]
}

fn demo_resource_points() -> Vec<ResourcePoint> {
    vec![
        ResourcePoint { kind: "Ambulance".into(), latitude: 23.2600, longitude: 77.4200 },
        ResourcePoint { kind: "Shelter".into(), latitude: 23.2700, longitude: 77.4500 },
    ]
}

pub async fn demo_overlay() -> Result<Json<MapOverlay>, (StatusCode, String)> {
    build_overlay(DEMO_CENTER, &demo_disaster_areas(), &demo_resource_points())
        .map(Json)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_engine::overlay::MarkerKind;

    #[test]
    fn demo_data_builds_valid_overlay() {
        let overlay =
            build_overlay(DEMO_CENTER, &demo_disaster_areas(), &demo_resource_points()).unwrap();
        assert_eq!(overlay.markers.len(), 4);
        assert_eq!(
            overlay.markers.iter().filter(|m| m.kind == MarkerKind::Hazard).count(),
            2
        );
        assert_eq!(
            overlay.markers.iter().filter(|m| m.kind == MarkerKind::Resource).count(),
            2
        );
    }

    #[tokio::test]
    async fn pipeline_info_describes_two_stages() {
        let Json(pipeline) = pipeline_info().await;
        assert_eq!(pipeline.stages().len(), 2);
        assert!(pipeline.stages()[0].goal.contains("{query}"));
    }
}
