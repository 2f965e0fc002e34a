use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::state::AppState;
use crate::engine::{self, EvaluationInput, GateError};
use crate::models::*;

// ============================================================
// Error Handling
// ============================================================

/// Gate errors are the user's pick being off the menu, safe to expose.
fn gate_error(e: GateError) -> (StatusCode, String) {
    let msg = e.to_string();
    tracing::warn!("Validation error: {}", msg);
    (StatusCode::BAD_REQUEST, msg)
}

// ============================================================
// Request/Response Types
// ============================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadResponse {
    pub scores: LoadScores,
    pub status: Status,
    pub characters: CharacterStates,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DriftRequest {
    pub idle_minutes: f64,
    #[serde(default)]
    pub open_tasks: u32,
    #[serde(default)]
    pub unprocessed_dumps: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MessageBody {
    #[serde(flatten)]
    pub request: MessageRequest,
    /// Seed for the pool draw. Omit for a fresh draw on every call.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessImpulseRequest {
    pub impulse: Impulse,
    #[serde(default)]
    pub status: Status,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveImpulseRequest {
    pub impulse: Impulse,
    #[serde(default)]
    pub status: Status,
    pub choice: GateChoice,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityInput {
    /// The quest the user is focused on, if it changed.
    #[serde(default)]
    pub quest_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotInput {
    pub projects: Option<Vec<ProjectRecord>>,
    pub tasks: Option<Vec<TaskRecord>>,
    pub dumps: Option<Vec<BrainDumpRecord>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDriftResponse {
    pub state: DriftState,
    pub drift: DriftReading,
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Stateless Evaluation
// ============================================================

pub async fn compute_load(
    State(state): State<AppState>,
    Json(counts): Json<WorkItemCounts>,
) -> Json<LoadResponse> {
    let scores = engine::compute_load_scores(&counts, &state.config.ram_weights);
    Json(LoadResponse {
        status: engine::classify_status(scores.ram_usage),
        characters: engine::classify_characters(&scores, &state.config.characters),
        scores,
    })
}

pub async fn compute_drift(Json(input): Json<DriftRequest>) -> Json<DriftReading> {
    Json(engine::compute_drift(
        input.idle_minutes,
        input.open_tasks,
        input.unprocessed_dumps,
    ))
}

pub async fn partition_orbits(
    Json(projects): Json<Vec<OrbitProject>>,
) -> Json<ProjectOrbitAssignment> {
    Json(engine::partition_orbits(&projects))
}

pub async fn get_message(Json(body): Json<MessageBody>) -> Json<WizardMessage> {
    let mut rng = match body.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    Json(engine::get_message(&body.request, &mut rng))
}

// ============================================================
// Intervention Gate
// ============================================================

pub async fn assess_impulse(Json(input): Json<AssessImpulseRequest>) -> Json<GateAssessment> {
    Json(engine::assess(&input.impulse, input.status))
}

pub async fn resolve_impulse(
    Json(input): Json<ResolveImpulseRequest>,
) -> Result<Json<GateOutcome>, (StatusCode, String)> {
    let assessment = engine::assess(&input.impulse, input.status);
    engine::resolve(&assessment, input.choice)
        .map(Json)
        .map_err(gate_error)
}

// ============================================================
// Sessions
// ============================================================

pub async fn record_activity(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<ActivityInput>,
) -> Json<DriftState> {
    let now = Utc::now();
    let session = state.sessions.get_or_start(&id, now);
    session.tracker.record_activity(now);
    if input.quest_id.is_some() {
        session.tracker.set_quest(input.quest_id);
    }
    Json(session.tracker.state())
}

pub async fn get_session_drift(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionDriftResponse>, (StatusCode, String)> {
    let session = state
        .sessions
        .get(&id)
        .ok_or((StatusCode::NOT_FOUND, "Session not found".to_string()))?;

    let now = Utc::now();
    session.touch(now);
    let counts = session.last_counts();
    let drift = session
        .tracker
        .sample(now, counts.open_tasks, counts.unprocessed_dumps);
    session.tracker.observe(&drift, now);

    Ok(Json(SessionDriftResponse {
        state: session.tracker.state(),
        drift,
    }))
}

pub async fn evaluate_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<SnapshotInput>,
) -> Json<CognitiveSnapshot> {
    let now = Utc::now();
    let session = state.sessions.get_or_start(&id, now);

    let snapshot = engine::evaluate(
        EvaluationInput {
            projects: input.projects.as_deref(),
            tasks: input.tasks.as_deref(),
            dumps: input.dumps.as_deref(),
        },
        &session.tracker,
        now,
        &state.config,
    );
    session.set_last_counts(snapshot.counts);

    Json(snapshot)
}

pub async fn end_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    if state.sessions.end(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, "Session not found".to_string()))
    }
}
