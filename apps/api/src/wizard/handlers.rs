//! Axum route handlers for the wizard API.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::wizard::engine::{compose_comment, ensure_round};
use crate::wizard::models::{Industry, ProfileForm};
use crate::wizard::store::SessionHandle;
use crate::wizard::tone::{Tone, ToneOption};
use crate::wizard::view::SessionView;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PostRequest {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct DraftRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResponseRequest {
    /// Falls back to the round's draft when omitted.
    pub response: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    /// A picker label ("🎓 Expert") or a bare tone name. Defaults to the first tone.
    pub tone: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub industries: Vec<Industry>,
    pub tones: Vec<ToneOption>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/options
pub async fn handle_options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        industries: Industry::ALL.to_vec(),
        tones: Tone::ALL.into_iter().map(Tone::option).collect(),
    })
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionView>) {
    let handle = state.sessions.create().await;
    let active = state.sessions.len().await;
    let session = handle.lock().await;
    info!("Session {} started ({active} in memory)", session.id());
    (StatusCode::CREATED, Json(SessionView::of(&session)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let handle = find(&state, id).await?;
    let session = handle.lock().await;
    Ok(Json(SessionView::of(&session)))
}

/// POST /api/v1/sessions/:id/profile
pub async fn handle_submit_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<ProfileForm>,
) -> Result<Json<SessionView>, AppError> {
    let handle = find(&state, id).await?;
    let mut session = handle.lock().await;
    let step = session.submit_profile(form)?;
    info!("Session {id} captured profile, now at {step}");
    Ok(Json(SessionView::of(&session)))
}

/// POST /api/v1/sessions/:id/post
pub async fn handle_submit_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<PostRequest>,
) -> Result<Json<SessionView>, AppError> {
    let handle = find(&state, id).await?;
    let mut session = handle.lock().await;
    let step = session.submit_post(&request.content)?;
    info!("Session {id} captured post, now at {step}");
    Ok(Json(SessionView::of(&session)))
}

/// POST /api/v1/sessions/:id/round
///
/// Generates the current round's question, examples and tips, or returns them
/// if they were already generated for this step.
pub async fn handle_ensure_round(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let handle = find(&state, id).await?;
    let mut session = handle.lock().await;
    ensure_round(&mut session, state.generator.as_ref()).await?;
    Ok(Json(SessionView::of(&session)))
}

/// PUT /api/v1/sessions/:id/round/draft
pub async fn handle_update_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<DraftRequest>,
) -> Result<Json<SessionView>, AppError> {
    let handle = find(&state, id).await?;
    let mut session = handle.lock().await;
    session.update_draft(&request.text)?;
    Ok(Json(SessionView::of(&session)))
}

/// POST /api/v1/sessions/:id/round/examples/:n
pub async fn handle_use_example(
    State(state): State<AppState>,
    Path((id, n)): Path<(Uuid, usize)>,
) -> Result<Json<SessionView>, AppError> {
    let handle = find(&state, id).await?;
    let mut session = handle.lock().await;
    session.use_example(n)?;
    Ok(Json(SessionView::of(&session)))
}

/// POST /api/v1/sessions/:id/responses
///
/// An empty body commits the current draft. A body that is not a valid
/// `ResponseRequest` is rejected before the session is touched.
pub async fn handle_submit_response(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> Result<Json<SessionView>, AppError> {
    let request = parse_response_request(&body)?;
    let handle = find(&state, id).await?;
    let mut session = handle.lock().await;
    let step = session.submit_response(request.response.as_deref())?;
    info!(
        "Session {id} recorded response {}, now at {step}",
        session.responses().len()
    );
    Ok(Json(SessionView::of(&session)))
}

/// POST /api/v1/sessions/:id/comment
pub async fn handle_compose_comment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CommentRequest>,
) -> Result<Json<SessionView>, AppError> {
    let tone = match request.tone.as_deref() {
        Some(selection) => Tone::from_selection(selection)
            .ok_or_else(|| AppError::Validation(format!("Unknown tone '{selection}'")))?,
        None => Tone::default(),
    };

    let handle = find(&state, id).await?;
    let mut session = handle.lock().await;
    compose_comment(&mut session, tone, state.generator.as_ref()).await?;
    Ok(Json(SessionView::of(&session)))
}

/// POST /api/v1/sessions/:id/start-over
pub async fn handle_start_over(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let handle = find(&state, id).await?;
    let mut session = handle.lock().await;
    session.start_over();
    info!("Session {id} started over");
    Ok(Json(SessionView::of(&session)))
}

async fn find(state: &AppState, id: Uuid) -> Result<SessionHandle, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
}

fn parse_response_request(body: &[u8]) -> Result<ResponseRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ResponseRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(format!("Invalid response body: {e}")))
}
