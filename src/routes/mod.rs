//! API routes

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};

use crate::builds::{check_compatibility, format_warning, recommend, CompatibilityWarning, PartRef, RecommendedBuild};
use crate::config::{personas, Config, PersonaProfile};
use crate::core::{ChatEngine, ChatError, SessionView, StoreError, TurnOutcome};
use crate::validation::{validate_budget, BudgetValidationResult};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub chat_engine: Arc<ChatEngine>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct BudgetRequest {
    pub input: String,
}

#[derive(Debug, Deserialize)]
pub struct BuildsRequest {
    pub persona_id: String,
    /// Falls back to the configured default budget
    pub budget: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct BuildsResponse {
    pub persona_id: String,
    pub budget: u64,
    pub builds: Vec<RecommendedBuild>,
}

#[derive(Debug, Deserialize)]
pub struct CompatibilityRequest {
    pub components: Vec<PartRef>,
}

#[derive(Debug, Serialize)]
pub struct CompatibilityResponse {
    pub warnings: Vec<CompatibilityWarning>,
    /// Chat-ready rendering of each warning
    pub formatted: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LayoutRequest {
    pub panel_percent: i64,
}

#[derive(Debug, Serialize)]
pub struct LayoutResponse {
    pub panel_percent: u8,
}

/// Chat engine failures rendered as `{ "error": ... }`
pub struct ApiError(ChatError);

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ChatError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ChatError::SessionBusy(_) | ChatError::NoPendingPersona(_) => StatusCode::CONFLICT,
            ChatError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        }

        (status, Json(serde_json::json!({ "error": self.0.to_string() }))).into_response()
    }
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn list_personas() -> Json<&'static [PersonaProfile]> {
    Json(personas::ALL.as_slice())
}

async fn validate(Json(request): Json<BudgetRequest>) -> Json<BudgetValidationResult> {
    Json(validate_budget(&request.input))
}

async fn builds(State(state): State<AppState>, Json(request): Json<BuildsRequest>) -> Json<BuildsResponse> {
    let budget = request
        .budget
        .unwrap_or(state.config.advisor.recommendations.default_budget);
    let builds = recommend(&request.persona_id, budget);

    Json(BuildsResponse {
        persona_id: request.persona_id,
        budget,
        builds,
    })
}

async fn compatibility(Json(request): Json<CompatibilityRequest>) -> Json<CompatibilityResponse> {
    let warnings = check_compatibility(&request.components);
    let formatted = warnings.iter().map(format_warning).collect();
    Json(CompatibilityResponse { warnings, formatted })
}

async fn create_session(State(state): State<AppState>) -> Result<(StatusCode, Json<SessionView>), ApiError> {
    let view = state.chat_engine.start_session().await?;
    Ok((StatusCode::CREATED, Json(view)))
}

async fn list_sessions(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.chat_engine.list_sessions().await?))
}

async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.chat_engine.delete_session(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, ApiError> {
    Ok(Json(state.chat_engine.get_session(&id).await?))
}

async fn send_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<TurnOutcome>, ApiError> {
    Ok(Json(state.chat_engine.send_message(&id, &request.content).await?))
}

async fn accept_persona(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TurnOutcome>, ApiError> {
    Ok(Json(state.chat_engine.accept_persona(&id).await?))
}

async fn decline_persona(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TurnOutcome>, ApiError> {
    Ok(Json(state.chat_engine.decline_persona(&id).await?))
}

async fn reset_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, ApiError> {
    Ok(Json(state.chat_engine.reset_session(&id).await?))
}

async fn set_layout(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<LayoutRequest>,
) -> Result<Json<LayoutResponse>, ApiError> {
    let panel_percent = state
        .chat_engine
        .set_panel_percent(&id, request.panel_percent)
        .await?;
    Ok(Json(LayoutResponse { panel_percent }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/v1/personas", get(list_personas))
        .route("/v1/budget/validate", post(validate))
        .route("/v1/builds", post(builds))
        .route("/v1/compatibility", post(compatibility))
        .route("/v1/sessions", get(list_sessions).post(create_session))
        .route("/v1/sessions/:id", get(get_session).delete(delete_session))
        .route("/v1/sessions/:id/messages", post(send_message))
        .route("/v1/sessions/:id/persona/accept", post(accept_persona))
        .route("/v1/sessions/:id/persona/decline", post(decline_persona))
        .route("/v1/sessions/:id/reset", post(reset_session))
        .route("/v1/sessions/:id/layout", put(set_layout))
}
