//! Chat session routes.
//!
//! Each handler resolves the session, applies one widget operation, and
//! answers with the session's current view.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::chat::{ChatError, WidgetView};
use crate::error::ErrorCode;
use crate::i18n::Language;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ToggleBody {
    #[serde(default)]
    pub language: Language,
}

#[derive(Debug, Deserialize)]
pub struct CompositionBody {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct SendBody {
    #[serde(default)]
    pub language: Language,
    /// Sent as-is when present; otherwise the composition buffer is sent.
    pub text: Option<String>,
}

pub(crate) fn chat_error_to_status(err: &ChatError) -> StatusCode {
    match err {
        ChatError::SessionNotFound(_) => StatusCode::NOT_FOUND,
        ChatError::EmptyMessage => StatusCode::UNPROCESSABLE_ENTITY,
        ChatError::ReplyTask(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let body = json!({ "error": { "code": self.error_code(), "message": self.to_string() } });
        (chat_error_to_status(&self), Json(body)).into_response()
    }
}

/// `POST /api/chat/sessions`: start a new widget session.
pub async fn create_session(State(state): State<AppState>) -> impl IntoResponse {
    let widget = state.create_session().await;
    tracing::info!(session_id = %widget.id(), "chat: session created");
    (StatusCode::CREATED, Json(widget.view().await))
}

/// `GET /api/chat/sessions/:id`
pub async fn get_session(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<WidgetView>, ChatError> {
    let widget = state.session(id).await?;
    Ok(Json(widget.view().await))
}

/// `DELETE /api/chat/sessions/:id`: the page went away.
pub async fn delete_session(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode, ChatError> {
    state.remove_session(id).await?;
    tracing::info!(session_id = %id, "chat: session closed");
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/chat/sessions/:id/toggle`: open or close the widget.
pub async fn toggle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ToggleBody>,
) -> Result<Json<WidgetView>, ChatError> {
    let widget = state.session(id).await?;
    widget.toggle(body.language).await;
    Ok(Json(widget.view().await))
}

/// `PUT /api/chat/sessions/:id/composition`: replace the unsent text.
pub async fn update_composition(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<CompositionBody>,
) -> Result<Json<WidgetView>, ChatError> {
    let widget = state.session(id).await?;
    widget.update_composition(body.text).await;
    Ok(Json(widget.view().await))
}

/// `POST /api/chat/sessions/:id/messages`: send and wait for the reply.
pub async fn send_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SendBody>,
) -> Result<Json<WidgetView>, ChatError> {
    let widget = state.session(id).await?;
    match body.text {
        Some(text) => widget.send_text(text, body.language).await?,
        None => widget.send(body.language).await?,
    };
    Ok(Json(widget.view().await))
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
