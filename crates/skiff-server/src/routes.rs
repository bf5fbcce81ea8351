use axum::{
    extract::{Multipart, Path, State},
    http::{header, HeaderMap},
    response::{AppendHeaders, Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use skiff_core::types::Turn;
use skiff_extract::{allowed_file, content_type_for, extract};
use skiff_prompt::{compose_user_message, AssembledPrompt, FileSection, Persona};
use skiff_session::{SessionStore, CONTEXT_EXCHANGES};
use skiff_upstream::{CompletionRequest, UpstreamError};

use crate::cookie::{session_token, set_session_cookie};
use crate::error::ApiError;
use crate::state::AppState;

pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/uploads/{filename}", get(uploaded_file))
}

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/api/clear-history", post(clear_history))
        .route("/api/health", get(health))
}

async fn home() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "provider": state.upstream.id(),
        "uptime_seconds": state.start_time.elapsed().as_secs(),
    }))
}

async fn uploaded_file(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let bytes = state.uploads.read(&filename).await?;
    let headers = [(header::CONTENT_TYPE, content_type_for(&filename))];
    Ok((headers, bytes))
}

/// The chat request body after multipart decoding: the trimmed message
/// plus every upload that survived validation and extraction.
struct ChatForm {
    message: String,
    files: Vec<FileSection>,
}

async fn read_chat_form(state: &AppState, mut multipart: Multipart) -> Result<ChatForm, ApiError> {
    let mut message = String::new();
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("malformed form data: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("message") => {
                message = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("malformed form data: {e}")))?
                    .trim()
                    .to_string();
            }
            Some("files[]") => {
                let Some(filename) = field.file_name().map(str::to_string) else {
                    continue;
                };
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("malformed form data: {e}")))?;
                if !allowed_file(&filename) {
                    tracing::warn!(file = %filename, "rejecting disallowed upload");
                    continue;
                }
                // Durable side effect, independent of the chat response.
                if let Err(e) = state.uploads.persist(&filename, &bytes).await {
                    tracing::warn!(file = %filename, error = %e, "failed to store upload");
                    continue;
                }
                match extract(&filename, &bytes) {
                    Ok(content) => files.push(FileSection { name: filename, content }),
                    // A bad file is excluded from the prompt, never fatal.
                    Err(e) => tracing::warn!(file = %filename, error = %e, "skipping upload"),
                }
            }
            _ => {}
        }
    }

    Ok(ChatForm { message, files })
}

async fn chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let token = session_token(&headers).unwrap_or_else(SessionStore::new_token);
    let form = read_chat_form(&state, multipart).await?;

    let full_message = compose_user_message(&form.message, &form.files);
    let persona = Persona::for_message(&full_message);
    let history = state.sessions.recent(&token, CONTEXT_EXCHANGES);
    tracing::debug!(
        session = %token,
        persona = ?persona,
        history_turns = history.len(),
        files = form.files.len(),
        "dispatching chat request"
    );

    let prompt = AssembledPrompt::new(persona, history, full_message.clone());
    let request = CompletionRequest::new(prompt.into_messages()).with_options(
        state.config.upstream.temperature,
        state.config.upstream.max_output_tokens,
    );

    let reply = match tokio::time::timeout(
        state.config.upstream_timeout(),
        state.upstream.complete(request),
    )
    .await
    {
        Ok(result) => result?,
        Err(_) => return Err(UpstreamError::Timeout.into()),
    };

    // History records the exchange only once the upstream call succeeded,
    // keeping stored turns paired.
    state.sessions.append(&token, Turn::user(full_message));
    state.sessions.append(&token, Turn::assistant(reply.clone()));

    Ok((
        AppendHeaders([(header::SET_COOKIE, set_session_cookie(&token))]),
        Json(json!({ "response": reply })),
    ))
}

async fn clear_history(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let token = session_token(&headers).unwrap_or_else(SessionStore::new_token);
    state.sessions.clear(&token);
    tracing::debug!(session = %token, "cleared history");
    (
        AppendHeaders([(header::SET_COOKIE, set_session_cookie(&token))]),
        Json(json!({ "success": true, "message": "Conversation history cleared" })),
    )
}
