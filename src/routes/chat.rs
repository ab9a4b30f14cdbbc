use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::app::AppState;
use crate::authz::{can_post_chat, can_read_chat};
use crate::errors::{AppError, AppResult};
use crate::jwt::AuthUser;
use crate::models::message::{ChatMessage, ChatPostRequest};

#[derive(Debug, Deserialize)]
pub struct ChatQuery {
    pub limit: Option<usize>,
}

#[utoipa::path(
    get,
    path = "/chat",
    tag = "Chat",
    responses((status = 200, description = "Unit chat feed, oldest first", body = [ChatMessage]))
)]
pub async fn list_messages(
    State(state): State<AppState>,
    Query(query): Query<ChatQuery>,
    auth: AuthUser,
) -> AppResult<Json<Vec<ChatMessage>>> {
    state.enforce(can_read_chat(Some(&auth.actor)), "read the unit chat")?;

    let messages = state.chat.for_unit(&auth.actor.unit, query.limit);
    Ok(Json(messages))
}

#[utoipa::path(
    post,
    path = "/chat",
    tag = "Chat",
    request_body = ChatPostRequest,
    responses((status = 201, description = "Message posted", body = ChatMessage))
)]
pub async fn post_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<ChatPostRequest>,
) -> AppResult<(StatusCode, Json<ChatMessage>)> {
    state.enforce(can_post_chat(Some(&auth.actor)), "post to the unit chat")?;

    if payload.body.trim().is_empty() {
        return Err(AppError::bad_request("message body must not be empty"));
    }

    let message = state.chat.post(auth.actor.id, &auth.actor.unit, payload.body);
    Ok((StatusCode::CREATED, Json(message)))
}
