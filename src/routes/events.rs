use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::app::AppState;
use crate::authz::{can_create_event, can_delete_event, can_read_event, can_update_event};
use crate::errors::{AppError, AppResult};
use crate::jwt::AuthUser;
use crate::models::event::{CalendarEvent, EventCreateRequest, EventUpdateRequest};

#[derive(Debug, Deserialize)]
pub struct EventListQuery {
    pub date: Option<NaiveDate>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub organizer: Option<Uuid>,
    pub participant: Option<Uuid>,
    pub q: Option<String>,
}

#[utoipa::path(
    get,
    path = "/events",
    tag = "Events",
    responses((status = 200, description = "Events visible to the caller", body = [CalendarEvent]))
)]
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventListQuery>,
    auth: AuthUser,
) -> AppResult<Json<Vec<CalendarEvent>>> {
    let events = if let Some(date) = query.date {
        state.events.by_date(date)
    } else if let (Some(from), Some(to)) = (query.from, query.to) {
        state.events.by_range(from, to)
    } else if let Some(organizer) = query.organizer {
        state.events.by_organizer(organizer)
    } else if let Some(participant) = query.participant {
        state.events.by_participant(participant)
    } else if let Some(q) = &query.q {
        state.events.search(q)
    } else {
        state.events.list()
    };

    let visible = events
        .into_iter()
        .filter(|event| state.permits(can_read_event(Some(&auth.actor), event)))
        .collect();

    Ok(Json(visible))
}

#[utoipa::path(
    post,
    path = "/events",
    tag = "Events",
    request_body = EventCreateRequest,
    responses((status = 201, description = "Event created", body = CalendarEvent))
)]
pub async fn create_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<EventCreateRequest>,
) -> AppResult<(StatusCode, Json<CalendarEvent>)> {
    state.enforce(can_create_event(Some(&auth.actor)), "create events")?;

    if payload.ends_at < payload.starts_at {
        return Err(AppError::bad_request("ends_at must be >= starts_at"));
    }

    let event = state.events.add(auth.actor.id, &auth.actor.unit, payload);
    Ok((StatusCode::CREATED, Json(event)))
}

#[utoipa::path(
    get,
    path = "/events/{id}",
    tag = "Events",
    params(("id" = Uuid, Path, description = "Event id")),
    responses((status = 200, description = "Event detail", body = CalendarEvent))
)]
pub async fn get_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<CalendarEvent>> {
    let event = fetch_event(&state, id)?;
    state.enforce(can_read_event(Some(&auth.actor), &event), "read this event")?;
    Ok(Json(event))
}

#[utoipa::path(
    put,
    path = "/events/{id}",
    tag = "Events",
    params(("id" = Uuid, Path, description = "Event id")),
    request_body = EventUpdateRequest,
    responses((status = 200, description = "Event updated", body = CalendarEvent))
)]
pub async fn update_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<EventUpdateRequest>,
) -> AppResult<Json<CalendarEvent>> {
    let event = fetch_event(&state, id)?;
    state.enforce(can_update_event(Some(&auth.actor), &event), "update this event")?;

    let starts = payload.starts_at.unwrap_or(event.starts_at);
    let ends = payload.ends_at.unwrap_or(event.ends_at);
    if ends < starts {
        return Err(AppError::bad_request("ends_at must be >= starts_at"));
    }

    let event = state
        .events
        .update(id, payload)
        .ok_or_else(|| AppError::not_found("event not found"))?;
    Ok(Json(event))
}

#[utoipa::path(
    delete,
    path = "/events/{id}",
    tag = "Events",
    params(("id" = Uuid, Path, description = "Event id")),
    responses((status = 204, description = "Event deleted"))
)]
pub async fn delete_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let event = fetch_event(&state, id)?;
    state.enforce(can_delete_event(Some(&auth.actor), &event), "delete this event")?;

    if !state.events.delete(id) {
        return Err(AppError::not_found("event not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}

fn fetch_event(state: &AppState, id: Uuid) -> AppResult<CalendarEvent> {
    state
        .events
        .get(id)
        .ok_or_else(|| AppError::not_found("event not found"))
}
