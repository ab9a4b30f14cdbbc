use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use crate::app::AppState;
use crate::authz::{can_manage_user, can_read_user};
use crate::errors::{AppError, AppResult};
use crate::jwt::AuthUser;
use crate::models::user::{User, UserUpdateRequest};

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses((status = 200, description = "Personnel visible to the caller", body = [User]))
)]
pub async fn list_users(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<Vec<User>>> {
    let visible = state
        .users
        .list()
        .into_iter()
        .filter(|user| state.permits(can_read_user(Some(&auth.actor), user)))
        .collect();

    Ok(Json(visible))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User id")),
    responses((status = 200, description = "User detail", body = User))
)]
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<User>> {
    let user = fetch_user(&state, id)?;
    state.enforce(can_read_user(Some(&auth.actor), &user), "read this user")?;
    Ok(Json(user))
}

#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UserUpdateRequest,
    responses((status = 200, description = "User updated", body = User))
)]
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UserUpdateRequest>,
) -> AppResult<Json<User>> {
    let user = fetch_user(&state, id)?;
    state.enforce(can_manage_user(Some(&auth.actor), &user), "manage this user")?;

    let user = state
        .users
        .update(id, payload)
        .ok_or_else(|| AppError::not_found("user not found"))?;
    Ok(Json(user))
}

fn fetch_user(state: &AppState, id: Uuid) -> AppResult<User> {
    state
        .users
        .get(id)
        .ok_or_else(|| AppError::not_found("user not found"))
}
