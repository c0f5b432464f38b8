//! User handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use core_kernel::UserId;

use crate::{AppState, error::{ApiError, ErrorResponse}};
use crate::handlers::parse_path_id;
use crate::dto::users::*;

/// Registers a user under a unique name
#[utoipa::path(
    post,
    path = "/user",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Blank name or malformed body", body = ErrorResponse),
        (status = 409, description = "Name already taken", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let Json(request) = payload?;
    let user = state.services.users.create_user(&request.name).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Gets a user by ID
#[utoipa::path(
    get,
    path = "/user/{id}",
    tag = "users",
    params(("id" = u64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, description = "Invalid user ID", body = ErrorResponse),
        (status = 404, description = "No such user", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let id = UserId::new(parse_path_id(&id, "Invalid user ID")?);
    let user = state.services.users.get_user_by_id(id).await?;
    Ok(Json(user.into()))
}
