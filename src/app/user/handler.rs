//! 用户处理器

use axum::{extract::State, http::StatusCode, response::Json};

use super::model::{CreateUserRequest, User};
use crate::app::AppState;
use crate::core::{error::CoreError, extract::JsonBody};

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, CoreError> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users))
}

pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), CoreError> {
    let user = state.user_service.create_user(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}
