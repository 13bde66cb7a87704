//! 应用层：路由与处理器

pub mod user;

use std::sync::Arc;

use axum::{extract::State, response::Json, routing::get, Router};

use crate::core::error::CoreError;
use user::{handler, UserService};

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
}

impl AppState {
    pub fn new(user_service: UserService) -> Self {
        Self {
            user_service: Arc::new(user_service),
        }
    }
}

/// 业务路由，不含中间件
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route(
            "/users",
            get(handler::list_users).post(handler::create_user),
        )
        .route(
            "/users/",
            get(handler::list_users).post(handler::create_user),
        )
        .with_state(state)
}

async fn index() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "CMMS APP" }))
}

async fn health_check(State(state): State<AppState>) -> Result<Json<serde_json::Value>, CoreError> {
    state.user_service.ping().await?;

    Ok(Json(serde_json::json!({
        "status": "healthy",
        "database": "connected",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    })))
}
