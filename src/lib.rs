//! # 用户资源服务
//!
//! 基于 Axum + SQLx(PostgreSQL) 的用户创建/查询 API。
//!
//! - `app`：路由、处理器与用户业务逻辑
//! - `core`：错误处理、请求体提取、中间件
//! - `infrastructure`：日志与数据库连接池
//! - `config`：环境变量配置加载

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;

use std::time::Duration;

use axum::{middleware, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

pub use app::AppState;

/// 完整应用：业务路由加上 CORS、超时、请求日志等中间件
///
/// 请求日志位于最外层，超时返回的 408 同样带有 request id。
pub fn build_app(state: AppState, request_timeout: Duration) -> Router {
    app::routes(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(middleware::from_fn(
            crate::core::middleware::request_logging_middleware,
        ))
}
