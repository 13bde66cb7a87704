//! 核心层：错误处理、请求体提取、中间件

pub mod error;
pub mod extract;
pub mod middleware;
