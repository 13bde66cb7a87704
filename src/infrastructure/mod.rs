//! 基础设施层：日志与数据库连接池

pub mod database;
pub mod logger;
