//! 数据库基础设施

use sqlx::{
    postgres::{PgConnectOptions, PgPool, PgPoolOptions},
    Error,
};
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseSettings;

pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    pub async fn new(settings: &DatabaseSettings) -> Result<Self, Error> {
        info!(
            "Connecting to database: postgres://{}:***@{}:{}/{}",
            settings.username, settings.hostname, settings.port, settings.name
        );

        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .min_connections(settings.max_connections.min(5))
            .acquire_timeout(Duration::from_secs(8))
            .idle_timeout(Duration::from_secs(600))
            .connect_with(Self::connect_options(settings))
            .await?;

        Ok(Self { pool })
    }

    /// 各字段单独传入，密码中的特殊字符无需转义
    pub fn connect_options(settings: &DatabaseSettings) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&settings.hostname)
            .port(settings.port)
            .username(&settings.username)
            .password(&settings.password)
            .database(&settings.name)
    }

    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }
}
