//! 用户存储
//!
//! [`UserStore`] 抽象了两类操作：查询返回行，执行语句返回受影响行数。
//! 所有 SQL 均使用绑定参数。

use async_trait::async_trait;
use sqlx::postgres::PgPool;
use thiserror::Error;
use tokio::sync::RwLock;

use super::model::UserRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// 读取全部用户，不保证顺序
    async fn fetch_users(&self) -> Result<Vec<UserRecord>, StoreError>;

    /// 插入一行，返回受影响行数；`id` 已存在时返回 0
    async fn insert_user(&self, record: &UserRecord) -> Result<u64, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn fetch_users(&self) -> Result<Vec<UserRecord>, StoreError> {
        let users = sqlx::query_as::<_, UserRecord>(
            r#"SELECT id, fname, lname, email, password FROM public."user""#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn insert_user(&self, record: &UserRecord) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO public."user" (id, fname, lname, email, password)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(record.id)
        .bind(&record.fname)
        .bind(&record.lname)
        .bind(&record.email)
        .bind(&record.password)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// 进程内存储，语义与 [`PgUserStore`] 相同，用于测试和本地调试
#[derive(Default)]
pub struct MemoryUserStore {
    rows: RwLock<Vec<UserRecord>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn fetch_users(&self) -> Result<Vec<UserRecord>, StoreError> {
        Ok(self.rows.read().await.clone())
    }

    async fn insert_user(&self, record: &UserRecord) -> Result<u64, StoreError> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|row| row.id == record.id) {
            return Ok(0);
        }
        rows.push(record.clone());
        Ok(1)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
