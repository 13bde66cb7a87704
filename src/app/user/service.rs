//! 用户业务服务

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, SaltString},
    Argon2, PasswordVerifier,
};
use thiserror::Error;
use tracing::{info, warn};
use validator::Validate;

use super::model::{CreateUserRequest, User, UserRecord};
use super::store::{StoreError, UserStore};
use crate::core::error::CoreError;

#[derive(Debug, Error)]
pub enum UserServiceError {
    #[error("invalid user: {0}")]
    Validation(#[from] validator::ValidationErrors),
    #[error("user with id {0} already exists")]
    Conflict(i32),
    #[error("insert affected {0} rows, expected exactly 1")]
    UnexpectedRowCount(u64),
    #[error("password hashing failed: {0}")]
    Hashing(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<UserServiceError> for CoreError {
    fn from(err: UserServiceError) -> Self {
        match err {
            UserServiceError::Validation(errors) => CoreError::from(errors),
            UserServiceError::Conflict(id) => {
                CoreError::Conflict(format!("User with id {} already exists", id))
            }
            other => CoreError::InternalServerError(other.to_string()),
        }
    }
}

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub async fn list_users(&self) -> Result<Vec<User>, UserServiceError> {
        let records = self.store.fetch_users().await?;
        Ok(records.into_iter().map(User::from).collect())
    }

    pub async fn create_user(&self, request: CreateUserRequest) -> Result<User, UserServiceError> {
        request.validate()?;

        let CreateUserRequest {
            id,
            fname,
            lname,
            email,
            password,
        } = request;

        // Argon2 是 CPU 密集型计算，不占用异步执行线程
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| UserServiceError::Hashing(e.to_string()))??;

        let record = UserRecord {
            id,
            fname,
            lname,
            email,
            password: password_hash,
        };

        match self.store.insert_user(&record).await? {
            1 => {
                info!("Created user: {}", record.id);
                Ok(User::from(record))
            }
            0 => {
                warn!("Rejected duplicate user id: {}", record.id);
                Err(UserServiceError::Conflict(record.id))
            }
            n => Err(UserServiceError::UnexpectedRowCount(n)),
        }
    }

    pub async fn ping(&self) -> Result<(), UserServiceError> {
        self.store.ping().await?;
        Ok(())
    }
}

pub fn hash_password(password: &str) -> Result<String, UserServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserServiceError::Hashing(e.to_string()))
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
