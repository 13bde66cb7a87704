//! 用户资源：模型、存储、服务与处理器

pub mod handler;
pub mod model;
pub mod service;
pub mod store;

pub use model::{CreateUserRequest, User, UserRecord};
pub use service::{UserService, UserServiceError};
pub use store::{MemoryUserStore, PgUserStore, StoreError, UserStore};
