//! 用户数据模型

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// 创建用户请求，五个字段均为必填
#[derive(Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    pub id: i32,
    pub fname: String,
    pub lname: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// 明文密码，仅用于计算哈希
    pub password: String,
}

impl fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("id", &self.id)
            .field("fname", &self.fname)
            .field("lname", &self.lname)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// `public."user"` 表中的一行，`password` 列保存 Argon2 哈希
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UserRecord {
    pub id: i32,
    pub fname: String,
    pub lname: String,
    pub email: String,
    pub password: String,
}

/// 对外返回的用户，不含任何密码信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub fname: String,
    pub lname: String,
    pub email: String,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            fname: record.fname,
            lname: record.lname,
            email: record.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str) -> CreateUserRequest {
        CreateUserRequest {
            id: 1,
            fname: "A".into(),
            lname: "B".into(),
            email: email.into(),
            password: "x".into(),
        }
    }

    #[test]
    fn test_email_validation() {
        assert!(request("a@b.com").validate().is_ok());
        assert!(request("not-an-email").validate().is_err());
        assert!(request("").validate().is_err());
    }

    #[test]
    fn test_missing_field_fails_to_deserialize() {
        let result = serde_json::from_value::<CreateUserRequest>(serde_json::json!({
            "id": 1, "fname": "A", "lname": "B", "email": "a@b.com"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_user_serialization_omits_password() {
        let user = User::from(UserRecord {
            id: 7,
            fname: "Ada".into(),
            lname: "Lovelace".into(),
            email: "ada@example.com".into(),
            password: "$argon2id$v=19$...".into(),
        });

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": 7, "fname": "Ada", "lname": "Lovelace", "email": "ada@example.com"
            })
        );
    }

    #[test]
    fn test_request_debug_hides_password() {
        let mut req = request("a@b.com");
        req.password = "hunter2".into();
        assert!(!format!("{:?}", req).contains("hunter2"));
    }
}
