//! 请求体提取器
//!
//! 与 `axum::Json` 相同，但拒绝时返回 [`CoreError`]，保证错误响应格式一致。

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};

use super::error::{CoreError, FieldErrors};

pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = CoreError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

impl From<JsonRejection> for CoreError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            // 缺少字段或类型不符
            JsonRejection::JsonDataError(err) => {
                let message = err.body_text();
                CoreError::Validation {
                    fields: field_errors_from(&message),
                    message,
                }
            }
            JsonRejection::MissingJsonContentType(err) => {
                CoreError::UnsupportedMediaType(err.body_text())
            }
            other => CoreError::BadRequest(other.body_text()),
        }
    }
}

/// 从反序列化错误文本中取出字段名
///
/// 文本形如 ``missing field `password` at line 1 column 50`` 或
/// `id: invalid type: string "a", expected i32 at line 1 column 9`，
/// 前面可能带有 axum 的说明前缀。
fn field_errors_from(text: &str) -> FieldErrors {
    let detail = text
        .split_once("target type: ")
        .map(|(_, rest)| rest)
        .unwrap_or(text);
    let detail = detail.split(" at line ").next().unwrap_or(detail);

    let (field, reason) = if let Some(rest) = detail.strip_prefix("missing field `") {
        (rest.split('`').next(), detail)
    } else {
        match detail.split_once(": ") {
            Some((path, reason)) if !path.is_empty() && !path.contains(' ') && path != "." => {
                (Some(path), reason)
            }
            _ => (None, detail),
        }
    };

    match field {
        Some(field) if !field.is_empty() => {
            FieldErrors::from([(field.to_string(), vec![reason.to_string()])])
        }
        _ => FieldErrors::new(),
    }
}
