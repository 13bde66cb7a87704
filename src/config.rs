//! 配置加载
//!
//! 数据库连接参数必须全部由环境变量提供（支持 `.env` 文件），
//! HTTP 相关参数可选，缺省时使用默认值。

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// 配置错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required setting `{0}`")]
    Missing(&'static str),
    #[error("invalid value for `{name}`: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// 服务配置
#[derive(Debug, Clone)]
pub struct Settings {
    /// 数据库配置
    pub database: DatabaseSettings,
    /// HTTP 服务配置
    pub http: HttpSettings,
}

/// 数据库配置
#[derive(Clone)]
pub struct DatabaseSettings {
    pub hostname: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub name: String,
    /// 连接池最大连接数
    pub max_connections: u32,
}

/// HTTP 服务配置
#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// 绑定地址
    pub host: String,
    /// HTTP 服务端口
    pub port: u16,
    /// 请求超时时间（秒）
    pub request_timeout_secs: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            request_timeout_secs: 30,
        }
    }
}

impl HttpSettings {
    /// 监听地址，主机部分可以是域名
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

// 密码不进日志
impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("hostname", &self.hostname)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("name", &self.name)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

const DEFAULT_MAX_CONNECTIONS: u32 = 20;

impl Settings {
    /// 从进程环境加载配置；`.env` 由调用方预先加载
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            std::env::vars_os()
                .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?))),
        )
    }

    /// 从键值对加载配置，变量名不区分大小写
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: Vec<(String, String)> = vars.into_iter().collect();
        Self::from_lookup(|name| {
            vars.iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.clone())
        })
    }

    /// 通过任意查找函数加载配置，变量名使用小写形式
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = DatabaseSettings {
            hostname: required(&lookup, "database_hostname")?,
            port: parse(
                "database_port",
                &required(&lookup, "database_port")?,
            )?,
            username: required(&lookup, "database_username")?,
            password: required(&lookup, "database_password")?,
            name: required(&lookup, "database_name")?,
            max_connections: optional(&lookup, "database_max_connections")?
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
        };

        let defaults = HttpSettings::default();
        let http = HttpSettings {
            host: lookup("app_host")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.host),
            port: optional(&lookup, "app_port")?.unwrap_or(defaults.port),
            request_timeout_secs: optional(&lookup, "request_timeout_secs")?
                .unwrap_or(defaults.request_timeout_secs),
        };

        Ok(Self { database, http })
    }
}

fn required<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn optional<F, T>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => parse(name, &value).map(Some),
        _ => Ok(None),
    }
}

fn parse<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        name,
        reason: e.to_string(),
    })
}
