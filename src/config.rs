//! Token 配置模块
//!
//! [`TokenConfig`] 在进程启动时构造一次，经 [`TokenConfig::validate`] 校验后
//! 以只读方式共享给签发器和验证器。

use std::fmt;

use crate::error::{ConfigError, Result};
use crate::token::signer::Algorithm;

/// 默认签发者
pub const DEFAULT_ISSUER: &str = "jwt_admin";

/// 默认 Access Token 有效期（秒）
pub const DEFAULT_ACCESS_TOKEN_LIFETIME: i64 = 120;

/// 默认 Refresh Token 有效期（秒）
pub const DEFAULT_REFRESH_TOKEN_LIFETIME: i64 = 240;

/// Token 有效期上限（秒），10 年
pub const MAX_TOKEN_LIFETIME: i64 = 10 * 365 * 24 * 3600;

/// 时钟偏差上限（秒），1 小时
pub const MAX_LEEWAY: i64 = 3600;

/// Token 签发与验证配置
///
/// # 示例
///
/// ```rust
/// use tokenpair::config::TokenConfig;
///
/// let config = TokenConfig::new(b"my-secret-key-at-least-32-bytes!")
///     .with_issuer("my-app")
///     .with_access_token_lifetime(15 * 60)
///     .with_refresh_token_lifetime(7 * 24 * 3600);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone)]
pub struct TokenConfig {
    secret: Vec<u8>,
    issuer: String,
    algorithm: Algorithm,
    access_token_lifetime: i64,
    refresh_token_lifetime: i64,
    leeway: i64,
}

impl TokenConfig {
    /// 使用签名密钥创建配置，其余字段取默认值
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
            issuer: DEFAULT_ISSUER.to_string(),
            algorithm: Algorithm::default(),
            access_token_lifetime: DEFAULT_ACCESS_TOKEN_LIFETIME,
            refresh_token_lifetime: DEFAULT_REFRESH_TOKEN_LIFETIME,
            leeway: 0,
        }
    }

    /// 设置签发者（`iss`）
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// 设置签发时使用的算法
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// 设置 Access Token 有效期（秒）
    pub fn with_access_token_lifetime(mut self, seconds: i64) -> Self {
        self.access_token_lifetime = seconds;
        self
    }

    /// 设置 Refresh Token 有效期（秒）
    pub fn with_refresh_token_lifetime(mut self, seconds: i64) -> Self {
        self.refresh_token_lifetime = seconds;
        self
    }

    /// 设置验证时允许的时钟偏差（秒），默认 0
    pub fn with_leeway(mut self, seconds: i64) -> Self {
        self.leeway = seconds;
        self
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn access_token_lifetime(&self) -> i64 {
        self.access_token_lifetime
    }

    pub fn refresh_token_lifetime(&self) -> i64 {
        self.refresh_token_lifetime
    }

    pub fn leeway(&self) -> i64 {
        self.leeway
    }

    /// 校验配置
    ///
    /// Refresh Token 有效期不大于 Access Token 时只记录警告：此时
    /// Refresh Token 会先于 Access Token 过期，失去刷新的意义。
    pub fn validate(&self) -> Result<()> {
        if self.secret.is_empty() {
            return Err(ConfigError::MissingRequired("secret".to_string()).into());
        }
        if self.issuer.is_empty() {
            return Err(ConfigError::MissingRequired("issuer".to_string()).into());
        }
        if self.access_token_lifetime <= 0 {
            return Err(invalid("access_token_lifetime", "must be positive"));
        }
        if self.access_token_lifetime > MAX_TOKEN_LIFETIME {
            return Err(invalid("access_token_lifetime", "exceeds 10 years"));
        }
        if self.refresh_token_lifetime <= 0 {
            return Err(invalid("refresh_token_lifetime", "must be positive"));
        }
        if self.refresh_token_lifetime > MAX_TOKEN_LIFETIME {
            return Err(invalid("refresh_token_lifetime", "exceeds 10 years"));
        }
        if self.leeway < 0 {
            return Err(invalid("leeway", "must not be negative"));
        }
        if self.leeway > MAX_LEEWAY {
            return Err(invalid("leeway", "exceeds 1 hour"));
        }
        if self.refresh_token_lifetime <= self.access_token_lifetime {
            tracing::warn!(
                access_token_lifetime = self.access_token_lifetime,
                refresh_token_lifetime = self.refresh_token_lifetime,
                "refresh token lifetime does not exceed access token lifetime"
            );
        }
        Ok(())
    }
}

fn invalid(key: &str, message: &str) -> crate::error::Error {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
    .into()
}

// 不输出密钥内容
impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &format_args!("[{} bytes]", self.secret.len()))
            .field("issuer", &self.issuer)
            .field("algorithm", &self.algorithm)
            .field("access_token_lifetime", &self.access_token_lifetime)
            .field("refresh_token_lifetime", &self.refresh_token_lifetime)
            .field("leeway", &self.leeway)
            .finish()
    }
}
