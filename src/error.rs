//! 统一错误类型模块
//!
//! 提供 tokenpair 库中所有操作的错误类型定义。

use std::fmt;

/// tokenpair 库的统一结果类型
pub type Result<T> = std::result::Result<T, Error>;

/// tokenpair 库的错误类型
#[derive(Debug)]
pub enum Error {
    /// Token 相关错误
    Token(TokenError),

    /// 配置错误
    Config(ConfigError),

    /// 加密错误
    Crypto(CryptoError),
}

impl Error {
    /// 返回具体的 Token 错误类型（如果是 Token 错误）
    ///
    /// 调用方可据此区分“已过期（提示刷新）”与“签名无效（直接拒绝）”。
    pub fn token_error(&self) -> Option<&TokenError> {
        match self {
            Error::Token(e) => Some(e),
            _ => None,
        }
    }
}

/// Token 相关错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// 缺少必需的 claim（如 `sub`）
    InvalidClaims(String),
    /// Token 结构无效（段数不为 3，或 header 缺少 `alg`）
    MalformedToken(String),
    /// 不支持的签名算法
    UnsupportedAlgorithm(String),
    /// 某一段不是合法的 base64url
    DecodeError(String),
    /// 签名不匹配
    InvalidSignature,
    /// 当前时间早于 `iat`
    NotYetValid,
    /// 当前时间晚于 `exp`
    Expired,
    /// Refresh Token 的 `accessJti` 与 Access Token 的 `jti` 不一致
    PairMismatch,
    /// Token 编码失败
    EncodingFailed(String),
}

/// 配置相关错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// 缺少必需的配置
    MissingRequired(String),
    /// 无效的配置值
    InvalidValue { key: String, message: String },
}

/// 加密相关错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// 随机数生成失败
    RngFailed(String),
    /// 密钥无效
    InvalidKey(String),
}

// ============================================================================
// Display 实现
// ============================================================================

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Token(e) => write!(f, "Token error: {}", e),
            Error::Config(e) => write!(f, "Config error: {}", e),
            Error::Crypto(e) => write!(f, "Crypto error: {}", e),
        }
    }
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenError::InvalidClaims(msg) => write!(f, "invalid claims: {}", msg),
            TokenError::MalformedToken(msg) => write!(f, "malformed token: {}", msg),
            TokenError::UnsupportedAlgorithm(alg) => {
                write!(f, "unsupported algorithm: {}", alg)
            }
            TokenError::DecodeError(msg) => write!(f, "base64url decoding failed: {}", msg),
            TokenError::InvalidSignature => write!(f, "invalid token signature"),
            TokenError::NotYetValid => write!(f, "token is not yet valid"),
            TokenError::Expired => write!(f, "token has expired"),
            TokenError::PairMismatch => {
                write!(f, "refresh token is not bound to the given access token")
            }
            TokenError::EncodingFailed(msg) => write!(f, "token encoding failed: {}", msg),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingRequired(key) => {
                write!(f, "missing required configuration: {}", key)
            }
            ConfigError::InvalidValue { key, message } => {
                write!(f, "invalid configuration value for '{}': {}", key, message)
            }
        }
    }
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CryptoError::RngFailed(msg) => write!(f, "random number generation failed: {}", msg),
            CryptoError::InvalidKey(msg) => write!(f, "invalid key: {}", msg),
        }
    }
}

// ============================================================================
// std::error::Error 实现
// ============================================================================

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Token(e) => Some(e),
            Error::Config(e) => Some(e),
            Error::Crypto(e) => Some(e),
        }
    }
}

impl std::error::Error for TokenError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for CryptoError {}

// ============================================================================
// From 实现 - 方便错误转换
// ============================================================================

impl From<TokenError> for Error {
    fn from(err: TokenError) -> Self {
        Error::Token(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config(err)
    }
}

impl From<CryptoError> for Error {
    fn from(err: CryptoError) -> Self {
        Error::Crypto(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_error_display() {
        let err = TokenError::Expired;
        assert_eq!(err.to_string(), "token has expired");

        let err = Error::Token(TokenError::InvalidSignature);
        assert_eq!(err.to_string(), "Token error: invalid token signature");
    }

    #[test]
    fn test_error_from_token_error() {
        let err: Error = TokenError::PairMismatch.into();
        assert!(matches!(err, Error::Token(TokenError::PairMismatch)));
        assert_eq!(err.token_error(), Some(&TokenError::PairMismatch));
    }

    #[test]
    fn test_token_error_none_for_config() {
        let err: Error = ConfigError::MissingRequired("secret".to_string()).into();
        assert!(err.token_error().is_none());
        assert_eq!(
            err.to_string(),
            "Config error: missing required configuration: secret"
        );
    }

    #[test]
    fn test_error_source() {
        use std::error::Error as _;

        let err: Error = TokenError::Expired.into();
        assert!(err.source().is_some());
        let err: Error = CryptoError::RngFailed("os".to_string()).into();
        assert!(err.source().is_some());
    }
}
