//! # tokenpair
//!
//! 基于 HMAC 的 Access/Refresh Token 对签发与验证库。
//!
//! ## 功能特性
//!
//! - **Token 对**: 一次签发短期 Access Token 与长期 Refresh Token，二者通过 `jti` 绑定
//! - **HMAC 签名**: HS256（默认）、HS384、HS512
//! - **验证**: 签名完整性、`iat`/`exp` 时间校验、Access/Refresh 配对校验
//! - **无状态**: 不保存任何已签发的 token，有效性完全由 token 自身和当前时间决定
//! - **可注入时钟**: 测试中无需真实等待即可模拟过期
//!
//! ## Token 格式
//!
//! ```text
//! base64url(header) . base64url(payload) . base64url(hmac)
//! ```
//!
//! ## 示例
//!
//! ```rust
//! use tokenpair::{Claims, TokenConfig, TokenError, TokenService};
//!
//! let config = TokenConfig::new(b"my-secret-key-at-least-32-bytes!")
//!     .with_issuer("my-app")
//!     .with_access_token_lifetime(120)
//!     .with_refresh_token_lifetime(240);
//! let service = TokenService::new(config).unwrap();
//!
//! // 签发
//! let pair = service
//!     .issue_token_pair(&Claims::new().subject("a@b.com").info("role", "admin"))
//!     .unwrap();
//!
//! // 验证 Access Token
//! let payload = service.verify_token(&pair.access_token, false).unwrap();
//! assert_eq!(payload.sub.as_deref(), Some("a@b.com"));
//!
//! // 验证 Refresh 配对
//! let refresh = service
//!     .verify_refresh_pair(&pair.access_token, &pair.refresh_token)
//!     .unwrap();
//! assert_eq!(refresh.access_jti, payload.jti);
//!
//! // 错误类型可区分
//! let err = service.verify_token("not-a-token", false).unwrap_err();
//! assert!(matches!(err.token_error(), Some(TokenError::MalformedToken(_))));
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod random;
pub mod token;

pub use error::{ConfigError, CryptoError, Error, Result, TokenError};

// ============================================================================
// 配置与运行时抽象导出
// ============================================================================

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::TokenConfig;
pub use random::{IdGenerator, RandomIdGenerator};

// ============================================================================
// Token 相关导出
// ============================================================================

pub use token::{
    AccessPayload, Algorithm, Claims, Header, Payload, PayloadBuilder, RefreshPayload,
    TokenIssuer, TokenPair, TokenService, TokenVerifier,
};
