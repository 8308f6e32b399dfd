//! Token 模块
//!
//! 提供 Access/Refresh Token 对的签发与验证。
//!
//! ## 子模块
//!
//! - **codec**: base64url 编解码
//! - **signer**: HMAC 签名
//! - **claims**: header 与 payload 结构
//! - **builder**: payload 构建
//! - **issuer**: Token 签发
//! - **verifier**: Token 验证与配对校验
//! - **service**: 对外的组合入口
//!
//! ## 示例
//!
//! ```rust
//! use tokenpair::config::TokenConfig;
//! use tokenpair::token::{Claims, TokenService};
//!
//! let service = TokenService::new(TokenConfig::new(b"my-secret-key-at-least-32-bytes!")).unwrap();
//! let pair = service.issue_token_pair(&Claims::new().subject("user123")).unwrap();
//!
//! let claims = service.verify_token(&pair.access_token, false).unwrap();
//! assert_eq!(claims.sub.as_deref(), Some("user123"));
//! ```

pub mod builder;
pub mod claims;
pub mod codec;
pub mod issuer;
pub mod service;
pub mod signer;
pub mod verifier;

pub use builder::PayloadBuilder;
pub use claims::{AccessPayload, Claims, Header, Payload, RefreshPayload};
pub use issuer::{TokenIssuer, TokenPair};
pub use service::TokenService;
pub use signer::Algorithm;
pub use verifier::TokenVerifier;
