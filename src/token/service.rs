//! Token 服务
//!
//! 对外暴露的三个操作：签发 Token 对、验证 Token、验证 Refresh 配对。
//! 签发器与验证器共享同一份只读配置和时钟，可在多线程间直接共享。

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::config::TokenConfig;
use crate::error::Result;
use crate::random::{IdGenerator, RandomIdGenerator};
use crate::token::claims::{Claims, Payload};
use crate::token::issuer::{TokenIssuer, TokenPair};
use crate::token::verifier::TokenVerifier;

/// Token 服务
///
/// # 示例
///
/// ```rust
/// use tokenpair::{Claims, TokenConfig, TokenService};
///
/// let service = TokenService::new(
///     TokenConfig::new(b"my-secret-key-at-least-32-bytes!").with_issuer("my-app"),
/// )
/// .unwrap();
///
/// let pair = service
///     .issue_token_pair(&Claims::new().subject("a@b.com").info("role", "admin"))
///     .unwrap();
///
/// let payload = service.verify_token(&pair.access_token, false).unwrap();
/// assert_eq!(payload.info::<String>("role").as_deref(), Some("admin"));
///
/// assert!(service
///     .verify_refresh_pair(&pair.access_token, &pair.refresh_token)
///     .is_ok());
/// ```
#[derive(Clone)]
pub struct TokenService {
    issuer: TokenIssuer,
    verifier: TokenVerifier,
}

impl TokenService {
    /// 使用系统时钟和随机标识生成器创建服务
    pub fn new(config: TokenConfig) -> Result<Self> {
        Self::with_parts(
            config,
            Arc::new(SystemClock),
            Arc::new(RandomIdGenerator::new()),
        )
    }

    /// 使用指定的时钟和标识生成器创建服务
    pub fn with_parts(
        config: TokenConfig,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Result<Self> {
        let config = Arc::new(config);
        let issuer = TokenIssuer::from_parts(config.clone(), clock.clone(), ids)?;
        let verifier = TokenVerifier::from_parts(config, clock)?;
        Ok(Self { issuer, verifier })
    }

    /// 使用指定的时钟创建服务
    pub fn with_clock(config: TokenConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        Self::with_parts(config, clock, Arc::new(RandomIdGenerator::new()))
    }

    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    pub fn verifier(&self) -> &TokenVerifier {
        &self.verifier
    }

    pub fn config(&self) -> &TokenConfig {
        self.issuer.config()
    }

    /// 签发 Access/Refresh Token 对
    pub fn issue_token_pair(&self, claims: &Claims) -> Result<TokenPair> {
        self.issuer.issue_token_pair(claims)
    }

    /// 验证 token
    pub fn verify_token(&self, token: &str, skip_time_checks: bool) -> Result<Payload> {
        self.verifier.verify(token, skip_time_checks)
    }

    /// 验证 Refresh Token 与 Access Token 的配对，返回 Refresh payload
    pub fn verify_refresh_pair(&self, access_token: &str, refresh_token: &str) -> Result<Payload> {
        self.verifier.verify_refresh_pair(access_token, refresh_token)
    }

    /// 验证配对并签发新的 Token 对
    ///
    /// 新 Access Token 沿用旧 Access Token 的 `sub` 与 `infoData`。
    pub fn refresh(&self, access_token: &str, refresh_token: &str) -> Result<TokenPair> {
        self.verify_refresh_pair(access_token, refresh_token)?;
        let access = self.verifier.verify(access_token, true)?;

        let claims = Claims {
            sub: access.sub,
            info_data: access.info_data.unwrap_or_default(),
        };
        self.issue_token_pair(&claims)
    }
}
