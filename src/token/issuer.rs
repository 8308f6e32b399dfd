//! Token 签发
//!
//! Token 格式为 `base64url(header).base64url(payload).base64url(signature)`，
//! 签名覆盖前两段。Access 与 Refresh Token 之间唯一的关联是
//! Refresh payload 中的 `accessJti`。

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::config::TokenConfig;
use crate::error::{Result, TokenError};
use crate::random::{IdGenerator, RandomIdGenerator};
use crate::token::builder::PayloadBuilder;
use crate::token::claims::{AccessPayload, Claims, Header, RefreshPayload};
use crate::token::{codec, signer};

/// Access Token 和 Refresh Token 对
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// Access Token（短期有效）
    pub access_token: String,
    /// Refresh Token（长期有效）
    pub refresh_token: String,
    /// Access Token 过期时间（Unix 时间戳）
    pub access_token_expires_at: i64,
    /// Refresh Token 过期时间（Unix 时间戳）
    pub refresh_token_expires_at: i64,
    /// Token 类型（固定为 "Bearer"）
    pub token_type: String,
}

/// Token 签发器
///
/// # 示例
///
/// ```rust
/// use tokenpair::config::TokenConfig;
/// use tokenpair::token::claims::Claims;
/// use tokenpair::token::issuer::TokenIssuer;
///
/// let issuer = TokenIssuer::new(TokenConfig::new(b"my-secret-key-at-least-32-bytes!")).unwrap();
/// let pair = issuer
///     .issue_token_pair(&Claims::new().subject("user123"))
///     .unwrap();
/// assert_eq!(pair.access_token.matches('.').count(), 2);
/// ```
#[derive(Clone)]
pub struct TokenIssuer {
    config: Arc<TokenConfig>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl TokenIssuer {
    /// 使用系统时钟和随机标识生成器创建签发器
    pub fn new(config: TokenConfig) -> Result<Self> {
        Self::from_parts(
            Arc::new(config),
            Arc::new(SystemClock),
            Arc::new(RandomIdGenerator::new()),
        )
    }

    /// 使用共享的配置、时钟和标识生成器创建签发器
    pub fn from_parts(
        config: Arc<TokenConfig>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, clock, ids })
    }

    /// 替换时钟
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &TokenConfig {
        &self.config
    }

    /// 用于构建 payload 的构建器
    pub fn payload_builder(&self) -> PayloadBuilder<'_> {
        PayloadBuilder::new(&self.config, self.clock.as_ref(), self.ids.as_ref())
    }

    /// 签发 Access Token
    pub fn issue_access_token(&self, payload: &AccessPayload) -> Result<String> {
        self.encode(payload)
    }

    /// 签发 Refresh Token
    pub fn issue_refresh_token(&self, payload: &RefreshPayload) -> Result<String> {
        self.encode(payload)
    }

    /// 签发一对 Token
    ///
    /// 先构建 Access payload，再以其 `jti` 构建 Refresh payload。
    /// `sub` 缺失时返回 [`TokenError::InvalidClaims`]。
    pub fn issue_token_pair(&self, claims: &Claims) -> Result<TokenPair> {
        let builder = self.payload_builder();

        let access_payload = builder.build_access_payload(claims)?;
        let refresh_payload = builder.build_refresh_payload(&access_payload.jti)?;

        let access_token = self.issue_access_token(&access_payload)?;
        let refresh_token = self.issue_refresh_token(&refresh_payload)?;

        tracing::debug!(
            sub = %access_payload.sub,
            jti = %access_payload.jti,
            refresh_jti = %refresh_payload.jti,
            exp = access_payload.exp,
            "issued token pair"
        );

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_token_expires_at: access_payload.exp,
            refresh_token_expires_at: refresh_payload.exp,
            token_type: "Bearer".to_string(),
        })
    }

    fn encode<T: Serialize>(&self, payload: &T) -> Result<String> {
        encode_token(
            &Header::new(self.config.algorithm()),
            payload,
            self.config.secret(),
        )
    }
}

/// 编码并签名 token
///
/// 签名算法取自 `header.alg`。
pub fn encode_token<T: Serialize>(header: &Header, payload: &T, key: &[u8]) -> Result<String> {
    let header_json = serde_json::to_vec(header)
        .map_err(|e| TokenError::EncodingFailed(format!("failed to encode header: {}", e)))?;
    let payload_json = serde_json::to_vec(payload)
        .map_err(|e| TokenError::EncodingFailed(format!("failed to encode payload: {}", e)))?;

    let signing_input = format!("{}.{}", codec::encode(header_json), codec::encode(payload_json));
    let signature = signer::sign(&signing_input, key, &header.alg)?;

    Ok(format!("{}.{}", signing_input, signature))
}
