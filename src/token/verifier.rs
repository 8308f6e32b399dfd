//! Token 验证
//!
//! 每次验证都是独立的：解码 header → 校验签名 → 校验时间 → 返回 payload，
//! 任一步失败立即返回对应的 [`TokenError`]。验证器不保存任何 token 状态。

use std::sync::Arc;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::clock::{Clock, SystemClock};
use crate::config::TokenConfig;
use crate::error::{Result, TokenError};
use crate::random::constant_time_compare_str;
use crate::token::claims::Payload;
use crate::token::{codec, signer};

/// 只用于时间校验的字段
#[derive(Deserialize)]
struct TimeClaims {
    #[serde(default)]
    iat: Option<i64>,
    #[serde(default)]
    exp: Option<i64>,
}

/// Token 验证器
///
/// # 示例
///
/// ```rust
/// use tokenpair::config::TokenConfig;
/// use tokenpair::token::claims::Claims;
/// use tokenpair::token::issuer::TokenIssuer;
/// use tokenpair::token::verifier::TokenVerifier;
///
/// let config = TokenConfig::new(b"my-secret-key-at-least-32-bytes!");
/// let issuer = TokenIssuer::new(config.clone()).unwrap();
/// let verifier = TokenVerifier::new(config).unwrap();
///
/// let pair = issuer.issue_token_pair(&Claims::new().subject("user123")).unwrap();
/// let payload = verifier.verify(&pair.access_token, false).unwrap();
/// assert_eq!(payload.sub.as_deref(), Some("user123"));
///
/// let refresh = verifier
///     .verify_refresh_pair(&pair.access_token, &pair.refresh_token)
///     .unwrap();
/// assert_eq!(refresh.access_jti, payload.jti);
/// ```
#[derive(Clone)]
pub struct TokenVerifier {
    config: Arc<TokenConfig>,
    clock: Arc<dyn Clock>,
}

impl TokenVerifier {
    /// 使用系统时钟创建验证器
    pub fn new(config: TokenConfig) -> Result<Self> {
        Self::from_parts(Arc::new(config), Arc::new(SystemClock))
    }

    /// 使用共享的配置和时钟创建验证器
    pub fn from_parts(config: Arc<TokenConfig>, clock: Arc<dyn Clock>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, clock })
    }

    /// 替换时钟
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// 验证 token 并返回 payload
    ///
    /// `skip_time_checks` 为 `true` 时跳过 `iat`/`exp` 校验，签名仍会校验。
    pub fn verify(&self, token: &str, skip_time_checks: bool) -> Result<Payload> {
        self.verify_as(token, skip_time_checks)
    }

    /// 验证 token 并将 payload 解码为调用方类型
    pub fn verify_as<T: DeserializeOwned>(&self, token: &str, skip_time_checks: bool) -> Result<T> {
        let result = self.verified_payload(token, skip_time_checks).and_then(|bytes| {
            serde_json::from_slice(&bytes).map_err(|e| {
                TokenError::MalformedToken(format!("invalid payload: {}", e)).into()
            })
        });

        match result {
            Ok(_) => tracing::debug!(skip_time_checks, "token verified"),
            Err(ref e) => tracing::warn!(error = %e, "token rejected"),
        }
        result
    }

    /// 验证 Refresh Token 及其配对的 Access Token
    ///
    /// Refresh Token 做完整校验；Access Token 只校验签名（刷新时它通常已过期）。
    /// Refresh payload 的 `accessJti` 必须等于 Access payload 的 `jti`，
    /// 否则返回 [`TokenError::PairMismatch`]。成功时返回 Refresh payload。
    pub fn verify_refresh_pair(&self, access_token: &str, refresh_token: &str) -> Result<Payload> {
        let refresh = self.verify(refresh_token, false)?;
        let access = self.verify(access_token, true)?;

        let bound = match (refresh.access_jti.as_deref(), access.jti.as_deref()) {
            (Some(access_jti), Some(jti)) => constant_time_compare_str(access_jti, jti),
            _ => false,
        };
        if !bound {
            tracing::warn!(
                refresh_jti = refresh.jti.as_deref().unwrap_or_default(),
                "refresh token is not bound to the presented access token"
            );
            return Err(TokenError::PairMismatch.into());
        }

        tracing::debug!(
            refresh_jti = refresh.jti.as_deref().unwrap_or_default(),
            access_jti = access.jti.as_deref().unwrap_or_default(),
            "refresh pair verified"
        );
        Ok(refresh)
    }

    /// [`verify_refresh_pair`](Self::verify_refresh_pair) 的布尔形式
    pub fn is_valid_refresh_pair(&self, access_token: &str, refresh_token: &str) -> bool {
        self.verify_refresh_pair(access_token, refresh_token).is_ok()
    }

    /// 不校验签名和时间，仅解码 payload（仅用于调试）
    ///
    /// # 警告
    ///
    /// 返回的内容未经验证，不可信任。
    pub fn decode_unverified(token: &str) -> Result<Payload> {
        let (_, payload, _) = split_token(token)?;
        let bytes = codec::decode(payload)?;
        serde_json::from_slice(&bytes)
            .map_err(|e| TokenError::MalformedToken(format!("invalid payload: {}", e)).into())
    }

    /// 校验结构、签名和时间，返回 payload 的 JSON 字节
    fn verified_payload(&self, token: &str, skip_time_checks: bool) -> Result<Vec<u8>> {
        let (header, payload, signature) = split_token(token)?;

        let header_bytes = codec::decode(header)?;
        let header_json: Value = serde_json::from_slice(&header_bytes)
            .map_err(|e| TokenError::MalformedToken(format!("invalid header: {}", e)))?;
        let alg = match header_json.get("alg").and_then(Value::as_str) {
            Some(alg) if !alg.is_empty() => alg,
            _ => return Err(TokenError::MalformedToken("header missing alg".to_string()).into()),
        };

        // 签名段必须是合法的 base64url
        codec::decode(signature)?;
        let expected = signer::sign(
            &format!("{}.{}", header, payload),
            self.config.secret(),
            alg,
        )?;
        if !constant_time_compare_str(&expected, signature) {
            return Err(TokenError::InvalidSignature.into());
        }

        let payload_bytes = codec::decode(payload)?;

        if !skip_time_checks {
            let times: TimeClaims = serde_json::from_slice(&payload_bytes)
                .map_err(|e| TokenError::MalformedToken(format!("invalid payload: {}", e)))?;
            self.check_times(&times)?;
        }

        Ok(payload_bytes)
    }

    fn check_times(&self, times: &TimeClaims) -> Result<()> {
        let now = self.clock.now();
        let leeway = self.config.leeway();

        if times.iat.is_some_and(|iat| iat > now.saturating_add(leeway)) {
            return Err(TokenError::NotYetValid.into());
        }
        if times.exp.is_some_and(|exp| exp < now.saturating_sub(leeway)) {
            return Err(TokenError::Expired.into());
        }
        Ok(())
    }
}

fn split_token(token: &str) -> Result<(&str, &str, &str)> {
    let parts: Vec<&str> = token.split('.').collect();
    match parts.as_slice() {
        &[header, payload, signature] => Ok((header, payload, signature)),
        _ => Err(TokenError::MalformedToken(format!(
            "expected 3 segments, found {}",
            parts.len()
        ))
        .into()),
    }
}
