//! Payload 构建
//!
//! 根据调用方的 [`Claims`] 构建 Access/Refresh payload，填入签发者、
//! 时间戳和唯一标识。

use crate::clock::Clock;
use crate::config::TokenConfig;
use crate::error::{Result, TokenError};
use crate::random::IdGenerator;
use crate::token::claims::{AccessPayload, Claims, RefreshPayload};

/// Payload 构建器
pub struct PayloadBuilder<'a> {
    config: &'a TokenConfig,
    clock: &'a dyn Clock,
    ids: &'a dyn IdGenerator,
}

impl<'a> PayloadBuilder<'a> {
    pub fn new(config: &'a TokenConfig, clock: &'a dyn Clock, ids: &'a dyn IdGenerator) -> Self {
        Self { config, clock, ids }
    }

    /// 构建 Access Token payload
    ///
    /// `sub` 缺失或为空时返回 [`TokenError::InvalidClaims`]。
    pub fn build_access_payload(&self, claims: &Claims) -> Result<AccessPayload> {
        let sub = match claims.sub.as_deref() {
            Some(sub) if !sub.is_empty() => sub.to_string(),
            _ => return Err(TokenError::InvalidClaims("missing claim: sub".to_string()).into()),
        };

        let now = self.clock.now();
        Ok(AccessPayload {
            iss: self.config.issuer().to_string(),
            iat: now,
            exp: expires_at(now, self.config.access_token_lifetime())?,
            sub,
            jti: self.ids.generate()?,
            info_data: claims.info_data.clone(),
        })
    }

    /// 构建绑定到 `access_jti` 的 Refresh Token payload
    pub fn build_refresh_payload(&self, access_jti: &str) -> Result<RefreshPayload> {
        let now = self.clock.now();
        Ok(RefreshPayload {
            iss: self.config.issuer().to_string(),
            iat: now,
            exp: expires_at(now, self.config.refresh_token_lifetime())?,
            jti: self.ids.generate()?,
            access_jti: access_jti.to_string(),
        })
    }
}

fn expires_at(now: i64, lifetime: i64) -> Result<i64> {
    now.checked_add(lifetime).ok_or_else(|| {
        TokenError::EncodingFailed(format!("exp overflows: {} + {}", now, lifetime)).into()
    })
}
