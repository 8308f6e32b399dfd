//! Token 的 header 与 payload 数据结构
//!
//! 字段顺序即序列化顺序，同一实现内的编码结果稳定，签名因此可以复现。

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::token::signer::Algorithm;

/// Token 类型，固定为 `JWT`
pub const TOKEN_TYPE: &str = "JWT";

/// Token header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// 签名算法
    pub alg: String,
    /// Token 类型
    pub typ: String,
}

impl Header {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            alg: algorithm.as_str().to_string(),
            typ: TOKEN_TYPE.to_string(),
        }
    }
}

/// 调用方提供的签发参数
///
/// # 示例
///
/// ```rust
/// use tokenpair::token::claims::Claims;
///
/// let claims = Claims::new()
///     .subject("a@b.com")
///     .info("role", "admin");
/// assert_eq!(claims.sub.as_deref(), Some("a@b.com"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// 主题（必需）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// 随 Access Token 携带的用户数据，不应放入密码等敏感信息
    #[serde(rename = "infoData", default)]
    pub info_data: Map<String, Value>,
}

impl Claims {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置主题
    pub fn subject(mut self, sub: impl Into<String>) -> Self {
        self.sub = Some(sub.into());
        self
    }

    /// 添加一条用户数据，无法序列化的值会被忽略
    pub fn info<V: Serialize>(mut self, key: impl Into<String>, value: V) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.info_data.insert(key.into(), json_value);
        }
        self
    }
}

/// Access Token payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessPayload {
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    pub sub: String,
    pub jti: String,
    #[serde(rename = "infoData")]
    pub info_data: Map<String, Value>,
}

/// Refresh Token payload
///
/// `access_jti` 绑定签发时配对的 Access Token。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshPayload {
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
    #[serde(rename = "accessJti")]
    pub access_jti: String,
}

/// 验证后解码得到的 payload
///
/// 标准字段均为可选，未知字段保留在 `extra` 中。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,

    #[serde(rename = "accessJti", default, skip_serializing_if = "Option::is_none")]
    pub access_jti: Option<String>,

    #[serde(rename = "infoData", default, skip_serializing_if = "Option::is_none")]
    pub info_data: Option<Map<String, Value>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Payload {
    /// 读取 `infoData` 中的字段
    pub fn info<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.info_data
            .as_ref()?
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

impl From<AccessPayload> for Payload {
    fn from(p: AccessPayload) -> Self {
        Self {
            iss: Some(p.iss),
            iat: Some(p.iat),
            exp: Some(p.exp),
            sub: Some(p.sub),
            jti: Some(p.jti),
            access_jti: None,
            info_data: Some(p.info_data),
            extra: Map::new(),
        }
    }
}

impl From<RefreshPayload> for Payload {
    fn from(p: RefreshPayload) -> Self {
        Self {
            iss: Some(p.iss),
            iat: Some(p.iat),
            exp: Some(p.exp),
            sub: None,
            jti: Some(p.jti),
            access_jti: Some(p.access_jti),
            info_data: None,
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_header_serialization() {
        let header = Header::new(Algorithm::HS256);
        assert_eq!(
            serde_json::to_string(&header).unwrap(),
            r#"{"alg":"HS256","typ":"JWT"}"#
        );
    }

    #[test]
    fn test_access_payload_field_names() {
        let payload = AccessPayload {
            iss: "jwt_admin".to_string(),
            iat: 10,
            exp: 130,
            sub: "a@b.com".to_string(),
            jti: "abc".to_string(),
            info_data: Claims::new().info("role", "admin").info_data,
        };
        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"iss":"jwt_admin","iat":10,"exp":130,"sub":"a@b.com","jti":"abc","infoData":{"role":"admin"}}"#
        );
    }

    #[test]
    fn test_refresh_payload_field_names() {
        let payload = RefreshPayload {
            iss: "jwt_admin".to_string(),
            iat: 10,
            exp: 250,
            jti: "r1".to_string(),
            access_jti: "a1".to_string(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["accessJti"], "a1");
        assert!(value.get("access_jti").is_none());
    }

    #[test]
    fn test_claims_from_json() {
        let claims: Claims =
            serde_json::from_value(json!({"sub": "u1", "infoData": {"level": 3}})).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("u1"));
        assert_eq!(claims.info_data["level"], 3);

        let no_info: Claims = serde_json::from_value(json!({"sub": "u1"})).unwrap();
        assert!(no_info.info_data.is_empty());
    }

    #[test]
    fn test_payload_keeps_unknown_fields() {
        let payload: Payload = serde_json::from_value(json!({
            "sub": "u1",
            "exp": 100,
            "scope": "read",
            "infoData": {"role": "admin", "level": 2}
        }))
        .unwrap();

        assert_eq!(payload.sub.as_deref(), Some("u1"));
        assert_eq!(payload.exp, Some(100));
        assert_eq!(payload.iat, None);
        assert_eq!(payload.extra["scope"], "read");
        assert_eq!(payload.info::<String>("role"), Some("admin".to_string()));
        assert_eq!(payload.info::<u32>("level"), Some(2));
        assert_eq!(payload.info::<String>("missing"), None);
        assert!(payload.access_jti.is_none());
    }

    #[test]
    fn test_payload_from_refresh() {
        let payload: Payload = RefreshPayload {
            iss: "i".to_string(),
            iat: 1,
            exp: 2,
            jti: "r".to_string(),
            access_jti: "a".to_string(),
        }
        .into();
        assert!(payload.sub.is_none());
        assert_eq!(payload.access_jti.as_deref(), Some("a"));
    }
}
