//! HMAC 签名模块
//!
//! 对 `base64url(header).base64url(payload)` 计算 HMAC，并以 base64url
//! 输出。签名是确定性的：相同的消息、密钥和算法总是得到相同的签名，
//! 验证时通过重新计算签名进行比较。

use std::fmt;
use std::str::FromStr;

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::{Sha256, Sha384, Sha512};

use crate::error::{CryptoError, Error, Result, TokenError};
use crate::token::codec;

type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

/// 签名算法
///
/// 仅支持对称的 HMAC 系列，header 中的 `alg` 字段使用其名称。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Algorithm {
    /// HMAC-SHA256（默认）
    #[default]
    HS256,
    /// HMAC-SHA384
    HS384,
    /// HMAC-SHA512
    HS512,
}

impl Algorithm {
    /// header 中使用的算法名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::HS256 => "HS256",
            Algorithm::HS384 => "HS384",
            Algorithm::HS512 => "HS512",
        }
    }

    /// 计算原始 MAC 字节
    pub fn mac(&self, key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
        let bytes = match self {
            Algorithm::HS256 => {
                let mut mac = HmacSha256::new_from_slice(key).map_err(invalid_key)?;
                mac.update(message);
                mac.finalize().into_bytes().to_vec()
            }
            Algorithm::HS384 => {
                let mut mac = HmacSha384::new_from_slice(key).map_err(invalid_key)?;
                mac.update(message);
                mac.finalize().into_bytes().to_vec()
            }
            Algorithm::HS512 => {
                let mut mac = HmacSha512::new_from_slice(key).map_err(invalid_key)?;
                mac.update(message);
                mac.finalize().into_bytes().to_vec()
            }
        };
        Ok(bytes)
    }
}

fn invalid_key(e: hmac::digest::InvalidLength) -> Error {
    Error::Crypto(CryptoError::InvalidKey(e.to_string()))
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "HS256" => Ok(Algorithm::HS256),
            "HS384" => Ok(Algorithm::HS384),
            "HS512" => Ok(Algorithm::HS512),
            other => Err(TokenError::UnsupportedAlgorithm(other.to_string()).into()),
        }
    }
}

/// 对消息签名，返回 base64url 编码的签名
///
/// `algorithm` 为 header 中的算法名称，不在支持列表中时返回
/// [`TokenError::UnsupportedAlgorithm`]。
///
/// # 示例
///
/// ```rust
/// use tokenpair::token::signer::sign;
///
/// let a = sign("header.payload", b"secret", "HS256").unwrap();
/// let b = sign("header.payload", b"secret", "HS256").unwrap();
/// assert_eq!(a, b);
/// assert!(sign("header.payload", b"secret", "RS256").is_err());
/// ```
pub fn sign(message: &str, key: &[u8], algorithm: &str) -> Result<String> {
    let algorithm: Algorithm = algorithm.parse()?;
    sign_with(algorithm, message, key)
}

/// 使用已解析的算法签名
pub fn sign_with(algorithm: Algorithm, message: &str, key: &[u8]) -> Result<String> {
    let raw = algorithm.mac(key, message.as_bytes())?;
    Ok(codec::encode(raw))
}
