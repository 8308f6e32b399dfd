//! 安全随机数生成模块
//!
//! 提供密码学安全的随机数生成功能，以及用于 `jti` 的唯一标识生成器。

use rand::{TryRngCore, rngs::OsRng};

use crate::error::{CryptoError, Error, Result};

/// 生成指定长度的随机字节数组
///
/// 使用操作系统提供的密码学安全随机数生成器 (CSPRNG)
///
/// # Example
///
/// ```rust
/// use tokenpair::random::generate_random_bytes;
///
/// let bytes = generate_random_bytes(32).unwrap();
/// assert_eq!(bytes.len(), 32);
/// ```
pub fn generate_random_bytes(length: usize) -> Result<Vec<u8>> {
    let mut bytes = vec![0u8; length];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| Error::Crypto(CryptoError::RngFailed(format!("{:?}", e))))?;
    Ok(bytes)
}

/// 生成指定长度的十六进制随机字符串
///
/// 最终字符串长度为字节数的两倍
///
/// # Example
///
/// ```rust
/// use tokenpair::random::generate_random_hex;
///
/// let hex = generate_random_hex(16).unwrap();
/// assert_eq!(hex.len(), 32); // 16 bytes = 32 hex chars
/// ```
pub fn generate_random_hex(byte_length: usize) -> Result<String> {
    let bytes = generate_random_bytes(byte_length)?;
    Ok(hex_encode(&bytes))
}

/// Token 唯一标识（`jti`）生成器
pub trait IdGenerator: Send + Sync {
    /// 生成一个新的唯一标识
    fn generate(&self) -> Result<String>;
}

/// 基于 CSPRNG 的标识生成器
///
/// 每个标识为 `byte_length` 个随机字节的十六进制表示，与时钟精度无关。
#[derive(Debug, Clone, Copy)]
pub struct RandomIdGenerator {
    byte_length: usize,
}

impl RandomIdGenerator {
    /// 默认 16 字节，即 32 个十六进制字符
    pub fn new() -> Self {
        Self { byte_length: 16 }
    }

    /// 指定随机字节数
    pub fn with_byte_length(byte_length: usize) -> Self {
        Self { byte_length }
    }
}

impl Default for RandomIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for RandomIdGenerator {
    fn generate(&self) -> Result<String> {
        generate_random_hex(self.byte_length)
    }
}

// ============================================================================
// 辅助函数
// ============================================================================

/// 将字节数组编码为十六进制字符串
fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// 常量时间比较两个字节切片
///
/// 用于防止时序攻击
///
/// # Example
///
/// ```rust
/// use tokenpair::random::constant_time_compare;
///
/// assert!(constant_time_compare(b"secret_token", b"secret_token"));
/// assert!(!constant_time_compare(b"secret_token", b"other_token!"));
/// ```
pub fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    use subtle::ConstantTimeEq;
    a.ct_eq(b).into()
}

/// 常量时间比较两个字符串
pub fn constant_time_compare_str(a: &str, b: &str) -> bool {
    constant_time_compare(a.as_bytes(), b.as_bytes())
}
