//! base64url 编解码
//!
//! Token 的三段（header、payload、signature）都使用 URL 安全的 base64，
//! 编码时去掉 `=` 填充；解码时先补齐 `=` 到 4 的倍数再解码。

use base64::{
    Engine,
    engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD},
};

use crate::error::{Result, TokenError};

/// 编码为无填充的 base64url 字符串
///
/// # 示例
///
/// ```rust
/// use tokenpair::token::codec::encode;
///
/// assert_eq!(encode(b"\xfb\xff"), "-_8");
/// ```
pub fn encode(bytes: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// 解码 base64url 字符串
///
/// 输入长度不是 4 的倍数时自动补 `=`。包含非 base64url 字符时返回
/// [`TokenError::DecodeError`]。
pub fn decode(input: &str) -> Result<Vec<u8>> {
    let remainder = input.len() % 4;
    let decoded = if remainder == 0 {
        URL_SAFE.decode(input)
    } else {
        let mut padded = String::with_capacity(input.len() + 4 - remainder);
        padded.push_str(input);
        padded.extend(std::iter::repeat_n('=', 4 - remainder));
        URL_SAFE.decode(padded)
    };

    decoded.map_err(|e| TokenError::DecodeError(e.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_encode_is_url_safe_without_padding() {
        // 标准 base64 为 "+/8="
        let encoded = encode([0xfbu8, 0xff]);
        assert_eq!(encoded, "-_8");
        assert!(!encoded.contains('='));
    }

    #[test]
    fn test_encode_header() {
        assert_eq!(
            encode(r#"{"alg":"HS256","typ":"JWT"}"#),
            "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9"
        );
    }

    #[test]
    fn test_decode_unpadded_input() {
        assert_eq!(decode("-_8").unwrap(), vec![0xfb, 0xff]);
        assert_eq!(decode("YQ").unwrap(), b"a".to_vec());
        assert_eq!(decode("YWI").unwrap(), b"ab".to_vec());
        assert_eq!(decode("YWJj").unwrap(), b"abc".to_vec());
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_decode_rejects_invalid_alphabet() {
        for input in ["ab$d", "a b", "YWJj!", "+/8"] {
            let result = decode(input);
            assert!(
                matches!(result, Err(Error::Token(TokenError::DecodeError(_)))),
                "expected DecodeError for {input:?}"
            );
        }
    }

    #[test]
    fn test_decode_rejects_impossible_length() {
        // 余 1 的长度补齐后仍不是合法 base64
        assert!(decode("YWJjZ").is_err());
    }
}
