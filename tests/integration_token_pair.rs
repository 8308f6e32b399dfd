//! 集成测试：Token 对签发与刷新流程
//!
//! 覆盖签发 → 解码 → 过期 → 刷新的完整场景。

use std::sync::Arc;

use tokenpair::token::codec;
use tokenpair::{Claims, ManualClock, TokenConfig, TokenError, TokenService};

const SECRET: &[u8] = b"integration-secret-key-32-bytes!";

fn service_with_clock() -> (TokenService, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::starting_now());
    let service = TokenService::with_clock(TokenConfig::new(SECRET), clock.clone())
        .expect("config should be valid");
    (service, clock)
}

/// 测试签发后解码 payload 段，再让 Access Token 过期而 Refresh 配对仍有效
#[test]
fn test_issue_expire_and_refresh_scenario() {
    let (service, clock) = service_with_clock();

    // 1. 签发
    let claims = Claims::new().subject("a@b.com").info("role", "admin");
    let pair = service
        .issue_token_pair(&claims)
        .expect("token pair issuance should succeed");

    // 2. 直接解码 payload 段
    let segment = pair.access_token.split('.').nth(1).unwrap();
    let payload: serde_json::Value =
        serde_json::from_slice(&codec::decode(segment).unwrap()).unwrap();
    assert_eq!(payload["sub"], "a@b.com");
    assert_eq!(payload["infoData"]["role"], "admin");

    // 3. 超过 Access Token 有效期
    clock.advance(service.config().access_token_lifetime() + 1);

    let err = service
        .verify_token(&pair.access_token, false)
        .expect_err("access token should be expired");
    assert_eq!(err.token_error(), Some(&TokenError::Expired));

    // 4. Refresh 配对仍然有效
    let refresh = service
        .verify_refresh_pair(&pair.access_token, &pair.refresh_token)
        .expect("refresh pair should still be valid");
    assert_eq!(refresh.iss.as_deref(), Some("jwt_admin"));
}

/// 测试 Access Token 往返
#[test]
fn test_access_token_round_trip() {
    let (service, _) = service_with_clock();

    let claims = Claims::new()
        .subject("user_123")
        .info("level", 5)
        .info("verified", true)
        .info("groups", vec!["a", "b"]);
    let pair = service.issue_token_pair(&claims).unwrap();

    let payload = service
        .verify_token(&pair.access_token, false)
        .expect("access token should be valid");

    assert_eq!(payload.sub, claims.sub);
    assert_eq!(payload.info_data.as_ref(), Some(&claims.info_data));
    assert_eq!(payload.info::<i64>("level"), Some(5));
    assert_eq!(payload.info::<bool>("verified"), Some(true));
    assert_eq!(
        payload.info::<Vec<String>>("groups"),
        Some(vec!["a".to_string(), "b".to_string()])
    );
}

/// 测试缺少 sub 时签发失败
#[test]
fn test_issue_without_subject() {
    let (service, _) = service_with_clock();

    let err = service
        .issue_token_pair(&Claims::new().info("role", "admin"))
        .expect_err("issuance without sub should fail");
    assert!(matches!(err.token_error(), Some(TokenError::InvalidClaims(_))));
}

/// 测试 Refresh Token 本身过期后配对失败
#[test]
fn test_refresh_pair_fails_after_refresh_expiry() {
    let (service, clock) = service_with_clock();
    let pair = service
        .issue_token_pair(&Claims::new().subject("user_123"))
        .unwrap();

    clock.advance(service.config().refresh_token_lifetime() + 1);

    let err = service
        .verify_refresh_pair(&pair.access_token, &pair.refresh_token)
        .expect_err("expired refresh token should be rejected");
    assert_eq!(err.token_error(), Some(&TokenError::Expired));
}

/// 测试不同 Token 对之间不能交叉配对
#[test]
fn test_cross_pair_rejected() {
    let (service, _) = service_with_clock();
    let first = service
        .issue_token_pair(&Claims::new().subject("user_1"))
        .unwrap();
    let second = service
        .issue_token_pair(&Claims::new().subject("user_1"))
        .unwrap();

    let err = service
        .verify_refresh_pair(&first.access_token, &second.refresh_token)
        .expect_err("refresh token of another pair should be rejected");
    assert_eq!(err.token_error(), Some(&TokenError::PairMismatch));

    // 正确的配对不受影响
    assert!(service
        .verify_refresh_pair(&second.access_token, &second.refresh_token)
        .is_ok());
}

/// 测试使用 Refresh 配对换取新的 Token 对
#[test]
fn test_refresh_flow() {
    let (service, clock) = service_with_clock();
    let pair = service
        .issue_token_pair(&Claims::new().subject("user_123").info("role", "editor"))
        .unwrap();

    clock.advance(service.config().access_token_lifetime() + 10);

    let new_pair = service
        .refresh(&pair.access_token, &pair.refresh_token)
        .expect("refresh should succeed");
    assert_ne!(new_pair.access_token, pair.access_token);

    let payload = service.verify_token(&new_pair.access_token, false).unwrap();
    assert_eq!(payload.sub.as_deref(), Some("user_123"));
    assert_eq!(payload.info::<String>("role").as_deref(), Some("editor"));
    assert!(service
        .verify_refresh_pair(&new_pair.access_token, &new_pair.refresh_token)
        .is_ok());
}

/// 测试 Refresh Token 的过期时间晚于 Access Token
#[test]
fn test_refresh_outlives_access() {
    let (service, _) = service_with_clock();
    let pair = service
        .issue_token_pair(&Claims::new().subject("user_123"))
        .unwrap();

    assert!(pair.refresh_token_expires_at > pair.access_token_expires_at);
    assert_eq!(
        pair.refresh_token_expires_at - pair.access_token_expires_at,
        240 - 120
    );
}
