//! Token 对签发与验证示例
//!
//! 运行：`RUST_LOG=debug cargo run --example token_pair`

use std::sync::Arc;

use tokenpair::{Claims, ManualClock, TokenConfig, TokenService};
use tracing_subscriber::EnvFilter;

fn main() -> tokenpair::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("=== Token 对示例 ===\n");

    let clock = Arc::new(ManualClock::starting_now());
    let config = TokenConfig::new(b"EjLGRddgpaB7DcG2mVhEgmaiGL7bvUh1")
        .with_issuer("jwt_admin")
        .with_access_token_lifetime(120)
        .with_refresh_token_lifetime(240);
    let service = TokenService::with_clock(config, clock.clone())?;

    // 1. 签发
    let claims = Claims::new().subject("a@b.com").info("role", "admin");
    let pair = service.issue_token_pair(&claims)?;

    println!("Access Token:  {}", pair.access_token);
    println!("Refresh Token: {}", pair.refresh_token);
    println!("Access 过期时间:  {}", pair.access_token_expires_at);
    println!("Refresh 过期时间: {}\n", pair.refresh_token_expires_at);

    // 2. 验证 Access Token
    let payload = service.verify_token(&pair.access_token, false)?;
    println!(
        "验证通过: sub={:?}, role={:?}",
        payload.sub,
        payload.info::<String>("role")
    );

    // 3. 模拟时间流逝，Access Token 过期
    clock.advance(121);
    match service.verify_token(&pair.access_token, false) {
        Ok(_) => println!("Access Token 仍然有效"),
        Err(e) => println!("Access Token 验证失败: {}", e),
    }

    // 4. 使用 Refresh 配对换取新的 Token 对
    let refresh = service.verify_refresh_pair(&pair.access_token, &pair.refresh_token)?;
    println!("Refresh 配对有效: accessJti={:?}", refresh.access_jti);

    let new_pair = service.refresh(&pair.access_token, &pair.refresh_token)?;
    println!("新的 Access Token: {}", new_pair.access_token);

    Ok(())
}
