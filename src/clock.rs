//! 时钟抽象模块
//!
//! 签发与验证只通过 [`Clock`] 读取当前时间，测试中可以用 [`ManualClock`]
//! 模拟过期而无需真实等待。

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

/// 时间来源，返回 Unix 时间戳（秒）
pub trait Clock: Send + Sync {
    /// 当前时间（Unix 秒）
    fn now(&self) -> i64;
}

/// 系统时钟
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// 手动控制的时钟
///
/// # 示例
///
/// ```rust
/// use tokenpair::clock::{Clock, ManualClock};
///
/// let clock = ManualClock::new(1_000);
/// clock.advance(120);
/// assert_eq!(clock.now(), 1_120);
/// ```
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    /// 以给定时间戳创建时钟
    pub fn new(now: i64) -> Self {
        Self {
            now: AtomicI64::new(now),
        }
    }

    /// 以当前系统时间创建时钟
    pub fn starting_now() -> Self {
        Self::new(SystemClock.now())
    }

    /// 设置当前时间
    pub fn set(&self, now: i64) {
        self.now.store(now, Ordering::SeqCst);
    }

    /// 将时间向前推进 `seconds` 秒（可为负数）
    pub fn advance(&self, seconds: i64) {
        self.now.fetch_add(seconds, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_close_to_chrono() {
        let now = SystemClock.now();
        assert!((now - Utc::now().timestamp()).abs() <= 1);
    }

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(100);
        assert_eq!(clock.now(), 100);

        clock.advance(20);
        assert_eq!(clock.now(), 120);

        clock.advance(-50);
        assert_eq!(clock.now(), 70);

        clock.set(5);
        assert_eq!(clock.now(), 5);
    }
}
