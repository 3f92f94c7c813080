//! Clock abstraction and timestamp formatting.
//!
//! All timestamps are Unix milliseconds in UTC; formatting to RFC 3339 happens
//! only at the edges (HTTP responses, CLI output).

use chrono::{DateTime, SecondsFormat, Utc};

/// Source of the current time, injectable for tests.
pub trait Clock: Send + Sync {
    /// Current Unix time in milliseconds
    fn now_millis(&self) -> i64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        now_millis()
    }
}

/// Clock frozen at a given instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_millis: i64,
}

impl FixedClock {
    pub fn new(fixed_millis: i64) -> Self {
        Self { fixed_millis }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.fixed_millis
    }
}

/// Current Unix time in milliseconds (UTC)
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Format Unix milliseconds as RFC 3339 (UTC, millisecond precision).
///
/// Out-of-range values fall back to the Unix epoch.
pub fn millis_to_rfc3339(timestamp_millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_millis)
        .unwrap_or(DateTime::UNIX_EPOCH)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_returns_positive_timestamp() {
        // テスト項目: SystemClock が正のタイムスタンプを返す
        // given (前提条件):
        let clock = SystemClock;

        // when (操作):
        let timestamp = clock.now_millis();

        // then (期待する結果):
        assert!(timestamp > 0);
    }

    #[test]
    fn test_fixed_clock_is_stable() {
        // テスト項目: FixedClock は何度呼んでも同じ値を返す
        // given (前提条件):
        let clock = FixedClock::new(1_700_000_000_000);

        // when (操作):
        let first = clock.now_millis();
        let second = clock.now_millis();

        // then (期待する結果):
        assert_eq!(first, 1_700_000_000_000);
        assert_eq!(first, second);
    }

    #[test]
    fn test_millis_to_rfc3339_keeps_milliseconds() {
        // テスト項目: ミリ秒を含むタイムスタンプが RFC 3339 (UTC) に変換される
        // given (前提条件): 2023-01-01T00:00:00.123Z
        let timestamp = 1_672_531_200_123;

        // when (操作):
        let result = millis_to_rfc3339(timestamp);

        // then (期待する結果):
        assert_eq!(result, "2023-01-01T00:00:00.123Z");
    }

    #[test]
    fn test_millis_to_rfc3339_out_of_range_falls_back_to_epoch() {
        // テスト項目: 範囲外の値はエポックにフォールバックする
        // given (前提条件):
        let timestamp = i64::MAX;

        // when (操作):
        let result = millis_to_rfc3339(timestamp);

        // then (期待する結果):
        assert_eq!(result, "1970-01-01T00:00:00.000Z");
    }
}
