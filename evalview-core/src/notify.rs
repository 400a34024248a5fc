//! Process-wide "last log written" watermark.
//!
//! Any code path that finishes writing a log advances the watermark; the view
//! server's polling endpoint compares it against the client's last seen value.
//! The value is milliseconds since the Unix epoch and starts at `0` on every
//! process start.

use std::sync::atomic::{AtomicI64, Ordering};

static LAST_EVAL_TIME: AtomicI64 = AtomicI64::new(0);

/// Current watermark in milliseconds (`0` when nothing has been written yet).
pub fn last_eval_time() -> i64 {
    LAST_EVAL_TIME.load(Ordering::Acquire)
}

/// Moves the watermark forward to `timestamp_ms` if it is newer. Returns the
/// watermark after the update.
pub fn advance_watermark(timestamp_ms: i64) -> i64 {
    let previous = LAST_EVAL_TIME.fetch_max(timestamp_ms, Ordering::AcqRel);
    previous.max(timestamp_ms)
}

/// Records that a log write completed just now.
pub fn notify_log_written() -> i64 {
    advance_watermark(chrono::Utc::now().timestamp_millis())
}

/// True when something was written after the client's `last_seen_ms`.
pub fn should_refresh(last_seen_ms: i64) -> bool {
    last_eval_time() > last_seen_ms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watermark_only_moves_forward() {
        // Far enough ahead that concurrent log writes in other tests cannot pass it.
        let ahead = chrono::Utc::now().timestamp_millis() + 10 * 365 * 24 * 60 * 60 * 1000;

        assert_eq!(advance_watermark(ahead), ahead);
        assert_eq!(advance_watermark(ahead - 5_000), ahead);
        assert_eq!(last_eval_time(), ahead);

        assert!(should_refresh(ahead - 1));
        assert!(!should_refresh(ahead));
        assert!(!should_refresh(ahead + 1));
    }

    #[test]
    fn notify_never_lowers_watermark() {
        let before = last_eval_time();
        let after = notify_log_written();

        assert!(after >= before);
        assert!(last_eval_time() >= after);
    }
}
