//! Countdown formatting and timing helpers

pub use std::time::Duration;

/// Format a countdown for chat: plain seconds below a minute, `M:SS` above.
pub fn calculate_time(seconds: u32) -> String {
    if seconds < 60 {
        return seconds.to_string();
    }
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Create an interval that ticks at the given duration.
///
/// The first tick completes immediately.
pub fn interval(period: Duration) -> tokio::time::Interval {
    tokio::time::interval(period)
}
