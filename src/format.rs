/// Formatting module for the countdown line; this is its default template
pub const DEFAULT_TEMPLATE: &str = "{symbol} {sleeptime} - {passed} = {remaining}";

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;
const SECONDS_PER_WEEK: u64 = 7 * SECONDS_PER_DAY;

/// Format a duration in seconds, e.g. `3661.0` as `"1h 1m 01s"`.
///
/// Larger units appear only once they are non-zero, and every smaller unit
/// after the first emitted one is always shown. Seconds are always present
/// and padded to two digits. Negative input renders as zero.
pub fn format_time(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;

    let weeks = total / SECONDS_PER_WEEK;
    let days = total % SECONDS_PER_WEEK / SECONDS_PER_DAY;
    let hours = total % SECONDS_PER_DAY / SECONDS_PER_HOUR;
    let minutes = total % SECONDS_PER_HOUR / SECONDS_PER_MINUTE;
    let secs = total % SECONDS_PER_MINUTE;

    let mut parts = Vec::with_capacity(5);
    if weeks > 0 {
        parts.push(format!("{weeks}w"));
    }
    if !parts.is_empty() || days > 0 {
        parts.push(format!("{days}d"));
    }
    if !parts.is_empty() || hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if !parts.is_empty() || minutes > 0 {
        parts.push(format!("{minutes}m"));
    }
    parts.push(format!("{secs:02}s"));

    parts.join(" ")
}

/// Fill a progress template. Recognised placeholders are `{symbol}`,
/// `{sleeptime}`, `{passed}` and `{remaining}`; anything else is kept as is.
pub fn format_progress(
    template: &str,
    symbol: char,
    sleeptime: f64,
    passed: f64,
    remaining: f64,
) -> String {
    template
        .replace("{symbol}", &symbol.to_string())
        .replace("{sleeptime}", &format_time(sleeptime))
        .replace("{passed}", &format_time(passed))
        .replace("{remaining}", &format_time(remaining))
}
