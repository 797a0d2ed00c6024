//! Duration literals such as `5s`, `1h30m`, `1.5s` or `250ms`.
//!
//! Parsing is delegated to the `parse_duration` crate. A bare number is
//! read as seconds. Negative durations cannot be represented by
//! [`Duration`] and are rejected.

use std::fmt::Write;
use std::time::Duration;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;
const NANOS_PER_MIN: u128 = 60 * NANOS_PER_SEC;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MIN;

/// Parses a duration literal such as `300ms`, `1.5h` or `2h45m`.
///
/// # Errors
///
/// Returns a human-readable reason when the literal is malformed, uses an
/// unknown unit, is negative or overflows.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    if input.trim_start().starts_with('-') {
        return Err(format!("negative duration \"{input}\" is not supported"));
    }
    ::parse_duration::parse(input).map_err(|e| e.to_string())
}

/// Formats a duration in its shortest literal form, e.g.
/// `1h0m0s`, `1m30s`, `1.5s`, `250ms` or `0s`.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }

    if nanos < NANOS_PER_SEC {
        return if nanos < NANOS_PER_MICRO {
            format!("{nanos}ns")
        } else if nanos < NANOS_PER_MILLI {
            format!("{}µs", decimal(nanos, NANOS_PER_MICRO))
        } else {
            format!("{}ms", decimal(nanos, NANOS_PER_MILLI))
        };
    }

    let mut out = String::new();
    let hours = nanos / NANOS_PER_HOUR;
    let minutes = (nanos % NANOS_PER_HOUR) / NANOS_PER_MIN;
    let seconds = nanos % NANOS_PER_MIN;

    if hours > 0 {
        let _ = write!(out, "{hours}h");
    }
    if hours > 0 || minutes > 0 {
        let _ = write!(out, "{minutes}m");
    }
    let _ = write!(out, "{}s", decimal(seconds, NANOS_PER_SEC));
    out
}

/// Renders `value / unit` with trailing fractional zeros removed.
fn decimal(value: u128, unit: u128) -> String {
    let whole = value / unit;
    let remainder = value % unit;
    if remainder == 0 {
        return whole.to_string();
    }

    let width = unit.ilog10() as usize;
    let digits = format!("{remainder:0width$}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}
