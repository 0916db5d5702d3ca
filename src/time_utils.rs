// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting and calendar-day arithmetic.

use chrono::{DateTime, Duration, NaiveDate, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Format a calendar day as `YYYY-MM-DD` (the streak marker format).
pub fn format_day(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

/// Parse a `YYYY-MM-DD` day stamp.
pub fn parse_day(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// The day immediately before `day`.
///
/// `None` only at the representable minimum date.
pub fn previous_day(day: NaiveDate) -> Option<NaiveDate> {
    day.pred_opt()
}

/// Inclusive cutoff for a "last `days` days" window ending at `now`.
pub fn period_start(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    now - Duration::days(i64::from(days))
}
