// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, Datelike, Local, NaiveDate, SecondsFormat, Utc};

/// English month names indexed by zero-based calendar month.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Format a date as "{day} {month}", e.g. "5 March". No leading zero, no year.
pub fn day_month_label(date: NaiveDate) -> String {
    format!("{} {}", date.day(), MONTH_NAMES[date.month0() as usize])
}

/// Calendar date of a UTC timestamp in the local time zone.
pub fn local_date(date: DateTime<Utc>) -> NaiveDate {
    date.with_timezone(&Local).date_naive()
}
