// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Year timeline shown under the progress bar.

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::time_utils::utc_midnight;

const MONTHS: [&str; 12] = [
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

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub struct TimelineTitle {
    pub full: String,
    pub truncated: String,
}

/// One segment of the timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub title: TimelineTitle,
    /// Share of the year (percent)
    pub width: f64,
    /// Contains `now`
    pub is_active: bool,
    /// Ended before `now`
    pub is_passed: bool,
}

/// Months for wide screens, quarters for narrow ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub timeline: Vec<TimelineEntry>,
    pub timeline_mobile: Vec<TimelineEntry>,
}

impl Timeline {
    pub fn for_year(now: DateTime<Utc>) -> Self {
        let year = now.year();
        let month_days: Vec<i64> = (1..=12).map(|m| days_in_month(year, m)).collect();
        let year_days: i64 = month_days.iter().sum();
        let current = now.month0() as usize;

        let timeline = MONTHS
            .iter()
            .zip(&month_days)
            .enumerate()
            .map(|(i, (name, days))| TimelineEntry {
                title: TimelineTitle {
                    full: name.to_string(),
                    truncated: name[..3].to_string(),
                },
                width: *days as f64 * 100.0 / year_days as f64,
                is_active: i == current,
                is_passed: i < current,
            })
            .collect();

        let timeline_mobile = (0..4)
            .map(|q| {
                let days: i64 = month_days[q * 3..q * 3 + 3].iter().sum();
                let label = format!("Q{}", q + 1);
                TimelineEntry {
                    title: TimelineTitle {
                        full: label.clone(),
                        truncated: label,
                    },
                    width: days as f64 * 100.0 / year_days as f64,
                    is_active: current / 3 == q,
                    is_passed: current / 3 > q,
                }
            })
            .collect();

        Self {
            timeline,
            timeline_mobile,
        }
    }
}

fn days_in_month(year: i32, month: u32) -> i64 {
    let start = utc_midnight(year, month, 1);
    let end = if month == 12 {
        utc_midnight(year + 1, 1, 1)
    } else {
        utc_midnight(year, month + 1, 1)
    };

    match (start, end) {
        (Some(start), Some(end)) => (end - start).num_days(),
        _ => 30,
    }
}
