// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Goal statistics derived from the athlete's data.
//!
//! Everything here is a pure function of the goal, the year-to-date totals,
//! the activities of the selected type, and the current time. Distances
//! are in kilometers; the goal is kilometers per year.

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{Activity, ActivityTotals};
use crate::time_utils::{start_of_year, utc_midnight};
use crate::views::timeline::Timeline;

/// Sign of a rounded figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

/// Classify `number` after rounding it to the nearest integer.
///
/// Halves round up (`-0.5` is zero, `0.5` is positive). NaN is zero.
pub fn check_sign(number: f64) -> Sign {
    let rounded = round_half_up(number);
    if rounded < 0.0 {
        Sign::Negative
    } else if rounded > 0.0 {
        Sign::Positive
    } else {
        Sign::Zero
    }
}

/// Nearest integer with halves rounded up, so `-0.5` is zero. Every
/// displayed figure goes through this so it agrees with [`check_sign`].
pub(crate) fn round_half_up(number: f64) -> f64 {
    (number + 0.5).floor()
}

/// Column alignment in the stats table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub struct Header {
    pub label: String,
    pub alignment: Alignment,
}

/// A left-aligned metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub struct Column {
    pub data: f64,
    #[serde(rename = "type")]
    pub unit: String,
}

/// A right-aligned metric with its difference against plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub struct DifferenceColumn {
    pub data: f64,
    pub difference: f64,
    #[serde(rename = "type")]
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub label: String,
    pub columns_left: Vec<Column>,
    pub columns_right: Vec<DifferenceColumn>,
}

/// Headers and rows of the stats table, before rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StatsTable {
    pub headers: Vec<Header>,
    pub rows: Vec<Row>,
}

/// Figures consumed by the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    /// Share of the goal done so far (percent, 0..=100).
    pub distance_amount: f64,
    /// Share of the goal expected by now (percent). 0 without a goal.
    pub distance_target_amount: f64,
    /// Year distance minus goal (km, rounded half up). Negative means "to go".
    pub distance_goal_difference: f64,
    /// Year distance minus planned distance by now (km, rounded half up).
    pub distance_target_difference: f64,
}

/// Weekly pace figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Pace {
    /// Average km per week so far this year.
    pub current_weekly_average: f64,
    /// Km per week needed over the rest of the year to reach the goal.
    pub required_weekly_average: f64,
    /// Current minus required.
    pub difference: f64,
    pub sign: Sign,
}

/// Everything the dashboard views need, recomputed per request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DerivedStats {
    pub progress: Progress,
    pub current: StatsTable,
    pub pace: Pace,
    pub timeline: Timeline,
}

/// Boundaries of the periods the table reports on.
struct Periods {
    year_start: DateTime<Utc>,
    year_end: DateTime<Utc>,
    month_start: DateTime<Utc>,
    week_start: DateTime<Utc>,
}

impl Periods {
    fn containing(now: DateTime<Utc>) -> Self {
        let year_start = start_of_year(now);
        let year_end = utc_midnight(now.year() + 1, 1, 1).unwrap_or(now);
        let month_start = utc_midnight(now.year(), now.month(), 1).unwrap_or(now);

        // ISO weeks start on Monday. Clamp to the year so the plan never
        // counts days from last year.
        let days_from_monday = i64::from(now.weekday().num_days_from_monday());
        let week_start = utc_midnight(now.year(), now.month(), now.day())
            .map(|today| today - Duration::days(days_from_monday))
            .unwrap_or(now)
            .max(year_start);

        Self {
            year_start,
            year_end,
            month_start,
            week_start,
        }
    }

    fn year_seconds(&self) -> f64 {
        (self.year_end - self.year_start).num_seconds() as f64
    }

    /// Fraction of the year that lies between `from` and `now`.
    fn year_fraction(&self, from: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
        let seconds = (now - from).num_seconds().max(0) as f64;
        (seconds / self.year_seconds()).clamp(0.0, 1.0)
    }
}

/// Derive progress, table, pace and timeline figures.
///
/// - `goal`: yearly target in km; `None`, zero, negative or non-finite
///   skips goal-relative figures (they are reported as zero).
/// - `stats_year`: year-to-date totals for the selected type; `None` is
///   treated as all zero.
/// - `year_activities`: this year's activities of the selected type.
pub fn get_stats(
    goal: Option<f64>,
    stats_year: Option<&ActivityTotals>,
    year_activities: &[Activity],
    now: DateTime<Utc>,
) -> DerivedStats {
    let goal = goal.filter(|g| g.is_finite() && *g > 0.0);
    let periods = Periods::containing(now);
    let year_totals = stats_year.copied().unwrap_or_default();
    let year_distance = year_totals.distance_km();

    let month_totals = ActivityTotals::from_activities(
        year_activities
            .iter()
            .filter(|a| a.start_date >= periods.month_start && a.start_date <= now),
    );
    let week_totals = ActivityTotals::from_activities(
        year_activities
            .iter()
            .filter(|a| a.start_date >= periods.week_start && a.start_date <= now),
    );

    // Planned distance for the part of each period that has passed.
    let plan_for = |from: DateTime<Utc>| -> f64 {
        goal.map(|g| g * periods.year_fraction(from, now))
            .unwrap_or(0.0)
    };

    let rows = vec![
        table_row("Year", &year_totals, plan_for(periods.year_start), goal),
        table_row("Month", &month_totals, plan_for(periods.month_start), goal),
        table_row("Week", &week_totals, plan_for(periods.week_start), goal),
    ];

    DerivedStats {
        progress: progress(goal, year_distance, &periods, now),
        current: StatsTable {
            headers: table_headers(),
            rows,
        },
        pace: pace(goal, year_distance, &periods, now),
        timeline: Timeline::for_year(now),
    }
}

fn table_headers() -> Vec<Header> {
    [
        ("", Alignment::Left),
        ("Distance", Alignment::Left),
        ("Activities", Alignment::Left),
        ("Plan", Alignment::Right),
    ]
    .into_iter()
    .map(|(label, alignment)| Header {
        label: label.to_string(),
        alignment,
    })
    .collect()
}

fn table_row(label: &str, totals: &ActivityTotals, plan: f64, goal: Option<f64>) -> Row {
    let distance = round_half_up(totals.distance_km());
    let (plan, difference) = match goal {
        Some(_) => (
            round_half_up(plan),
            round_half_up(totals.distance_km() - plan),
        ),
        None => (0.0, 0.0),
    };

    Row {
        label: label.to_string(),
        columns_left: vec![
            Column {
                data: distance,
                unit: "km".to_string(),
            },
            Column {
                data: f64::from(totals.count),
                unit: "activities".to_string(),
            },
        ],
        columns_right: vec![DifferenceColumn {
            data: plan,
            difference,
            unit: "km".to_string(),
        }],
    }
}

fn progress(goal: Option<f64>, year_distance: f64, periods: &Periods, now: DateTime<Utc>) -> Progress {
    let Some(goal) = goal else {
        return Progress {
            distance_amount: 0.0,
            distance_target_amount: 0.0,
            distance_goal_difference: 0.0,
            distance_target_difference: 0.0,
        };
    };

    let fraction = periods.year_fraction(periods.year_start, now);
    let planned = goal * fraction;

    Progress {
        distance_amount: (year_distance * 100.0 / goal).clamp(0.0, 100.0),
        distance_target_amount: fraction * 100.0,
        distance_goal_difference: round_half_up(year_distance - goal),
        distance_target_difference: round_half_up(year_distance - planned),
    }
}

fn pace(goal: Option<f64>, year_distance: f64, periods: &Periods, now: DateTime<Utc>) -> Pace {
    const SECONDS_PER_WEEK: f64 = 7.0 * 24.0 * 60.0 * 60.0;

    let elapsed_weeks = (now - periods.year_start).num_seconds().max(0) as f64 / SECONDS_PER_WEEK;
    let remaining_weeks = (periods.year_end - now).num_seconds().max(0) as f64 / SECONDS_PER_WEEK;

    let current = if elapsed_weeks > 0.0 {
        year_distance / elapsed_weeks
    } else {
        0.0
    };

    let (required, difference) = match goal {
        Some(goal) => {
            let remaining = (goal - year_distance).max(0.0);
            // Less than a week left: the whole remainder is this week's pace.
            let required = remaining / remaining_weeks.max(1.0);
            (required, current - required)
        }
        None => (0.0, 0.0),
    };

    let round1 = |x: f64| round_half_up(x * 10.0) / 10.0;

    Pace {
        current_weekly_average: round1(current),
        required_weekly_average: round1(required),
        difference: round1(difference),
        sign: check_sign(difference),
    }
}
