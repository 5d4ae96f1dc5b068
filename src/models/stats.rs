//! Athlete aggregate totals as reported by `/athletes/{id}/stats`.
//!
//! Strava keeps rolling totals per activity type for the last four weeks,
//! the current year and all time. Only the year-to-date totals feed the
//! goal views; the rest are carried for the profile panel.

use serde::{Deserialize, Serialize};

use crate::models::{Activity, ActivityType};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A block of aggregate totals (one activity type, one period).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivityTotals {
    #[serde(default)]
    pub count: u32,
    /// Meters
    #[serde(default)]
    pub distance: f64,
    /// Seconds
    #[serde(default)]
    pub moving_time: u64,
    /// Seconds
    #[serde(default)]
    pub elapsed_time: u64,
    /// Meters
    #[serde(default)]
    pub elevation_gain: f64,
}

impl ActivityTotals {
    /// Sum a set of activities into a totals block.
    pub fn from_activities<'a>(activities: impl IntoIterator<Item = &'a Activity>) -> Self {
        activities
            .into_iter()
            .fold(Self::default(), |mut totals, activity| {
                totals.count += 1;
                totals.distance += activity.distance;
                totals.moving_time += activity.moving_time;
                totals.elapsed_time += activity.elapsed_time;
                totals.elevation_gain += activity.total_elevation_gain;
                totals
            })
    }

    pub fn distance_km(&self) -> f64 {
        self.distance / 1000.0
    }
}

/// Rolling statistics for an athlete.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AthleteStats {
    // ─── Year to date ────────────────────────────────────────────
    #[serde(default)]
    pub ytd_run_totals: ActivityTotals,
    #[serde(default)]
    pub ytd_ride_totals: ActivityTotals,
    #[serde(default)]
    pub ytd_swim_totals: ActivityTotals,

    // ─── Last four weeks ─────────────────────────────────────────
    #[serde(default)]
    pub recent_run_totals: ActivityTotals,
    #[serde(default)]
    pub recent_ride_totals: ActivityTotals,
    #[serde(default)]
    pub recent_swim_totals: ActivityTotals,

    // ─── All time ────────────────────────────────────────────────
    #[serde(default)]
    pub all_run_totals: ActivityTotals,
    #[serde(default)]
    pub all_ride_totals: ActivityTotals,
    #[serde(default)]
    pub all_swim_totals: ActivityTotals,

    #[serde(default)]
    pub biggest_ride_distance: Option<f64>,
    #[serde(default)]
    pub biggest_climb_elevation_gain: Option<f64>,
}

impl AthleteStats {
    /// Year-to-date baseline for the selected activity type.
    ///
    /// Anything that is not a run or a ride falls back to swim totals.
    pub fn year_to_date(&self, activity: ActivityType) -> &ActivityTotals {
        match activity {
            ActivityType::Run => &self.ytd_run_totals,
            ActivityType::Ride => &self.ytd_ride_totals,
            _ => &self.ytd_swim_totals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn make_activity(id: u64, distance: f64) -> Activity {
        Activity {
            id,
            name: format!("Test Activity {}", id),
            activity_type: ActivityType::Run,
            start_date: Utc.with_ymd_and_hms(2026, 3, 2, 7, 0, 0).unwrap(),
            distance,
            moving_time: 1800,
            elapsed_time: 2000,
            total_elevation_gain: 50.0,
        }
    }

    #[test]
    fn test_totals_from_activities() {
        let activities = vec![make_activity(1, 5000.0), make_activity(2, 7500.0)];
        let totals = ActivityTotals::from_activities(&activities);

        assert_eq!(totals.count, 2);
        assert_eq!(totals.distance, 12500.0);
        assert_eq!(totals.distance_km(), 12.5);
        assert_eq!(totals.moving_time, 3600);
        assert_eq!(totals.elevation_gain, 100.0);
    }

    #[test]
    fn test_totals_from_no_activities() {
        let totals = ActivityTotals::from_activities(&[]);
        assert_eq!(totals, ActivityTotals::default());
    }

    #[test]
    fn test_year_to_date_selects_type() {
        let stats = AthleteStats {
            ytd_run_totals: ActivityTotals {
                count: 3,
                ..Default::default()
            },
            ytd_ride_totals: ActivityTotals {
                count: 5,
                ..Default::default()
            },
            ytd_swim_totals: ActivityTotals {
                count: 7,
                ..Default::default()
            },
            ..Default::default()
        };

        assert_eq!(stats.year_to_date(ActivityType::Run).count, 3);
        assert_eq!(stats.year_to_date(ActivityType::Ride).count, 5);
        assert_eq!(stats.year_to_date(ActivityType::Swim).count, 7);
    }

    #[test]
    fn test_partial_stats_payload() {
        let stats: AthleteStats =
            serde_json::from_str(r#"{"ytd_run_totals":{"count":4,"distance":25000.0}}"#).unwrap();
        assert_eq!(stats.ytd_run_totals.count, 4);
        assert_eq!(stats.ytd_ride_totals, ActivityTotals::default());
    }
}
