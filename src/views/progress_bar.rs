// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Progress bar view-model: bar widths, the "today" marker and the two
//! status labels (against plan, against goal).

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::services::stats::{check_sign, Progress, Sign};
use crate::views::Color;

/// Which delta a label describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delta {
    Plan,
    Goal,
}

fn status(delta: Delta, sign: Sign) -> &'static str {
    match (delta, sign) {
        (Delta::Plan, Sign::Negative) => "behind plan",
        (Delta::Plan, Sign::Positive) => "before plan",
        (Delta::Plan, Sign::Zero) => "on plan",
        (Delta::Goal, Sign::Negative) => "to go",
        (Delta::Goal, Sign::Positive) => "extra",
        (Delta::Goal, Sign::Zero) => "On goal",
    }
}

/// A signed difference shown above the bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub struct DifferenceLabel {
    pub sign: Sign,
    /// Absolute difference in km.
    pub amount: f64,
    /// "12 km", shown only when the sign is not zero.
    pub amount_text: Option<String>,
    pub status: String,
    pub color: Color,
}

impl DifferenceLabel {
    fn new(delta: Delta, difference: f64) -> Self {
        let sign = check_sign(difference);
        let amount = difference.abs();
        let amount_text = match sign {
            Sign::Zero => None,
            _ => Some(format!("{} km", amount)),
        };

        Self {
            sign,
            amount,
            amount_text,
            status: status(delta, sign).to_string(),
            color: Color::for_sign(sign),
        }
    }

    /// Full label text, e.g. "12 km behind plan".
    pub fn text(&self) -> String {
        match &self.amount_text {
            Some(amount) => format!("{} {}", amount, self.status),
            None => self.status.clone(),
        }
    }
}

/// Everything needed to draw the progress bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProgressBar {
    /// Position of the "today" marker (percent), hidden when `None`.
    pub today: Option<f64>,
    /// Width of the done segment (percent).
    pub progress: f64,
    /// Width of the expected-by-now segment (percent).
    pub target: f64,
    pub plan: DifferenceLabel,
    pub goal: DifferenceLabel,
}

impl ProgressBar {
    pub fn from_progress(progress: &Progress) -> Self {
        Self {
            today: today_marker(progress.distance_target_amount),
            progress: progress.distance_amount,
            target: progress.distance_target_amount,
            plan: DifferenceLabel::new(Delta::Plan, progress.distance_target_difference),
            goal: DifferenceLabel::new(Delta::Goal, progress.distance_goal_difference),
        }
    }
}

/// The marker is only drawn for targets in `(0, 100]`.
pub fn today_marker(target: f64) -> Option<f64> {
    if target > 0.0 && target <= 100.0 {
        Some(target)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(target_amount: f64, goal_diff: f64, target_diff: f64) -> Progress {
        Progress {
            distance_amount: 40.0,
            distance_target_amount: target_amount,
            distance_goal_difference: goal_diff,
            distance_target_difference: target_diff,
        }
    }

    #[test]
    fn test_today_marker_boundaries() {
        assert_eq!(today_marker(0.0), None);
        assert_eq!(today_marker(100.5), None);
        assert_eq!(today_marker(250.0), None);
        assert_eq!(today_marker(0.01), Some(0.01));
        assert_eq!(today_marker(50.0), Some(50.0));
        assert_eq!(today_marker(100.0), Some(100.0));
    }

    #[test]
    fn test_behind_plan_and_to_go() {
        let bar = ProgressBar::from_progress(&progress(55.0, -600.0, -150.0));

        assert_eq!(bar.today, Some(55.0));
        assert_eq!(bar.progress, 40.0);
        assert_eq!(bar.plan.status, "behind plan");
        assert_eq!(bar.plan.color, Color::Orange);
        assert_eq!(bar.plan.text(), "150 km behind plan");
        assert_eq!(bar.goal.status, "to go");
        assert_eq!(bar.goal.amount, 600.0);
        assert_eq!(bar.goal.text(), "600 km to go");
    }

    #[test]
    fn test_before_plan_and_extra() {
        let bar = ProgressBar::from_progress(&progress(99.0, 12.0, 3.0));

        assert_eq!(bar.plan.status, "before plan");
        assert_eq!(bar.plan.color, Color::Green);
        assert_eq!(bar.goal.status, "extra");
        assert_eq!(bar.goal.text(), "12 km extra");
    }

    #[test]
    fn test_on_plan_hides_amount() {
        let bar = ProgressBar::from_progress(&progress(0.0, 0.0, -0.4));

        assert_eq!(bar.today, None);
        assert_eq!(bar.plan.status, "on plan");
        assert_eq!(bar.plan.amount_text, None);
        assert_eq!(bar.plan.color, Color::Black);
        assert_eq!(bar.goal.text(), "On goal");
    }
}
