// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! View-models for the dashboard tabs.

pub mod progress_bar;
pub mod table;
pub mod timeline;

pub use progress_bar::ProgressBar;
pub use table::RenderedTable;
pub use timeline::Timeline;

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::services::stats::{DerivedStats, Pace, Sign};

/// Status colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Orange,
    Green,
    Black,
}

impl Color {
    /// Orange when behind, green when ahead, default otherwise.
    pub fn for_sign(sign: Sign) -> Self {
        match sign {
            Sign::Negative => Color::Orange,
            Sign::Positive => Color::Green,
            Sign::Zero => Color::Black,
        }
    }
}

/// Dashboard tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Progress,
    Pace,
    Stats,
}

/// The selected tab's view-model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(tag = "tab", rename_all = "lowercase")]
pub enum TabView {
    Progress {
        progress_bar: ProgressBar,
        timeline: Timeline,
    },
    Pace {
        pace: Pace,
        progress_bar: ProgressBar,
    },
    Stats {
        table: RenderedTable,
    },
}

impl TabView {
    pub fn render(stats: &DerivedStats, tab: Tab, view: u8) -> Self {
        match tab {
            Tab::Progress => TabView::Progress {
                progress_bar: ProgressBar::from_progress(&stats.progress),
                timeline: stats.timeline.clone(),
            },
            Tab::Pace => TabView::Pace {
                pace: stats.pace,
                progress_bar: ProgressBar::from_progress(&stats.progress),
            },
            Tab::Stats => TabView::Stats {
                table: stats.current.render(view),
            },
        }
    }
}
