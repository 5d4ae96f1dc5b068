// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Stats table rendering.
//!
//! The `view` level gates the reveal: at 2 and above cells carry the
//! computed numbers, below that every cell shows a zero placeholder.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::services::stats::{check_sign, round_half_up, Alignment, Header, Sign, StatsTable};
use crate::views::Color;

/// View level from which real numbers are shown.
pub const VIEW_REVEALED: u8 = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub struct RenderedCell {
    pub alignment: Alignment,
    /// "250 km", or "0 km" before the reveal
    pub text: String,
    /// Right-aligned cells only: "+12", "-3", or "" before the reveal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difference_color: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub struct RenderedRow {
    pub label: String,
    /// Odd rows get the alternate background.
    pub striped: bool,
    pub cells: Vec<RenderedCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RenderedTable {
    pub headers: Vec<Header>,
    pub rows: Vec<RenderedRow>,
}

impl StatsTable {
    /// Lay the table out for display at the given reveal level.
    pub fn render(&self, view: u8) -> RenderedTable {
        let revealed = view >= VIEW_REVEALED;

        let rows = self
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let left = row.columns_left.iter().map(|column| RenderedCell {
                    alignment: Alignment::Left,
                    text: metric(revealed, column.data, &column.unit),
                    difference: None,
                    difference_color: None,
                });

                let right = row.columns_right.iter().map(|column| RenderedCell {
                    alignment: Alignment::Right,
                    text: metric(revealed, column.data, &column.unit),
                    difference: Some(if revealed {
                        signed(column.difference)
                    } else {
                        String::new()
                    }),
                    difference_color: (check_sign(column.difference) == Sign::Negative)
                        .then_some(Color::Orange),
                });

                RenderedRow {
                    label: row.label.clone(),
                    striped: index % 2 == 1,
                    cells: left.chain(right).collect(),
                }
            })
            .collect();

        RenderedTable {
            headers: self.headers.clone(),
            rows,
        }
    }
}

fn metric(revealed: bool, data: f64, unit: &str) -> String {
    let data = if revealed { round_half_up(data) } else { 0.0 };
    format!("{} {}", format_count(data), unit)
}

fn signed(number: f64) -> String {
    let rounded = round_half_up(number);
    if rounded > 0.0 {
        format!("+{}", format_count(rounded))
    } else {
        format_count(rounded)
    }
}

/// Whole numbers without a trailing ".0" and without "-0".
fn format_count(number: f64) -> String {
    if number == 0.0 {
        "0".to_string()
    } else {
        format!("{}", number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::stats::{Column, DifferenceColumn, Row};

    fn table() -> StatsTable {
        StatsTable {
            headers: vec![
                Header {
                    label: String::new(),
                    alignment: Alignment::Left,
                },
                Header {
                    label: "Distance".to_string(),
                    alignment: Alignment::Left,
                },
                Header {
                    label: "Plan".to_string(),
                    alignment: Alignment::Right,
                },
            ],
            rows: vec![
                Row {
                    label: "Year".to_string(),
                    columns_left: vec![Column {
                        data: 250.0,
                        unit: "km".to_string(),
                    }],
                    columns_right: vec![DifferenceColumn {
                        data: 790.0,
                        difference: -540.0,
                        unit: "km".to_string(),
                    }],
                },
                Row {
                    label: "Week".to_string(),
                    columns_left: vec![Column {
                        data: 31.6,
                        unit: "km".to_string(),
                    }],
                    columns_right: vec![DifferenceColumn {
                        data: 14.0,
                        difference: 17.6,
                        unit: "km".to_string(),
                    }],
                },
            ],
        }
    }

    #[test]
    fn test_revealed_table() {
        let rendered = table().render(2);

        assert_eq!(rendered.headers.len(), 3);
        let year = &rendered.rows[0];
        assert!(!year.striped);
        assert_eq!(year.cells[0].text, "250 km");
        assert_eq!(year.cells[0].difference, None);
        assert_eq!(year.cells[1].alignment, Alignment::Right);
        assert_eq!(year.cells[1].text, "790 km");
        assert_eq!(year.cells[1].difference.as_deref(), Some("-540"));
        assert_eq!(year.cells[1].difference_color, Some(Color::Orange));

        let week = &rendered.rows[1];
        assert!(week.striped);
        assert_eq!(week.cells[0].text, "32 km");
        assert_eq!(week.cells[1].difference.as_deref(), Some("+18"));
        assert_eq!(week.cells[1].difference_color, None);
    }

    #[test]
    fn test_placeholder_levels() {
        for view in [0, 1] {
            let rendered = table().render(view);
            for row in &rendered.rows {
                assert_eq!(row.cells[0].text, "0 km");
                assert_eq!(row.cells[1].text, "0 km");
                assert_eq!(row.cells[1].difference.as_deref(), Some(""));
            }
        }
    }

    #[test]
    fn test_signed_zero() {
        assert_eq!(signed(0.0), "0");
        assert_eq!(signed(-0.3), "0");
        assert_eq!(signed(4.0), "+4");
        assert_eq!(signed(-4.0), "-4");
        assert_eq!(signed(-0.5), "0");
        assert_eq!(signed(0.5), "+1");
        assert_eq!(signed(-1.5), "-1");
    }

    #[test]
    fn test_half_km_behind_is_not_orange() {
        let mut table = table();
        table.rows[0].columns_right[0].difference = -0.5;

        let year = &table.render(2).rows[0];
        assert_eq!(year.cells[1].difference.as_deref(), Some("0"));
        assert_eq!(year.cells[1].difference_color, None);
    }
}
