//! Heatmap projection
//!
//! Expands a sparse record collection into a dense, date-complete run of cells for either
//! a trailing year window or one calendar month, and buckets each day into levels 0-4.
//!
//! Levels are normalized against the maximum score of the whole input collection, not
//! just the window being drawn. One exceptional day therefore flattens contrast in every
//! other period; both views share this behavior.

use crate::calendar::{day_range, first_of_month, format_day, last_of_month, parse_day};
use crate::error::Result;
use crate::score::ScoreModel;
use crate::types::{DailyRecord, HeatmapCell, LEVEL_COUNT};
use chrono::{Datelike, Days, NaiveDate};
use std::collections::HashMap;

/// Days in the trailing year window
pub const DEFAULT_YEAR_WINDOW_DAYS: u32 = 365;

/// Longest accepted year window (a century)
pub const MAX_YEAR_WINDOW_DAYS: u32 = 36_525;

/// Ratio thresholds between levels 1|2, 2|3 and 3|4
const LEVEL_THRESHOLDS: [f64; 3] = [0.25, 0.50, 0.75];

/// Projects record collections onto calendar windows
#[derive(Debug, Clone, Copy)]
pub struct HeatmapProjector {
    model: ScoreModel,
    year_window_days: u32,
}

impl Default for HeatmapProjector {
    fn default() -> Self {
        Self::new(ScoreModel::default(), DEFAULT_YEAR_WINDOW_DAYS)
    }
}

impl HeatmapProjector {
    pub fn new(model: ScoreModel, year_window_days: u32) -> Self {
        Self {
            model,
            year_window_days: year_window_days.clamp(1, MAX_YEAR_WINDOW_DAYS),
        }
    }

    /// Cells for `[as_of - (window - 1) days, as_of]`, one per day.
    ///
    /// The window stops at the earliest representable date.
    pub fn project_year(&self, records: &[DailyRecord], as_of: NaiveDate) -> Vec<HeatmapCell> {
        let start = as_of
            .checked_sub_days(Days::new(u64::from(self.year_window_days) - 1))
            .unwrap_or(NaiveDate::MIN);
        self.project_range(records, start, as_of)
    }

    /// Cells for every day of a calendar month (1-based month)
    pub fn project_month(
        &self,
        records: &[DailyRecord],
        year: i32,
        month: u32,
    ) -> Result<Vec<HeatmapCell>> {
        let start = first_of_month(year, month)?;
        let end = last_of_month(year, month)?;
        Ok(self.project_range(records, start, end))
    }

    fn project_range(
        &self,
        records: &[DailyRecord],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<HeatmapCell> {
        let by_date: HashMap<&str, &DailyRecord> =
            records.iter().map(|r| (r.date.as_str(), r)).collect();
        let max_score = normalization_max(&self.model, records);

        day_range(start, end)
            .map(|day| {
                let date = format_day(day);
                let record = by_date
                    .get(date.as_str())
                    .map(|r| (*r).clone())
                    .unwrap_or_else(|| DailyRecord::empty(date.clone()));
                let score = self.model.score_record(&record);
                HeatmapCell {
                    level: level_for(score, max_score),
                    date,
                    score,
                    record,
                }
            })
            .collect()
    }
}

/// Maximum score over the whole collection, with 0 replaced by 1
fn normalization_max(model: &ScoreModel, records: &[DailyRecord]) -> f64 {
    let max = model.max_score(records);
    if max == 0.0 {
        1.0
    } else {
        max
    }
}

/// Bucket a score against a (nonzero) maximum.
///
/// Comparisons are strict, so a ratio of exactly 0.25 lands in level 2.
pub fn level_for(score: f64, max_score: f64) -> u8 {
    if score <= 0.0 {
        return 0;
    }
    let ratio = score / max_score;
    LEVEL_THRESHOLDS
        .iter()
        .position(|threshold| ratio < *threshold)
        .map_or(LEVEL_COUNT - 1, |idx| idx as u8 + 1)
}

/// Year heatmap with default weights and window
pub fn project_year(records: &[DailyRecord], as_of: NaiveDate) -> Vec<HeatmapCell> {
    HeatmapProjector::default().project_year(records, as_of)
}

/// Month heatmap with default weights
pub fn project_month(records: &[DailyRecord], year: i32, month: u32) -> Result<Vec<HeatmapCell>> {
    HeatmapProjector::default().project_month(records, year, month)
}

/// Group cells into Sunday-first week columns.
///
/// The first column is padded with `None` when the window does not begin on a Sunday;
/// the last column may be short.
pub fn week_columns(cells: &[HeatmapCell]) -> Vec<Vec<Option<HeatmapCell>>> {
    let leading = cells
        .first()
        .and_then(|c| parse_day(&c.date).ok())
        .map_or(0, |d| d.weekday().num_days_from_sunday() as usize);

    let slots: Vec<Option<HeatmapCell>> = std::iter::repeat(None)
        .take(leading)
        .chain(cells.iter().cloned().map(Some))
        .collect();

    slots.chunks(7).map(|week| week.to_vec()).collect()
}
