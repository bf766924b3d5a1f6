//! Short-term trend window
//!
//! Slices the most recent records for charting. No resampling or gap filling happens
//! here; the window is the tail of the collection in whatever order the caller holds it.

use crate::types::{DailyRecord, TrendPoint, TrendSeries};

/// Records shown in the trend chart by default
pub const DEFAULT_TREND_DAYS: usize = 14;

/// Messages are divided by this so both lines share one vertical axis
pub const MESSAGE_SCALE: f64 = 5.0;

/// Lowest chart ceiling, so a quiet fortnight is not stretched to full height
pub const MIN_TREND_CEILING: f64 = 10.0;

/// The last `n` records, or all of them when fewer exist
pub fn recent_window(records: &[DailyRecord], n: usize) -> &[DailyRecord] {
    &records[records.len().saturating_sub(n)..]
}

/// Chart series for the last `n` records
pub fn trend_series(records: &[DailyRecord], n: usize) -> TrendSeries {
    let points: Vec<TrendPoint> = recent_window(records, n)
        .iter()
        .map(|r| TrendPoint {
            date: r.date.clone(),
            voice_minutes: f64::from(r.voice_minutes),
            scaled_messages: f64::from(r.message_count) / MESSAGE_SCALE,
        })
        .collect();

    let ceiling = points
        .iter()
        .map(|p| p.voice_minutes.max(p.scaled_messages))
        .fold(MIN_TREND_CEILING, f64::max);

    TrendSeries { points, ceiling }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(n: usize) -> Vec<DailyRecord> {
        (0..n)
            .map(|i| DailyRecord::new(format!("2024-01-{:02}", i + 1), i as u32, 0))
            .collect()
    }

    #[test]
    fn test_recent_window_tail() {
        let all = records(20);
        let window = recent_window(&all, DEFAULT_TREND_DAYS);
        assert_eq!(window.len(), 14);
        assert_eq!(window[0].date, "2024-01-07");
        assert_eq!(window[13].date, "2024-01-20");
    }

    #[test]
    fn test_recent_window_short_collection() {
        let all = records(3);
        assert_eq!(recent_window(&all, 14), all.as_slice());
        assert!(recent_window(&[], 14).is_empty());
        assert!(recent_window(&all, 0).is_empty());
    }

    #[test]
    fn test_recent_window_keeps_caller_order() {
        let mut all = records(4);
        all.reverse();
        let window = recent_window(&all, 2);
        assert_eq!(window[0].date, "2024-01-02");
        assert_eq!(window[1].date, "2024-01-01");
    }

    #[test]
    fn test_trend_series_scaling_and_ceiling() {
        let all = vec![
            DailyRecord::new("2024-01-01", 20, 50),
            DailyRecord::new("2024-01-02", 5, 300),
        ];
        let series = trend_series(&all, 14);
        assert_eq!(series.points.len(), 2);
        assert_eq!(series.points[0].scaled_messages, 10.0);
        assert_eq!(series.ceiling, 60.0);
    }

    #[test]
    fn test_trend_ceiling_floor() {
        let all = vec![DailyRecord::new("2024-01-01", 2, 5)];
        assert_eq!(trend_series(&all, 14).ceiling, MIN_TREND_CEILING);
        assert_eq!(trend_series(&[], 14).ceiling, MIN_TREND_CEILING);
    }
}
