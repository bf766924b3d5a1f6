//! Radar benchmarks
//!
//! Maps aggregate stats and a recent window onto four 0-100 axes:
//! - **msg**: average messages per logged day against 200/day
//! - **voice**: average voice minutes per logged day against 60/day
//! - **streak**: longest streak against 14 days
//! - **intimacy**: mean score of the trailing records against 100 points/day

use crate::score::ScoreModel;
use crate::types::{DailyRecord, RadarProfile, Stats};
use serde::{Deserialize, Serialize};

/// Reference targets that map to a full (100) radar axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarBenchmarks {
    pub messages_per_day: f64,
    pub voice_minutes_per_day: f64,
    pub streak_days: f64,
    pub score_per_day: f64,
    /// Trailing records averaged for the intimacy axis
    pub recent_window: usize,
}

impl Default for RadarBenchmarks {
    fn default() -> Self {
        Self {
            messages_per_day: 200.0,
            voice_minutes_per_day: 60.0,
            streak_days: 14.0,
            score_per_day: 100.0,
            recent_window: 7,
        }
    }
}

/// Radar profile with default weights and benchmarks
pub fn compute_radar(records: &[DailyRecord], stats: &Stats) -> RadarProfile {
    compute_radar_with(records, stats, &ScoreModel::default(), &RadarBenchmarks::default())
}

/// Radar profile with explicit weights and benchmarks
pub fn compute_radar_with(
    records: &[DailyRecord],
    stats: &Stats,
    model: &ScoreModel,
    benchmarks: &RadarBenchmarks,
) -> RadarProfile {
    if records.is_empty() {
        return RadarProfile::default();
    }

    let days = records.len().max(1) as f64;

    let avg_messages = stats.total_messages as f64 / days;
    let avg_voice = stats.total_voice_minutes as f64 / days;

    // Trailing records in collection order, not necessarily calendar-contiguous
    let recent = &records[records.len().saturating_sub(benchmarks.recent_window)..];
    let recent_avg_score = if recent.is_empty() {
        0.0
    } else {
        recent.iter().map(|r| model.score_record(r)).sum::<f64>() / recent.len() as f64
    };

    RadarProfile {
        streak: axis(f64::from(stats.longest_streak), benchmarks.streak_days),
        msg: axis(avg_messages, benchmarks.messages_per_day),
        voice: axis(avg_voice, benchmarks.voice_minutes_per_day),
        intimacy: axis(recent_avg_score, benchmarks.score_per_day),
    }
}

/// Percentage of a benchmark, clamped to 0..=100 and rounded half up
fn axis(value: f64, benchmark: f64) -> u32 {
    if benchmark <= 0.0 {
        return 0;
    }
    (value / benchmark * 100.0).clamp(0.0, 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::compute_stats;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_profile() {
        assert_eq!(compute_radar(&[], &Stats::default()), RadarProfile::default());
    }

    #[test]
    fn test_message_axis_clamps() {
        let records = vec![DailyRecord::new("2024-01-01", 0, 100_000)];
        let stats = compute_stats(&records);
        assert_eq!(compute_radar(&records, &stats).msg, 100);
    }

    #[test]
    fn test_all_axes_clamp() {
        let records = vec![DailyRecord::new("2024-01-01", 10_000, 100_000)];
        let stats = Stats {
            longest_streak: 400,
            ..compute_stats(&records)
        };
        assert_eq!(
            compute_radar(&records, &stats),
            RadarProfile {
                streak: 100,
                msg: 100,
                voice: 100,
                intimacy: 100,
            }
        );
    }

    #[test]
    fn test_end_to_end_profile() {
        let records = vec![
            DailyRecord::new("2024-01-01", 30, 100),
            DailyRecord::new("2024-01-02", 0, 0),
            DailyRecord::new("2024-01-03", 45, 150),
        ];
        let stats = compute_stats(&records);
        let radar = compute_radar(&records, &stats);

        // 250 msgs / 3 days = 83.3 -> 41.67%
        assert_eq!(radar.msg, 42);
        // 75 min / 3 days = 25 -> 41.67%
        assert_eq!(radar.voice, 42);
        // 1 / 14 -> 7.14%
        assert_eq!(radar.streak, 7);
        // (50 + 0 + 75) / 3 = 41.67
        assert_eq!(radar.intimacy, 42);
    }

    #[test]
    fn test_intimacy_uses_trailing_records_in_collection_order() {
        let mut records: Vec<DailyRecord> = (1..=10)
            .map(|d| DailyRecord::new(format!("2024-01-{d:02}"), 100, 0))
            .collect();
        // Collection order, not date order, decides the trailing window
        records.insert(0, DailyRecord::new("2024-02-01", 0, 0));
        records.push(DailyRecord::new("2023-01-01", 30, 0));

        let stats = compute_stats(&records);
        let radar = compute_radar(&records, &stats);
        // Last 7: six at 100 plus one at 30
        assert_eq!(radar.intimacy, 90);
    }

    #[test]
    fn test_custom_benchmarks() {
        let records = vec![DailyRecord::new("2024-01-01", 30, 0)];
        let stats = compute_stats(&records);
        let benchmarks = RadarBenchmarks {
            voice_minutes_per_day: 30.0,
            ..Default::default()
        };
        let radar = compute_radar_with(&records, &stats, &ScoreModel::default(), &benchmarks);
        assert_eq!(radar.voice, 100);
    }
}
