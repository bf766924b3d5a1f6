//! Core types for the LoveLog metrics engine
//!
//! This module defines the canonical record plus the derived values every stage produces:
//! scored days, aggregate stats, heatmap cells, radar profiles and trend series.
//! Derived values carry no identity and are recomputed whenever the collection changes.

use serde::{Deserialize, Serialize};

/// One calendar day of activity.
///
/// `date` is a zero-padded `YYYY-MM-DD` string and is the natural key of the collection.
/// String ordering on it equals calendar ordering, which the statistics rely on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    pub date: String,
    pub voice_minutes: u32,
    pub message_count: u32,
}

impl DailyRecord {
    pub fn new(date: impl Into<String>, voice_minutes: u32, message_count: u32) -> Self {
        Self {
            date: date.into(),
            voice_minutes,
            message_count,
        }
    }

    /// Zero-valued placeholder used for days without a record
    pub fn empty(date: impl Into<String>) -> Self {
        Self::new(date, 0, 0)
    }
}

/// A day paired with its intensity score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredDay {
    pub date: String,
    pub score: f64,
}

/// Aggregate statistics over a whole collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Sum of voice minutes
    pub total_voice_minutes: u64,
    /// Sum of messages
    pub total_messages: u64,
    /// Longest run of consecutive present records with a nonzero score
    pub longest_streak: u32,
    /// Earliest date holding the maximum score, empty when no day scored above zero
    pub max_activity_date: String,
    /// Number of input records (not the calendar span)
    pub total_days_logged: u32,
}

impl Stats {
    /// Split total voice minutes into whole hours and remaining minutes
    pub fn voice_hours_minutes(&self) -> (u64, u64) {
        (self.total_voice_minutes / 60, self.total_voice_minutes % 60)
    }
}

/// Number of distinct heatmap levels (0 through 4)
pub const LEVEL_COUNT: u8 = 5;

/// One day in a heatmap window.
///
/// Days without data carry a zero placeholder record, so "no data" and "zero activity"
/// look the same to consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapCell {
    pub date: String,
    pub score: f64,
    /// Intensity bucket in `0..LEVEL_COUNT`
    pub level: u8,
    pub record: DailyRecord,
}

/// Four radar axes, each an integer in 0..=100
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadarProfile {
    pub streak: u32,
    pub msg: u32,
    pub voice: u32,
    pub intimacy: u32,
}

/// One point of the short-term trend chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date: String,
    pub voice_minutes: f64,
    /// Message count divided by the message scale so both lines share one axis
    pub scaled_messages: f64,
}

/// Trend chart data with its vertical ceiling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSeries {
    pub points: Vec<TrendPoint>,
    pub ceiling: f64,
}

/// Report producer metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Complete dashboard payload handed to a rendering layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalReport {
    pub report_version: String,
    pub producer: ReportProducer,
    pub computed_at_utc: String,
    pub as_of: String,
    pub stats: Stats,
    pub radar: RadarProfile,
    pub heatmap: Vec<HeatmapCell>,
    pub trend: TrendSeries,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_wire_shape() {
        let record = DailyRecord::new("2024-01-01", 30, 100);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"date":"2024-01-01","voiceMinutes":30,"messageCount":100}"#
        );
    }

    #[test]
    fn test_voice_hours_minutes() {
        let stats = Stats {
            total_voice_minutes: 135,
            ..Default::default()
        };
        assert_eq!(stats.voice_hours_minutes(), (2, 15));
    }
}
