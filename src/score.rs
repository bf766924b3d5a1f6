//! Score model
//!
//! One weighted sum turns a day's raw counts into a comparable intensity score. Every
//! other stage scores through a `ScoreModel` so heatmap levels and radar axes agree.

use crate::types::{DailyRecord, ScoredDay};
use serde::{Deserialize, Serialize};

/// Points per voice minute
pub const DEFAULT_VOICE_WEIGHT: f64 = 1.0;

/// Points per message (5 messages weigh as much as 1 voice minute)
pub const DEFAULT_MESSAGE_WEIGHT: f64 = 0.2;

/// Weights for the intensity score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreModel {
    pub voice_weight: f64,
    pub message_weight: f64,
}

impl Default for ScoreModel {
    fn default() -> Self {
        Self {
            voice_weight: DEFAULT_VOICE_WEIGHT,
            message_weight: DEFAULT_MESSAGE_WEIGHT,
        }
    }
}

impl ScoreModel {
    pub fn new(voice_weight: f64, message_weight: f64) -> Self {
        Self {
            voice_weight,
            message_weight,
        }
    }

    /// Weighted intensity of one day's counts
    pub fn score(&self, voice_minutes: u32, message_count: u32) -> f64 {
        f64::from(voice_minutes) * self.voice_weight + f64::from(message_count) * self.message_weight
    }

    pub fn score_record(&self, record: &DailyRecord) -> f64 {
        self.score(record.voice_minutes, record.message_count)
    }

    pub fn scored_day(&self, record: &DailyRecord) -> ScoredDay {
        ScoredDay {
            date: record.date.clone(),
            score: self.score_record(record),
        }
    }

    /// Highest score in the collection, 0 when empty
    pub fn max_score(&self, records: &[DailyRecord]) -> f64 {
        records
            .iter()
            .map(|r| self.score_record(r))
            .fold(0.0, f64::max)
    }
}

/// Score with the default weights
pub fn compute_score(voice_minutes: u32, message_count: u32) -> f64 {
    ScoreModel::default().score(voice_minutes, message_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        for (v, m) in [(0, 0), (30, 100), (45, 150), (1, 5), (120, 299)] {
            let expected = f64::from(v) * 1.0 + f64::from(m) * 0.2;
            assert!((compute_score(v, m) - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_five_messages_equal_one_minute() {
        assert!((compute_score(0, 5) - compute_score(1, 0)).abs() < 1e-9);
    }

    #[test]
    fn test_custom_weights() {
        let model = ScoreModel::new(2.0, 1.0);
        assert!((model.score(10, 3) - 23.0).abs() < 1e-9);
    }

    #[test]
    fn test_scored_day() {
        let day = ScoreModel::default().scored_day(&DailyRecord::new("2024-01-01", 30, 100));
        assert_eq!(day.date, "2024-01-01");
        assert!((day.score - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_max_score() {
        let model = ScoreModel::default();
        assert_eq!(model.max_score(&[]), 0.0);
        let records = vec![
            DailyRecord::new("2024-01-01", 30, 100),
            DailyRecord::new("2024-01-03", 45, 150),
        ];
        assert!((model.max_score(&records) - 75.0).abs() < 1e-9);
    }
}
