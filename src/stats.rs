//! Aggregate statistics
//!
//! Reduces the record collection to totals, the longest streak and the peak day.
//! Records are sorted by date string first; this is calendar order only because dates
//! are zero-padded `YYYY-MM-DD`.

use crate::score::ScoreModel;
use crate::types::{DailyRecord, Stats};

/// Compute stats with the default score weights
pub fn compute_stats(records: &[DailyRecord]) -> Stats {
    compute_stats_with(records, &ScoreModel::default())
}

/// Compute stats with explicit score weights
pub fn compute_stats_with(records: &[DailyRecord], model: &ScoreModel) -> Stats {
    let mut sorted: Vec<&DailyRecord> = records.iter().collect();
    sorted.sort_by(|a, b| a.date.cmp(&b.date));

    let mut total_voice_minutes: u64 = 0;
    let mut total_messages: u64 = 0;
    let mut max_score = 0.0;
    let mut max_activity_date = String::new();
    let mut current_streak: u32 = 0;
    let mut longest_streak: u32 = 0;

    for record in sorted {
        total_voice_minutes += u64::from(record.voice_minutes);
        total_messages += u64::from(record.message_count);

        let day = model.scored_day(record);
        let score = day.score;

        // Strictly greater: ties keep the earliest date
        if score > max_score {
            max_score = score;
            max_activity_date = day.date;
        }

        // Only a present zero-score record breaks a streak; calendar gaps do not
        if score > 0.0 {
            current_streak += 1;
            longest_streak = longest_streak.max(current_streak);
        } else {
            current_streak = 0;
        }
    }

    Stats {
        total_voice_minutes,
        total_messages,
        longest_streak,
        max_activity_date,
        total_days_logged: records.len() as u32,
    }
}
