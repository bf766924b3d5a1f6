//! Dashboard report encoding
//!
//! Bundles every derived view of a collection into one JSON document for a rendering
//! layer: stats, radar, the year heatmap and the trend series, plus producer metadata.

use crate::calendar::format_day;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::radar::compute_radar_with;
use crate::stats::compute_stats_with;
use crate::trend::trend_series;
use crate::types::{DailyRecord, JournalReport, ReportProducer};
use crate::{LOVELOG_VERSION, PRODUCER_NAME};
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

/// Current report schema version
pub const REPORT_VERSION: &str = "1.0.0";

/// Encoder for dashboard report payloads
pub struct ReportEncoder {
    instance_id: String,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    /// Compute every derived view of `records` as of a calendar day
    pub fn encode(
        &self,
        records: &[DailyRecord],
        as_of: NaiveDate,
        config: &EngineConfig,
    ) -> JournalReport {
        let stats = compute_stats_with(records, &config.scoring);
        let radar = compute_radar_with(records, &stats, &config.scoring, &config.radar);
        let heatmap = config.projector().project_year(records, as_of);
        let trend = trend_series(records, config.trend_days);

        JournalReport {
            report_version: REPORT_VERSION.to_string(),
            producer: ReportProducer {
                name: PRODUCER_NAME.to_string(),
                version: LOVELOG_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            computed_at_utc: Utc::now().to_rfc3339(),
            as_of: format_day(as_of),
            stats,
            radar,
            heatmap,
            trend,
        }
    }

    /// Encode to a pretty JSON string
    pub fn encode_to_json(
        &self,
        records: &[DailyRecord],
        as_of: NaiveDate,
        config: &EngineConfig,
    ) -> Result<String> {
        let report = self.encode(records, as_of, config);
        Ok(serde_json::to_string_pretty(&report)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::parse_day;

    fn sample_records() -> Vec<DailyRecord> {
        vec![
            DailyRecord::new("2024-01-01", 30, 100),
            DailyRecord::new("2024-01-02", 0, 0),
            DailyRecord::new("2024-01-03", 45, 150),
        ]
    }

    #[test]
    fn test_encode_report() {
        let encoder = ReportEncoder::with_instance_id("test-instance".to_string());
        let report = encoder.encode(
            &sample_records(),
            parse_day("2024-01-03").unwrap(),
            &EngineConfig::default(),
        );

        assert_eq!(report.report_version, REPORT_VERSION);
        assert_eq!(report.producer.name, PRODUCER_NAME);
        assert_eq!(report.producer.version, LOVELOG_VERSION);
        assert_eq!(report.producer.instance_id, "test-instance");
        assert_eq!(report.as_of, "2024-01-03");

        assert_eq!(report.stats.total_voice_minutes, 75);
        assert_eq!(report.stats.max_activity_date, "2024-01-03");
        assert_eq!(report.radar.streak, 7);

        assert_eq!(report.heatmap.len(), 365);
        let last = report.heatmap.last().unwrap();
        assert_eq!(last.date, "2024-01-03");
        assert_eq!(last.level, 4);

        assert_eq!(report.trend.points.len(), 3);
    }

    #[test]
    fn test_config_flows_into_report() {
        let config = EngineConfig {
            year_window_days: 30,
            trend_days: 2,
            ..Default::default()
        };
        let report =
            ReportEncoder::new().encode(&sample_records(), parse_day("2024-01-31").unwrap(), &config);
        assert_eq!(report.heatmap.len(), 30);
        assert_eq!(report.trend.points.len(), 2);
        assert!(!report.producer.instance_id.is_empty());
    }

    #[test]
    fn test_encode_to_json() {
        let json = ReportEncoder::new()
            .encode_to_json(&[], parse_day("2024-01-01").unwrap(), &EngineConfig::default())
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["stats"]["maxActivityDate"], "");
        assert_eq!(parsed["radar"]["intimacy"], 0);
        assert_eq!(parsed["heatmap"].as_array().unwrap().len(), 365);
        assert_eq!(parsed["trend"]["ceiling"], 10.0);
    }
}
