//! Engine configuration
//!
//! Every knob has a default that reproduces the stock dashboard: voice 1.0 / message 0.2
//! weights, 200 msg / 60 min / 14 day / 100 point radar targets, a 365-day heatmap and a
//! 14-record trend window. A JSON file may override any subset of keys.

use crate::error::Result;
use crate::heatmap::{HeatmapProjector, DEFAULT_YEAR_WINDOW_DAYS};
use crate::radar::RadarBenchmarks;
use crate::score::ScoreModel;
use crate::trend::DEFAULT_TREND_DAYS;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub scoring: ScoreModel,
    pub radar: RadarBenchmarks,
    pub year_window_days: u32,
    pub trend_days: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scoring: ScoreModel::default(),
            radar: RadarBenchmarks::default(),
            year_window_days: DEFAULT_YEAR_WINDOW_DAYS,
            trend_days: DEFAULT_TREND_DAYS,
        }
    }
}

impl EngineConfig {
    /// Load configuration from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize configuration to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a config file, falling back to defaults when it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file absent, using defaults");
            return Ok(Self::default());
        }
        let config = Self::from_json(&std::fs::read_to_string(path)?)?;
        tracing::info!(path = %path.display(), "loaded engine config");
        Ok(config)
    }

    pub fn projector(&self) -> HeatmapProjector {
        HeatmapProjector::new(self.scoring, self.year_window_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_override() {
        let config = EngineConfig::from_json(
            r#"{ "scoring": { "message_weight": 0.5 }, "trend_days": 7 }"#,
        )
        .unwrap();
        assert_eq!(config.scoring.voice_weight, 1.0);
        assert_eq!(config.scoring.message_weight, 0.5);
        assert_eq!(config.trend_days, 7);
        assert_eq!(config.radar, RadarBenchmarks::default());
        assert_eq!(config.year_window_days, 365);
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(EngineConfig::from_json("{}").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_round_trip() {
        let config = EngineConfig {
            trend_days: 30,
            ..Default::default()
        };
        let loaded = EngineConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, EngineConfig::default());
    }
}
