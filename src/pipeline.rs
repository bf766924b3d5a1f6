//! Journal orchestration
//!
//! This module provides the public API for LoveLog. `Journal` owns the canonical
//! collection on top of an injected `RecordStore`: it loads once, applies upserts and
//! imports, persists after each successful change, and derives every view from the
//! collection it currently holds. A change is committed in memory only after the store
//! accepted it, so derived views never see a half-applied import.

use crate::calendar::parse_day;
use crate::config::EngineConfig;
use crate::encoder::ReportEncoder;
use crate::error::Result;
use crate::import::{parse_entry, parse_import};
use crate::radar::compute_radar_with;
use crate::stats::compute_stats_with;
use crate::store::{export_json, replace_all, upsert, RecordStore};
use crate::trend::{recent_window, trend_series};
use crate::types::{DailyRecord, HeatmapCell, JournalReport, RadarProfile, Stats, TrendSeries};
use chrono::NaiveDate;

/// Build a dashboard report from a raw records JSON array.
///
/// # Arguments
/// * `records_json` - Bulk payload in the import shape
/// * `as_of` - Last day of the year heatmap (`YYYY-MM-DD`)
///
/// # Example
/// ```ignore
/// let report = records_to_report(
///     r#"[{"date": "2024-01-01", "voiceMinutes": 30, "messageCount": 100}]"#,
///     "2024-01-31",
/// )?;
/// ```
pub fn records_to_report(records_json: &str, as_of: &str) -> Result<String> {
    let records = parse_import(records_json)?;
    let as_of = parse_day(as_of)?;
    ReportEncoder::new().encode_to_json(&records, as_of, &EngineConfig::default())
}

/// Stateful journal over a persistent record store
pub struct Journal<S: RecordStore> {
    store: S,
    config: EngineConfig,
    records: Vec<DailyRecord>,
    encoder: ReportEncoder,
}

impl<S: RecordStore> Journal<S> {
    /// Open a journal with default configuration
    pub fn open(store: S) -> Result<Self> {
        Self::with_config(store, EngineConfig::default())
    }

    /// Open a journal, reading the store once
    pub fn with_config(store: S, config: EngineConfig) -> Result<Self> {
        let records = store.load()?;
        tracing::info!(count = records.len(), "journal opened");
        Ok(Self {
            store,
            config,
            records,
            encoder: ReportEncoder::new(),
        })
    }

    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Upsert one record by date
    pub fn add(&mut self, record: DailyRecord) -> Result<()> {
        let date = record.date.clone();
        let next = upsert(&self.records, record);
        self.commit(next)?;
        tracing::info!(%date, "record upserted");
        Ok(())
    }

    /// Upsert a record built from form fields
    pub fn add_entry(&mut self, date: &str, voice_minutes: &str, message_count: &str) -> Result<()> {
        self.add(parse_entry(date, voice_minutes, message_count)?)
    }

    /// Replace the whole collection with a bulk JSON payload.
    ///
    /// Nothing changes if the payload is rejected. Returns the imported record count.
    pub fn import_json(&mut self, json: &str) -> Result<usize> {
        let imported = parse_import(json)?;
        let count = imported.len();
        self.replace(imported)?;
        Ok(count)
    }

    /// Replace the whole collection
    pub fn replace(&mut self, records: Vec<DailyRecord>) -> Result<()> {
        let next = replace_all(&self.records, records);
        self.commit(next)?;
        tracing::info!(count = self.records.len(), "collection replaced");
        Ok(())
    }

    /// The collection in its export shape
    pub fn export_json(&self) -> Result<String> {
        export_json(&self.records)
    }

    pub fn stats(&self) -> Stats {
        compute_stats_with(&self.records, &self.config.scoring)
    }

    pub fn radar(&self) -> RadarProfile {
        let stats = self.stats();
        compute_radar_with(&self.records, &stats, &self.config.scoring, &self.config.radar)
    }

    pub fn year_heatmap(&self, as_of: NaiveDate) -> Vec<HeatmapCell> {
        self.config.projector().project_year(&self.records, as_of)
    }

    pub fn month_heatmap(&self, year: i32, month: u32) -> Result<Vec<HeatmapCell>> {
        self.config.projector().project_month(&self.records, year, month)
    }

    pub fn recent(&self) -> &[DailyRecord] {
        recent_window(&self.records, self.config.trend_days)
    }

    pub fn trend(&self) -> TrendSeries {
        trend_series(&self.records, self.config.trend_days)
    }

    pub fn report(&self, as_of: NaiveDate) -> JournalReport {
        self.encoder.encode(&self.records, as_of, &self.config)
    }

    fn commit(&mut self, next: Vec<DailyRecord>) -> Result<()> {
        self.store.save(&next)?;
        self.records = next;
        Ok(())
    }
}
