//! LoveLog - Relationship activity journal engine
//!
//! LoveLog keeps a date-keyed collection of daily voice-call minutes and message counts
//! and derives every dashboard view from it: aggregate stats with the longest active
//! streak, year and month heatmaps with intensity levels, a four-axis radar profile and
//! a recent trend series.
//!
//! ## Modules
//!
//! - **Engine**: Pure projections over a record slice (`stats`, `heatmap`, `radar`, `trend`)
//! - **Journal**: Stateful collection over a persistent `RecordStore` with bulk import and export

pub mod calendar;
pub mod config;
pub mod demo;
pub mod encoder;
pub mod error;
pub mod heatmap;
pub mod import;
pub mod pipeline;
pub mod radar;
pub mod score;
pub mod stats;
pub mod store;
pub mod trend;
pub mod types;

#[cfg(feature = "cli")]
pub mod logging;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use config::EngineConfig;
pub use error::{JournalError, Result};
pub use heatmap::{project_month, project_year, HeatmapProjector};
pub use import::{parse_entry, parse_import, validate_import};
pub use pipeline::{records_to_report, Journal};
pub use radar::compute_radar;
pub use score::{compute_score, ScoreModel};
pub use stats::compute_stats;
pub use store::{export_json, replace_all, upsert, JsonFileStore, MemoryStore, RecordStore};
pub use trend::trend_series;
pub use types::{DailyRecord, HeatmapCell, JournalReport, RadarProfile, Stats, TrendSeries};

/// LoveLog version embedded in report payloads
pub const LOVELOG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for report payloads
pub const PRODUCER_NAME: &str = "lovelog";
