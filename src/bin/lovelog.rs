//! LoveLog CLI - Command-line interface for the LoveLog journal
//!
//! Commands:
//! - add: Upsert one day's voice minutes and message count
//! - import / export: Replace the collection from JSON, or dump it
//! - stats, heatmap, radar, trend, report: Derived dashboard views
//! - demo: Fill an empty journal with a generated year
//! - validate: Check an import payload without importing it
//! - doctor: Diagnose store and configuration health

use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::NaiveDate;
use lovelog::calendar::{month_leading_blanks, parse_day};
use lovelog::config::EngineConfig;
use lovelog::demo::generate_demo;
use lovelog::heatmap::week_columns;
use lovelog::import::validate_import;
use lovelog::store::JsonFileStore;
use lovelog::types::HeatmapCell;
use lovelog::{Journal, JournalError, LOVELOG_VERSION, PRODUCER_NAME};

/// LoveLog - Track voice calls and messages with your partner
#[derive(Parser)]
#[command(name = "lovelog")]
#[command(version = LOVELOG_VERSION)]
#[command(about = "Relationship activity journal", long_about = None)]
struct Cli {
    /// Journal data file
    #[arg(long, global = true, default_value = "lovelog_data.json")]
    store: PathBuf,

    /// Engine configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upsert one day's activity
    Add {
        /// Day to record (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Voice call minutes
        #[arg(long, default_value = "")]
        voice: String,

        /// Message count
        #[arg(long, default_value = "")]
        messages: String,
    },

    /// Replace the journal with a JSON array of records
    Import {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Write the journal as a JSON array of records
    Export {
        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,
    },

    /// Aggregate totals and the longest streak
    Stats {
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Activity heatmap for the trailing year or one month
    Heatmap {
        /// Month to show (YYYY-MM); the trailing year when omitted
        #[arg(long)]
        month: Option<String>,

        /// Last day of the trailing year (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        as_of: Option<String>,

        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Four-axis radar profile
    Radar {
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Recent voice and message trend
    Trend {
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Full dashboard report as JSON
    Report {
        /// Last day of the heatmap (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        as_of: Option<String>,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,
    },

    /// Fill the journal with a generated year of activity
    Demo {
        /// Last generated day (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        as_of: Option<String>,

        /// RNG seed for reproducible data
        #[arg(long)]
        seed: Option<u64>,

        /// Overwrite a non-empty journal
        #[arg(long)]
        force: bool,
    },

    /// Validate an import payload without importing it
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Diagnose store and configuration health
    Doctor {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable summary
    Text,
    /// Compact JSON
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    lovelog::logging::init(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e)).unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), LovelogCliError> {
    let Cli {
        store,
        config,
        command,
        ..
    } = cli;

    match command {
        Commands::Validate { input, json } => cmd_validate(&input, json),
        Commands::Doctor { json } => cmd_doctor(&store, config.as_deref(), json),
        command => {
            let engine_config = match config.as_deref() {
                Some(path) => EngineConfig::load(path)?,
                None => EngineConfig::default(),
            };
            let mut journal = Journal::with_config(JsonFileStore::new(&store), engine_config)?;
            run_journal(&mut journal, command)
        }
    }
}

fn run_journal(
    journal: &mut Journal<JsonFileStore>,
    command: Commands,
) -> Result<(), LovelogCliError> {
    match command {
        Commands::Add {
            date,
            voice,
            messages,
        } => {
            let date = date.unwrap_or_else(|| lovelog::calendar::format_day(today()));
            journal.add_entry(&date, &voice, &messages)?;
            println!("Saved {}", date);
            Ok(())
        }

        Commands::Import { input } => {
            let count = journal.import_json(&read_input(&input)?)?;
            println!("Imported {} records", count);
            Ok(())
        }

        Commands::Export { output } => write_output(&output, &journal.export_json()?),

        Commands::Stats { format } => {
            let stats = journal.stats();
            print_formatted(&stats, &format, || {
                let (hours, minutes) = stats.voice_hours_minutes();
                println!("Voice time:     {}h {}m", hours, minutes);
                println!("Messages:       {}", stats.total_messages);
                println!("Longest streak: {} days", stats.longest_streak);
                println!("Days logged:    {}", stats.total_days_logged);
                if !stats.max_activity_date.is_empty() {
                    println!("Best day:       {}", stats.max_activity_date);
                }
            })
        }

        Commands::Heatmap {
            month,
            as_of,
            format,
        } => match month {
            Some(month) => {
                let (year, month) = parse_month(&month)?;
                let cells = journal.month_heatmap(year, month)?;
                let blanks = month_leading_blanks(year, month)?;
                print_formatted(&cells, &format, || print_month(&cells, blanks))
            }
            None => {
                let cells = journal.year_heatmap(resolve_day(as_of.as_deref())?);
                print_formatted(&cells, &format, || print_year(&cells))
            }
        },

        Commands::Radar { format } => {
            let radar = journal.radar();
            print_formatted(&radar, &format, || {
                for (axis, value) in [
                    ("streak", radar.streak),
                    ("msg", radar.msg),
                    ("voice", radar.voice),
                    ("intimacy", radar.intimacy),
                ] {
                    println!("{:<9}{:>4} {}", axis, value, bar(value));
                }
            })
        }

        Commands::Trend { format } => {
            let trend = journal.trend();
            print_formatted(&trend, &format, || {
                println!("{:<12}{:>8}{:>10}", "date", "voice", "msgs/5");
                for point in &trend.points {
                    println!(
                        "{:<12}{:>8.0}{:>10.1}",
                        point.date, point.voice_minutes, point.scaled_messages
                    );
                }
                println!("ceiling: {}", trend.ceiling);
            })
        }

        Commands::Report { as_of, output } => {
            let report = journal.report(resolve_day(as_of.as_deref())?);
            write_output(&output, &serde_json::to_string_pretty(&report)?)
        }

        Commands::Demo { as_of, seed, force } => {
            if !journal.records().is_empty() && !force {
                return Err(LovelogCliError::NotEmpty(journal.records().len()));
            }
            let as_of = resolve_day(as_of.as_deref())?;
            let records = match seed {
                Some(seed) => generate_demo(as_of, &mut StdRng::seed_from_u64(seed)),
                None => generate_demo(as_of, &mut rand::thread_rng()),
            };
            let count = records.len();
            journal.replace(records)?;
            println!("Generated {} demo records", count);
            Ok(())
        }

        Commands::Validate { .. } | Commands::Doctor { .. } => Ok(()),
    }
}

fn cmd_validate(input: &Path, json: bool) -> Result<(), LovelogCliError> {
    let payload = read_input(input)?;
    let issues = validate_import(&payload)?;
    let total = serde_json::from_str::<serde_json::Value>(&payload)?
        .as_array()
        .map_or(0, Vec::len);

    let report = ValidationReport {
        total_records: total,
        issues,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total records: {}", report.total_records);
        println!("Issues:        {}", report.issues.len());

        if !report.issues.is_empty() {
            println!("\nIssues:");
            for issue in &report.issues {
                println!(
                    "  - Record {} (index {}): {}",
                    issue.date.as_deref().unwrap_or("unknown"),
                    issue.index,
                    issue.problem
                );
            }
        }
    }

    if report.issues.is_empty() {
        Ok(())
    } else {
        Err(LovelogCliError::ValidationFailed(report.issues.len()))
    }
}

fn cmd_doctor(store: &Path, config: Option<&Path>, json: bool) -> Result<(), LovelogCliError> {
    let mut checks: Vec<DoctorCheck> = vec![DoctorCheck {
        name: "lovelog_version".to_string(),
        status: CheckStatus::Ok,
        message: format!("LoveLog version {}", LOVELOG_VERSION),
    }];

    checks.push(if store.exists() {
        match Journal::open(JsonFileStore::new(store)) {
            Ok(journal) => DoctorCheck {
                name: "store".to_string(),
                status: CheckStatus::Ok,
                message: format!("Store valid ({} records)", journal.records().len()),
            },
            Err(e) => DoctorCheck {
                name: "store".to_string(),
                status: CheckStatus::Error,
                message: format!("Cannot load store: {}", e),
            },
        }
    } else {
        DoctorCheck {
            name: "store".to_string(),
            status: CheckStatus::Warning,
            message: format!("Store {} does not exist yet", store.display()),
        }
    });

    if let Some(config_path) = config {
        checks.push(if !config_path.exists() {
            DoctorCheck {
                name: "config".to_string(),
                status: CheckStatus::Warning,
                message: "Config file does not exist, defaults apply".to_string(),
            }
        } else {
            match EngineConfig::load(config_path) {
                Ok(_) => DoctorCheck {
                    name: "config".to_string(),
                    status: CheckStatus::Ok,
                    message: "Config file valid".to_string(),
                },
                Err(e) => DoctorCheck {
                    name: "config".to_string(),
                    status: CheckStatus::Error,
                    message: format!("Invalid config: {}", e),
                },
            }
        });
    }

    checks.push(DoctorCheck {
        name: "stdin".to_string(),
        status: CheckStatus::Ok,
        message: if atty::is(atty::Stream::Stdin) {
            "stdin is a TTY (interactive mode)".to_string()
        } else {
            "stdin is a pipe (import from - ready)".to_string()
        },
    });

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: LOVELOG_VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("LoveLog Doctor Report");
        println!("=====================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report
        .checks
        .iter()
        .any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(LovelogCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

// Helper functions

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn resolve_day(value: Option<&str>) -> Result<NaiveDate, LovelogCliError> {
    match value {
        Some(day) => Ok(parse_day(day)?),
        None => Ok(today()),
    }
}

fn parse_month(value: &str) -> Result<(i32, u32), LovelogCliError> {
    let invalid = || LovelogCliError::ParseError(format!("invalid month '{}', expected YYYY-MM", value));
    let (year, month) = value.split_once('-').ok_or_else(invalid)?;
    let year = year.parse().map_err(|_| invalid())?;
    let month = month.parse().map_err(|_| invalid())?;
    Ok((year, month))
}

fn read_input(input: &Path) -> Result<String, LovelogCliError> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn write_output(output: &Path, data: &str) -> Result<(), LovelogCliError> {
    if output.to_string_lossy() == "-" {
        println!("{}", data);
    } else {
        fs::write(output, data)?;
    }
    Ok(())
}

fn print_formatted<T: Serialize>(
    value: &T,
    format: &OutputFormat,
    text: impl FnOnce(),
) -> Result<(), LovelogCliError> {
    match format {
        OutputFormat::Text => text(),
        OutputFormat::Json => println!("{}", serde_json::to_string(value)?),
        OutputFormat::JsonPretty => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

const LEVEL_GLYPHS: [char; 5] = ['·', '░', '▒', '▓', '█'];

fn glyph(cell: &HeatmapCell) -> char {
    LEVEL_GLYPHS[usize::from(cell.level).min(LEVEL_GLYPHS.len() - 1)]
}

fn bar(value: u32) -> String {
    "█".repeat((value / 5) as usize)
}

/// Weeks as columns, weekdays as rows (Sunday first)
fn print_year(cells: &[HeatmapCell]) {
    let columns = week_columns(cells);
    for weekday in 0..7 {
        let row: String = columns
            .iter()
            .map(|week| week.get(weekday).and_then(Option::as_ref).map_or(' ', glyph))
            .collect();
        println!("{}", row);
    }
}

fn print_month(cells: &[HeatmapCell], leading_blanks: u32) {
    println!(" Su Mo Tu We Th Fr Sa");
    let mut line = "   ".repeat(leading_blanks as usize);
    let mut column = leading_blanks;
    for (day, cell) in cells.iter().enumerate() {
        line.push_str(&format!("{:>2}{}", day + 1, glyph(cell)));
        column += 1;
        if column % 7 == 0 {
            println!("{}", line);
            line.clear();
        }
    }
    if !line.is_empty() {
        println!("{}", line);
    }
}

// Error types

#[derive(Debug)]
enum LovelogCliError {
    Io(io::Error),
    Journal(JournalError),
    Json(serde_json::Error),
    ValidationFailed(usize),
    DoctorFailed,
    NotEmpty(usize),
    ParseError(String),
}

impl From<io::Error> for LovelogCliError {
    fn from(e: io::Error) -> Self {
        LovelogCliError::Io(e)
    }
}

impl From<JournalError> for LovelogCliError {
    fn from(e: JournalError) -> Self {
        LovelogCliError::Journal(e)
    }
}

impl From<serde_json::Error> for LovelogCliError {
    fn from(e: serde_json::Error) -> Self {
        LovelogCliError::Json(e)
    }
}

#[derive(Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<LovelogCliError> for CliError {
    fn from(e: LovelogCliError) -> Self {
        match e {
            LovelogCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            LovelogCliError::Journal(e) => {
                let hint = match &e {
                    JournalError::InvalidPayload(_) | JournalError::MalformedRecord { .. } => {
                        "Run 'lovelog validate' for details"
                    }
                    JournalError::InvalidDate(_) => "Dates use the YYYY-MM-DD form",
                    JournalError::EmptyEntry => "Pass --voice or --messages",
                    JournalError::StoreError(_) => "Run 'lovelog doctor' to inspect the store",
                    _ => "Check input format",
                };
                CliError {
                    code: "JOURNAL_ERROR".to_string(),
                    message: e.to_string(),
                    hint: Some(hint.to_string()),
                }
            }
            LovelogCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            LovelogCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} records failed validation", count),
                hint: Some("Fix validation errors and retry".to_string()),
            },
            LovelogCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
            LovelogCliError::NotEmpty(count) => CliError {
                code: "JOURNAL_NOT_EMPTY".to_string(),
                message: format!("Journal already holds {} records", count),
                hint: Some("Pass --force to replace them with demo data".to_string()),
            },
            LovelogCliError::ParseError(msg) => CliError {
                code: "PARSE_ERROR".to_string(),
                message: msg,
                hint: Some("Check argument format".to_string()),
            },
        }
    }
}

// Report types

#[derive(Serialize)]
struct ValidationReport {
    total_records: usize,
    issues: Vec<lovelog::import::ImportIssue>,
}

#[derive(Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}
