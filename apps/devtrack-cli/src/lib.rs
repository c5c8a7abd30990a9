//! Devtrack CLI library
//!
//! Argument parsing, snapshot loading and text output for the `devtrack`
//! binary. Output helpers write to any [`Write`] so they can be tested
//! without a terminal.

use clap::{Parser, Subcommand};
use devtrack_common::{format_display_date, format_file_size, parse_date, truncate_string};
use devtrack_core::{
    compute_render_model, export_in_background, navigate, normalize_items, rank,
    timeline_items_for_project, ArtifactSink, Clock, ExportArtifact, ExportFormat, Granularity,
    LoggingConfig, NaiveDate, NavAction, NavigationState, RawTimelineItem, RenderModel,
    ReportPayload, ReportRenderer, ReportSource, Result, SearchEntry, SearchHit, SnapshotSource,
    TimelineItem, TrackerConfig, TrackerError, Uuid,
};
use serde_json::Value;
use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

const TITLE_WIDTH: usize = 32;

#[derive(Parser, Debug)]
#[command(name = "devtrack")]
#[command(about = "Timeline, export and search tools for the Engineering Development Tracker")]
#[command(version)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lay out dated items over a week or a month
    Timeline {
        /// JSON file with timeline items or project payloads
        #[arg(long)]
        items: PathBuf,
        /// Period granularity (week or month)
        #[arg(long)]
        view: Option<Granularity>,
        /// Anchor date (defaults to today)
        #[arg(long, value_parser = parse_anchor)]
        anchor: Option<NaiveDate>,
        /// Navigation steps applied in order (next, previous, today)
        #[arg(long = "nav", value_delimiter = ',')]
        nav: Vec<NavAction>,
        /// Print the render model as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export report payloads to files
    Export {
        /// JSON file with one payload or an array of payloads
        #[arg(long)]
        payload: PathBuf,
        /// Output format (document, csv, markdown)
        #[arg(long, short)]
        format: Option<ExportFormat>,
        /// Only export the entity with this id
        #[arg(long)]
        id: Option<Uuid>,
        /// Directory the artifacts are written to
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Rank items or payload entries against a query
    Search {
        /// JSON file with timeline items or report payloads
        #[arg(long)]
        items: PathBuf,
        /// Search query
        query: String,
        /// Maximum number of results
        #[arg(long, short)]
        limit: Option<usize>,
        /// Drop entries that score zero
        #[arg(long)]
        matches_only: bool,
    },
}

impl Cli {
    /// Logging settings after applying `--verbose` and `--json-logs`
    #[must_use]
    pub fn logging_config(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut logging = base.clone();
        if self.verbose {
            logging.level = "debug".to_string();
        }
        if self.json_logs {
            logging.json = true;
        }
        logging
    }
}

fn parse_anchor(value: &str) -> std::result::Result<NaiveDate, String> {
    parse_date(value).map_err(|e| format!("invalid date '{value}': {e}"))
}

/// Contents of an input file
#[derive(Debug)]
pub enum Snapshot {
    /// Bare timeline items
    Items(Vec<RawTimelineItem>),
    /// Full report payloads
    Payloads(Vec<ReportPayload>),
}

/// Read a JSON snapshot; objects tagged with `type` are payloads, anything
/// else is a list of timeline items
///
/// # Errors
/// Returns `TrackerError::Io` if the file cannot be read, or
/// `TrackerError::Serialization` if its JSON does not match either shape
pub fn read_snapshot(path: &Path) -> Result<Snapshot> {
    let content = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content)?;

    let snapshot = match value {
        Value::Array(values) if values.iter().all(|v| v.get("type").is_none()) => {
            Snapshot::Items(serde_json::from_value(Value::Array(values))?)
        }
        Value::Array(_) => Snapshot::Payloads(serde_json::from_value(value)?),
        other => Snapshot::Payloads(vec![serde_json::from_value(other)?]),
    };
    debug!(path = %path.display(), "read snapshot");
    Ok(snapshot)
}

/// Timeline items from a snapshot file
///
/// Project payloads contribute their dated milestones and tasks; technical
/// logs have no timeline and are skipped.
///
/// # Errors
/// Returns an error if the file cannot be read or holds malformed dates
pub fn load_timeline_items(path: &Path) -> Result<Vec<TimelineItem>> {
    match read_snapshot(path)? {
        Snapshot::Items(raw) => normalize_items(raw),
        Snapshot::Payloads(payloads) => Ok(payloads
            .iter()
            .filter_map(|payload| match payload {
                ReportPayload::Project(report) => Some(timeline_items_for_project(report)),
                ReportPayload::TechnicalLog(_) => None,
            })
            .flatten()
            .collect()),
    }
}

/// Search candidates from a snapshot file, in file order
///
/// # Errors
/// Returns an error if the file cannot be read or parsed
pub fn load_search_entries(path: &Path) -> Result<Vec<SearchEntry>> {
    match read_snapshot(path)? {
        Snapshot::Items(raw) => Ok(raw
            .into_iter()
            .map(|item| {
                SearchEntry::new(
                    item.id,
                    item.kind.label().to_lowercase(),
                    item.title,
                    None,
                )
            })
            .collect()),
        Snapshot::Payloads(payloads) => Ok(payloads
            .iter()
            .flat_map(ReportPayload::search_entries)
            .collect()),
    }
}

/// Payloads to export: all of them, or only the one with `id`
///
/// # Errors
/// Returns `TrackerError::MalformedInput` if the file holds timeline items or
/// nothing at all, and `TrackerError::NotFound` for an unknown id
pub fn select_payloads(path: &Path, id: Option<Uuid>) -> Result<Vec<ReportPayload>> {
    let payloads = match read_snapshot(path)? {
        Snapshot::Payloads(payloads) => payloads,
        Snapshot::Items(_) => {
            return Err(TrackerError::malformed(
                "expected report payloads, found timeline items",
            ))
        }
    };

    match id {
        Some(id) => Ok(vec![SnapshotSource::from_payloads(payloads).fetch_payload(id)?]),
        None if payloads.is_empty() => Err(TrackerError::malformed("no report payloads in file")),
        None => Ok(payloads),
    }
}

/// `filename`, or `stem-2.ext`, `stem-3.ext`, ... if it was already taken in this run
#[must_use]
pub fn unique_filename(filename: &str, taken: &mut HashSet<String>) -> String {
    let (stem, extension) = match filename.rsplit_once('.') {
        Some((stem, extension)) => (stem, format!(".{extension}")),
        None => (filename, String::new()),
    };
    let mut candidate = filename.to_string();
    let mut counter = 2;
    while taken.contains(&candidate) {
        candidate = format!("{stem}-{counter}{extension}");
        counter += 1;
    }
    taken.insert(candidate.clone());
    candidate
}

/// Writes artifacts into a directory, creating it on first use
#[derive(Debug, Clone)]
pub struct FsSink {
    dir: PathBuf,
}

impl FsSink {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn path_for(&self, artifact: &ExportArtifact) -> PathBuf {
        self.dir.join(&artifact.filename)
    }
}

impl ArtifactSink for FsSink {
    fn save(&self, artifact: &ExportArtifact) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(artifact);
        std::fs::write(&path, &artifact.bytes)?;
        info!(path = %path.display(), bytes = artifact.bytes.len(), "saved artifact");
        Ok(())
    }
}

/// Print a render model as a text grid, one column per day
///
/// # Errors
/// Returns an error if writing fails
pub fn print_render_model<W: Write>(model: &RenderModel, writer: &mut W) -> Result<()> {
    writeln!(writer, "{} ({})", model.title(), model.granularity)?;

    if let Some(message) = model.empty_state_message() {
        writeln!(writer, "{message}")?;
        return Ok(());
    }

    let header: String = model
        .days
        .iter()
        .map(|day| day.format("%a").to_string().chars().next().unwrap_or(' '))
        .collect();
    writeln!(writer, "{:width$} |{header}|", "", width = TITLE_WIDTH + 2)?;

    for placed in model.visible_items_by_priority() {
        let item = &placed.item;
        let bar: String = (0..model.days.len())
            .map(|column| {
                if column >= placed.grid_position && column < placed.grid_position + placed.grid_span
                {
                    '#'
                } else {
                    '.'
                }
            })
            .collect();
        let dates = if item.is_point_in_time() {
            format_display_date(&item.start_date())
        } else {
            format!(
                "{} - {}",
                format_display_date(&item.start_date()),
                format_display_date(&item.end_date())
            )
        };
        writeln!(
            writer,
            "{} {:width$} |{bar}| {dates}  {}",
            item.kind().icon(),
            truncate_string(item.title(), TITLE_WIDTH),
            item.status(),
            width = TITLE_WIDTH
        )?;
    }

    writeln!(writer, "\n{} item(s) visible", model.visible_items.len())?;
    Ok(())
}

/// Print a render model as pretty JSON
///
/// # Errors
/// Returns an error if serialization or writing fails
pub fn print_render_model_json<W: Write>(model: &RenderModel, writer: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, model)?;
    writeln!(writer)?;
    Ok(())
}

/// Print ranked search hits, best first
///
/// # Errors
/// Returns an error if writing fails
pub fn print_search_hits<W: Write>(hits: &[SearchHit<SearchEntry>], writer: &mut W) -> Result<()> {
    if hits.is_empty() {
        writeln!(writer, "No matches")?;
        return Ok(());
    }

    for hit in hits {
        writeln!(
            writer,
            "{:>5}  {:<14} {}",
            hit.score, hit.item.kind, hit.item.title
        )?;
    }
    Ok(())
}

/// Execute one parsed command, writing human output to `writer`
///
/// # Errors
/// Returns any loading, layout, export or write error
pub async fn run<W: Write>(
    command: Commands,
    config: &TrackerConfig,
    clock: Arc<dyn Clock>,
    writer: &mut W,
) -> Result<()> {
    match command {
        Commands::Timeline {
            items,
            view,
            anchor,
            nav,
            json,
        } => {
            let items = load_timeline_items(&items)?;
            let granularity = view.unwrap_or(config.timeline.default_view);
            let mut state =
                NavigationState::new(anchor.unwrap_or_else(|| clock.today()), granularity);
            for action in nav {
                state = navigate(state, action, clock.as_ref())?;
            }
            debug!(anchor = %state.anchor_date, %granularity, "computing timeline");

            let model = compute_render_model(&items, &state)?;
            if json {
                print_render_model_json(&model, writer)?;
            } else {
                print_render_model(&model, writer)?;
            }
        }
        Commands::Export {
            payload,
            format,
            id,
            out_dir,
        } => {
            let payloads = select_payloads(&payload, id)?;
            let format = format.unwrap_or(config.export.default_format);
            let renderer = ReportRenderer::new(config.export.export_config(), clock);
            let sink = FsSink::new(out_dir);
            let mut taken = HashSet::new();

            for payload in payloads {
                let mut artifact = export_in_background(
                    renderer.clone(),
                    payload,
                    format,
                    config.export.timeout(),
                )
                .await?;
                let filename = unique_filename(&artifact.filename, &mut taken);
                if filename != artifact.filename {
                    warn!(original = %artifact.filename, %filename, "renamed duplicate export filename");
                    artifact.filename = filename;
                }
                sink.save(&artifact)?;
                writeln!(
                    writer,
                    "Exported {} ({})",
                    sink.path_for(&artifact).display(),
                    format_file_size(artifact.bytes.len() as u64)
                )?;
            }
        }
        Commands::Search {
            items,
            query,
            limit,
            matches_only,
        } => {
            let mut hits = rank(&query, load_search_entries(&items)?);
            if matches_only {
                hits.retain(SearchHit::is_match);
            }
            if let Some(limit) = limit {
                hits.truncate(limit);
            }
            print_search_hits(&hits, writer)?;
        }
    }
    Ok(())
}
