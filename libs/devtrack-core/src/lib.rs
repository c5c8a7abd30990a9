//! Devtrack Core - Timeline, export and search engine for the Engineering Development Tracker
//!
//! This library turns already-fetched engineering records (projects,
//! milestones, tasks and technical issue logs) into presentation models and
//! export artifacts.
//!
//! # Features
//!
//! - **Timeline Engine**: Week and month periods, grid placement of dated items, navigation
//! - **Export Pipeline**: Structured XML documents, CSV and Markdown reports with a fixed section order
//! - **Search Scoring**: Additive title/description relevance with stable ranking
//! - **Configuration**: YAML/JSON files plus `DEVTRACK_*` environment overrides
//! - **Observability**: Structured logging through `tracing`
//!
//! # Quick Start
//!
//! ```
//! use devtrack_core::{
//!     compute_render_model, score, Granularity, ItemKind, NavigationState, NaiveDate,
//!     TimelineItem,
//! };
//!
//! # fn main() -> devtrack_core::Result<()> {
//! let anchor = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
//! let items = vec![TimelineItem::new("fat", "Factory Acceptance Test", ItemKind::Milestone, anchor, None)];
//!
//! let model = compute_render_model(&items, &NavigationState::new(anchor, Granularity::Week))?;
//! assert_eq!(model.days.len(), 7);
//! assert_eq!(model.visible_items[0].grid_position, 4);
//!
//! assert_eq!(score("PLC issue", "PLC Issue Resolution", ""), 140);
//! # Ok(())
//! # }
//! ```
//!
//! # Crate Features
//!
//! - `test-utils`: Enable mock payloads and timeline items (for testing only)

pub mod clock;
pub mod config;
pub mod config_loader;
pub mod error;
pub mod export;
pub mod models;
pub mod observability;
pub mod search;
pub mod source;
pub mod timeline;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{
    ConfigOverlay, ExportOverlay, ExportSettings, LoggingOverlay, TimelineOverlay, TrackerConfig,
};
pub use config_loader::{load_config, ConfigLoader};
pub use error::{Result, TrackerError};
pub use export::{
    export_in_background, render_document, ArtifactSink, ExportArtifact, ExportConfig,
    ExportFormat, MemorySink, ReportRenderer,
};
pub use models::*;
pub use observability::{init_logging, LoggingConfig};
pub use search::{rank, score, SearchEntry, SearchHit, Searchable};
pub use source::{ReportSource, SnapshotSource};
pub use timeline::{
    compute_render_model, navigate, normalize_items, timeline_items_for_project, Granularity,
    ItemKind, NavAction, NavigationState, PositionedItem, RawTimelineItem, RenderModel,
    TimelineItem,
};

/// Re-export commonly used types
pub use chrono::{DateTime, NaiveDate, Utc};
pub use uuid::Uuid;
