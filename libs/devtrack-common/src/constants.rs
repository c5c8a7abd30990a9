//! Constants shared by the timeline engine, the export pipeline and the CLI

/// Human-readable date pattern used in every export format ("Oct 16, 2026")
pub const DISPLAY_DATE_FORMAT: &str = "%b %d, %Y";

/// Timestamp pattern used in generation footers
pub const DISPLAY_DATETIME_FORMAT: &str = "%b %d, %Y %H:%M UTC";

/// ISO 8601 calendar date, used in filenames and JSON output
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Calendar date patterns accepted at the normalization boundary, tried in order
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Placeholder for an absent scalar field
pub const NOT_SET: &str = "Not set";

/// Placeholder for an absent assignee or an empty team
pub const UNASSIGNED: &str = "Unassigned";

/// Placeholder for an empty list-valued field
pub const NONE_LISTED: &str = "None";

/// Empty state of a timeline period
pub const EMPTY_TIMELINE_MESSAGE: &str = "No items scheduled";

/// Currency prefix used when no other symbol is configured
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

/// Author line used in generation footers when the payload names nobody
pub const DEFAULT_GENERATED_BY: &str = "Engineering Development Tracker";

/// Separator replacing each run of non-alphanumeric characters in filenames
pub const FILENAME_SEPARATOR: char = '-';

/// Stem used when a title contains no alphanumeric characters at all
pub const FALLBACK_FILENAME_STEM: &str = "export";

/// Search weight: whole query found in the title
pub const TITLE_MATCH_WEIGHT: u32 = 100;

/// Search weight: whole query found in the description
pub const DESCRIPTION_MATCH_WEIGHT: u32 = 50;

/// Search weight: one query word found in the title
pub const TITLE_WORD_WEIGHT: u32 = 20;

/// Search weight: one query word found in the description
pub const DESCRIPTION_WORD_WEIGHT: u32 = 10;
