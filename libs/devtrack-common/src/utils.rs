//! Formatting and parsing helpers shared across the tracker crates

use crate::constants::{
    DATE_FORMATS, DISPLAY_DATETIME_FORMAT, DISPLAY_DATE_FORMAT, FALLBACK_FILENAME_STEM,
    FILENAME_SEPARATOR, ISO_DATE_FORMAT, NONE_LISTED, NOT_SET,
};
use chrono::{DateTime, NaiveDate, Utc};

/// Format a date for display ("Oct 16, 2026")
#[must_use]
pub fn format_display_date(date: &NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Format an optional date, substituting the "Not set" placeholder
#[must_use]
pub fn format_optional_date(date: Option<NaiveDate>) -> String {
    date.as_ref()
        .map_or_else(|| NOT_SET.to_string(), format_display_date)
}

/// Format a timestamp for generation footers
#[must_use]
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format(DISPLAY_DATETIME_FORMAT).to_string()
}

/// Format a date as `YYYY-MM-DD`
#[must_use]
pub fn format_iso_date(date: &NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Parse a calendar date, trying each of [`DATE_FORMATS`] and finally RFC 3339
///
/// Timestamps such as `2024-03-01T08:00:00+00:00` resolve to their calendar date.
///
/// # Errors
/// Returns the last `chrono::ParseError` if no pattern matches
pub fn parse_date(date_str: &str) -> Result<NaiveDate, chrono::ParseError> {
    let trimmed = date_str.trim();
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }
    DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.date_naive())
}

/// Insert `,` thousands separators into a whole number
#[must_use]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a monetary amount with a currency prefix and thousands separators
///
/// `format_currency(12500.0, "$")` yields `$12,500.00`. Non-finite amounts
/// and amounts whose cents do not fit in a `u64` render as the "Not set"
/// placeholder.
#[must_use]
pub fn format_currency(amount: f64, symbol: &str) -> String {
    #[allow(clippy::cast_precision_loss)]
    let cents_limit = u64::MAX as f64;
    let rounded_cents = (amount.abs() * 100.0).round();
    if !rounded_cents.is_finite() || rounded_cents >= cents_limit {
        return NOT_SET.to_string();
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cents = rounded_cents as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{sign}{symbol}{}.{:02}",
        group_thousands(cents / 100),
        cents % 100
    )
}

/// Format a percentage, dropping the decimal for whole values ("42%", "12.5%")
#[must_use]
pub fn format_percentage(value: f64) -> String {
    if !value.is_finite() {
        return NOT_SET.to_string();
    }
    if value.fract() == 0.0 {
        format!("{value:.0}%")
    } else {
        format!("{value:.1}%")
    }
}

/// Join a list with `", "`, substituting the "None" placeholder when empty
#[must_use]
pub fn join_or_placeholder(items: &[String]) -> String {
    if items.is_empty() {
        NONE_LISTED.to_string()
    } else {
        items.join(", ")
    }
}

/// Human-readable file size ("512 B", "1.5 KB", "2.0 MB")
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    match bytes {
        b if b < KB => format!("{b} B"),
        b if b < MB => format!("{:.1} KB", b as f64 / KB as f64),
        b => format!("{:.1} MB", b as f64 / MB as f64),
    }
}

/// Lower-case a title and collapse every run of non-alphanumeric characters
/// into a single separator, trimming separators at both ends
#[must_use]
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_separator = false;
    for ch in title.chars() {
        if ch.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push(FILENAME_SEPARATOR);
            }
            pending_separator = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_separator = true;
        }
    }
    slug
}

/// Build an export filename from an entity title
///
/// The stem is [`slugify`]d; when `dated` carries a date it is appended before
/// the extension as `-YYYY-MM-DD`.
#[must_use]
pub fn export_filename(title: &str, extension: &str, dated: Option<NaiveDate>) -> String {
    let mut stem = slugify(title);
    if stem.is_empty() {
        stem.push_str(FALLBACK_FILENAME_STEM);
    }
    if let Some(date) = dated {
        stem.push(FILENAME_SEPARATOR);
        stem.push_str(&format_iso_date(&date));
    }
    format!("{stem}.{}", extension.trim_start_matches('.'))
}

/// Truncate a string to at most `max_chars` characters, ending with `...`
#[must_use]
pub fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_format_display_date() {
        let date = NaiveDate::from_ymd_opt(2023, 12, 5).unwrap();
        assert_eq!(format_display_date(&date), "Dec 05, 2023");
    }

    #[test]
    fn test_format_optional_date() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(format_optional_date(Some(date)), "Feb 29, 2024");
        assert_eq!(format_optional_date(None), "Not set");
    }

    #[test]
    fn test_format_datetime_specific() {
        let dt = DateTime::parse_from_rfc3339("2023-12-25T15:30:45Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_datetime(&dt), "Dec 25, 2023 15:30 UTC");
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(parse_date("2024-03-01").unwrap(), expected);
        assert_eq!(parse_date("2024/03/01").unwrap(), expected);
        assert_eq!(parse_date("03/01/2024").unwrap(), expected);
        assert_eq!(parse_date(" 2024-03-01 ").unwrap(), expected);
        assert_eq!(parse_date("2024-03-01T08:00:00+00:00").unwrap(), expected);
    }

    #[test]
    fn test_parse_date_invalid() {
        assert!(parse_date("").is_err());
        assert!(parse_date("not-a-date").is_err());
        assert!(parse_date("2023-02-30").is_err());
        assert!(parse_date("2023-13-01").is_err());
    }

    #[test]
    fn test_parse_date_leap_year() {
        let date = parse_date("2024-02-29").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 2, 29));
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(12_500.0, "$"), "$12,500.00");
        assert_eq!(format_currency(0.5, "$"), "$0.50");
        assert_eq!(format_currency(1_234_567.891, "€"), "€1,234,567.89");
        assert_eq!(format_currency(-42.0, "$"), "-$42.00");
        assert_eq!(format_currency(f64::NAN, "$"), "Not set");
    }

    #[test]
    fn test_format_currency_out_of_range() {
        assert_eq!(format_currency(1.0e18, "$"), "Not set");
        assert_eq!(format_currency(-1.0e300, "$"), "Not set");
        assert_eq!(format_currency(f64::INFINITY, "$"), "Not set");
        assert_eq!(
            format_currency(1.0e15, "$"),
            "$1,000,000,000,000,000.00"
        );
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(42.0), "42%");
        assert_eq!(format_percentage(12.5), "12.5%");
        assert_eq!(format_percentage(0.0), "0%");
    }

    #[test]
    fn test_join_or_placeholder() {
        assert_eq!(join_or_placeholder(&[]), "None");
        assert_eq!(
            join_or_placeholder(&["plc".to_string(), "scada".to_string()]),
            "plc, scada"
        );
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(2 * 1024 * 1024), "2.0 MB");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("PLC Upgrade: Line #3"), "plc-upgrade-line-3");
        assert_eq!(slugify("  --Boiler  Feed--  "), "boiler-feed");
        assert_eq!(slugify("already-slugged"), "already-slugged");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_export_filename() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        assert_eq!(
            export_filename("PLC Upgrade", "md", None),
            "plc-upgrade.md"
        );
        assert_eq!(
            export_filename("PLC Upgrade", ".csv", Some(date)),
            "plc-upgrade-2026-10-16.csv"
        );
        assert_eq!(export_filename("???", "xml", None), "export.xml");
    }

    #[test]
    fn test_export_filename_is_idempotent() {
        let first = export_filename("SCADA / HMI Migration", "xml", None);
        let second = export_filename("SCADA / HMI Migration", "xml", None);
        assert_eq!(first, second);
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("hello", 10), "hello");
        assert_eq!(truncate_string("hello world", 5), "he...");
        assert_eq!(truncate_string("überwachung", 6), "übe...");
    }
}
