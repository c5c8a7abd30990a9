//! Devtrack Common - Shared constants and formatting utilities
//!
//! This crate holds the pieces every tracker crate formats the same way:
//! display dates, placeholders for absent fields, currency and percentage
//! rendering, and export filename derivation.
//!
//! # Examples
//!
//! ```
//! use devtrack_common::{export_filename, format_currency, NOT_SET};
//!
//! assert_eq!(format_currency(12500.0, "$"), "$12,500.00");
//! assert_eq!(export_filename("PLC Upgrade", "md", None), "plc-upgrade.md");
//! assert_eq!(NOT_SET, "Not set");
//! ```

pub mod constants;
pub mod utils;

pub use constants::*;
pub use utils::*;
