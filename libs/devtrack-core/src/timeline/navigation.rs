//! View granularity and period navigation

use crate::clock::Clock;
use crate::error::{Result, TrackerError};
use crate::timeline::dates::{add_days, shift_months};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Length of the visible period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Week,
    Month,
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Week => write!(f, "week"),
            Self::Month => write!(f, "month"),
        }
    }
}

impl FromStr for Granularity {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "week" | "weekly" | "w" => Ok(Self::Week),
            "month" | "monthly" | "m" => Ok(Self::Month),
            _ => Err(TrackerError::malformed(format!(
                "unknown timeline view '{s}', expected week or month"
            ))),
        }
    }
}

/// Navigation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavAction {
    Previous,
    Next,
    Today,
}

impl FromStr for NavAction {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "prev" | "previous" | "back" => Ok(Self::Previous),
            "next" | "forward" => Ok(Self::Next),
            "today" | "now" => Ok(Self::Today),
            _ => Err(TrackerError::malformed(format!(
                "unknown navigation action '{s}', expected previous, next or today"
            ))),
        }
    }
}

/// Anchor date plus granularity; the anchor may be any day in the period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    pub anchor_date: NaiveDate,
    pub granularity: Granularity,
}

impl NavigationState {
    #[must_use]
    pub const fn new(anchor_date: NaiveDate, granularity: Granularity) -> Self {
        Self {
            anchor_date,
            granularity,
        }
    }

    /// Same anchor, different granularity
    #[must_use]
    pub const fn with_granularity(self, granularity: Granularity) -> Self {
        Self {
            anchor_date: self.anchor_date,
            granularity,
        }
    }

    /// Apply a navigation step
    ///
    /// # Errors
    /// Returns `TrackerError::InvalidDate` if the new anchor leaves chrono's range
    pub fn navigate(self, action: NavAction, clock: &dyn Clock) -> Result<Self> {
        navigate(self, action, clock)
    }
}

/// Move the anchor one period back or forward, or jump to today
///
/// Weeks move by 7 days. Months keep the day of month and clamp to the last
/// day of shorter months, so repeated month steps can drift earlier.
///
/// # Errors
/// Returns `TrackerError::InvalidDate` if the new anchor leaves chrono's range
pub fn navigate(
    nav: NavigationState,
    action: NavAction,
    clock: &dyn Clock,
) -> Result<NavigationState> {
    let anchor_date = match (action, nav.granularity) {
        (NavAction::Today, _) => clock.today(),
        (NavAction::Previous, Granularity::Week) => add_days(nav.anchor_date, -7)?,
        (NavAction::Next, Granularity::Week) => add_days(nav.anchor_date, 7)?,
        (NavAction::Previous, Granularity::Month) => shift_months(nav.anchor_date, -1)?,
        (NavAction::Next, Granularity::Month) => shift_months(nav.anchor_date, 1)?,
    };
    debug!(?action, from = %nav.anchor_date, to = %anchor_date, granularity = %nav.granularity, "navigated timeline");
    Ok(NavigationState {
        anchor_date,
        granularity: nav.granularity,
    })
}
