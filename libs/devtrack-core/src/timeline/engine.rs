//! Period layout: which items are visible and where they sit on the day grid

use crate::error::Result;
use crate::timeline::dates::{date_range, days_between, month_bounds, week_bounds};
use crate::timeline::item::TimelineItem;
use crate::timeline::navigation::{Granularity, NavigationState};
use chrono::{Datelike, NaiveDate};
use devtrack_common::EMPTY_TIMELINE_MESSAGE;
use serde::Serialize;
use tracing::{debug, instrument};

/// A visible item with its zero-based grid column and column span
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionedItem {
    pub item: TimelineItem,
    pub grid_position: usize,
    pub grid_span: usize,
}

/// Everything a renderer needs to draw one period
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderModel {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub granularity: Granularity,
    /// Every day of the period in order
    pub days: Vec<NaiveDate>,
    /// Visible items in input order
    pub visible_items: Vec<PositionedItem>,
}

impl RenderModel {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visible_items.is_empty()
    }

    /// Message shown in place of the grid rows when nothing is visible
    #[must_use]
    pub fn empty_state_message(&self) -> Option<&'static str> {
        self.is_empty().then_some(EMPTY_TIMELINE_MESSAGE)
    }

    /// Period label: `Oct 12 – Oct 18, 2026` for weeks, `October 2026` for months
    #[must_use]
    pub fn title(&self) -> String {
        match self.granularity {
            Granularity::Month => self.period_start.format("%B %Y").to_string(),
            Granularity::Week if self.period_start.year() == self.period_end.year() => format!(
                "{} – {}",
                self.period_start.format("%b %d"),
                self.period_end.format("%b %d, %Y")
            ),
            Granularity::Week => format!(
                "{} – {}",
                self.period_start.format("%b %d, %Y"),
                self.period_end.format("%b %d, %Y")
            ),
        }
    }

    /// Visible items with milestones before tasks, otherwise in input order
    #[must_use]
    pub fn visible_items_by_priority(&self) -> Vec<&PositionedItem> {
        let mut items: Vec<&PositionedItem> = self.visible_items.iter().collect();
        items.sort_by_key(|positioned| positioned.item.kind().render_priority());
        items
    }
}

/// Inclusive bounds of the period containing the anchor
///
/// # Errors
/// Returns `TrackerError::InvalidDate` if the period leaves chrono's range
pub fn period_bounds(nav: &NavigationState) -> Result<(NaiveDate, NaiveDate)> {
    match nav.granularity {
        Granularity::Week => week_bounds(nav.anchor_date),
        Granularity::Month => month_bounds(nav.anchor_date),
    }
}

/// Grid placement of an item within a period, or `None` if it does not overlap
#[must_use]
pub fn place_item(
    item: &TimelineItem,
    period_start: NaiveDate,
    period_end: NaiveDate,
) -> Option<(usize, usize)> {
    if item.end_date() < period_start || item.start_date() > period_end {
        return None;
    }
    let visible_start = item.start_date().max(period_start);
    let visible_end = item.end_date().min(period_end);
    let position = usize::try_from(days_between(period_start, visible_start)).ok()?;
    let span = usize::try_from(days_between(visible_start, visible_end) + 1)
        .ok()?
        .max(1);
    Some((position, span))
}

/// Lay out `items` over the period selected by `nav`
///
/// Pure: the same items and navigation state always yield the same model.
///
/// # Errors
/// Returns `TrackerError::InvalidDate` if the period leaves chrono's range
#[instrument(skip(items), fields(item_count = items.len()))]
pub fn compute_render_model(items: &[TimelineItem], nav: &NavigationState) -> Result<RenderModel> {
    let (period_start, period_end) = period_bounds(nav)?;
    let days = date_range(period_start, period_end);

    let visible_items: Vec<PositionedItem> = items
        .iter()
        .filter_map(|item| {
            place_item(item, period_start, period_end).map(|(grid_position, grid_span)| {
                PositionedItem {
                    item: item.clone(),
                    grid_position,
                    grid_span,
                }
            })
        })
        .collect();

    debug!(
        %period_start,
        %period_end,
        visible = visible_items.len(),
        "computed timeline render model"
    );

    Ok(RenderModel {
        period_start,
        period_end,
        granularity: nav.granularity,
        days,
        visible_items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::item::ItemKind;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(id: &str, start: NaiveDate, end: Option<NaiveDate>) -> TimelineItem {
        TimelineItem::new(id, format!("Task {id}"), ItemKind::Task, start, end)
    }

    fn week_of(anchor: NaiveDate) -> NavigationState {
        NavigationState::new(anchor, Granularity::Week)
    }

    #[test]
    fn test_week_period_has_seven_days_from_monday() {
        let model = compute_render_model(&[], &week_of(date(2026, 10, 16))).unwrap();
        assert_eq!(model.days.len(), 7);
        assert_eq!(model.period_start, date(2026, 10, 12));
        assert_eq!(model.period_start.weekday(), Weekday::Mon);
        assert_eq!(model.period_end, date(2026, 10, 18));
    }

    #[test]
    fn test_month_period_has_month_length() {
        let nav = NavigationState::new(date(2024, 2, 10), Granularity::Month);
        let model = compute_render_model(&[], &nav).unwrap();
        assert_eq!(model.days.len(), 29);
        assert_eq!(model.days.first(), Some(&date(2024, 2, 1)));
        assert_eq!(model.days.last(), Some(&date(2024, 2, 29)));
    }

    #[test]
    fn test_empty_items_give_empty_state() {
        let model = compute_render_model(&[], &week_of(date(2026, 10, 16))).unwrap();
        assert!(model.is_empty());
        assert_eq!(model.empty_state_message(), Some("No items scheduled"));
    }

    #[test]
    fn test_point_item_on_period_start_is_visible() {
        let items = vec![task("a", date(2026, 10, 12), None)];
        let model = compute_render_model(&items, &week_of(date(2026, 10, 16))).unwrap();
        assert_eq!(model.visible_items.len(), 1);
        assert_eq!(model.visible_items[0].grid_position, 0);
        assert_eq!(model.visible_items[0].grid_span, 1);
        assert_eq!(model.empty_state_message(), None);
    }

    #[test]
    fn test_items_outside_period_are_excluded() {
        let items = vec![
            task("before", date(2026, 10, 1), Some(date(2026, 10, 11))),
            task("after", date(2026, 10, 19), Some(date(2026, 10, 30))),
        ];
        let model = compute_render_model(&items, &week_of(date(2026, 10, 16))).unwrap();
        assert!(model.is_empty());
    }

    #[test]
    fn test_item_covering_period_spans_all_days() {
        let items = vec![task("long", date(2026, 9, 1), Some(date(2026, 12, 31)))];
        let model = compute_render_model(&items, &week_of(date(2026, 10, 16))).unwrap();
        assert_eq!(model.visible_items[0].grid_position, 0);
        assert_eq!(model.visible_items[0].grid_span, 7);
    }

    #[test]
    fn test_partial_overlap_is_clipped() {
        // Wed Oct 14 through the following Tue Oct 20
        let items = vec![task("mid", date(2026, 10, 14), Some(date(2026, 10, 20)))];
        let model = compute_render_model(&items, &week_of(date(2026, 10, 16))).unwrap();
        assert_eq!(model.visible_items[0].grid_position, 2);
        assert_eq!(model.visible_items[0].grid_span, 5);
    }

    #[test]
    fn test_input_order_preserved() {
        let items = vec![
            task("late", date(2026, 10, 17), None),
            TimelineItem::new("m", "Gate", ItemKind::Milestone, date(2026, 10, 13), None),
            task("early", date(2026, 10, 12), None),
        ];
        let model = compute_render_model(&items, &week_of(date(2026, 10, 16))).unwrap();
        let ids: Vec<&str> = model.visible_items.iter().map(|p| p.item.id()).collect();
        assert_eq!(ids, vec!["late", "m", "early"]);

        let by_priority: Vec<&str> = model
            .visible_items_by_priority()
            .iter()
            .map(|p| p.item.id())
            .collect();
        assert_eq!(by_priority, vec!["m", "late", "early"]);
    }

    #[test]
    fn test_compute_is_deterministic() {
        let items = vec![task("a", date(2026, 10, 14), Some(date(2026, 10, 15)))];
        let nav = week_of(date(2026, 10, 16));
        assert_eq!(
            compute_render_model(&items, &nav).unwrap(),
            compute_render_model(&items, &nav).unwrap()
        );
    }

    #[test]
    fn test_titles() {
        let week = compute_render_model(&[], &week_of(date(2026, 10, 16))).unwrap();
        assert_eq!(week.title(), "Oct 12 – Oct 18, 2026");

        let cross_year = compute_render_model(&[], &week_of(date(2027, 1, 1))).unwrap();
        assert_eq!(cross_year.title(), "Dec 28, 2026 – Jan 03, 2027");

        let month = compute_render_model(
            &[],
            &NavigationState::new(date(2026, 10, 16), Granularity::Month),
        )
        .unwrap();
        assert_eq!(month.title(), "October 2026");
    }
}
