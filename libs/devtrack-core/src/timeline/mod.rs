//! Timeline engine: period layout and navigation over dated items

pub mod dates;
pub mod engine;
pub mod item;
pub mod navigation;

pub use engine::{compute_render_model, period_bounds, place_item, PositionedItem, RenderModel};
pub use item::{
    normalize_items, timeline_items_for_project, ItemKind, RawTimelineItem, TimelineItem,
};
pub use navigation::{navigate, Granularity, NavAction, NavigationState};
