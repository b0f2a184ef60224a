//! Timeline view model.
//!
//! Holds the inputs of the pipeline (events, filter, width) and the derived
//! groups and layout. Any input change rebuilds what depends on it in full:
//! filter → sort → group → layout.

use crate::core::filter::EventFilter;
use crate::core::geometry::{Rect, Size};
use crate::core::grouping::{DateGroup, sort_and_group};
use crate::core::layout::{LayoutConfig, SerpentineLayout};
use crate::errors::{AppError, AppResult};
use crate::models::TimelineEvent;

#[derive(Debug, Clone)]
pub struct TimelineView {
    events: Vec<TimelineEvent>,
    filter: EventFilter,
    config: LayoutConfig,
    container_width: f64,
    groups: Vec<DateGroup>,
    layout: SerpentineLayout,
}

fn check_width(width: f64) -> AppResult<f64> {
    if width.is_finite() && width > 0.0 {
        Ok(width)
    } else {
        Err(AppError::InvalidDimension(format!(
            "container width must be a positive number (got {width})"
        )))
    }
}

impl TimelineView {
    pub fn new(
        events: Vec<TimelineEvent>,
        filter: EventFilter,
        config: LayoutConfig,
        container_width: f64,
    ) -> AppResult<Self> {
        config.validate()?;
        let container_width = check_width(container_width)?;

        let groups = sort_and_group(&filter.apply(&events));
        let layout = SerpentineLayout::compute(groups.len(), container_width, &config);

        Ok(Self {
            events,
            filter,
            config,
            container_width,
            groups,
            layout,
        })
    }

    pub fn groups(&self) -> &[DateGroup] {
        &self.groups
    }

    pub fn layout(&self) -> &SerpentineLayout {
        &self.layout
    }

    pub fn container_width(&self) -> f64 {
        self.container_width
    }

    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }

    /// Number of events that survived the filter.
    pub fn visible_event_count(&self) -> usize {
        self.groups.iter().map(DateGroup::len).sum()
    }

    pub fn set_events(&mut self, events: Vec<TimelineEvent>) {
        self.events = events;
        self.regroup();
    }

    pub fn set_filter(&mut self, filter: EventFilter) {
        if filter != self.filter {
            self.filter = filter;
            self.regroup();
        }
    }

    /// Returns `true` when the width changed and the layout was rebuilt.
    pub fn resize(&mut self, container_width: f64) -> AppResult<bool> {
        let width = check_width(container_width)?;
        if width == self.container_width {
            return Ok(false);
        }
        self.container_width = width;
        self.relayout();
        Ok(true)
    }

    /// Bubble of group `index` in canvas coordinates.
    pub fn node_rect(&self, index: usize) -> Option<Rect> {
        let center = self.layout.position(index)?;
        let group = self.groups.get(index)?;
        let radius = if group.is_multi_event() {
            self.config.multi_bubble_radius
        } else {
            self.config.bubble_radius
        };
        Some(Rect::around(center, radius))
    }

    /// Scroll the canvas vertically so node `index` sits mid-viewport (as far
    /// as the canvas allows). Returns the bubble in viewport coordinates and
    /// the scroll offset used.
    pub fn scroll_to(&self, index: usize, viewport: Size) -> Option<(Rect, f64)> {
        let rect = self.node_rect(index)?;
        let max_scroll = (self.layout.canvas_height - viewport.height).max(0.0);
        let scroll_y = (rect.center().y - viewport.height / 2.0).clamp(0.0, max_scroll);
        Some((rect.translate(0.0, -scroll_y), scroll_y))
    }

    fn regroup(&mut self) {
        self.groups = sort_and_group(&self.filter.apply(&self.events));
        self.relayout();
    }

    fn relayout(&mut self) {
        self.layout =
            SerpentineLayout::compute(self.groups.len(), self.container_width, &self.config);
    }
}
