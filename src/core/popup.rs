//! Hover/popup controller.
//!
//! Decides where the detail popup of a timeline node goes and which group it
//! shows. Time is injected as milliseconds so the controller stays pure and
//! can be driven by any event loop (or by tests).
//!
//! States: `Idle → Hovering(group) → Idle`. Leaving a node (or the popup)
//! only schedules the close; entering the popup before the delay expires
//! cancels it. A pointer-down outside both node and popup closes at once.
//! Entering another node replaces the current popup directly.

use crate::core::geometry::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

fn default_width() -> f64 {
    320.0
}
fn default_height() -> f64 {
    240.0
}
fn default_viewport_margin() -> f64 {
    20.0
}
fn default_gap() -> f64 {
    12.0
}
fn default_close_delay_ms() -> u64 {
    100
}
fn default_viewport_width() -> f64 {
    1280.0
}
fn default_viewport_height() -> f64 {
    800.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopupConfig {
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    /// Minimum distance between the popup and any viewport edge.
    #[serde(default = "default_viewport_margin")]
    pub viewport_margin: f64,
    /// Vertical distance between bubble and popup.
    #[serde(default = "default_gap")]
    pub gap: f64,
    #[serde(default = "default_close_delay_ms")]
    pub close_delay_ms: u64,
    /// Viewport assumed by the CLI when inspecting a node.
    #[serde(default = "default_viewport_width")]
    pub viewport_width: f64,
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f64,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            viewport_margin: default_viewport_margin(),
            gap: default_gap(),
            close_delay_ms: default_close_delay_ms(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
        }
    }
}

impl PopupConfig {
    pub fn popup_size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn viewport(&self) -> Size {
        Size::new(self.viewport_width, self.viewport_height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PopupSide {
    Below,
    Above,
    Centered,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PopupPlacement {
    /// Popup box in viewport coordinates.
    pub frame: Rect,
    /// Horizontal centre of the popup, top edge of the popup.
    pub anchor: Point,
    pub side: PopupSide,
}

/// Place a popup for a bubble occupying `bubble` (viewport coordinates).
///
/// Horizontally the popup is centred on the bubble and clamped to keep
/// `viewport_margin` from both edges. Vertically it goes below when the
/// space there fits it, otherwise above, otherwise centred on the bubble and
/// clamped inside the viewport. When the viewport is narrower (or shorter)
/// than popup plus margins, the popup sticks to the left (or top) margin.
pub fn compute_popup_placement(bubble: Rect, viewport: Size, cfg: &PopupConfig) -> PopupPlacement {
    let margin = cfg.viewport_margin;
    let Size {
        width: w,
        height: h,
    } = cfg.popup_size();
    let center = bubble.center();

    let max_left = (viewport.width - margin - w).max(margin);
    let left = (center.x - w / 2.0).clamp(margin, max_left);

    let space_below = viewport.height - margin - (bubble.bottom() + cfg.gap);
    let space_above = bubble.top() - cfg.gap - margin;

    let (top, side) = if space_below >= h {
        (bubble.bottom() + cfg.gap, PopupSide::Below)
    } else if space_above >= h {
        (bubble.top() - cfg.gap - h, PopupSide::Above)
    } else {
        let max_top = (viewport.height - margin - h).max(margin);
        ((center.y - h / 2.0).clamp(margin, max_top), PopupSide::Centered)
    };

    PopupPlacement {
        frame: Rect::new(left, top, w, h),
        anchor: Point::new(left + w / 2.0, top),
        side,
    }
}

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Node(usize),
    Popup,
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HoverState {
    Idle,
    Hovering {
        group: usize,
        placement: PopupPlacement,
        /// Pending close, as an absolute time in ms.
        close_at: Option<u64>,
    },
}

#[derive(Debug, Clone)]
pub struct HoverController {
    config: PopupConfig,
    viewport: Size,
    state: HoverState,
}

impl HoverController {
    pub fn new(config: PopupConfig, viewport: Size) -> Self {
        Self {
            config,
            viewport,
            state: HoverState::Idle,
        }
    }

    pub fn state(&self) -> HoverState {
        self.state
    }

    pub fn active_group(&self) -> Option<usize> {
        match self.state {
            HoverState::Hovering { group, .. } => Some(group),
            HoverState::Idle => None,
        }
    }

    pub fn placement(&self) -> Option<PopupPlacement> {
        match self.state {
            HoverState::Hovering { placement, .. } => Some(placement),
            HoverState::Idle => None,
        }
    }

    /// Pointer entered node `group`, whose bubble sits at `bubble`.
    /// Any popup already open is replaced without passing through idle.
    pub fn pointer_enter(&mut self, group: usize, bubble: Rect) -> PopupPlacement {
        let placement = compute_popup_placement(bubble, self.viewport, &self.config);
        self.state = HoverState::Hovering {
            group,
            placement,
            close_at: None,
        };
        placement
    }

    /// Pointer left node `group`. Stale leaves from a node that is no longer
    /// active are ignored.
    pub fn pointer_leave(&mut self, group: usize, now_ms: u64) {
        if self.active_group() == Some(group) {
            self.schedule_close(now_ms);
        }
    }

    /// Pointer reached the popup: keep it open.
    pub fn popup_enter(&mut self) {
        if let HoverState::Hovering { close_at, .. } = &mut self.state {
            *close_at = None;
        }
    }

    pub fn popup_leave(&mut self, now_ms: u64) {
        self.schedule_close(now_ms);
    }

    /// What a pointer-down at `point` hits. The open popup is drawn above
    /// the nodes, so it wins over any bubble it covers.
    pub fn target_at(&self, point: Point, bubbles: &[Rect]) -> PointerTarget {
        if let Some(p) = self.placement()
            && p.frame.contains(point)
        {
            return PointerTarget::Popup;
        }

        bubbles
            .iter()
            .position(|b| b.contains(point))
            .map_or(PointerTarget::Outside, PointerTarget::Node)
    }

    /// Pointer-down outside both node and popup closes immediately.
    /// A press on a node or on the popup leaves the state untouched.
    pub fn pointer_down(&mut self, target: PointerTarget) {
        if let (PointerTarget::Outside, HoverState::Hovering { .. }) = (target, self.state) {
            self.state = HoverState::Idle;
        }
    }

    /// Advance the clock. Returns `true` when a pending close fired.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        match self.state {
            HoverState::Hovering {
                close_at: Some(deadline),
                ..
            } if now_ms >= deadline => {
                self.state = HoverState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Viewport changed: re-place an open popup against the new bounds.
    pub fn set_viewport(&mut self, viewport: Size, bubble: Option<Rect>) {
        self.viewport = viewport;
        if let (HoverState::Hovering { placement, .. }, Some(rect)) = (&mut self.state, bubble) {
            *placement = compute_popup_placement(rect, viewport, &self.config);
        }
    }

    fn schedule_close(&mut self, now_ms: u64) {
        let delay = self.config.close_delay_ms;
        if let HoverState::Hovering { close_at, .. } = &mut self.state {
            *close_at = Some(now_ms.saturating_add(delay));
        }
    }
}
