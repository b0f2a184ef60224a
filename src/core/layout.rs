//! Serpentine layout engine.
//!
//! Groups fill a row left-to-right, the next row right-to-left, and so on.
//! Joining the node centres in index order yields the winding path.
//! Positions are always recomputed as a whole; nothing is patched.

use crate::core::geometry::Point;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// `columns` nodes per row once the container is wider than `min_width`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub min_width: f64,
    pub columns: usize,
}

fn default_edge_margin() -> f64 {
    100.0
}
fn default_row_height() -> f64 {
    180.0
}
fn default_top_offset() -> f64 {
    100.0
}
fn default_bottom_padding() -> f64 {
    100.0
}
fn default_bubble_radius() -> f64 {
    40.0
}
fn default_multi_bubble_radius() -> f64 {
    52.0
}
fn default_breakpoints() -> Vec<Breakpoint> {
    vec![
        Breakpoint {
            min_width: 900.0,
            columns: 4,
        },
        Breakpoint {
            min_width: 600.0,
            columns: 3,
        },
        Breakpoint {
            min_width: 400.0,
            columns: 2,
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Blank band kept on the left and right edge of the canvas.
    #[serde(default = "default_edge_margin")]
    pub edge_margin: f64,
    #[serde(default = "default_row_height")]
    pub row_height: f64,
    /// y of the first row.
    #[serde(default = "default_top_offset")]
    pub top_offset: f64,
    #[serde(default = "default_bottom_padding")]
    pub bottom_padding: f64,
    #[serde(default = "default_bubble_radius")]
    pub bubble_radius: f64,
    #[serde(default = "default_multi_bubble_radius")]
    pub multi_bubble_radius: f64,
    #[serde(default = "default_breakpoints")]
    pub breakpoints: Vec<Breakpoint>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            edge_margin: default_edge_margin(),
            row_height: default_row_height(),
            top_offset: default_top_offset(),
            bottom_padding: default_bottom_padding(),
            bubble_radius: default_bubble_radius(),
            multi_bubble_radius: default_multi_bubble_radius(),
            breakpoints: default_breakpoints(),
        }
    }
}

impl LayoutConfig {
    /// Columns per row for a container width: the widest breakpoint the
    /// width strictly exceeds, else a single column.
    pub fn events_per_row(&self, container_width: f64) -> usize {
        self.breakpoints
            .iter()
            .filter(|b| container_width > b.min_width)
            .max_by(|a, b| a.min_width.total_cmp(&b.min_width))
            .map(|b| b.columns)
            .unwrap_or(1)
    }

    pub fn validate(&self) -> AppResult<()> {
        if !(self.row_height.is_finite() && self.row_height > 0.0) {
            return Err(AppError::Config(format!(
                "layout.row_height must be positive (got {})",
                self.row_height
            )));
        }

        for (name, value) in [
            ("edge_margin", self.edge_margin),
            ("top_offset", self.top_offset),
            ("bottom_padding", self.bottom_padding),
            ("bubble_radius", self.bubble_radius),
            ("multi_bubble_radius", self.multi_bubble_radius),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(AppError::Config(format!(
                    "layout.{name} must be a non-negative number (got {value})"
                )));
            }
        }

        let mut sorted = self.breakpoints.clone();
        sorted.sort_by(|a, b| a.min_width.total_cmp(&b.min_width));

        let mut previous_columns = 1;
        for bp in &sorted {
            if bp.columns == 0 {
                return Err(AppError::Config(format!(
                    "layout breakpoint at {} has zero columns",
                    bp.min_width
                )));
            }
            if bp.columns < previous_columns {
                return Err(AppError::Config(format!(
                    "layout breakpoint at {} drops to {} columns: wider containers must not get fewer columns",
                    bp.min_width, bp.columns
                )));
            }
            if bp.columns > 1 && bp.min_width < 2.0 * self.edge_margin {
                return Err(AppError::Config(format!(
                    "layout breakpoint at {} is narrower than both edge margins ({})",
                    bp.min_width,
                    2.0 * self.edge_margin
                )));
            }
            previous_columns = bp.columns;
        }

        Ok(())
    }
}

/// Where a single group landed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePlacement {
    pub index: usize,
    pub row: usize,
    /// Position in sequence order within the row.
    pub column: usize,
    /// Visual column, left to right, after the odd-row reversal.
    pub display_column: usize,
    pub position: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SerpentineLayout {
    pub container_width: f64,
    pub events_per_row: usize,
    pub horizontal_spacing: f64,
    pub row_height: f64,
    pub row_count: usize,
    pub canvas_height: f64,
    pub nodes: Vec<NodePlacement>,
}

impl SerpentineLayout {
    pub fn compute(group_count: usize, container_width: f64, config: &LayoutConfig) -> Self {
        let per_row = config.events_per_row(container_width).max(1);

        let horizontal_spacing = if per_row > 1 {
            ((container_width - 2.0 * config.edge_margin) / (per_row - 1) as f64).max(0.0)
        } else {
            0.0
        };

        let nodes = (0..group_count)
            .map(|i| {
                let row = i / per_row;
                let column = i % per_row;
                let display_column = if row % 2 == 0 {
                    column
                } else {
                    per_row - 1 - column
                };

                let x = if per_row == 1 {
                    container_width / 2.0
                } else {
                    config.edge_margin + display_column as f64 * horizontal_spacing
                };
                let y = config.top_offset + row as f64 * config.row_height;

                NodePlacement {
                    index: i,
                    row,
                    column,
                    display_column,
                    position: Point::new(x, y),
                }
            })
            .collect();

        let row_count = group_count.div_ceil(per_row);

        Self {
            container_width,
            events_per_row: per_row,
            horizontal_spacing,
            row_height: config.row_height,
            row_count,
            canvas_height: row_count as f64 * config.row_height
                + config.top_offset
                + config.bottom_padding,
            nodes,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn position(&self, index: usize) -> Option<Point> {
        self.nodes.get(index).map(|n| n.position)
    }

    /// Node centres in sequence order: the connecting polyline.
    pub fn path(&self) -> Vec<Point> {
        self.nodes.iter().map(|n| n.position).collect()
    }

    /// The polyline as SVG path data (`M x y L x y ...`). Empty when there
    /// are no nodes.
    pub fn svg_path_data(&self) -> String {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| {
                let cmd = if i == 0 { 'M' } else { 'L' };
                format!("{cmd} {:.1} {:.1}", n.position.x, n.position.y)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Nodes of one row, in visual (left-to-right) order.
    pub fn row_nodes(&self, row: usize) -> Vec<&NodePlacement> {
        let mut nodes: Vec<&NodePlacement> = self.nodes.iter().filter(|n| n.row == row).collect();
        nodes.sort_by_key(|n| n.display_column);
        nodes
    }
}

/// One point per group, in group order.
pub fn compute_serpentine_layout(
    group_count: usize,
    container_width: f64,
    config: &LayoutConfig,
) -> Vec<Point> {
    SerpentineLayout::compute(group_count, container_width, config).path()
}
