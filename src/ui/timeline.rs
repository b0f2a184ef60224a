//! Terminal rendering of a laid-out timeline.
//!
//! The grid mirrors the serpentine layout: one text line per row, cells in
//! visual column order, arrows pointing in reading direction, and a `↓` at
//! the end of the row where the path turns.

use crate::core::grouping::DateGroup;
use crate::core::icons::IconSet;
use crate::core::popup::{PopupPlacement, PopupSide};
use crate::core::timeline::TimelineView;
use crate::utils::colors::{
    BOLD, GREY, RESET, color_for_importance, color_for_status, colorize_optional,
};
use crate::utils::table::{Column, Table, fit};
use std::fmt::Write as _;
use unicode_width::UnicodeWidthStr;

const CELL_WIDTH: usize = 24;
const ARROW_WIDTH: usize = 4;

fn cell_label(group: &DateGroup, icons: &IconSet) -> String {
    let mut label = format!("{} {}", icons.for_group(group), group.date);
    if group.is_multi_event() {
        label.push_str(&format!(" ×{}", group.len()));
    }
    label
}

fn padded(text: &str, width: usize) -> String {
    let cell = fit(text, width);
    let fill = width.saturating_sub(cell.width());
    format!("{}{}", cell, " ".repeat(fill))
}

/// Serpentine grid, one line per row plus the turn markers between rows.
pub fn render_grid(view: &TimelineView, icons: &IconSet) -> String {
    let layout = view.layout();
    let per_row = layout.events_per_row;
    let slot = CELL_WIDTH + ARROW_WIDTH;
    let mut out = String::new();

    for row in 0..layout.row_count {
        let nodes = layout.row_nodes(row);
        let reversed = row % 2 == 1;

        let mut line = String::new();
        for dc in 0..per_row {
            match nodes.iter().find(|n| n.display_column == dc) {
                Some(node) => {
                    let group = &view.groups()[node.index];
                    let color = color_for_importance(group.importance());
                    let label = padded(&cell_label(group, icons), CELL_WIDTH);
                    let _ = write!(line, "{}{}{}", color, label, RESET);
                }
                None => line.push_str(&" ".repeat(CELL_WIDTH)),
            }

            let next_occupied = nodes.iter().any(|n| n.display_column == dc + 1);
            let here_occupied = nodes.iter().any(|n| n.display_column == dc);
            if dc + 1 < per_row {
                if here_occupied && next_occupied {
                    line.push_str(if reversed { " ←  " } else { " →  " });
                } else {
                    line.push_str(&" ".repeat(ARROW_WIDTH));
                }
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');

        // Turn marker under the last node of this row, if another row follows.
        if row + 1 < layout.row_count {
            let turn_col = if reversed { 0 } else { per_row - 1 };
            let _ = writeln!(out, "{}{}↓{}", " ".repeat(turn_col * slot + 1), GREY, RESET);
        }
    }

    out
}

/// One line per group with its sort key and coordinates.
pub fn render_group_table(view: &TimelineView) -> String {
    let mut table = Table::new(vec![
        Column::new("#", 3),
        Column::new("Date", 26),
        Column::new("Key", 9),
        Column::new("Events", 6),
        Column::new("Row", 3),
        Column::new("x", 7),
        Column::new("y", 7),
        Column::new("Titles", 40),
    ]);

    for (group, node) in view.groups().iter().zip(&view.layout().nodes) {
        let titles: Vec<&str> = group.events.iter().map(|e| e.title.as_str()).collect();
        table.add_row(vec![
            node.index.to_string(),
            group.date.clone(),
            group.sort_key.to_string(),
            group.len().to_string(),
            node.row.to_string(),
            format!("{:.1}", node.position.x),
            format!("{:.1}", node.position.y),
            titles.join(", "),
        ]);
    }

    table.render()
}

/// Popup placement followed by the detail of every event in the group.
pub fn render_popup(
    group: &DateGroup,
    index: usize,
    placement: &PopupPlacement,
    scroll_y: f64,
    icons: &IconSet,
) -> String {
    let side = match placement.side {
        PopupSide::Below => "below the node",
        PopupSide::Above => "above the node",
        PopupSide::Centered => "centred on the node",
    };

    let mut out = String::new();
    let _ = writeln!(
        out,
        "🔎 Node #{} {}{}{} → popup {} at ({:.1}, {:.1}), frame {:.0}x{:.0} from ({:.1}, {:.1}), scroll {:.0}",
        index,
        BOLD,
        group.date,
        RESET,
        side,
        placement.anchor.x,
        placement.anchor.y,
        placement.frame.width,
        placement.frame.height,
        placement.frame.x,
        placement.frame.y,
        scroll_y
    );

    let wrap = textwrap::Options::new(72)
        .initial_indent("      ")
        .subsequent_indent("      ");

    for ev in &group.events {
        let _ = writeln!(
            out,
            "  {} {}{}{} [{}{}{} · {} · {}{}{}]",
            icons.for_category(&ev.category),
            BOLD,
            ev.title,
            RESET,
            color_for_importance(ev.importance),
            ev.importance.label(),
            RESET,
            ev.category,
            color_for_status(ev.writing_status),
            ev.writing_status.label(),
            RESET
        );

        let characters = ev.characters.join(", ");
        let _ = writeln!(
            out,
            "      @ {}   with {}",
            colorize_optional(&ev.location),
            colorize_optional(&characters)
        );

        if !ev.description.is_empty() {
            let _ = writeln!(out, "{}", textwrap::fill(&ev.description, &wrap));
        }
    }

    out
}
