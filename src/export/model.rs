// src/export/model.rs

use crate::core::geometry::Point;
use crate::core::icons::IconSet;
use crate::core::timeline::TimelineView;
use crate::models::{Project, TimelineEvent};
use serde::Serialize;

/// Flat row for CSV export: one line per event, in timeline order.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EventExport {
    pub group: usize,
    pub sort_key: u64,
    pub date: String,
    pub id: i64,
    pub title: String,
    pub importance: String,
    pub category: String,
    pub location: String,
    pub characters: String,
    pub writing_status: String,
    pub description: String,
}

pub(crate) fn events_to_rows(view: &TimelineView) -> Vec<EventExport> {
    view.groups()
        .iter()
        .enumerate()
        .flat_map(|(gi, g)| {
            g.events.iter().map(move |e| EventExport {
                group: gi,
                sort_key: g.sort_key,
                date: g.date.clone(),
                id: e.id,
                title: e.title.clone(),
                importance: e.importance.to_db_str().to_string(),
                category: e.category.clone(),
                location: e.location.clone(),
                characters: e.characters.join("; "),
                writing_status: e.writing_status.to_db_str().to_string(),
                description: e.description.clone(),
            })
        })
        .collect()
}

/// One laid-out node of the JSON document.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GroupDocument<'a> {
    pub index: usize,
    pub date: &'a str,
    pub sort_key: u64,
    pub is_multi_event: bool,
    pub icon: &'a str,
    pub row: usize,
    pub display_column: usize,
    pub position: Point,
    pub events: &'a [TimelineEvent],
}

/// Whole timeline as JSON: canvas geometry, groups with their positions,
/// and the connecting path.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TimelineDocument<'a> {
    pub project: &'a Project,
    pub container_width: f64,
    pub events_per_row: usize,
    pub row_count: usize,
    pub canvas_height: f64,
    pub path: Vec<Point>,
    pub groups: Vec<GroupDocument<'a>>,
}

impl<'a> TimelineDocument<'a> {
    pub fn build(project: &'a Project, view: &'a TimelineView, icons: &'a IconSet) -> Self {
        let layout = view.layout();

        let groups = view
            .groups()
            .iter()
            .zip(&layout.nodes)
            .map(|(g, node)| GroupDocument {
                index: node.index,
                date: &g.date,
                sort_key: g.sort_key,
                is_multi_event: g.is_multi_event(),
                icon: icons.for_group(g),
                row: node.row,
                display_column: node.display_column,
                position: node.position,
                events: &g.events,
            })
            .collect();

        Self {
            project,
            container_width: layout.container_width,
            events_per_row: layout.events_per_row,
            row_count: layout.row_count,
            canvas_height: layout.canvas_height,
            path: layout.path(),
            groups,
        }
    }
}
