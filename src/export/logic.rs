// src/export/logic.rs

use crate::config::Config;
use crate::core::filter::EventFilter;
use crate::core::icons::IconSet;
use crate::core::project::ProjectLogic;
use crate::core::timeline::TimelineView;
use crate::db::log::audit_or_warn;
use crate::db::pool::DbPool;
use crate::db::queries::list_events_by_project;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{TimelineDocument, events_to_rows};
use crate::export::pdf::export_pdf;
use crate::export::svg::export_svg;
use crate::ui::messages::warning;
use std::io;
use std::path::Path;

/// Everything an export needs besides the database and the config.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub project_id: i64,
    pub format: ExportFormat,
    pub file: String,
    pub width: Option<f64>,
    pub filter: EventFilter,
    pub force: bool,
}

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export a project's timeline.
    ///
    /// - `csv`: one row per event in timeline order
    /// - `json`: the laid-out timeline document (groups, positions, path)
    /// - `svg` / `pdf`: the rendered serpentine drawing
    ///
    /// The output path must be absolute. An empty timeline is reported and
    /// nothing is written.
    pub fn export(pool: &mut DbPool, cfg: &Config, req: &ExportRequest) -> AppResult<()> {
        let path = Path::new(&req.file);

        if !path.is_absolute() {
            return Err(AppError::from(io::Error::other(format!(
                "Output file path must be absolute: {}",
                req.file
            ))));
        }

        let project = ProjectLogic::get(pool, req.project_id)?;
        let events = list_events_by_project(&pool.conn, project.id)?;

        let view = TimelineView::new(
            events,
            req.filter.clone(),
            cfg.layout.clone(),
            req.width.unwrap_or(cfg.container_width),
        )?;

        if view.groups().is_empty() {
            warning("No timeline events found for the selected project and filters.");
            return Ok(());
        }

        ensure_writable(path, req.force)?;

        let icons = IconSet::from_config(&cfg.icons);
        let title = format!("Timeline: {}", project.name);

        match req.format {
            ExportFormat::Csv => export_csv(&events_to_rows(&view), path)?,
            ExportFormat::Json => {
                export_json(&TimelineDocument::build(&project, &view, &icons), path)?
            }
            ExportFormat::Svg => export_svg(&view, &icons, &title, path)?,
            ExportFormat::Pdf => export_pdf(&view, &title, path)?,
        }

        audit_or_warn(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!(
                "Exported {} events of project #{} as {}",
                view.visible_event_count(),
                project.id,
                req.format.as_str()
            ),
        );

        Ok(())
    }
}
