use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::event::EventLogic;
use crate::core::filter::EventFilter;
use crate::core::icons::IconSet;
use crate::core::popup::HoverController;
use crate::core::timeline::TimelineView;
use crate::errors::{AppError, AppResult};
use crate::export::TimelineDocument;
use crate::ui::messages::{header, info};
use crate::ui::timeline::{render_grid, render_group_table, render_popup};

use super::{open_pool, resolve_project};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Timeline {
        project,
        width,
        filter,
        json,
        inspect,
    } = cmd
    else {
        return Ok(());
    };

    let mut pool = open_pool(cfg)?;
    let project = resolve_project(&mut pool, cfg, project.as_deref())?;
    let events = EventLogic::list(&mut pool, project.id)?;

    let view = TimelineView::new(
        events,
        EventFilter::from(filter),
        cfg.layout.clone(),
        width.unwrap_or(cfg.container_width),
    )?;
    let icons = IconSet::from_config(&cfg.icons);

    if *json {
        let doc = TimelineDocument::build(&project, &view, &icons);
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    if view.groups().is_empty() {
        info(format!("No timeline events for '{}'.", project.name));
        return Ok(());
    }

    let layout = view.layout();
    header(format!("Timeline: {}", project.name));
    println!(
        "width {:.0}px · {} per row · {} rows · canvas height {:.0}px · {} events in {} groups{}\n",
        layout.container_width,
        layout.events_per_row,
        layout.row_count,
        layout.canvas_height,
        view.visible_event_count(),
        view.groups().len(),
        if view.filter().is_empty() { "" } else { " (filtered)" }
    );

    print!("{}", render_grid(&view, &icons));
    println!();
    print!("{}", render_group_table(&view));

    if let Some(index) = *inspect {
        let viewport = cfg.popup.viewport();
        let (bubble, scroll_y) = view.scroll_to(index, viewport).ok_or_else(|| {
            AppError::Validation(format!(
                "no node #{index}: the timeline has {} groups",
                view.groups().len()
            ))
        })?;

        let mut hover = HoverController::new(cfg.popup.clone(), viewport);
        let placement = hover.pointer_enter(index, bubble);

        println!();
        print!(
            "{}",
            render_popup(&view.groups()[index], index, &placement, scroll_y, &icons)
        );
    }

    Ok(())
}
