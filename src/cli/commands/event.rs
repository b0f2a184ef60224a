use crate::cli::parser::{Commands, EventCommand, EventFields};
use crate::config::Config;
use crate::core::event::EventLogic;
use crate::core::grouping::sort_events_by_date;
use crate::errors::AppResult;
use crate::models::timeline_event::DEFAULT_CATEGORY;
use crate::models::{NewTimelineEvent, TimelineEventPatch};
use crate::ui::messages::{info, success};
use crate::utils::path::expand_tilde;
use crate::utils::table::{Column, Table, or_dash};

use super::{confirm, open_pool, resolve_project};

fn new_event(title: &str, fields: &EventFields) -> NewTimelineEvent {
    NewTimelineEvent {
        title: title.to_string(),
        date: fields.date.clone(),
        importance: fields.importance.unwrap_or_default(),
        category: fields
            .category
            .clone()
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        description: fields.description.clone().unwrap_or_default(),
        location: fields.location.clone().unwrap_or_default(),
        characters: fields.characters.clone(),
        writing_status: fields.status.unwrap_or_default(),
    }
}

fn patch_from(
    title: &Option<String>,
    fields: &EventFields,
    clear_date: bool,
    clear_characters: bool,
) -> TimelineEventPatch {
    let date = if clear_date {
        Some(None)
    } else {
        fields.date.clone().map(Some)
    };

    let characters = if clear_characters {
        Some(Vec::new())
    } else if fields.characters.is_empty() {
        None
    } else {
        Some(fields.characters.clone())
    };

    TimelineEventPatch {
        title: title.clone(),
        date,
        importance: fields.importance,
        category: fields.category.clone(),
        description: fields.description.clone(),
        location: fields.location.clone(),
        characters,
        writing_status: fields.status,
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Event { action } = cmd else {
        return Ok(());
    };

    let mut pool = open_pool(cfg)?;

    match action {
        EventCommand::Add {
            project,
            title,
            fields,
        } => {
            let project = resolve_project(&mut pool, cfg, project.as_deref())?;
            let ev = EventLogic::create(&mut pool, project.id, new_event(title, fields))?;
            success(format!(
                "Event #{} '{}' added to '{}' ({}).",
                ev.id,
                ev.title,
                project.name,
                ev.display_date()
            ));
        }

        EventCommand::Edit {
            id,
            title,
            fields,
            clear_date,
            clear_characters,
        } => {
            let patch = patch_from(title, fields, *clear_date, *clear_characters);
            let ev = EventLogic::update(&mut pool, *id, patch)?;
            success(format!("Event #{} '{}' updated.", ev.id, ev.title));
        }

        EventCommand::Del { id, yes } => {
            let ev = EventLogic::get(&mut pool, *id)?;
            if !confirm(&format!("Delete event #{} '{}'?", ev.id, ev.title), *yes)? {
                info("Deletion cancelled.");
                return Ok(());
            }

            EventLogic::delete(&mut pool, *id)?;
            success(format!("Event #{} '{}' deleted.", ev.id, ev.title));
        }

        EventCommand::List { project, sorted } => {
            let project = resolve_project(&mut pool, cfg, project.as_deref())?;
            let mut events = EventLogic::list(&mut pool, project.id)?;

            if events.is_empty() {
                info(format!("No timeline events in '{}'.", project.name));
                return Ok(());
            }

            if *sorted {
                sort_events_by_date(&mut events);
            }

            let mut table = Table::new(vec![
                Column::new("ID", 4),
                Column::new("Date", 26),
                Column::new("Key", 9),
                Column::new("Importance", 10),
                Column::new("Category", 12),
                Column::new("Status", 11),
                Column::new("Location", 16),
                Column::new("Title", 36),
            ]);
            for ev in &events {
                table.add_row(vec![
                    ev.id.to_string(),
                    ev.display_date().to_string(),
                    ev.sort_key().to_string(),
                    ev.importance.label().to_string(),
                    ev.category.clone(),
                    ev.writing_status.label().to_string(),
                    or_dash(&ev.location),
                    ev.title.clone(),
                ]);
            }

            println!("📖 Events of '{}':\n", project.name);
            print!("{}", table.render());
        }

        EventCommand::Import { project, file } => {
            let project = resolve_project(&mut pool, cfg, project.as_deref())?;
            let count = EventLogic::import_json(&mut pool, project.id, &expand_tilde(file))?;
            success(format!("Imported {} events into '{}'.", count, project.name));
        }
    }

    Ok(())
}
