use crate::core::project::ProjectLogic;
use crate::db::log::audit_or_warn;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::timeline_event::DEFAULT_CATEGORY;
use crate::models::{NewTimelineEvent, TimelineEvent, TimelineEventPatch};
use chrono::Local;
use std::fs;
use std::path::Path;

/// Timeline event create / update / delete / import.
///
/// Validation happens before anything is written: a rejected create or
/// update leaves the store untouched.
pub struct EventLogic;

fn clean_title(title: &str) -> AppResult<String> {
    let t = title.trim();
    if t.is_empty() {
        return Err(AppError::Validation("event title cannot be empty".into()));
    }
    Ok(t.to_string())
}

fn clean_date(date: Option<String>) -> Option<String> {
    date.map(|d| d.trim().to_string()).filter(|d| !d.is_empty())
}

fn clean_category(category: &str) -> String {
    let c = category.trim();
    if c.is_empty() {
        DEFAULT_CATEGORY.to_string()
    } else {
        c.to_string()
    }
}

fn clean_characters(characters: Vec<String>) -> Vec<String> {
    characters
        .into_iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect()
}

fn normalize(ev: NewTimelineEvent) -> AppResult<NewTimelineEvent> {
    Ok(NewTimelineEvent {
        title: clean_title(&ev.title)?,
        date: clean_date(ev.date),
        category: clean_category(&ev.category),
        description: ev.description.trim().to_string(),
        location: ev.location.trim().to_string(),
        characters: clean_characters(ev.characters),
        ..ev
    })
}

impl EventLogic {
    pub fn create(
        pool: &mut DbPool,
        project_id: i64,
        ev: NewTimelineEvent,
    ) -> AppResult<TimelineEvent> {
        ProjectLogic::get(pool, project_id)?;
        let ev = normalize(ev)?;

        let id = queries::insert_event(&pool.conn, project_id, &ev, &Local::now().to_rfc3339())?;

        audit_or_warn(
            &pool.conn,
            "event_add",
            &format!("#{id}"),
            &format!(
                "Added '{}' ({}) to project #{}",
                ev.title,
                ev.date.as_deref().unwrap_or("no date"),
                project_id
            ),
        );

        Self::get(pool, id)
    }

    pub fn get(pool: &mut DbPool, id: i64) -> AppResult<TimelineEvent> {
        queries::load_event(&pool.conn, id)?.ok_or(AppError::NotFound {
            kind: "Timeline event",
            id,
        })
    }

    pub fn list(pool: &mut DbPool, project_id: i64) -> AppResult<Vec<TimelineEvent>> {
        ProjectLogic::get(pool, project_id)?;
        queries::list_events_by_project(&pool.conn, project_id)
    }

    pub fn update(
        pool: &mut DbPool,
        id: i64,
        patch: TimelineEventPatch,
    ) -> AppResult<TimelineEvent> {
        if patch.is_empty() {
            return Err(AppError::Validation("nothing to update".into()));
        }

        let mut ev = Self::get(pool, id)?;

        let patch = TimelineEventPatch {
            title: patch.title.as_deref().map(clean_title).transpose()?,
            date: patch.date.map(clean_date),
            category: patch.category.as_deref().map(clean_category),
            description: patch.description.map(|d| d.trim().to_string()),
            location: patch.location.map(|l| l.trim().to_string()),
            characters: patch.characters.map(clean_characters),
            ..patch
        };
        patch.apply_to(&mut ev);

        queries::update_event(&pool.conn, &ev)?;
        audit_or_warn(
            &pool.conn,
            "event_edit",
            &format!("#{id}"),
            &format!("Updated '{}'", ev.title),
        );

        Ok(ev)
    }

    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<TimelineEvent> {
        let ev = Self::get(pool, id)?;
        queries::delete_event(&pool.conn, id)?;
        audit_or_warn(
            &pool.conn,
            "event_del",
            &format!("#{id}"),
            &format!("Deleted '{}'", ev.title),
        );
        Ok(ev)
    }

    /// Import a JSON array of events (REST wire shape) into a project.
    ///
    /// All entries are validated first; a single invalid entry rejects the
    /// whole file and nothing is inserted.
    pub fn import_json(pool: &mut DbPool, project_id: i64, path: &Path) -> AppResult<usize> {
        ProjectLogic::get(pool, project_id)?;

        let content = fs::read_to_string(path)?;
        let raw: Vec<NewTimelineEvent> = serde_json::from_str(&content)?;

        let mut events = Vec::with_capacity(raw.len());
        for (i, ev) in raw.into_iter().enumerate() {
            let ev = normalize(ev)
                .map_err(|e| AppError::Validation(format!("entry {}: {}", i + 1, e)))?;
            events.push(ev);
        }

        let created_at = Local::now().to_rfc3339();
        let tx = pool.conn.transaction()?;
        for ev in &events {
            queries::insert_event(&tx, project_id, ev, &created_at)?;
        }
        tx.commit()?;

        audit_or_warn(
            &pool.conn,
            "event_import",
            &path.to_string_lossy(),
            &format!("Imported {} events into project #{}", events.len(), project_id),
        );

        Ok(events.len())
    }
}
