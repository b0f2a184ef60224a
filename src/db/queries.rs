use crate::errors::{AppError, AppResult};
use crate::models::{Importance, NewTimelineEvent, Project, TimelineEvent, WritingStatus};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

// ---------------------------
// Projects
// ---------------------------

pub fn map_project_row(row: &Row) -> Result<Project> {
    Ok(Project {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        genre: row.get("genre")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_project(
    conn: &Connection,
    name: &str,
    description: &str,
    genre: &str,
    created_at: &str,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO projects (name, description, genre, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![name, description, genre, created_at],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_project(conn: &Connection, id: i64) -> AppResult<Option<Project>> {
    let project = conn
        .query_row(
            "SELECT * FROM projects WHERE id = ?1",
            [id],
            map_project_row,
        )
        .optional()?;
    Ok(project)
}

pub fn find_project_by_name(conn: &Connection, name: &str) -> AppResult<Option<Project>> {
    let project = conn
        .query_row(
            "SELECT * FROM projects WHERE name = ?1 COLLATE NOCASE",
            [name],
            map_project_row,
        )
        .optional()?;
    Ok(project)
}

pub fn list_projects(conn: &Connection) -> AppResult<Vec<Project>> {
    let mut stmt = conn.prepare("SELECT * FROM projects ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_project_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn update_project(conn: &Connection, p: &Project) -> AppResult<()> {
    conn.execute(
        "UPDATE projects SET name = ?1, description = ?2, genre = ?3 WHERE id = ?4",
        params![p.name, p.description, p.genre, p.id],
    )?;
    Ok(())
}

/// Delete a project; its events go with it (ON DELETE CASCADE).
/// Returns the number of deleted project rows (0 or 1).
pub fn delete_project(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM projects WHERE id = ?1", [id])?)
}

// ---------------------------
// Timeline events
// ---------------------------

pub fn map_event_row(row: &Row) -> Result<TimelineEvent> {
    let importance_str: String = row.get("importance")?;
    let importance = Importance::from_db_str(&importance_str)
        .ok_or_else(|| conversion_error(0, AppError::InvalidImportance(importance_str.clone())))?;

    let status_str: String = row.get("writing_status")?;
    let writing_status = WritingStatus::from_db_str(&status_str)
        .ok_or_else(|| conversion_error(0, AppError::InvalidWritingStatus(status_str.clone())))?;

    let characters_json: String = row.get("characters")?;
    let characters: Vec<String> = serde_json::from_str(&characters_json)
        .map_err(|e| conversion_error(0, AppError::Json(e)))?;

    Ok(TimelineEvent {
        id: row.get("id")?,
        project_id: row.get("project_id")?,
        title: row.get("title")?,
        date: row.get("date")?,
        importance,
        category: row.get("category")?,
        description: row.get("description")?,
        location: row.get("location")?,
        characters,
        writing_status,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_event(
    conn: &Connection,
    project_id: i64,
    ev: &NewTimelineEvent,
    created_at: &str,
) -> AppResult<i64> {
    let characters = serde_json::to_string(&ev.characters)?;

    conn.execute(
        "INSERT INTO timeline_events
            (project_id, title, date, importance, category, description,
             location, characters, writing_status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            project_id,
            ev.title,
            ev.date,
            ev.importance.to_db_str(),
            ev.category,
            ev.description,
            ev.location,
            characters,
            ev.writing_status.to_db_str(),
            created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_event(conn: &Connection, id: i64) -> AppResult<Option<TimelineEvent>> {
    let ev = conn
        .query_row(
            "SELECT * FROM timeline_events WHERE id = ?1",
            [id],
            map_event_row,
        )
        .optional()?;
    Ok(ev)
}

/// All events of a project in insertion order. Chronological ordering is
/// done by the timeline core, not here.
pub fn list_events_by_project(conn: &Connection, project_id: i64) -> AppResult<Vec<TimelineEvent>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM timeline_events
         WHERE project_id = ?1
         ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([project_id], map_event_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Update an event (all fields except id, project and creation time)
pub fn update_event(conn: &Connection, ev: &TimelineEvent) -> AppResult<()> {
    let characters = serde_json::to_string(&ev.characters)?;

    conn.execute(
        "UPDATE timeline_events
         SET title = ?1, date = ?2, importance = ?3, category = ?4,
             description = ?5, location = ?6, characters = ?7,
             writing_status = ?8
         WHERE id = ?9",
        params![
            ev.title,
            ev.date,
            ev.importance.to_db_str(),
            ev.category,
            ev.description,
            ev.location,
            characters,
            ev.writing_status.to_db_str(),
            ev.id,
        ],
    )?;
    Ok(())
}

pub fn delete_event(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM timeline_events WHERE id = ?1", [id])?)
}
