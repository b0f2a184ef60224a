//! Versioned schema migrations.
//!
//! Each step runs once, inside its own transaction, and is recorded as a
//! `migration_applied` row in the `log` table.

use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20260110_0001_create_projects",
        description: "Created projects table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS projects (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL UNIQUE,
            description TEXT NOT NULL DEFAULT '',
            genre       TEXT NOT NULL DEFAULT '',
            created_at  TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20260110_0002_create_timeline_events",
        description: "Created timeline_events table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS timeline_events (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            project_id     INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
            title          TEXT NOT NULL,
            date           TEXT,
            importance     TEXT NOT NULL DEFAULT 'medium'
                           CHECK(importance IN ('high','medium','low')),
            category       TEXT NOT NULL DEFAULT 'Other',
            description    TEXT NOT NULL DEFAULT '',
            location       TEXT NOT NULL DEFAULT '',
            characters     TEXT NOT NULL DEFAULT '[]',
            writing_status TEXT NOT NULL DEFAULT 'planning'
                           CHECK(writing_status IN ('planning','writing','first_draft','editing','complete')),
            created_at     TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_timeline_events_project ON timeline_events(project_id);
        "#,
    },
    Migration {
        version: "20260302_0003_index_timeline_category",
        description: "Indexed timeline_events by project and category",
        sql: r#"
        CREATE INDEX IF NOT EXISTS idx_timeline_events_project_category
            ON timeline_events(project_id, category);
        "#,
    },
];

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(m.sql)?;
    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.description],
    )?;
    tx.commit()
}

/// Versions already recorded in the `log` table, oldest first.
pub fn applied_versions(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    rows.collect()
}

/// Latest known schema version.
pub fn latest_version() -> &'static str {
    MIGRATIONS.last().map(|m| m.version).unwrap_or("")
}

/// Public entry point: run all pending migrations.
/// Returns how many steps were applied.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> AppResult<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }

        apply(conn, m).map_err(|e| AppError::Migration(format!("{}: {}", m.version, e)))?;
        success(format!("Migration applied: {} → {}", m.version, m.description));
        applied += 1;
    }

    Ok(applied)
}
