use crate::db::migrate::{applied_versions, latest_version};
use crate::db::pool::DbPool;
use crate::db::queries::list_events_by_project;
use crate::errors::AppResult;
use crate::models::timeline_event::NO_DATE_LABEL;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) SCHEMA VERSION
    //
    let versions = applied_versions(&pool.conn)?;
    let current = versions.last().map(String::as_str).unwrap_or("--");
    let status = if current == latest_version() {
        format!("{GREEN}up to date{RESET}")
    } else {
        format!("{YELLOW}pending migrations{RESET}")
    };
    println!("{}• Schema:{} {} ({})", CYAN, RESET, current, status);

    //
    // 3) TOTALS
    //
    let projects: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM projects", [], |row| row.get(0))?;
    let events: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM timeline_events", [], |row| row.get(0))?;

    println!(
        "{}• Projects:{} {}{}{}",
        CYAN, RESET, GREEN, projects, RESET
    );
    println!(
        "{}• Timeline events:{} {}{}{}",
        CYAN, RESET, GREEN, events, RESET
    );

    //
    // 4) PER PROJECT: events, and how many carry a usable date
    //
    let mut stmt = pool
        .conn
        .prepare("SELECT id, name FROM projects ORDER BY id ASC")?;
    let rows: Vec<(i64, String)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<rusqlite::Result<_>>()?;

    for (id, name) in rows {
        let evs = list_events_by_project(&pool.conn, id)?;
        let dated = evs
            .iter()
            .filter(|e| e.display_date() != NO_DATE_LABEL && e.sort_key() > 0)
            .count();

        println!(
            "    #{:<3} {:<24} {:>4} events {}({} with a chronological date){}",
            id,
            name,
            evs.len(),
            GREY,
            dated,
            RESET
        );
    }

    println!();
    Ok(())
}
