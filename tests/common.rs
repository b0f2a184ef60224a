#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rstoryline::models::{Importance, TimelineEvent, WritingStatus};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rst() -> Command {
    cargo_bin_cmd!("rstoryline")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rstoryline.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Run `init` in test mode (no config file written).
pub fn init_db(db_path: &str) {
    rst()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Initialize DB and add a project ("Saga", id 1) with a small timeline:
/// two events on "Year 1, Day 5", one on "Year 1, Day 12", one undated.
pub fn init_db_with_data(db_path: &str) {
    init_db(db_path);

    rst()
        .args(["--db", db_path, "--test", "project", "add", "Saga", "--genre", "Fantasy"])
        .assert()
        .success();

    let events: [&[&str]; 4] = [
        &[
            "--title",
            "Siege of Karn",
            "--date",
            "Year 1, Day 5",
            "--importance",
            "high",
            "--category",
            "Battle",
        ],
        &["--title", "Council at dawn", "--date", "Year 1, Day 5", "--category", "Politics"],
        &[
            "--title",
            "The long road",
            "--date",
            "Year 1, Day 12",
            "--category",
            "Travel",
            "--character",
            "Mira",
        ],
        &["--title", "A rumour", "--importance", "low"],
    ];

    for args in events {
        rst()
            .args(["--db", db_path, "--test", "event", "add", "--project", "1"])
            .args(args)
            .assert()
            .success();
    }
}

/// In-memory event for library tests.
pub fn event(id: i64, title: &str, date: Option<&str>) -> TimelineEvent {
    TimelineEvent {
        id,
        project_id: 1,
        title: title.to_string(),
        date: date.map(str::to_string),
        importance: Importance::Medium,
        category: "Other".to_string(),
        description: String::new(),
        location: String::new(),
        characters: Vec::new(),
        writing_status: WritingStatus::Planning,
        created_at: "2026-01-10T10:00:00+01:00".to_string(),
    }
}
