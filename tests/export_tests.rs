mod common;
use common::{init_db_with_data, rst, setup_test_db, temp_out};
use predicates::str::contains;
use std::fs;

#[test]
fn test_export_json_document() {
    let db_path = setup_test_db("export_json_document");
    init_db_with_data(&db_path);

    let out = temp_out("export_json_document", "json");

    rst()
        .args([
            "--db", &db_path, "--test", "export", "--project", "1", "--format", "json", "--file",
            &out,
        ])
        .assert()
        .success()
        .stdout(contains("JSON export completed"));

    let content = fs::read_to_string(&out).expect("read exported json");
    let doc: serde_json::Value = serde_json::from_str(&content).expect("valid json");

    assert_eq!(doc["project"]["name"], "Saga");
    assert_eq!(doc["groups"].as_array().map(Vec::len), Some(3));
    assert_eq!(doc["groups"][1]["sortKey"], 10005);
    assert!(doc["groups"][1]["position"]["x"].is_number());
}

#[test]
fn test_export_csv_rows_in_timeline_order() {
    let db_path = setup_test_db("export_csv_rows");
    init_db_with_data(&db_path);

    let out = temp_out("export_csv_rows", "csv");

    rst()
        .args([
            "--db", &db_path, "--test", "export", "--project", "Saga", "--format", "csv",
            "--file", &out,
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    let mut lines = content.lines();

    let header = lines.next().expect("header row");
    assert!(header.starts_with("group,sortKey,date,id,title"));

    let rows: Vec<&str> = lines.collect();
    assert_eq!(rows.len(), 4);
    assert!(rows[0].starts_with("0,0,No Date,4,A rumour"));
    assert!(rows[1].starts_with("1,10005,\"Year 1, Day 5\",1,Siege of Karn"));
    assert!(rows[3].contains("Mira"));
}

#[test]
fn test_export_csv_with_filter() {
    let db_path = setup_test_db("export_csv_filter");
    init_db_with_data(&db_path);

    let out = temp_out("export_csv_filter", "csv");

    rst()
        .args([
            "--db", &db_path, "--test", "export", "--project", "1", "--format", "csv", "--file",
            &out, "--search", "council",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.contains("Council at dawn"));
    assert!(!content.contains("Siege of Karn"));
}

#[test]
fn test_export_svg_drawing() {
    let db_path = setup_test_db("export_svg_drawing");
    init_db_with_data(&db_path);

    let out = temp_out("export_svg_drawing", "svg");

    rst()
        .args([
            "--db", &db_path, "--test", "export", "--project", "1", "--format", "svg", "--file",
            &out, "--width", "500",
        ])
        .assert()
        .success();

    let svg = fs::read_to_string(&out).expect("read exported svg");
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"width="500""#));
    assert!(svg.contains("<path d=\"M 100.0 100.0 L 400.0 100.0 L 400.0 280.0\""));
    assert_eq!(svg.matches("class=\"node\"").count(), 3);
    assert!(svg.contains("Timeline: Saga"));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn test_export_pdf_file() {
    let db_path = setup_test_db("export_pdf_file");
    init_db_with_data(&db_path);

    let out = temp_out("export_pdf_file", "pdf");

    rst()
        .args([
            "--db", &db_path, "--test", "export", "--project", "1", "--format", "pdf", "--file",
            &out,
        ])
        .assert()
        .success()
        .stdout(contains("PDF export completed"));

    let bytes = fs::read(&out).expect("read exported pdf");
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_export_refuses_relative_path() {
    let db_path = setup_test_db("export_relative_path");
    init_db_with_data(&db_path);

    rst()
        .args([
            "--db", &db_path, "--test", "export", "--project", "1", "--format", "json", "--file",
            "timeline.json",
        ])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_export_existing_file_needs_force() {
    let db_path = setup_test_db("export_existing_file");
    init_db_with_data(&db_path);

    let out = temp_out("export_existing_file", "json");
    fs::write(&out, "old").expect("seed existing file");

    rst()
        .args([
            "--db", &db_path, "--test", "export", "--project", "1", "--format", "json", "--file",
            &out,
        ])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("not overwritten"));

    assert_eq!(fs::read_to_string(&out).expect("read file"), "old");

    rst()
        .args([
            "--db", &db_path, "--test", "export", "--project", "1", "--format", "json", "--file",
            &out, "--force",
        ])
        .assert()
        .success();

    assert!(fs::read_to_string(&out).expect("read file").contains("\"groups\""));
}

#[test]
fn test_export_empty_timeline_writes_nothing() {
    let db_path = setup_test_db("export_empty_timeline");
    init_db_with_data(&db_path);

    let out = temp_out("export_empty_timeline", "csv");

    rst()
        .args([
            "--db", &db_path, "--test", "export", "--project", "1", "--format", "csv", "--file",
            &out, "--category", "Magic",
        ])
        .assert()
        .success()
        .stdout(contains("No timeline events"));

    assert!(fs::metadata(&out).is_err());
}
