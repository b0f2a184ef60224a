use rstoryline::core::event::EventLogic;
use rstoryline::core::project::ProjectLogic;
use rstoryline::db::initialize::init_db;
use rstoryline::db::pool::DbPool;
use rstoryline::errors::AppError;
use rstoryline::models::{Importance, NewTimelineEvent, TimelineEventPatch, WritingStatus};
use std::env;
use std::fs;

fn pool() -> DbPool {
    let pool = DbPool::in_memory().expect("open in-memory db");
    init_db(&pool.conn).expect("init db");
    pool
}

#[test]
fn test_project_crud() {
    let mut pool = pool();

    let p = ProjectLogic::create(&mut pool, "  Saga ", "An epic", "Fantasy").unwrap();
    assert_eq!(p.name, "Saga");

    assert!(matches!(
        ProjectLogic::create(&mut pool, "saga", "", ""),
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        ProjectLogic::create(&mut pool, "   ", "", ""),
        Err(AppError::Validation(_))
    ));

    let found = ProjectLogic::resolve(&mut pool, "SAGA").unwrap();
    assert_eq!(found.id, p.id);
    let by_id = ProjectLogic::resolve(&mut pool, &p.id.to_string()).unwrap();
    assert_eq!(by_id.name, "Saga");
    assert!(matches!(
        ProjectLogic::resolve(&mut pool, " Chronicle "),
        Err(AppError::NotFoundByName { kind: "Project", ref name }) if name == "Chronicle"
    ));
    assert!(matches!(
        ProjectLogic::resolve(&mut pool, "77"),
        Err(AppError::NotFound { id: 77, .. })
    ));

    let updated = ProjectLogic::update(&mut pool, p.id, None, None, Some("Grimdark")).unwrap();
    assert_eq!(updated.genre, "Grimdark");
    assert_eq!(updated.description, "An epic");

    assert_eq!(ProjectLogic::list(&mut pool).unwrap().len(), 1);
    ProjectLogic::delete(&mut pool, p.id).unwrap();
    assert!(matches!(
        ProjectLogic::get(&mut pool, p.id),
        Err(AppError::NotFound { .. })
    ));
}

#[test]
fn test_event_defaults_and_normalization() {
    let mut pool = pool();
    let p = ProjectLogic::create(&mut pool, "Saga", "", "").unwrap();

    let mut input = NewTimelineEvent::titled("  Siege  ").with_date("  ");
    input.category = " ".into();
    input.characters = vec!["Mira".into(), "  ".into(), " Tor ".into()];

    let ev = EventLogic::create(&mut pool, p.id, input).unwrap();

    assert_eq!(ev.title, "Siege");
    assert_eq!(ev.date, None);
    assert_eq!(ev.display_date(), "No Date");
    assert_eq!(ev.category, "Other");
    assert_eq!(ev.importance, Importance::Medium);
    assert_eq!(ev.writing_status, WritingStatus::Planning);
    assert_eq!(ev.characters, ["Mira", "Tor"]);
}

#[test]
fn test_rejected_event_leaves_store_untouched() {
    let mut pool = pool();
    let p = ProjectLogic::create(&mut pool, "Saga", "", "").unwrap();

    let err = EventLogic::create(&mut pool, p.id, NewTimelineEvent::titled("   ")).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(EventLogic::list(&mut pool, p.id).unwrap().is_empty());

    let err = EventLogic::create(&mut pool, 99, NewTimelineEvent::titled("Orphan")).unwrap_err();
    assert!(matches!(err, AppError::NotFound { id: 99, .. }));
}

#[test]
fn test_event_update_and_clear_date() {
    let mut pool = pool();
    let p = ProjectLogic::create(&mut pool, "Saga", "", "").unwrap();
    let ev = EventLogic::create(
        &mut pool,
        p.id,
        NewTimelineEvent::titled("Siege").with_date("Year 1, Day 5"),
    )
    .unwrap();

    let updated = EventLogic::update(
        &mut pool,
        ev.id,
        TimelineEventPatch {
            importance: Some(Importance::High),
            writing_status: Some(WritingStatus::FirstDraft),
            ..TimelineEventPatch::default()
        },
    )
    .unwrap();
    assert_eq!(updated.importance, Importance::High);
    assert_eq!(updated.writing_status, WritingStatus::FirstDraft);
    assert_eq!(updated.date.as_deref(), Some("Year 1, Day 5"));

    let cleared = EventLogic::update(
        &mut pool,
        ev.id,
        TimelineEventPatch {
            date: Some(None),
            ..TimelineEventPatch::default()
        },
    )
    .unwrap();
    assert_eq!(cleared.date, None);

    let reloaded = EventLogic::get(&mut pool, ev.id).unwrap();
    assert_eq!(reloaded, cleared);

    assert!(matches!(
        EventLogic::update(&mut pool, ev.id, TimelineEventPatch::default()),
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        EventLogic::update(
            &mut pool,
            ev.id,
            TimelineEventPatch {
                title: Some(" ".into()),
                ..TimelineEventPatch::default()
            }
        ),
        Err(AppError::Validation(_))
    ));
}

#[test]
fn test_deleting_project_cascades_to_events() {
    let mut pool = pool();
    let p = ProjectLogic::create(&mut pool, "Saga", "", "").unwrap();
    let ev = EventLogic::create(&mut pool, p.id, NewTimelineEvent::titled("Siege")).unwrap();

    ProjectLogic::delete(&mut pool, p.id).unwrap();

    assert!(matches!(
        EventLogic::get(&mut pool, ev.id),
        Err(AppError::NotFound { .. })
    ));
}

#[test]
fn test_import_json_uses_wire_defaults() {
    let mut pool = pool();
    let p = ProjectLogic::create(&mut pool, "Saga", "", "").unwrap();

    let path = env::temp_dir().join("store_import_defaults_rstoryline.json");
    fs::write(
        &path,
        r#"[
            {"id": 7, "projectId": 3, "title": "Siege", "date": "Year 1, Day 5",
             "importance": "high", "category": "Battle", "characters": ["Mira"],
             "writingStatus": "first_draft"},
            {"title": "A rumour"}
        ]"#,
    )
    .unwrap();

    let count = EventLogic::import_json(&mut pool, p.id, &path).unwrap();
    assert_eq!(count, 2);

    let events = EventLogic::list(&mut pool, p.id).unwrap();
    assert_eq!(events[0].importance, Importance::High);
    assert_eq!(events[0].writing_status, WritingStatus::FirstDraft);
    assert_eq!(events[0].characters, ["Mira"]);
    assert_eq!(events[1].category, "Other");
    assert_eq!(events[1].importance, Importance::Medium);
    assert_eq!(events[1].writing_status, WritingStatus::Planning);
    assert_eq!(events[1].date, None);

    fs::remove_file(&path).ok();
}

#[test]
fn test_import_json_is_all_or_nothing() {
    let mut pool = pool();
    let p = ProjectLogic::create(&mut pool, "Saga", "", "").unwrap();

    let path = env::temp_dir().join("store_import_invalid_rstoryline.json");
    fs::write(&path, r#"[{"title": "Fine"}, {"title": "  "}]"#).unwrap();

    let err = EventLogic::import_json(&mut pool, p.id, &path).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(EventLogic::list(&mut pool, p.id).unwrap().is_empty());

    fs::remove_file(&path).ok();
}
