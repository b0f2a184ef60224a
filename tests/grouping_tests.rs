mod common;
use common::event;
use rstoryline::core::grouping::{group_events_by_date, sort_and_group, sort_events_by_date};
use rstoryline::models::Importance;

#[test]
fn test_same_date_events_share_a_group() {
    let events = vec![
        event(1, "a", Some("Year 1, Day 5")),
        event(2, "b", Some("Year 1, Day 5")),
        event(3, "c", Some("Year 1, Day 12")),
    ];

    let groups = sort_and_group(&events);

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].date, "Year 1, Day 5");
    assert!(groups[0].is_multi_event());
    assert_eq!(groups[0].len(), 2);
    assert_eq!(groups[1].date, "Year 1, Day 12");
    assert!(!groups[1].is_multi_event());
}

#[test]
fn test_groups_follow_chronology_not_insertion() {
    let events = vec![
        event(1, "late", Some("Year 2, Day 1")),
        event(2, "early", Some("Day 3")),
        event(3, "middle", Some("Year 1, Month 6, Day 1")),
    ];

    let groups = sort_and_group(&events);
    let dates: Vec<&str> = groups.iter().map(|g| g.date.as_str()).collect();

    assert_eq!(dates, ["Day 3", "Year 1, Month 6, Day 1", "Year 2, Day 1"]);
    assert!(groups.windows(2).all(|w| w[0].sort_key <= w[1].sort_key));
}

#[test]
fn test_unparsed_and_missing_dates_sort_first_in_input_order() {
    let events = vec![
        event(1, "dated", Some("Year 1, Day 1")),
        event(2, "vague", Some("sometime")),
        event(3, "undated", None),
        event(4, "blank", Some("   ")),
    ];

    let groups = sort_and_group(&events);

    // "sometime" and "No Date" both key 0; stable order keeps "sometime" first.
    assert_eq!(groups.len(), 3);
    assert_eq!(groups[0].date, "sometime");
    assert_eq!(groups[0].sort_key, 0);
    assert_eq!(groups[1].date, "No Date");
    assert_eq!(groups[1].sort_key, 0);
    assert_eq!(groups[1].events.iter().map(|e| e.id).collect::<Vec<_>>(), [3, 4]);
    assert_eq!(groups[2].date, "Year 1, Day 1");
}

#[test]
fn test_sort_is_stable_for_equal_keys() {
    let mut events = vec![
        event(1, "first", Some("Day 4")),
        event(2, "zero", Some("whenever")),
        event(3, "second", Some("Day 4")),
    ];

    sort_events_by_date(&mut events);

    let ids: Vec<i64> = events.iter().map(|e| e.id).collect();
    assert_eq!(ids, [2, 1, 3]);
}

#[test]
fn test_equal_keys_with_different_text_stay_separate() {
    // Same key, different display string: two groups, input order preserved.
    let events = vec![
        event(1, "a", Some("Day 5")),
        event(2, "b", Some("day 5")),
        event(3, "c", Some("Day 5")),
    ];

    let groups = sort_and_group(&events);

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].date, "Day 5");
    assert_eq!(groups[0].len(), 2);
    assert_eq!(groups[1].date, "day 5");
    assert_eq!(groups[0].sort_key, groups[1].sort_key);
}

#[test]
fn test_surrounding_whitespace_makes_a_different_group() {
    let events = vec![
        event(1, "a", Some("Year 1, Day 5")),
        event(2, "b", Some(" Year 1, Day 5")),
        event(3, "c", Some("Year 1, Day 5")),
    ];

    let groups = sort_and_group(&events);

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].date, "Year 1, Day 5");
    assert_eq!(groups[0].events.iter().map(|e| e.id).collect::<Vec<_>>(), [1, 3]);
    assert_eq!(groups[1].date, " Year 1, Day 5");
    assert_eq!(groups[1].sort_key, 10005);
}

#[test]
fn test_grouping_keeps_every_event_once() {
    let events: Vec<_> = (0..20)
        .map(|i| event(i, "e", Some(format!("Day {}", i % 7).as_str())))
        .collect();

    let groups = sort_and_group(&events);
    let total: usize = groups.iter().map(|g| g.len()).sum();

    assert_eq!(total, events.len());
    assert_eq!(groups.len(), 7);
}

#[test]
fn test_group_importance_is_the_highest() {
    let mut a = event(1, "a", Some("Day 1"));
    a.importance = Importance::Low;
    let mut b = event(2, "b", Some("Day 1"));
    b.importance = Importance::High;

    let groups = group_events_by_date(&[a, b]);
    assert_eq!(groups[0].importance(), Importance::High);
}

#[test]
fn test_empty_input_has_no_groups() {
    assert!(sort_and_group(&[]).is_empty());
}
