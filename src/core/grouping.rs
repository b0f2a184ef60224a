//! Date grouping: one node per distinct displayed date.

use crate::core::date_key::parse_date_key;
use crate::models::TimelineEvent;
use std::collections::HashMap;

/// Events sharing an identical displayed date string.
/// Built fresh from the current event list; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct DateGroup {
    pub date: String,
    pub sort_key: u64,
    pub events: Vec<TimelineEvent>,
}

impl DateGroup {
    pub fn is_multi_event(&self) -> bool {
        self.events.len() > 1
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Always false for groups produced by [`group_events_by_date`].
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Highest importance among the group's events.
    pub fn importance(&self) -> crate::models::Importance {
        self.events
            .iter()
            .map(|e| e.importance)
            .max()
            .unwrap_or_default()
    }
}

/// Stable sort by date key: equal keys (including every unparseable date)
/// keep their input order.
pub fn sort_events_by_date(events: &mut [TimelineEvent]) {
    events.sort_by_cached_key(|e| parse_date_key(e.display_date()));
}

/// Group an already sorted list by exact displayed date string.
///
/// Groups appear in first-occurrence order; events keep their relative order
/// inside each group.
pub fn group_events_by_date(events: &[TimelineEvent]) -> Vec<DateGroup> {
    let mut groups: Vec<DateGroup> = Vec::new();
    let mut index_of: HashMap<&str, usize> = HashMap::new();

    for ev in events {
        let date = ev.display_date();

        match index_of.get(date) {
            Some(&i) => groups[i].events.push(ev.clone()),
            None => {
                index_of.insert(date, groups.len());
                groups.push(DateGroup {
                    date: date.to_string(),
                    sort_key: parse_date_key(date),
                    events: vec![ev.clone()],
                });
            }
        }
    }

    groups
}

/// Canonical pipeline: stable sort by date key, then group by exact string.
pub fn sort_and_group(events: &[TimelineEvent]) -> Vec<DateGroup> {
    let mut sorted = events.to_vec();
    sort_events_by_date(&mut sorted);
    group_events_by_date(&sorted)
}
