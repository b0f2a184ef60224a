//! Filter state applied before sorting and grouping.

use crate::models::{Importance, TimelineEvent, WritingStatus};

/// Every criterion that is set must match. An empty filter keeps all events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilter {
    pub category: Option<String>,
    pub importance: Option<Importance>,
    pub writing_status: Option<WritingStatus>,
    pub character: Option<String>,
    pub location: Option<String>,
    pub search: Option<String>,
}

fn same_text(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

impl EventFilter {
    pub fn is_empty(&self) -> bool {
        *self == EventFilter::default()
    }

    pub fn matches(&self, ev: &TimelineEvent) -> bool {
        if let Some(cat) = &self.category
            && !same_text(&ev.category, cat)
        {
            return false;
        }

        if let Some(imp) = self.importance
            && ev.importance != imp
        {
            return false;
        }

        if let Some(status) = self.writing_status
            && ev.writing_status != status
        {
            return false;
        }

        if let Some(name) = &self.character
            && !ev.characters.iter().any(|c| same_text(c, name))
        {
            return false;
        }

        if let Some(loc) = &self.location
            && !same_text(&ev.location, loc)
        {
            return false;
        }

        if let Some(needle) = &self.search {
            let needle = needle.to_lowercase();
            if !ev.title.to_lowercase().contains(&needle)
                && !ev.description.to_lowercase().contains(&needle)
            {
                return false;
            }
        }

        true
    }

    pub fn apply(&self, events: &[TimelineEvent]) -> Vec<TimelineEvent> {
        events.iter().filter(|e| self.matches(e)).cloned().collect()
    }
}
