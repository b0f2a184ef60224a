use super::{importance::Importance, writing_status::WritingStatus};
use crate::core::date_key;
use serde::{Deserialize, Serialize};

/// Label shown for events that carry no date.
pub const NO_DATE_LABEL: &str = "No Date";

/// Category applied when none is given.
pub const DEFAULT_CATEGORY: &str = "Other";

/// A stored timeline event.
///
/// `date` is free-form text; its chronological weight comes from
/// [`date_key::parse_date_key`], never from the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub id: i64,
    pub project_id: i64,
    pub title: String,
    pub date: Option<String>,        // ⇔ timeline_events.date (TEXT NULL)
    pub importance: Importance,      // ⇔ timeline_events.importance ('high','medium','low')
    pub category: String,            // open vocabulary, e.g. "Battle"
    pub description: String,
    pub location: String,            // location *name*, not a foreign key
    pub characters: Vec<String>,     // ⇔ timeline_events.characters (JSON array)
    pub writing_status: WritingStatus,
    pub created_at: String,
}

impl TimelineEvent {
    /// Date string as displayed: blank or missing dates read "No Date".
    /// Any other text is kept verbatim, so grouping compares exact strings.
    pub fn display_date(&self) -> &str {
        match self.date.as_deref() {
            Some(d) if !d.trim().is_empty() => d,
            _ => NO_DATE_LABEL,
        }
    }

    pub fn sort_key(&self) -> u64 {
        date_key::parse_date_key(self.display_date())
    }
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// Input shape for creating an event, shared by the CLI and JSON import.
///
/// Deserializes the REST wire format: camelCase keys, optional
/// `date`/`category`/`importance`/`writingStatus`. Unknown keys such as
/// `id` or `projectId` are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTimelineEvent {
    pub title: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub importance: Importance,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub characters: Vec<String>,
    #[serde(default)]
    pub writing_status: WritingStatus,
}

impl NewTimelineEvent {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            date: None,
            importance: Importance::default(),
            category: default_category(),
            description: String::new(),
            location: String::new(),
            characters: Vec::new(),
            writing_status: WritingStatus::default(),
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }
}

/// Partial update. `None` leaves the stored value untouched;
/// `date: Some(None)` clears the date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimelineEventPatch {
    pub title: Option<String>,
    pub date: Option<Option<String>>,
    pub importance: Option<Importance>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub characters: Option<Vec<String>>,
    pub writing_status: Option<WritingStatus>,
}

impl TimelineEventPatch {
    pub fn is_empty(&self) -> bool {
        *self == TimelineEventPatch::default()
    }

    /// Apply the patch on top of an existing event.
    pub fn apply_to(self, ev: &mut TimelineEvent) {
        if let Some(title) = self.title {
            ev.title = title;
        }
        if let Some(date) = self.date {
            ev.date = date;
        }
        if let Some(importance) = self.importance {
            ev.importance = importance;
        }
        if let Some(category) = self.category {
            ev.category = category;
        }
        if let Some(description) = self.description {
            ev.description = description;
        }
        if let Some(location) = self.location {
            ev.location = location;
        }
        if let Some(characters) = self.characters {
            ev.characters = characters;
        }
        if let Some(status) = self.writing_status {
            ev.writing_status = status;
        }
    }
}
