pub mod importance;
pub mod project;
pub mod timeline_event;
pub mod writing_status;

pub use importance::Importance;
pub use project::Project;
pub use timeline_event::{NewTimelineEvent, TimelineEvent, TimelineEventPatch};
pub use writing_status::WritingStatus;
