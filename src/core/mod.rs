//! Business logic and the timeline core.
//!
//! The pure pipeline is `date_key` → `grouping` → `layout`, with `filter`
//! in front and `popup` answering pointer interaction on the result.
//! `timeline::TimelineView` ties them together.

pub mod backup;
pub mod date_key;
pub mod event;
pub mod filter;
pub mod geometry;
pub mod grouping;
pub mod icons;
pub mod layout;
pub mod log;
pub mod popup;
pub mod project;
pub mod timeline;
