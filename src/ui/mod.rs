pub mod messages;
pub mod timeline;
