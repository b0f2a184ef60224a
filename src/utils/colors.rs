/// ANSI color helper utilities for terminal output.
use crate::models::{Importance, WritingStatus};

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

/// high → red, medium → yellow, low → green
pub fn color_for_importance(importance: Importance) -> &'static str {
    match importance {
        Importance::High => RED,
        Importance::Medium => YELLOW,
        Importance::Low => GREEN,
    }
}

pub fn color_for_status(status: WritingStatus) -> &'static str {
    match status {
        WritingStatus::Planning => GREY,
        WritingStatus::Writing => BLUE,
        WritingStatus::FirstDraft => CYAN,
        WritingStatus::Editing => MAGENTA,
        WritingStatus::Complete => GREEN,
    }
}

/// Grey out empty values ("" or "--"), leave the rest untouched.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--" {
        format!("{GREY}--{RESET}")
    } else {
        value.to_string()
    }
}
