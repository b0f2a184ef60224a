use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Editorial progress of the scene an event belongs to.
/// Unrelated to story chronology.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum WritingStatus {
    #[default]
    Planning,
    Writing,
    FirstDraft,
    Editing,
    Complete,
}

impl WritingStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            WritingStatus::Planning => "planning",
            WritingStatus::Writing => "writing",
            WritingStatus::FirstDraft => "first_draft",
            WritingStatus::Editing => "editing",
            WritingStatus::Complete => "complete",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "planning" => Some(WritingStatus::Planning),
            "writing" => Some(WritingStatus::Writing),
            "first_draft" => Some(WritingStatus::FirstDraft),
            "editing" => Some(WritingStatus::Editing),
            "complete" => Some(WritingStatus::Complete),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WritingStatus::Planning => "Planning",
            WritingStatus::Writing => "Writing",
            WritingStatus::FirstDraft => "First draft",
            WritingStatus::Editing => "Editing",
            WritingStatus::Complete => "Complete",
        }
    }
}
