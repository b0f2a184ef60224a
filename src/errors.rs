//! Unified application error type.
//! All modules (db, core, cli, export) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Serialization
    // ---------------------------
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Store / validation errors
    // ---------------------------
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{kind} #{id} not found")]
    NotFound { kind: &'static str, id: i64 },

    #[error("{kind} '{name}' not found")]
    NotFoundByName { kind: &'static str, name: String },

    #[error("Invalid importance: {0} (expected high, medium or low)")]
    InvalidImportance(String),

    #[error("Invalid writing status: {0} (expected planning, writing, first_draft, editing or complete)")]
    InvalidWritingStatus(String),

    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
