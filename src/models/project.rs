use serde::Serialize;

/// A story project. Every timeline event belongs to exactly one project.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub genre: String,
    pub created_at: String, // ⇔ projects.created_at (TEXT, ISO8601)
}
