use crate::db::log::audit_or_warn;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::Project;
use chrono::Local;

/// Project create / update / delete with validation and audit logging.
pub struct ProjectLogic;

fn clean_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("project name cannot be empty".into()));
    }
    Ok(name.to_string())
}

impl ProjectLogic {
    pub fn create(
        pool: &mut DbPool,
        name: &str,
        description: &str,
        genre: &str,
    ) -> AppResult<Project> {
        let name = clean_name(name)?;

        if queries::find_project_by_name(&pool.conn, &name)?.is_some() {
            return Err(AppError::Validation(format!(
                "a project named '{}' already exists",
                name
            )));
        }

        let created_at = Local::now().to_rfc3339();
        let id = queries::insert_project(
            &pool.conn,
            &name,
            description.trim(),
            genre.trim(),
            &created_at,
        )?;

        audit_or_warn(
            &pool.conn,
            "project_add",
            &format!("#{id}"),
            &format!("Created project '{name}'"),
        );

        Self::get(pool, id)
    }

    pub fn get(pool: &mut DbPool, id: i64) -> AppResult<Project> {
        queries::load_project(&pool.conn, id)?.ok_or(AppError::NotFound {
            kind: "Project",
            id,
        })
    }

    /// Resolve a CLI reference: a numeric id or an exact (case-insensitive) name.
    pub fn resolve(pool: &mut DbPool, reference: &str) -> AppResult<Project> {
        if let Ok(id) = reference.trim().parse::<i64>() {
            return Self::get(pool, id);
        }

        let name = reference.trim();
        queries::find_project_by_name(&pool.conn, name)?.ok_or_else(|| AppError::NotFoundByName {
            kind: "Project",
            name: name.to_string(),
        })
    }

    pub fn list(pool: &mut DbPool) -> AppResult<Vec<Project>> {
        queries::list_projects(&pool.conn)
    }

    pub fn update(
        pool: &mut DbPool,
        id: i64,
        name: Option<&str>,
        description: Option<&str>,
        genre: Option<&str>,
    ) -> AppResult<Project> {
        let mut project = Self::get(pool, id)?;

        if let Some(n) = name {
            let n = clean_name(n)?;
            if let Some(other) = queries::find_project_by_name(&pool.conn, &n)?
                && other.id != id
            {
                return Err(AppError::Validation(format!(
                    "a project named '{}' already exists",
                    n
                )));
            }
            project.name = n;
        }
        if let Some(d) = description {
            project.description = d.trim().to_string();
        }
        if let Some(g) = genre {
            project.genre = g.trim().to_string();
        }

        queries::update_project(&pool.conn, &project)?;
        audit_or_warn(
            &pool.conn,
            "project_edit",
            &format!("#{id}"),
            &format!("Updated project '{}'", project.name),
        );

        Ok(project)
    }

    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<Project> {
        let project = Self::get(pool, id)?;
        queries::delete_project(&pool.conn, id)?;
        audit_or_warn(
            &pool.conn,
            "project_del",
            &format!("#{id}"),
            &format!("Deleted project '{}' and its events", project.name),
        );
        Ok(project)
    }
}
