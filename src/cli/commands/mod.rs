pub mod backup;
pub mod config;
pub mod db;
pub mod event;
pub mod export;
pub mod init;
pub mod log;
pub mod project;
pub mod timeline;

use crate::config::Config;
use crate::core::project::ProjectLogic;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::Project;
use std::io::{self, Write};

/// Open the configured database, bringing its schema up to date first.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    run_pending_migrations(&pool.conn)?;
    Ok(pool)
}

/// Resolve `--project`, falling back to `default_project` from the config.
pub(crate) fn resolve_project(
    pool: &mut DbPool,
    cfg: &Config,
    reference: Option<&str>,
) -> AppResult<Project> {
    match (reference, cfg.default_project) {
        (Some(r), _) => ProjectLogic::resolve(pool, r),
        (None, Some(id)) => ProjectLogic::get(pool, id),
        (None, None) => Err(AppError::Validation(
            "no project given: use --project or set default_project in the config".into(),
        )),
    }
}

/// Ask a yes/no question on stdin. `assume_yes` skips the prompt.
pub(crate) fn confirm(question: &str, assume_yes: bool) -> AppResult<bool> {
    if assume_yes {
        return Ok(true);
    }

    print!("{question} [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let ans = answer.trim().to_ascii_lowercase();
    Ok(ans == "y" || ans == "yes")
}
