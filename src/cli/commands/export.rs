use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::filter::EventFilter;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::export::logic::ExportRequest;
use crate::utils::path::expand_to_string;

use super::{open_pool, resolve_project};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        project,
        format,
        file,
        width,
        filter,
        force,
    } = cmd
    {
        let mut pool = open_pool(cfg)?;
        let project = resolve_project(&mut pool, cfg, project.as_deref())?;

        let req = ExportRequest {
            project_id: project.id,
            format: *format,
            file: expand_to_string(file),
            width: *width,
            filter: EventFilter::from(filter),
            force: *force,
        };
        ExportLogic::export(&mut pool, cfg, &req)?;
    }
    Ok(())
}
