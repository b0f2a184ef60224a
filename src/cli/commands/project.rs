use crate::cli::parser::{Commands, ProjectCommand};
use crate::config::Config;
use crate::core::project::ProjectLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::table::{Column, Table, or_dash};

use super::{confirm, open_pool};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Project { action } = cmd else {
        return Ok(());
    };

    let mut pool = open_pool(cfg)?;

    match action {
        ProjectCommand::Add {
            name,
            description,
            genre,
        } => {
            let project = ProjectLogic::create(&mut pool, name, description, genre)?;
            success(format!("Project #{} '{}' created.", project.id, project.name));
        }

        ProjectCommand::List => {
            let projects = ProjectLogic::list(&mut pool)?;
            if projects.is_empty() {
                info("No projects found.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("ID", 4),
                Column::new("Name", 28),
                Column::new("Genre", 16),
                Column::new("Description", 40),
            ]);
            for p in &projects {
                table.add_row(vec![
                    p.id.to_string(),
                    p.name.clone(),
                    or_dash(&p.genre),
                    or_dash(&p.description),
                ]);
            }
            println!("📚 Projects:\n");
            print!("{}", table.render());
        }

        ProjectCommand::Edit {
            id,
            name,
            description,
            genre,
        } => {
            let project = ProjectLogic::update(
                &mut pool,
                *id,
                name.as_deref(),
                description.as_deref(),
                genre.as_deref(),
            )?;
            success(format!("Project #{} '{}' updated.", project.id, project.name));
        }

        ProjectCommand::Del { id, yes } => {
            let project = ProjectLogic::get(&mut pool, *id)?;
            let question = format!(
                "Delete project #{} '{}' and all of its events?",
                project.id, project.name
            );
            if !confirm(&question, *yes)? {
                info("Deletion cancelled.");
                return Ok(());
            }

            ProjectLogic::delete(&mut pool, *id)?;
            success(format!("Project #{} '{}' deleted.", project.id, project.name));
        }
    }

    Ok(())
}
