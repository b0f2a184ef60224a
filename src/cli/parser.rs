use crate::core::filter::EventFilter;
use crate::export::ExportFormat;
use crate::models::{Importance, WritingStatus};
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for rStoryline
/// CLI application to plan story timelines with SQLite
#[derive(Parser)]
#[command(
    name = "rstoryline",
    version = env!("CARGO_PKG_VERSION"),
    about = "A story timeline CLI: record dated events and lay them out on a serpentine path using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields to the configuration file")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage story projects
    Project {
        #[command(subcommand)]
        action: ProjectCommand,
    },

    /// Manage timeline events
    Event {
        #[command(subcommand)]
        action: EventCommand,
    },

    /// Show the grouped, laid-out timeline of a project
    Timeline {
        #[arg(long, short, help = "Project id or name (default: config default_project)")]
        project: Option<String>,

        #[arg(long, help = "Container width in pixels (default: config container_width)")]
        width: Option<f64>,

        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long, conflicts_with = "inspect", help = "Print groups and layout as JSON")]
        json: bool,

        #[arg(
            long,
            value_name = "INDEX",
            help = "Hover node INDEX and show its popup placement and details"
        )]
        inspect: Option<usize>,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f', help = "Overwrite an existing file without asking")]
        force: bool,
    },

    /// Export a project's timeline
    Export {
        #[arg(long, short, help = "Project id or name (default: config default_project)")]
        project: Option<String>,

        #[arg(long, value_enum, default_value = "json")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Container width in pixels (default: config container_width)")]
        width: Option<f64>,

        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum ProjectCommand {
    /// Create a project
    Add {
        name: String,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long, default_value = "")]
        genre: String,
    },

    /// List projects
    List,

    /// Edit a project
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        genre: Option<String>,
    },

    /// Delete a project and all of its events
    Del {
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum EventCommand {
    /// Add an event to a project
    Add {
        #[arg(long, short, help = "Project id or name (default: config default_project)")]
        project: Option<String>,

        #[arg(long)]
        title: String,

        #[command(flatten)]
        fields: EventFields,
    },

    /// Edit an event; only the given fields change
    Edit {
        id: i64,

        #[arg(long)]
        title: Option<String>,

        #[command(flatten)]
        fields: EventFields,

        #[arg(long, conflicts_with = "date", help = "Remove the event date")]
        clear_date: bool,

        #[arg(long, help = "Remove all characters")]
        clear_characters: bool,
    },

    /// Delete an event
    Del {
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List the events of a project
    List {
        #[arg(long, short, help = "Project id or name (default: config default_project)")]
        project: Option<String>,

        #[arg(long, help = "Order by story date instead of creation")]
        sorted: bool,
    },

    /// Import events from a JSON array file
    Import {
        #[arg(long, short, help = "Project id or name (default: config default_project)")]
        project: Option<String>,

        #[arg(long, value_name = "FILE")]
        file: String,
    },
}

/// Optional event fields shared by `event add` and `event edit`.
#[derive(Args, Debug, Default)]
pub struct EventFields {
    #[arg(long, help = "Free-form story date, e.g. \"Year 1, Month 3, Day 5\"")]
    pub date: Option<String>,

    #[arg(long, value_enum)]
    pub importance: Option<Importance>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(long = "character", value_name = "NAME", help = "Character involved (repeatable)")]
    pub characters: Vec<String>,

    #[arg(long = "status", value_enum)]
    pub status: Option<WritingStatus>,
}

/// Timeline filters shared by `timeline` and `export`.
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    #[arg(long, help = "Keep events of this category")]
    pub category: Option<String>,

    #[arg(long = "only-importance", value_enum, help = "Keep events of this importance")]
    pub importance: Option<Importance>,

    #[arg(long = "only-status", value_enum, help = "Keep events with this writing status")]
    pub status: Option<WritingStatus>,

    #[arg(long = "with-character", value_name = "NAME", help = "Keep events involving NAME")]
    pub character: Option<String>,

    #[arg(long = "at", value_name = "LOCATION", help = "Keep events at LOCATION")]
    pub location: Option<String>,

    #[arg(long, help = "Keep events whose title or description contains TEXT")]
    pub search: Option<String>,
}

impl From<&FilterArgs> for EventFilter {
    fn from(args: &FilterArgs) -> Self {
        EventFilter {
            category: args.category.clone(),
            importance: args.importance,
            writing_status: args.status,
            character: args.character.clone(),
            location: args.location.clone(),
            search: args.search.clone(),
        }
    }
}
