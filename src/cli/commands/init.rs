use crate::config::Config;
use crate::db::log::audit_or_warn;
use crate::errors::AppResult;

use crate::cli::parser::Cli;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::ui::messages::success;
use crate::utils::path::expand_to_string;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database and all pending migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    let custom_db = cli.db.as_deref().map(expand_to_string);
    let db_path = Config::init_all(custom_db, cli.test)?;
    let db_path = db_path.to_string_lossy().to_string();

    println!("⚙️  Initializing rStoryline…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database   : {}", &db_path);

    let pool = DbPool::new(&db_path)?;
    init_db(&pool.conn)?;

    println!("✅ Database initialized at {}", &db_path);

    audit_or_warn(
        &pool.conn,
        "init",
        &db_path,
        "Database initialized",
    );

    success("rStoryline initialization completed!");
    Ok(())
}
