use crate::core::icons::IconConfig;
use crate::core::layout::LayoutConfig;
use crate::core::popup::PopupConfig;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub mod migrate; // use submodule at src/config/migrate.rs

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    /// Project used when `--project` is omitted.
    #[serde(default)]
    pub default_project: Option<i64>,
    /// Canvas width used when `--width` is omitted.
    #[serde(default = "default_container_width")]
    pub container_width: f64,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub popup: PopupConfig,
    #[serde(default)]
    pub icons: IconConfig,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}

fn default_container_width() -> f64 {
    1000.0
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            default_project: None,
            container_width: default_container_width(),
            layout: LayoutConfig::default(),
            popup: PopupConfig::default(),
            icons: IconConfig::default(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rstoryline")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rstoryline")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rstoryline.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rstoryline.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&content).map_err(|e| {
            AppError::Config(format!("failed to parse {}: {}", path.display(), e))
        })?;
        Ok(cfg)
    }

    /// Validate the parts of the configuration the timeline core depends on.
    pub fn validate(&self) -> AppResult<()> {
        self.layout.validate()?;

        if !(self.container_width.is_finite() && self.container_width > 0.0) {
            return Err(AppError::Config(format!(
                "container_width must be positive (got {})",
                self.container_width
            )));
        }

        self.validate_popup()
    }

    fn validate_popup(&self) -> AppResult<()> {
        let p = &self.popup;
        let positive = |v: f64| v.is_finite() && v > 0.0;
        let non_negative = |v: f64| v.is_finite() && v >= 0.0;

        if !(positive(p.width) && positive(p.height)) {
            return Err(AppError::Config(
                "popup width and height must be positive".to_string(),
            ));
        }

        if !(non_negative(p.viewport_margin) && non_negative(p.gap)) {
            return Err(AppError::Config(format!(
                "popup viewport_margin and gap must be zero or positive (got {} and {})",
                p.viewport_margin, p.gap
            )));
        }

        if !(positive(p.viewport_width) && positive(p.viewport_height)) {
            return Err(AppError::Config(format!(
                "popup viewport must be positive (got {}x{})",
                p.viewport_width, p.viewport_height
            )));
        }

        // The popup frame plus both margins must fit, otherwise it cannot stay on screen.
        if p.width + 2.0 * p.viewport_margin > p.viewport_width
            || p.height + 2.0 * p.viewport_margin > p.viewport_height
        {
            return Err(AppError::Config(format!(
                "popup {}x{} with margin {} does not fit the {}x{} viewport",
                p.width, p.height, p.viewport_margin, p.viewport_width, p.viewport_height
            )));
        }

        Ok(())
    }

    /// Initialize configuration and database files.
    /// Returns the database path that was configured.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();

        // DB path: user provided or default
        let db_path = match custom_db {
            Some(name) => {
                let p = Path::new(&name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => dir.join("rstoryline.sqlite"),
        };

        if !is_test {
            fs::create_dir_all(&dir)?;

            let config = Config {
                database: db_path.to_string_lossy().to_string(),
                ..Config::default()
            };

            let yaml = serde_yaml::to_string(&config)?;
            fs::write(Self::config_file(), yaml)?;
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(db_path)
    }
}
