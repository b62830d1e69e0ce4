//! Configuration system for `Kanboard`.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/kanboard/config.toml`)
//! 4. Compiled defaults
//!
//! Missing config file is not an error (defaults are used). An explicit
//! `--config` path that doesn't exist is an error.

use std::collections::HashSet;
use std::path::PathBuf;

use chrono::NaiveDate;
use kanboard_model::{Column, ColumnId, Project, default_columns};

use crate::board::activity::DEFAULT_ACTIVITY_CAPACITY;
use crate::board::seed::{blank_project, demo_projects};
use crate::board::store::DEFAULT_ASSIGNEE;
use crate::board::{BoardStore, SystemClock};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// The configured columns cannot form a board.
    #[error("invalid column configuration: {0}")]
    InvalidColumns(String),
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    board: BoardFileConfig,
    activity: ActivityFileConfig,
    export: ExportFileConfig,
    session: SessionFileConfig,
}

/// `[board]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct BoardFileConfig {
    default_assignee: Option<String>,
    done_column: Option<String>,
    columns: Option<Vec<Column>>,
}

/// `[activity]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ActivityFileConfig {
    capacity: Option<usize>,
}

/// `[export]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ExportFileConfig {
    dir: Option<PathBuf>,
}

/// `[session]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct SessionFileConfig {
    demo_data: Option<bool>,
}

// ---------------------------------------------------------------------------
// Resolved configuration (concrete types, all fields populated)
// ---------------------------------------------------------------------------

/// Fully resolved board configuration.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    // -- Board --
    /// Assignee used when the creation form leaves it blank.
    pub default_assignee: String,
    /// Status columns in display order.
    pub columns: Vec<Column>,
    /// The terminal column; tasks here are never overdue.
    pub done_column: ColumnId,

    // -- Activity --
    /// Maximum number of activity entries retained.
    pub activity_capacity: usize,

    // -- Export --
    /// Directory exported projects are written to.
    pub export_dir: PathBuf,

    // -- Session --
    /// Start with the demo projects instead of a blank board.
    pub demo_data: bool,
    /// Pins "today" for due-date checks.
    pub today: Option<NaiveDate>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            default_assignee: DEFAULT_ASSIGNEE.to_string(),
            columns: default_columns(),
            done_column: ColumnId::new("done"),
            activity_capacity: DEFAULT_ACTIVITY_CAPACITY,
            export_dir: PathBuf::from("."),
            demo_data: true,
            today: None,
        }
    }
}

impl BoardConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// CLI args and env vars are parsed via `clap`. If `--config` is given
    /// and the file does not exist, returns an error. If no `--config` is
    /// given, the default path (`~/.config/kanboard/config.toml`) is tried
    /// and silently ignored if missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config file cannot be read or parsed,
    /// or if the resolved columns are invalid.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        let config = Self::resolve(cli, &file);
        config.validate()?;
        Ok(config)
    }

    /// Resolve a `BoardConfig` from CLI args and a parsed config file.
    ///
    /// Priority: CLI > file > default. This is separated from `load()` to
    /// enable unit testing without CLI parsing.
    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            default_assignee: cli
                .assignee
                .clone()
                .or_else(|| file.board.default_assignee.clone())
                .unwrap_or(defaults.default_assignee),
            columns: file.board.columns.clone().unwrap_or(defaults.columns),
            done_column: file
                .board
                .done_column
                .as_deref()
                .map_or(defaults.done_column, ColumnId::new),
            activity_capacity: file
                .activity
                .capacity
                .unwrap_or(defaults.activity_capacity),
            export_dir: cli
                .export_dir
                .clone()
                .or_else(|| file.export.dir.clone())
                .unwrap_or(defaults.export_dir),
            demo_data: if cli.blank {
                false
            } else {
                file.session.demo_data.unwrap_or(defaults.demo_data)
            },
            today: cli.today,
        }
    }

    /// Check that the columns form a usable board.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidColumns`] if there are no columns,
    /// a column id repeats, or the done column is not among them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns.is_empty() {
            return Err(ConfigError::InvalidColumns(
                "at least one column is required".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(&column.id) {
                return Err(ConfigError::InvalidColumns(format!(
                    "duplicate column id: {}",
                    column.id
                )));
            }
        }
        if !seen.contains(&self.done_column) {
            return Err(ConfigError::InvalidColumns(format!(
                "done column {} is not a configured column",
                self.done_column
            )));
        }
        Ok(())
    }

    /// Builds the starting store from the configured columns and seed data.
    ///
    /// Demo tasks whose status is not a configured column would be invisible,
    /// so the demo data is replaced by a blank board in that case. Columns
    /// that fail [`BoardStore::with_columns`] fall back to the defaults.
    #[must_use]
    pub fn initial_store(&self) -> BoardStore {
        let configured = |projects: Vec<Project>| {
            BoardStore::new(projects).with_columns(self.columns.clone(), self.done_column.clone())
        };
        let store = if self.demo_data {
            configured(demo_projects()).or_else(|e| {
                eprintln!("Warning: demo data does not fit the configured columns: {e}");
                tracing::warn!(error = %e, "demo data skipped");
                configured(vec![blank_project()])
            })
        } else {
            configured(vec![blank_project()])
        };
        store
            .unwrap_or_else(|e| {
                eprintln!("Warning: invalid column configuration: {e}");
                tracing::warn!(error = %e, "using default columns");
                BoardStore::new(vec![blank_project()])
            })
            .with_default_assignee(&self.default_assignee)
            .with_clock(SystemClock::new().with_pinned_today(self.today))
    }
}

/// CLI arguments parsed by clap.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Single-board kanban task tracker")]
pub struct CliArgs {
    /// Path to config file (default: `~/.config/kanboard/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Assignee for tasks created without one.
    #[arg(long, env = "KANBOARD_ASSIGNEE")]
    pub assignee: Option<String>,

    /// Directory exported projects are written to.
    #[arg(long, env = "KANBOARD_EXPORT_DIR")]
    pub export_dir: Option<PathBuf>,

    /// Start with a single empty project instead of the demo data.
    #[arg(long)]
    pub blank: bool,

    /// Treat this date (YYYY-MM-DD) as today for due-date checks.
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "KANBOARD_LOG")]
    pub log_level: String,

    /// Path to log file (default: `$TMPDIR/kanboard.log`).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Load and parse a TOML config file.
///
/// If `explicit_path` is `Some`, the file must exist (error if not).
/// If `explicit_path` is `None`, the default path is tried and missing file
/// is treated as empty config.
fn load_config_file(explicit_path: Option<&std::path::Path>) -> Result<ConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            return Ok(ConfigFile::default());
        };
        config_dir.join("kanboard").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
