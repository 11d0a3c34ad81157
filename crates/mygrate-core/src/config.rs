//! Configuration types for mygrate.
//!
//! [`Config::load`] layers an optional TOML file and `MYGRATE__*` environment
//! variables on top of the built-in defaults. [`Config::defaults`] returns the
//! same defaults without touching the filesystem (useful in tests).
//!
//! Every relative path is resolved against [`PathsConfig::root`], never the
//! process working directory.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[paths]
root         = "."
input_dir    = "input"
output_dir   = "output"
orders_file  = "source_orders.csv"
tickets_file = "source_tickets.csv"

[output]
mode     = "sql_files"
conflict = "insert"
dialect  = "mysql"

[database]
path = "output/mygrate.db"
"#;

/// Prefix for environment overrides, e.g. `MYGRATE__OUTPUT__MODE=direct_load`.
pub const ENV_PREFIX: &str = "MYGRATE";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level migration configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub paths: PathsConfig,
    pub output: OutputConfig,
    pub database: DatabaseConfig,
}

/// `[paths]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    /// Directory every other relative path hangs off.
    pub root: PathBuf,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub orders_file: PathBuf,
    pub tickets_file: PathBuf,
}

/// `[output]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub mode: OutputMode,
    pub conflict: ConflictPolicy,
    pub dialect: Dialect,
}

/// `[database]` section, only read in [`OutputMode::DirectLoad`].
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

/// Where the derived tables end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// One `<table>_insert.sql` file per table.
    SqlFiles,
    /// Drop and recreate the tables in the destination database.
    DirectLoad,
}

/// What an insert does when the primary key already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Plain `INSERT`; the destination rejects duplicates.
    Insert,
    /// Overwrite every non-key column with the new row.
    Upsert,
}

/// SQL flavour used for upsert clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// `ON DUPLICATE KEY UPDATE col = VALUES(col)`
    Mysql,
    /// `ON CONFLICT (id) DO UPDATE SET col = excluded.col`
    Sqlite,
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputMode::SqlFiles => write!(f, "sql_files"),
            OutputMode::DirectLoad => write!(f, "direct_load"),
        }
    }
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictPolicy::Insert => write!(f, "insert"),
            ConflictPolicy::Upsert => write!(f, "upsert"),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Mysql => write!(f, "mysql"),
            Dialect::Sqlite => write!(f, "sqlite"),
        }
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load the built-in defaults, then `file` (if given, it must exist),
    /// then `MYGRATE__SECTION__KEY` environment variables.
    pub fn load(file: Option<&Path>) -> anyhow::Result<Self> {
        Self::load_with_env(file, environment())
    }

    fn load_with_env(file: Option<&Path>, env: config::Environment) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder
            .add_source(env)
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Same defaults, rooted at `root`.
    pub fn rooted_at(root: impl Into<PathBuf>) -> Self {
        let mut cfg = Self::defaults();
        cfg.paths.root = root.into();
        cfg
    }

    pub fn orders_path(&self) -> PathBuf {
        self.input_dir().join(&self.paths.orders_file)
    }

    pub fn tickets_path(&self) -> PathBuf {
        self.input_dir().join(&self.paths.tickets_file)
    }

    pub fn input_dir(&self) -> PathBuf {
        self.resolve(&self.paths.input_dir)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.resolve(&self.paths.output_dir)
    }

    pub fn database_path(&self) -> PathBuf {
        self.resolve(&self.database.path)
    }

    // Absolute paths are kept as-is by `join`.
    fn resolve(&self, path: &Path) -> PathBuf {
        self.paths.root.join(path)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
