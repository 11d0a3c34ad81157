use clap::{Parser, ValueEnum};
use mygrate::{Config, ConflictPolicy, Dialect, OutputMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mygrate", about = "Migrate order/ticket CSV extracts into events, orders and tickets")]
struct Cli {
    /// TOML config layered over the built-in defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding `input/` and `output/` (default: current directory).
    #[arg(long)]
    root: Option<PathBuf>,

    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    #[arg(long, value_enum)]
    conflict: Option<ConflictArg>,

    #[arg(long, value_enum)]
    dialect: Option<DialectArg>,

    /// SQLite database for `--mode direct_load`, relative to the root.
    #[arg(long)]
    database: Option<PathBuf>,

    /// Print the run summary as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// Write logs to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "snake_case")]
enum ModeArg {
    SqlFiles,
    DirectLoad,
}

#[derive(Clone, Copy, ValueEnum)]
enum ConflictArg {
    Insert,
    Upsert,
}

#[derive(Clone, Copy, ValueEnum)]
enum DialectArg {
    Mysql,
    Sqlite,
}

impl Cli {
    fn apply(&self, cfg: &mut Config) {
        if let Some(root) = &self.root {
            cfg.paths.root = root.clone();
        }
        if let Some(mode) = self.mode {
            cfg.output.mode = match mode {
                ModeArg::SqlFiles => OutputMode::SqlFiles,
                ModeArg::DirectLoad => OutputMode::DirectLoad,
            };
        }
        if let Some(conflict) = self.conflict {
            cfg.output.conflict = match conflict {
                ConflictArg::Insert => ConflictPolicy::Insert,
                ConflictArg::Upsert => ConflictPolicy::Upsert,
            };
        }
        if let Some(dialect) = self.dialect {
            cfg.output.dialect = match dialect {
                DialectArg::Mysql => Dialect::Mysql,
                DialectArg::Sqlite => Dialect::Sqlite,
            };
        }
        if let Some(database) = &self.database {
            cfg.database.path = database.clone();
        }
    }
}

fn init_logging(log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .with_env_filter(filter)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .init();
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply(&mut config);

    let summary = mygrate::run(&config)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{summary}");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
