use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use cwdash::resource::load_resources;
use cwdash::{compose, render_document, GlobalConfig};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Compose a CloudWatch dashboard and alarms from discovered resources
#[derive(Parser, Debug)]
#[command(name = "cwdash", version = cwdash::VERSION, about, long_about = None)]
struct Args {
    /// Configuration file (JSON, or YAML with a .yaml/.yml extension)
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Resource list to compose (overrides ResourceFile)
    #[arg(short, long)]
    resources: Option<PathBuf>,

    /// Override BaseName from the configuration
    #[arg(long)]
    base_name: Option<String>,

    /// Write the document here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit compact JSON
    #[arg(long)]
    compact: bool,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off")]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("cwdash started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("cwdash").join("cwdash.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".cwdash").join("cwdash.log");
    }
    PathBuf::from("cwdash.log")
}

fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level)?;

    let mut config = GlobalConfig::load(&args.config)?;
    if let Some(base_name) = &args.base_name {
        config.base_name = base_name.clone();
        config.validate()?;
    }

    let resource_file = match &args.resources {
        Some(path) => path.clone(),
        None => {
            let base_dir = args.config.parent().unwrap_or(Path::new("."));
            config.effective_resource_file(base_dir)
        }
    };

    let resources = load_resources(&resource_file)?;
    let result = compose(&resources, &config);

    for skipped in &result.skipped {
        eprintln!("Skipped {}: {}", skipped.identifier, skipped.reason);
    }

    let document = render_document(&result, &config).context("Failed to render dashboard")?;
    let json = if args.compact {
        serde_json::to_string(&document)?
    } else {
        serde_json::to_string_pretty(&document)?
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {} to {}", document.dashboard_name, path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json)?;
        }
    }

    Ok(())
}
