//! houseprep CLI — dataset fetch and preprocessing-registry commands.
//!
//! Commands:
//! - `fetch` — download train/test CSVs if absent and report their shapes
//! - `validate` — check registry invariants; exit 1 on any defect
//! - `classify` — show class, imputation and ordinal map for columns
//! - `export` — write the registry snapshot as JSON
//! - `dump-config` — write the registry as an editable TOML file
//! - `audit` — check dataset ordinal values against the registry's maps

mod logging;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use houseprep_core::data::{
    audit_ordinal_coverage, default_data_dir, fetch_housing_files, load_from_report, FileSource,
    KaggleClient,
};
use houseprep_core::registry::ImputeStrategy;
use houseprep_core::{ColumnClass, HousingConfig};
use logging::{init_logging, LogConfig, LogFormat};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "houseprep",
    about = "houseprep — house-prices dataset fetcher and preprocessing registry"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    log_format: LogFormat,

    /// Registry TOML file. Defaults to the built-in house-prices registry.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download train.csv and test.csv if absent, then load and report shapes.
    Fetch {
        /// Data directory. Defaults to ../datasets/raw.
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Check registry invariants; exits non-zero if any defect is found.
    Validate,
    /// Show classification, imputation strategy and ordinal map for columns.
    Classify {
        #[arg(required = true)]
        columns: Vec<String>,
    },
    /// Export the registry snapshot as JSON.
    Export {
        /// Output file. Prints to stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Write the registry as TOML, ready to edit and pass back via --config.
    DumpConfig {
        /// Output file. Prints to stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Load the dataset and check every ordinal value is mapped.
    Audit {
        /// Data directory. Defaults to ../datasets/raw.
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&LogConfig::from_verbosity(cli.verbose, cli.log_format))?;

    run(cli)
}

/// Dispatch a parsed command. Only commands that read the registry load it.
fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Fetch { data_dir } => run_fetch(data_dir),
        command => run_with_registry(command, cli.config.as_deref()),
    }
}

fn run_with_registry(command: Commands, path: Option<&Path>) -> Result<()> {
    let config = load_registry(path)?;
    match command {
        Commands::Fetch { data_dir } => run_fetch(data_dir),
        Commands::Validate => run_validate(&config),
        Commands::Classify { columns } => run_classify(&config, &columns),
        Commands::Export { out } => run_export(&config, out.as_deref()),
        Commands::DumpConfig { out } => run_dump_config(&config, out.as_deref()),
        Commands::Audit { data_dir } => run_audit(&config, data_dir),
    }
}

fn load_registry(path: Option<&Path>) -> Result<HousingConfig> {
    match path {
        Some(p) => HousingConfig::from_file(p)
            .with_context(|| format!("loading registry {}", p.display())),
        None => Ok(HousingConfig::house_prices()),
    }
}

fn resolve_data_dir(data_dir: Option<PathBuf>) -> Result<PathBuf> {
    match data_dir {
        Some(dir) => Ok(dir),
        None => Ok(default_data_dir()?),
    }
}

fn run_fetch(data_dir: Option<PathBuf>) -> Result<()> {
    let data_dir = resolve_data_dir(data_dir)?;
    let mut client = KaggleClient::new()?;

    let report = fetch_housing_files(&data_dir, &mut client)?;
    for file in &report.files {
        let how = match file.source {
            FileSource::Cache => "cached",
            FileSource::Downloaded => "downloaded",
        };
        println!("{:<10} {:<11} {}", file.file_name, how, file.path.display());
    }

    let (train, test) = load_from_report(&report)?;
    println!("train: {} rows x {} cols", train.height(), train.width());
    println!("test:  {} rows x {} cols", test.height(), test.width());
    Ok(())
}

fn run_validate(config: &HousingConfig) -> Result<()> {
    let defects = config.validate();
    if defects.is_empty() {
        println!("registry OK: no defects");
        return Ok(());
    }

    for defect in &defects {
        tracing::warn!(column = defect.column(), "{defect}");
        println!("  {defect}");
    }
    eprintln!("{} registry defect(s) found", defects.len());
    std::process::exit(1);
}

fn run_classify(config: &HousingConfig, columns: &[String]) -> Result<()> {
    println!(
        "{:<16} {:<20} {:<16} {:<5} ordinal map",
        "column", "class", "impute", "year"
    );
    for col in columns {
        let class = config.classify(col);
        let impute = config
            .impute_plan()
            .strategy_for(col)
            .map(ImputeStrategy::bucket_name)
            .unwrap_or("-");
        let year = if config.impute_plan().is_year(col) {
            "yes"
        } else {
            "-"
        };
        let ordinal = match config.ordinal_maps().get(col) {
            Some(scale) => scale
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join(" "),
            None if class == ColumnClass::OrdinalObject => "MISSING".to_string(),
            None => "-".to_string(),
        };
        println!("{col:<16} {:<20} {impute:<16} {year:<5} {ordinal}", class.to_string());
    }
    Ok(())
}

fn run_export(config: &HousingConfig, out: Option<&Path>) -> Result<()> {
    let snapshot = config.export_snapshot(chrono::Utc::now());
    let hash = snapshot.content_hash()?;
    tracing::info!(version = %snapshot.version, %hash, "exporting registry snapshot");

    match out {
        Some(path) => {
            snapshot
                .write_to(path)
                .with_context(|| format!("writing snapshot to {}", path.display()))?;
            println!("snapshot written to {}", path.display());
        }
        None => println!("{}", snapshot.to_json_pretty()?),
    }
    Ok(())
}

fn run_dump_config(config: &HousingConfig, out: Option<&Path>) -> Result<()> {
    let toml = config.to_toml()?;
    match out {
        Some(path) => {
            std::fs::write(path, toml)
                .with_context(|| format!("writing registry to {}", path.display()))?;
            println!("registry written to {}", path.display());
        }
        None => print!("{toml}"),
    }
    Ok(())
}

fn run_audit(config: &HousingConfig, data_dir: Option<PathBuf>) -> Result<()> {
    let data_dir = resolve_data_dir(data_dir)?;
    let mut client = KaggleClient::new()?;
    let report = fetch_housing_files(&data_dir, &mut client)?;
    let (train, test) = load_from_report(&report)?;

    let mut total = 0;
    for (name, df) in [("train", &train), ("test", &test)] {
        let defects = audit_ordinal_coverage(config, df);
        total += defects.len();
        if defects.is_empty() {
            println!("{name}: all ordinal values mapped");
        }
        for defect in &defects {
            println!("{name}: {defect}");
        }
    }

    if total > 0 {
        eprintln!("{total} ordinal coverage defect(s) found");
        std::process::exit(1);
    }
    Ok(())
}
