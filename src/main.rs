use clap::Parser;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm, MultiSelect};
use indicatif::{ProgressBar, ProgressStyle};
use miette::{IntoDiagnostic, Result, WrapErr};
use std::path::PathBuf;
use tracing::info;

use reaper::project::parse_type_name;
use reaper::{CodeDeleter, Config, DeadCodeExport, DeadTypeRecord, Platform};

/// reaper - excise confirmed-dead types from iOS and Android projects
#[derive(Parser, Debug)]
#[command(name = "reaper")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the project root
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Dead-code export JSON from the analysis service
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Target platform
    #[arg(short, long, value_enum)]
    platform: PlatformArg,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Patterns to exclude (can be specified multiple times)
    #[arg(short, long)]
    exclude: Vec<String>,

    /// Only delete declarations, leave usages untouched
    #[arg(long)]
    skip_delete_usages: bool,

    /// Select the types to delete interactively
    #[arg(long)]
    interactive: bool,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    yes: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum PlatformArg {
    Ios,
    Android,
}

impl From<PlatformArg> for Platform {
    fn from(platform: PlatformArg) -> Self {
        match platform {
            PlatformArg::Ios => Platform::Ios,
            PlatformArg::Android => Platform::Android,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    info!("reaper v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;
    let platform = Platform::from(cli.platform);

    let records = load_records(&cli.input)?;
    if records.is_empty() {
        println!("{}", "No dead types in the export.".yellow());
        return Ok(());
    }

    let selected = select_records(records, platform, cli.interactive, cli.yes)?;
    if selected.is_empty() {
        println!("{}", "No types selected for deletion.".yellow());
        return Ok(());
    }

    let mut deleter = CodeDeleter::new(&cli.path, platform, &config);

    let pb = ProgressBar::new(selected.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap()
            .progress_chars("#>-"),
    );

    for record in &selected {
        deleter.delete_types(std::slice::from_ref(record), cli.skip_delete_usages);
        pb.inc(1);
    }
    pb.finish_with_message("Excision complete");

    println!();
    println!(
        "{}",
        format!("Processed {} dead types.", selected.len()).green()
    );

    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        Config::from_default_locations(&cli.path)?
    };

    if !cli.exclude.is_empty() {
        config.exclude.extend(cli.exclude.clone());
    }

    Ok(config)
}

/// Reads the service export and keeps only unseen (confirmed-dead) records.
fn load_records(path: &PathBuf) -> Result<Vec<DeadTypeRecord>> {
    let contents = std::fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read export file: {}", path.display()))?;

    let export: DeadCodeExport = serde_json::from_str(&contents)
        .into_diagnostic()
        .wrap_err("Failed to parse dead-code export")?;

    let records: Vec<DeadTypeRecord> =
        export.into_records().into_iter().filter(|r| !r.seen).collect();

    info!("Loaded {} unseen dead types", records.len());
    Ok(records)
}

/// Interactive selection / batch confirmation of the types to delete.
fn select_records(
    records: Vec<DeadTypeRecord>,
    platform: Platform,
    interactive: bool,
    yes: bool,
) -> Result<Vec<DeadTypeRecord>> {
    if yes {
        return Ok(records);
    }

    if interactive {
        let items: Vec<String> = records
            .iter()
            .map(|r| parse_type_name(&r.class_name, platform))
            .collect();

        println!();
        println!("{}", "Select types to delete:".cyan().bold());
        println!("{}", "(Space to toggle, Enter to confirm)".dimmed());
        println!();

        let selections = MultiSelect::with_theme(&ColorfulTheme::default())
            .items(&items)
            .interact()
            .into_diagnostic()?;

        let mut selected = Vec::new();
        let mut records = records;
        for index in selections.into_iter().rev() {
            selected.push(records.swap_remove(index));
        }
        selected.reverse();
        return Ok(selected);
    }

    println!();
    let confirm = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Delete {} dead types?", records.len()))
        .default(false)
        .interact()
        .into_diagnostic()?;

    if confirm {
        Ok(records)
    } else {
        Ok(Vec::new())
    }
}
