use clap::{Parser, Subcommand};
use colored::Colorize;
use miette::Result;
use resguard::config::resolve_library_root;
use resguard::{
    verify_overlay, ChangeGate, CompareOptions, Config, ReportFormat, Reporter, ResourceGuard,
};
use std::path::PathBuf;
use tracing::{debug, info};

/// resguard - Guard the public resource surface of an Android UI library
#[derive(Parser, Debug)]
#[command(name = "resguard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Library root (default: $ANDROID_BUILD_TOP/<library_path from config>)
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Git hash of the change under review
    /// Nothing runs when the commit does not touch the library
    #[arg(long, global = true)]
    sha: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Regenerate the manifest (and the overlayable file) from the resource directory
    Generate {
        /// Name of the manifest file
        #[arg(short, long)]
        file: Option<String>,

        /// Do not write the overlayable file
        #[arg(long)]
        no_overlayable: bool,
    },

    /// Fail if resources were added or removed since the manifest was generated
    Compare {
        /// Name of the manifest file
        #[arg(short, long)]
        file: Option<String>,

        /// Leave layout resources out of the comparison
        #[arg(long)]
        exclude_layouts: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },

    /// Check that an RRO does not overlay resources its base does not declare
    VerifyRro {
        /// res folder of an RRO (can be specified multiple times)
        #[arg(short, long = "rro", value_name = "DIR", required = true)]
        rro: Vec<PathBuf>,

        /// res folder of what is being overlaid (can be specified multiple times)
        #[arg(short, long = "base", value_name = "DIR", required = true)]
        base: Vec<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default)]
enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => ReportFormat::Terminal,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

/// Result of a run that did not error
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Clean,
    /// Resources changed or an overlay is not contained in its base
    SurfaceChanged,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    info!("resguard v{}", env!("CARGO_PKG_VERSION"));

    let outcome = match &cli.command {
        Command::Generate {
            file,
            no_overlayable,
        } => run_generate(&cli, file.as_deref(), !no_overlayable)?,
        Command::Compare {
            file,
            exclude_layouts,
            format,
        } => run_compare(&cli, file.as_deref(), *exclude_layouts, *format)?,
        Command::VerifyRro { rro, base, format } => run_verify_rro(&cli, rro, base, *format)?,
    };

    if outcome == Outcome::SurfaceChanged {
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Configuration named by `--config`, if any
fn explicit_config(cli: &Cli) -> Result<Option<Config>> {
    match &cli.config {
        Some(path) => Ok(Some(Config::from_file(path)?)),
        None => Ok(None),
    }
}

/// Resolve the library root, then load the configuration that applies to it
fn load_guard(cli: &Cli, explicit: Option<Config>) -> Result<ResourceGuard> {
    let root = resolve_library_root(
        cli.root.as_deref(),
        explicit.as_ref().unwrap_or(&Config::default()),
    )?;

    let config = match explicit {
        Some(config) => config,
        None => Config::from_default_locations(&root)?,
    };

    debug!("Library root: {}", root.display());
    Ok(ResourceGuard::new(root, config))
}

/// False when `--sha` names a commit that does not touch the library
///
/// Runs before the library root is resolved: git is queried from `--root`
/// when given, otherwise from the current directory.
fn library_changed(cli: &Cli, explicit: Option<&Config>) -> Result<bool> {
    let marker = match explicit {
        Some(config) => config.library_marker.clone(),
        None => Config::default().library_marker,
    };

    let mut gate = ChangeGate::new(marker);
    if let Some(root) = &cli.root {
        gate = gate.with_workdir(root);
    }
    Ok(gate.has_library_changes(cli.sha.as_deref())?)
}

fn run_generate(cli: &Cli, file: Option<&str>, with_overlayable: bool) -> Result<Outcome> {
    let explicit = explicit_config(cli)?;
    if !library_changed(cli, explicit.as_ref())? {
        debug!("Commit does not touch the library, nothing to do");
        return Ok(Outcome::Clean);
    }
    let guard = load_guard(cli, explicit)?;

    let summary = guard.generate(file, with_overlayable)?;

    if !cli.quiet {
        println!(
            "{}",
            format!(
                "Wrote {} resources to {}",
                summary.resources,
                summary.manifest.display()
            )
            .green()
        );
        if let Some(overlayable) = &summary.overlayable {
            println!(
                "{}",
                format!("Wrote overlayable resources to {}", overlayable.display()).green()
            );
        }
    }

    Ok(Outcome::Clean)
}

fn run_compare(
    cli: &Cli,
    file: Option<&str>,
    exclude_layouts: bool,
    format: OutputFormat,
) -> Result<Outcome> {
    let explicit = explicit_config(cli)?;
    if !library_changed(cli, explicit.as_ref())? {
        debug!("Commit does not touch the library, nothing to do");
        return Ok(Outcome::Clean);
    }
    let guard = load_guard(cli, explicit)?;

    let options = if exclude_layouts {
        CompareOptions::new().excluding_layouts()
    } else {
        CompareOptions::new()
    };

    let diff = guard.compare(file, &options)?;
    let manifest_name = file.unwrap_or(&guard.config().manifest_file);
    Reporter::new(format.into()).report_diff(&diff, manifest_name)?;

    Ok(if diff.is_empty() {
        Outcome::Clean
    } else {
        Outcome::SurfaceChanged
    })
}

fn run_verify_rro(
    cli: &Cli,
    rro: &[PathBuf],
    base: &[PathBuf],
    format: OutputFormat,
) -> Result<Outcome> {
    let explicit = explicit_config(cli)?;
    if !library_changed(cli, explicit.as_ref())? {
        debug!("Commit does not touch the library, nothing to do");
        return Ok(Outcome::Clean);
    }

    let check = verify_overlay(rro, base)?;
    Reporter::new(format.into()).report_overlay(&check)?;

    Ok(if check.passed() {
        Outcome::Clean
    } else {
        Outcome::SurfaceChanged
    })
}
