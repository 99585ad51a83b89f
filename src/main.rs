//! sbom-delta: component-level delta reports between two `CycloneDX` SBOMs

#![allow(clippy::struct_excessive_bools, clippy::needless_pass_by_value)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use sbom_delta::{
    cli,
    config::{load_or_default, DebugLevel, DiffConfig, DiffConfigBuilder},
    model::IdentityStrategy,
    pipeline::exit_codes,
    reports::ReportFormat,
};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "sbom-delta")]
#[command(version)]
#[command(about = "Compare two CycloneDX SBOMs component by component", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success (changes only fail the run with --fail-on-change)
    1  Changes detected and --fail-on-change given
    2  Error occurred

EXAMPLES:
    # Markdown report on stdout
    sbom-delta diff --old before.cdx.json --new after.cdx.json

    # License review, report to a file
    sbom-delta diff --old a.json --new b.json --license-focus -o licenses.md

    # CI gate on any change, JSON output
    sbom-delta diff --old a.json --new b.json --format json --fail-on-change")]
struct Cli {
    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `diff` subcommand
#[derive(Parser)]
struct DiffArgs {
    /// Path to the old/baseline SBOM
    #[arg(long)]
    old: PathBuf,

    /// Path to the new SBOM
    #[arg(long)]
    new: PathBuf,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum)]
    format: Option<ReportFormat>,

    /// Log extraction and index details to stderr
    #[arg(long)]
    debug: bool,

    /// Like --debug, and also dump both component lists to text files
    #[arg(long)]
    deep_debug: bool,

    /// Do not report version changes
    #[arg(long)]
    ignore_version: bool,

    /// Put license changes right after the summary
    #[arg(long)]
    license_focus: bool,

    /// How components are matched across the two SBOMs
    #[arg(long, value_enum)]
    identity: Option<IdentityStrategy>,

    /// Omit the generation timestamp from the report
    #[arg(long)]
    no_timestamp: bool,

    /// Exit with code 1 if any changes are detected
    #[arg(long)]
    fail_on_change: bool,

    /// Directory for --deep-debug dump files (default: current directory)
    #[arg(long, value_name = "DIR")]
    dump_dir: Option<PathBuf>,
}

impl DiffArgs {
    const fn debug_level(&self) -> Option<DebugLevel> {
        if self.deep_debug {
            Some(DebugLevel::Deep)
        } else if self.debug {
            Some(DebugLevel::Debug)
        } else {
            None
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two SBOMs and render a delta report
    Diff(DiffArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .sbom-delta.yaml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    let debug_flag = matches!(&cli.command, Commands::Diff(args) if args.debug || args.deep_debug);

    // Initialize logging; the level is revisited once the config file is loaded
    let (filter, filter_handle) = reload::Layer::new(log_filter(log_level(debug_flag, cli.quiet)));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false),
        )
        .init();

    let mut debug = debug_flag;
    let outcome = match cli.command {
        Commands::Diff(args) => {
            build_diff_config(&args, cli.config.as_deref(), cli.quiet).and_then(|config| {
                debug |= config.debug.level.is_enabled();
                let level = log_level(debug, config.behavior.quiet);
                if filter_handle.reload(log_filter(level)).is_err() {
                    tracing::debug!("Could not change log level to {level}");
                }
                cli::run_diff(config)
            })
        }
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "sbom-delta", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }
        Commands::Config { action } => run_config(action, cli.config.as_deref()),
    };

    match outcome {
        Ok(exit_code) => {
            if exit_code != exit_codes::SUCCESS {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            if debug {
                eprintln!("Error: {e:?}");
            } else {
                eprintln!("Error: {e:#}");
            }
            std::process::exit(exit_codes::ERROR);
        }
    }
}

const fn log_level(debug: bool, quiet: bool) -> &'static str {
    if debug {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    }
}

/// `RUST_LOG` wins over the level derived from flags.
fn log_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

fn run_config(action: ConfigAction, config_path: Option<&Path>) -> Result<i32> {
    match action {
        ConfigAction::Show => cli::run_config_show(config_path)?,
        ConfigAction::Path => cli::run_config_path(config_path)?,
        ConfigAction::Init { force } => {
            let cwd = std::env::current_dir()?;
            cli::run_config_init(&cwd, force)?;
        }
    }
    Ok(exit_codes::SUCCESS)
}

/// Merge config file defaults with command-line flags.
///
/// Boolean flags can only switch a behavior on; a file setting stays in
/// effect when the flag is absent.
fn build_diff_config(
    args: &DiffArgs,
    config_path: Option<&Path>,
    quiet: bool,
) -> Result<DiffConfig> {
    let (app_config, _) = load_or_default(config_path)?;

    let mut builder = DiffConfigBuilder::from_app_config(&app_config)
        .old_path(args.old.clone())
        .new_path(args.new.clone())
        .ignore_version(args.ignore_version || app_config.options.ignore_version)
        .license_focus(args.license_focus || app_config.options.license_focus)
        .fail_on_change(args.fail_on_change || app_config.behavior.fail_on_change)
        .quiet(quiet || app_config.behavior.quiet);

    if let Some(identity) = args.identity {
        builder = builder.identity(identity);
    }
    if let Some(format) = args.format {
        builder = builder.output_format(format);
    }
    if args.output.is_some() {
        builder = builder.output_file(args.output.clone());
    }
    if args.no_timestamp {
        builder = builder.timestamp(false);
    }
    if let Some(level) = args.debug_level() {
        builder = builder.debug_level(level);
    }
    if args.dump_dir.is_some() {
        builder = builder.dump_dir(args.dump_dir.clone());
    }

    Ok(builder.build()?)
}
