use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use megaraid_core::EntityKind;
use megaraid_discovery::check::check_controllers;
use megaraid_discovery::config::ToolConfig;
use megaraid_discovery::output::{OutputFormat, render};
use megaraid_discovery::source::{FileSource, MegacliSource, ReportSource};
use megaraid_discovery::{device_stats, discover_devices};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

#[derive(Debug, Parser)]
#[command(name = "megaraid-stats", version)]
#[command(about = "MegaRAID device discovery and statistics for monitoring agents")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// YAML tool configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Management utility binary name, looked up in the search directories.
    #[arg(long, global = true)]
    binary: Option<String>,
    /// Timeout for one utility invocation, in milliseconds.
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,
    /// Read a captured report from FILE (`-` for stdin) instead of running the utility.
    #[arg(long, global = true, value_name = "FILE")]
    input: Option<PathBuf>,
    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
    /// Log diagnostics, including malformed report lines, to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,
    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every device of a kind.
    Discovery(DiscoveryArgs),
    /// Print the full statistics of one device.
    Stats(StatsArgs),
    /// Print 1 when a MegaRAID controller and the utility are present, else 0.
    Check,
}

#[derive(Debug, Args)]
struct DiscoveryArgs {
    /// Device kind: raid, ld or pd.
    #[arg(long = "type", value_name = "KIND")]
    kind: EntityKind,
}

#[derive(Debug, Args)]
struct StatsArgs {
    /// Device kind: raid, ld or pd.
    #[arg(long = "type", value_name = "KIND")]
    kind: EntityKind,
    /// Device identifier, as printed by `discovery` under `{#DEVICE_ID}`.
    #[arg(long)]
    name: String,
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.global);

    let result = load_config(&cli.global).and_then(|config| match cli.command {
        Command::Discovery(args) => run_discovery(&cli.global, &config, args),
        Command::Stats(args) => run_stats(&cli.global, &config, args),
        Command::Check => run_check(&config),
    });

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(global: &GlobalArgs) {
    let default_level = if global.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if global.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

/// Loads the configuration file, if any, and applies command-line overrides.
fn load_config(global: &GlobalArgs) -> Result<ToolConfig, String> {
    let mut config = match &global.config {
        Some(path) => ToolConfig::load(path).map_err(|err| {
            format!("Failed to load config '{}': {err}", path.display())
        })?,
        None => ToolConfig::default(),
    };

    if let Some(binary) = &global.binary {
        config.binary = binary.clone();
    }
    if let Some(timeout_ms) = global.timeout_ms {
        config.timeout_ms = timeout_ms;
    }
    config.verbose |= global.verbose;

    debug!(
        binary = %config.binary,
        timeout_ms = config.timeout_ms,
        verbose = config.verbose,
        "Resolved configuration"
    );
    Ok(config)
}

fn open_source(global: &GlobalArgs, config: &ToolConfig) -> Result<Box<dyn ReportSource>, String> {
    match &global.input {
        Some(path) => Ok(Box::new(FileSource::new(path))),
        None => {
            let source = MegacliSource::from_config(config).map_err(|err| err.to_string())?;
            debug!(binary = %source.binary().display(), "Using management utility");
            Ok(Box::new(source))
        }
    }
}

fn run_discovery(
    global: &GlobalArgs,
    config: &ToolConfig,
    args: DiscoveryArgs,
) -> Result<(), String> {
    let source = open_source(global, config)?;
    let entries = discover_devices(source.as_ref(), args.kind, config.parse_options())
        .map_err(|err| err.to_string())?;
    emit(&render(&entries, global.format).map_err(|err| err.to_string())?)
}

fn run_stats(global: &GlobalArgs, config: &ToolConfig, args: StatsArgs) -> Result<(), String> {
    let source = open_source(global, config)?;
    let stats = device_stats(source.as_ref(), args.kind, &args.name, config.parse_options())
        .map_err(|err| err.to_string())?;
    emit(&render(&stats, global.format).map_err(|err| err.to_string())?)
}

/// Never fails: anything that prevents the check prints `0`.
fn run_check(config: &ToolConfig) -> Result<(), String> {
    let ready = match check_controllers(config) {
        Ok(outcome) => {
            debug!(
                controller_present = outcome.controller_present,
                utility_installed = outcome.utility_installed,
                "Controller check finished"
            );
            outcome.ready()
        }
        Err(err) => {
            warn!(error = %err, "Unable to check controllers");
            false
        }
    };
    print!("{}", u8::from(ready));
    std::io::stdout()
        .flush()
        .map_err(|err| format!("Failed to write output: {err}"))
}

fn emit(rendered: &str) -> Result<(), String> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", rendered.trim_end())
        .and_then(|()| stdout.flush())
        .map_err(|err| format!("Failed to write output: {err}"))
}
