mod commands;
mod probe;

use clap::{Parser, Subcommand};
use commands::{EXIT_CONFIG_ERROR, EXIT_FAILURE, EXIT_PROBE_ERROR};
use dockgate_preflight::{ConfigError, PreflightConfig, VersionChecker, VersionTriplet};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

#[derive(Debug, Parser)]
#[command(
    name = "dockgate",
    version,
    about = "Preflight version checks for container runtimes"
)]
struct Cli {
    /// Path to a preflight config TOML file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the minimum supported runtime version (e.g. 18.09.0).
    #[arg(long, global = true)]
    min_version: Option<VersionTriplet>,

    /// Output results as structured JSON.
    #[arg(long, default_value_t = false, global = true)]
    json: bool,

    /// Enable verbose (debug) logging output.
    #[arg(short, long, default_value_t = false, global = true)]
    verbose: bool,

    /// Enable trace-level logging (more detailed than --verbose).
    #[arg(long, default_value_t = false, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check a version string as reported by the runtime (e.g. linux-20.10.7).
    Check {
        /// Raw `<platform>-<version>` string.
        version_string: String,
    },
    /// Query the installed runtime for its version and check it.
    Probe {
        /// Runtime binary to query.
        #[arg(long, default_value = "docker")]
        runtime_bin: String,
    },
}

fn main() -> ExitCode {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let msg = info.to_string();
        if msg.contains("Broken pipe")
            || msg.contains("broken pipe")
            || msg.contains("os error 32")
            || msg.contains("failed printing to stdout")
        {
            std::process::exit(0);
        }
        default_hook(info);
    }));

    let cli = Cli::parse();

    let default_level = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("DOCKGATE_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let result = load_checker(cli.config.as_deref(), cli.min_version).and_then(|checker| {
        match cli.command {
            Commands::Check { version_string } => {
                commands::check::run(&checker, &version_string, cli.json)
            }
            Commands::Probe { runtime_bin } => {
                commands::probe::run(&checker, &runtime_bin, cli.json)
            }
        }
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(msg) => {
            eprintln!("error: {msg}");
            let code = if msg.starts_with("config error:") {
                EXIT_CONFIG_ERROR
            } else if msg.starts_with("runtime probe:") {
                EXIT_PROBE_ERROR
            } else {
                EXIT_FAILURE
            };
            ExitCode::from(code)
        }
    }
}

fn load_checker(
    config_path: Option<&std::path::Path>,
    min_version: Option<VersionTriplet>,
) -> Result<VersionChecker, String> {
    let mut config = match config_path {
        Some(path) => PreflightConfig::load(path),
        None => match PreflightConfig::load_default() {
            Err(ConfigError::NoHome) => {
                debug!("HOME not set, using default config");
                Ok(PreflightConfig::default())
            }
            other => other,
        },
    }
    .map_err(|e| e.to_string())?;

    if let Some(min) = min_version {
        config.minimum_version = min;
    }
    debug!(
        "minimum {} version {}",
        config.runtime_name, config.minimum_version
    );
    Ok(VersionChecker::from_config(&config))
}
