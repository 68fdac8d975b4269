//! # Roboclaw Supervisor
//!
//! Loads the controller and logging configuration, brings up the motor
//! driver, starts the safety monitors and serves the message pipe on
//! stdin/stdout. Logs go to stderr.

use clap::Parser;
use roboclaw_common::config::{ConfigLoader, LoggingConfig};
use roboclaw_common::hal::config::ControllerConfig;
use roboclaw_hal::DriverRegistry;
use roboclaw_supervisor::Supervisor;
use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::process;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

/// Roboclaw Supervisor: safety monitors and speed control for a dual
/// motor-controller board
#[derive(Parser, Debug)]
#[command(name = "roboclaw_supervisor")]
#[command(version)]
#[command(about = "Safety supervisor and speed control for a dual Roboclaw board")]
struct Args {
    /// Path to the controller configuration TOML.
    config: PathBuf,

    /// Path to the logging configuration TOML.
    logging: PathBuf,
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            eprint!("{e}");
            process::exit(1);
        }
    };

    let logging = match LoggingConfig::load(&args.logging) {
        Ok(logging) => logging,
        Err(e) => {
            eprintln!("FATAL: {}: {e}", args.logging.display());
            process::exit(1);
        }
    };
    if let Err(e) = setup_tracing(&logging) {
        eprintln!("FATAL: invalid logging filter: {e}");
        process::exit(1);
    }

    info!("Roboclaw Supervisor v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&args) {
        error!("FATAL: {e}");
        process::exit(1);
    }

    info!("Roboclaw Supervisor exiting");
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let config = ControllerConfig::load(&args.config)
        .map_err(|e| format!("{}: {e}", args.config.display()))?;
    info!(
        "Config OK: driver={}, units={:#x}/{:#x}, repeats={}",
        config.driver,
        config.units.front_address,
        config.units.rear_address,
        config.monitors.critical_read_repeats
    );

    let registry = DriverRegistry::with_builtin_drivers();
    let mut supervisor = Supervisor::new(config, &registry)?;
    supervisor.start_monitors()?;

    supervisor.serve(io::stdin().lock(), io::stdout().lock())?;
    Ok(())
}

/// Setup tracing subscriber from the logging configuration.
fn setup_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn Error>> {
    let mut filter = EnvFilter::from_default_env();
    for directive in logging.directives() {
        filter = filter.add_directive(directive.parse::<Directive>()?);
    }

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_thread_names(logging.with_thread_names);

    if logging.json {
        builder.json().init();
    } else {
        builder.compact().init();
    }
    Ok(())
}
