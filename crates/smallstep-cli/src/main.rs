//! `smallstep`: run a catalogued program and print its reduction trace.
//!
//! ```text
//! smallstep loop
//! smallstep arithmetic --format json
//! smallstep conditional --format log
//! smallstep --list
//! ```
//!
//! Logs go to stderr (`RUST_LOG`, default `warn`; `--verbose` for `debug`).
//! The trace goes to stdout, except with `--format log`, where each
//! configuration is an INFO event on stderr and the default filter is `info`.

mod programs;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use programs::{Program, Term};
use smallstep_eval::{LogSink, Machine, MachineConfig, Reducible, StdoutSink, Trace};
use smallstep_types::Environment;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(author, version, about = "Small-step evaluator: prints every configuration a program passes through", long_about = None)]
struct Cli {
    /// Program to run (see --list)
    program: Option<String>,

    /// List available programs and exit
    #[arg(long)]
    list: bool,

    /// Abort after this many steps
    #[arg(long, value_name = "N")]
    max_steps: Option<u64>,

    /// Trace output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Log each step at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One `statement, environment` line per step
    Text,
    /// The whole trace as a JSON document
    Json,
    /// One `tracing` event per step
    Log,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.format);

    if cli.list {
        for program in programs::catalogue() {
            println!("{:<12} {}", program.name, program.summary);
        }
        return Ok(());
    }

    let Some(name) = cli.program.as_deref() else {
        bail!("no program given; use --list to see the catalogue");
    };
    let Program {
        term, environment, ..
    } = programs::find(name).with_context(|| format!("unknown program `{name}`"))?;

    let config = MachineConfig {
        step_limit: cli.max_steps,
    };
    match term {
        Term::Expression(e) => run(e, environment, config, cli.format),
        Term::Statement(s) => run(s, environment, config, cli.format),
    }
}

/// Filter used when `RUST_LOG` is unset or `--verbose` is given.
fn default_filter(verbose: bool, format: Format) -> &'static str {
    match (verbose, format) {
        (true, _) => "debug",
        (false, Format::Log) => "info",
        (false, _) => "warn",
    }
}

fn init_logging(verbose: bool, format: Format) {
    let fallback = default_filter(verbose, format);
    let filter = if verbose {
        EnvFilter::new(fallback)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn run<T: Reducible>(
    term: T,
    environment: Environment,
    config: MachineConfig,
    format: Format,
) -> Result<()> {
    let mut machine = Machine::with_config(term, environment, config);
    match format {
        Format::Text => machine.run(&mut StdoutSink)?,
        Format::Log => machine.run(&mut LogSink)?,
        Format::Json => {
            let mut trace = Trace::new();
            let outcome = machine.run(&mut trace);
            println!("{}", trace.to_json()?);
            outcome?;
        }
    }
    tracing::info!(steps = machine.steps(), "run finished");
    Ok(())
}
