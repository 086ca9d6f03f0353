mod cli;
mod error;
mod repl;

use clap::Parser;
use cli::Cli;
use error::Error;
use oasis_session::{Adapter, EngineConfig, OasisEngine, Session};
use std::{fs, io::{self, IsTerminal, Read}, process::ExitCode};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Sends logs to stderr, filtered by the `--log` directive.
fn init_logging(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr).with_target(false))
        .init();
}

/// Reads the whole file, or standard input if no file is given.
fn read_source(cli: &Cli) -> Result<String, Error> {
    match &cli.file {
        Some(path) => fs::read_to_string(path)
            .map_err(|source| Error::ReadFile { path: path.clone(), source }),
        None => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input).map_err(Error::ReadStdin)?;
            Ok(input)
        },
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let engine = OasisEngine::new(EngineConfig {
        format: cli.format.into(),
        max_passes: cli.max_passes,
    });
    let mut session = Session::new(Adapter::new(engine));

    if cli.file.is_some() || !io::stdin().is_terminal() {
        let input = read_source(cli)?;
        repl::run_batch(&mut session, &input, io::stdout().lock(), io::stderr().lock())
            .map_err(Error::Output)
    } else {
        repl::run_interactive(&mut session)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log);
    tracing::debug!(?cli, "starting");

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "stopped");
            eprintln!("{}", err);
            ExitCode::FAILURE
        },
    }
}
