use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use renv_core::{Environment, RenvError, apply};
use renv_exec::replace_process;
use renv_observe::{LoggerConfig, logger_init};

mod cli;
use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logger() {
        eprintln!("renv: {err:#}");
    }

    run(&cli)
}

fn init_logger() -> anyhow::Result<()> {
    let cfg = LoggerConfig::from_env().context("logger configuration")?;
    logger_init(&cfg).context("logger init")?;
    Ok(())
}

fn run(cli: &Cli) -> ExitCode {
    let request = cli.request();
    let (env, assignment) = match apply(&request, Environment::capture()) {
        Ok(done) => done,
        Err(err) => return report(&err),
    };
    debug!(target: "renv.cli", ?assignment, "resolved");

    if cli.cmd.is_empty() {
        debug!(target: "renv.cli", "no command given; nothing to run");
        return ExitCode::SUCCESS;
    }

    match replace_process(&cli.cmd, env) {
        Ok(never) => match never {},
        Err(err) => {
            eprintln!("renv: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn report(err: &RenvError) -> ExitCode {
    if err.is_guard() {
        println!("{err}");
    } else {
        eprintln!("renv: {err}");
    }
    ExitCode::FAILURE
}
