mod app;
mod output;

use std::process::ExitCode;

use clap::Parser;
use dotscribe::{
    decompiler::Decompiler,
    orchestrator::{Orchestrator, PeLoader},
};

use crate::{app::Cli, output::ConsoleReporter};

fn main() -> anyhow::Result<ExitCode> {
    ctrlc::set_handler(|| {
        eprintln!("\nCancelled.");
        std::process::exit(130);
    })?;

    // Missing inputs end here with usage on stderr and exit code 2
    let cli = Cli::parse();

    if cli.no_color {
        crossterm::style::force_color_output(false);
    }

    // dotscribe warnings on stderr; -v raises the level; RUST_LOG overrides
    env_logger::Builder::new()
        .filter_module("dotscribe", cli.log_level())
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    let config = cli.config()?;
    let decompiler = dotscribe::decompiler::from_config(&config.decompiler);
    log::info!("Using the {} decompiler", decompiler.name());

    let outcome = Orchestrator::new(&config, &PeLoader, decompiler.as_ref())
        .run(&cli.inputs, &mut ConsoleReporter);

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
