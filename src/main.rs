use std::process;

use clap::Parser;

use balena_wrap::cli::commands::execute_command;
use balena_wrap::cli::logging::setup_logging;
use balena_wrap::cli::{output, Cli, CliResult};
use balena_wrap::config::Settings;
use balena_wrap::exitcode;
use balena_wrap::infrastructure::di::ServiceContainer;

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let code = run(&cli).unwrap_or_else(|e| {
        output::error(&e);
        exitcode::FAILURE
    });
    process::exit(code);
}

fn run(cli: &Cli) -> CliResult<i32> {
    let settings = Settings::load()?;
    let container = ServiceContainer::new(settings);
    execute_command(cli, &container)
}
