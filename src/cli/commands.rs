//! Command execution: resolve the device argument, then run the real CLI

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, DeviceLookupCli};
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::domain::{locate_identifier_slot, DeviceRecord, Query, TypeHint};
use crate::exitcode;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Tokens to forward to the balena CLI.
///
/// A leading `--` only separates wrapper options from CLI arguments.
pub fn forwarded_tokens(args: &[String]) -> Vec<String> {
    match args.split_first() {
        Some((first, rest)) if first == "--" => rest.to_vec(),
        _ => args.to_vec(),
    }
}

/// Run the wrapper; returns the exit code to terminate with.
pub fn execute_command(cli: &Cli, container: &ServiceContainer) -> CliResult<i32> {
    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut io::stdout());
        return Ok(exitcode::OK);
    }

    let mut tokens = forwarded_tokens(&cli.args);
    if tokens.is_empty() {
        // Use `balena-wrap -- --help` for the CLI's own help
        Cli::command()
            .print_help()
            .map_err(|e| InfraError::io("print help", e))?;
        return Ok(exitcode::OK);
    }

    let hint = TypeHint::from_flags(cli.name, cli.uuid, cli.raw);
    if hint == TypeHint::Verbatim {
        debug!("Verbatim mode, skipping device lookup.");
    } else if let Some(index) = locate_identifier_slot(&tokens)? {
        debug!(
            "Locating name/UUID for '{}' command: '{}'.",
            tokens[0], tokens[index]
        );
        let query = Query::new(tokens[index].clone(), hint);
        let exact = cli.exact || container.settings.exact_match;
        let device = resolve_device(container, &query, exact)?;
        if !cli.quiet {
            output::info(&format!("Found device: {} ({})", device.id, device.name));
        }
        tokens[index] = device.id.to_string();
    }

    dispatch(container, &tokens)
}

/// Run the standalone lookup; prints the UUID (or name) of the match.
pub fn execute_lookup(cli: &DeviceLookupCli, container: &ServiceContainer) -> CliResult<i32> {
    let hint = TypeHint::from_flags(cli.name, cli.uuid, false);
    let query = Query::new(cli.name_or_uuid.clone(), hint);
    let exact = cli.exact || container.settings.exact_match;
    let device = resolve_device(container, &query, exact)?;
    if cli.get_name {
        output::info(&device.name);
    } else {
        output::info(&device.id);
    }
    Ok(exitcode::OK)
}

#[instrument(skip(container))]
fn resolve_device(
    container: &ServiceContainer,
    query: &Query,
    exact: bool,
) -> CliResult<DeviceRecord> {
    let resolver = container.resolver()?;
    Ok(resolver.resolve(query, exact)?)
}

/// Locate the real CLI and run it with `tokens`, returning its exit code.
fn dispatch(container: &ServiceContainer, tokens: &[String]) -> CliResult<i32> {
    let cli_path = container.locator().locate()?;
    debug!(
        "Executing command: {} {}",
        cli_path.display(),
        tokens.join(" ")
    );
    let code = container
        .launcher
        .run_inherited(&cli_path, tokens)
        .map_err(|e| InfraError::io(format!("run {}", cli_path.display()), e))?;
    debug!("{} exited with {}", cli_path.display(), code);
    Ok(code)
}
