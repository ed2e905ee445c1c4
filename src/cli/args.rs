//! CLI argument definitions using clap

use clap::{ArgAction, Parser};

/// Wrap balena CLI commands and accept device names, in addition to UUIDs, in
/// any device-targeted command (balena device, balena ssh, etc.)
#[derive(Parser, Debug)]
#[command(name = "balena-wrap")]
#[command(author, version, about)]
#[command(override_usage = "balena-wrap [OPTIONS]... [BALENA CLI ARGS]...")]
#[command(after_help = "\
All non-device commands are passed through as is.

To pass arguments to the balena CLI that overlap with options of this
program, use the -- separator:
    $ balena-wrap --help
    vs
    $ balena-wrap -- --help")]
pub struct Cli {
    /// Treat the device string as a name; do not attempt a UUID lookup
    #[arg(long, conflicts_with_all = ["uuid", "raw"])]
    pub name: bool,

    /// Treat the device string as a UUID; do not attempt a name lookup
    #[arg(long, conflicts_with = "raw")]
    pub uuid: bool,

    /// Pass the device string through without any lookup
    #[arg(long)]
    pub raw: bool,

    /// If several names match, use the one that matches exactly
    #[arg(long)]
    pub exact: bool,

    /// Do not print the resolved device on success
    #[arg(short, long)]
    pub quiet: bool,

    /// Print debug messages (-vv includes HTTP client traces)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Print shell completions for this wrapper and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completion: Option<clap_complete::Shell>,

    /// balena CLI command and its arguments
    #[arg(
        value_name = "BALENA CLI ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<String>,
}

/// Resolve a (partial) device name or UUID and print the device UUID
#[derive(Parser, Debug)]
#[command(name = "balena-device")]
#[command(author, version, about)]
pub struct DeviceLookupCli {
    /// The (partial or complete) device name or UUID to query
    pub name_or_uuid: String,

    /// Print the name of the located device instead of its UUID
    #[arg(long)]
    pub get_name: bool,

    /// Treat the string as a name; do not attempt a UUID lookup
    #[arg(long, conflicts_with = "uuid")]
    pub name: bool,

    /// Treat the string as a UUID; do not attempt a name lookup
    #[arg(long)]
    pub uuid: bool,

    /// If several names match, use the one that matches exactly
    #[arg(long)]
    pub exact: bool,

    /// Print debug messages (-vv includes HTTP client traces)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
