//! balena CLI wrapper that accepts device names and partial UUIDs
//!
//! Layers, innermost first:
//! - [`domain`]: device ids, queries, command-line classification
//! - [`application`]: credential lookup, device resolution, CLI discovery
//! - [`infrastructure`]: I/O traits, balena API client, service wiring
//! - [`cli`]: argument parsing, output, logging

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
