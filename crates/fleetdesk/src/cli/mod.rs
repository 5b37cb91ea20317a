//! Command-line interface for fleetdesk.
//!
//! This module provides the CLI structure for the `fleetdesk` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, DriversCommand, EditArgs, FormCommand, FormKind, ListCommand, MetricsCommand,
    NavCommand, SegmentsCommand, StatusCommand,
};

use crate::logging::Verbosity;

/// fleetdesk - Fleet driver records back office
///
/// Add, update and review driver records, track status changes and browse
/// the driver listing from the terminal.
#[derive(Debug, Parser)]
#[command(name = "fleetdesk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage driver records
    #[command(subcommand)]
    Drivers(DriversCommand),

    /// Show fleet summary counters
    Metrics(MetricsCommand),

    /// Show the sidebar navigation
    Nav(NavCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.verbose, self.quiet)
    }
}
