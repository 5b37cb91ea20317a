//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Driver management commands.
#[derive(Debug, Subcommand)]
pub enum DriversCommand {
    /// List drivers with search, status filter and pagination
    List(ListCommand),

    /// Show one driver's full record
    Show {
        /// Driver id
        id: i64,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Add a driver through the driver form
    Add(EditArgs),

    /// Update a driver through the driver form
    Update {
        /// Driver id
        id: i64,

        #[command(flatten)]
        edit: EditArgs,
    },

    /// Delete a driver and its status history
    Delete {
        /// Driver id
        id: i64,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Change a driver's status
    Status(StatusCommand),

    /// Show a driver's status history
    History {
        /// Driver id
        id: i64,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Load the sample drivers into the store
    Seed,

    /// Print a form as it would be rendered
    Form(FormCommand),

    /// Show the quick-view driver segments
    Segments(SegmentsCommand),
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Free-text search over name, CNIC, vehicle, license, phone and status
    #[arg(long)]
    pub query: Option<String>,

    /// Only show drivers with this status ("all" for every status)
    #[arg(short, long)]
    pub status: Option<String>,

    /// Page to show, starting at 1
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Rows per page (defaults to the configured page size)
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Read the sample data instead of the store
    #[arg(long)]
    pub mock: bool,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Field edits shared by `add` and `update`.
#[derive(Debug, Args)]
pub struct EditArgs {
    /// Set a field, e.g. --set driver_name="Ali Raza"
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_key_value)]
    pub set: Vec<(String, String)>,

    /// Attach a document to a file field, e.g. --attach driver_image=photo.png
    #[arg(long = "attach", value_name = "FIELD=PATH", value_parser = parse_attachment)]
    pub attach: Vec<(String, PathBuf)>,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Driver id
    pub id: i64,

    /// New status, e.g. "On Leave"
    #[arg(short, long)]
    pub status: String,

    /// Short reason for the change
    #[arg(long)]
    pub reason_title: String,

    /// Detailed reason for the change
    #[arg(long)]
    pub reason_description: String,
}

/// Which form to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormKind {
    /// The add/update driver form
    Driver,
    /// The status update form
    Status,
}

/// Form command arguments.
#[derive(Debug, Args)]
pub struct FormCommand {
    /// Form to print
    #[arg(value_enum, default_value = "driver")]
    pub kind: FormKind,

    /// Only print the section with this id
    #[arg(long)]
    pub section: Option<String>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Segments command arguments.
#[derive(Debug, Args)]
pub struct SegmentsCommand {
    /// Only show the segment with this id (old, suspended, on-leave, warnings)
    pub segment: Option<String>,

    /// Read the sample data instead of the store
    #[arg(long)]
    pub mock: bool,
}

/// Metrics command arguments.
#[derive(Debug, Args)]
pub struct MetricsCommand {
    /// Read the sample data instead of the store
    #[arg(long)]
    pub mock: bool,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Navigation command arguments.
#[derive(Debug, Args)]
pub struct NavCommand {
    /// Show the active trail for this path instead of the whole sidebar
    #[arg(long)]
    pub path: Option<String>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show configuration file path
    Path,

    /// Validate configuration file
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Parse `FIELD=VALUE`. The value may be empty and may contain `=`.
fn parse_key_value(arg: &str) -> Result<(String, String), String> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{arg}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing field name in '{arg}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

fn parse_attachment(arg: &str) -> Result<(String, PathBuf), String> {
    let (key, path) = parse_key_value(arg)?;
    if path.is_empty() {
        return Err(format!("missing file path in '{arg}'"));
    }
    Ok((key, PathBuf::from(path)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("driver_name=Ali Raza").unwrap(),
            ("driver_name".to_string(), "Ali Raza".to_string())
        );
        assert_eq!(
            parse_key_value("address=a=b").unwrap().1,
            "a=b".to_string()
        );
        assert_eq!(parse_key_value("age=").unwrap().1, String::new());
        assert!(parse_key_value("no-equals").is_err());
        assert!(parse_key_value("=value").is_err());
    }

    #[test]
    fn test_parse_attachment() {
        let (field, path) = parse_attachment("driver_image=/tmp/me.png").unwrap();
        assert_eq!(field, "driver_image");
        assert_eq!(path, PathBuf::from("/tmp/me.png"));
        assert!(parse_attachment("driver_image=").is_err());
    }
}
