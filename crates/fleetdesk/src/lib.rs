//! `fleetdesk` - A back office for fleet driver records
//!
//! This library provides declarative, sectioned forms bound to typed records,
//! a searchable and paginated table view, the driver domain built on both,
//! and a SQLite store with status-change history.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod form;
pub mod logging;
pub mod metrics;
pub mod navigation;
pub mod provider;
pub mod storage;
pub mod table;
pub mod upload;

pub use config::Config;
pub use driver::{Driver, DriverStatus, StatusUpdate};
pub use error::{Error, Result};
pub use form::{Form, FormLayout, SubmitOutcome};
pub use logging::init_logging;
pub use metrics::MetricsSnapshot;
pub use navigation::Sidebar;
pub use provider::{DataProvider, MockProvider};
pub use storage::{DriverStore, StatusChange};
pub use table::{Column, TableView};
pub use upload::{FileUploader, LocalUploader};
