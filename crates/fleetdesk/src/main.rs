//! `fleetdesk` - CLI for the fleet driver back office
//!
//! This binary provides the command-line interface for managing driver
//! records, their status history and the listing views.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tracing::{debug, info};

use fleetdesk::cli::{
    Cli, Command, ConfigCommand, DriversCommand, EditArgs, FormCommand, FormKind, ListCommand,
    MetricsCommand, NavCommand, SegmentsCommand, StatusCommand,
};
use fleetdesk::driver::{
    driver_form_layout, driver_sections, driver_table, status_badge_label, status_form_layout,
    summary_columns, Segment,
};
use fleetdesk::form::{RenderedForm, SubmitOutcome};
use fleetdesk::provider::fixture_drivers;
use fleetdesk::{
    init_logging, Config, DataProvider, Driver, DriverStore, Error, Form, LocalUploader,
    MockProvider, Sidebar, StatusUpdate, TableView,
};

/// Reason shown for a driver without a recorded status change.
const NO_REASON_TITLE: &str = "No reason recorded";
const NO_REASON_DESCRIPTION: &str = "This driver does not have a recorded reason yet.";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Execute the command
    match cli.command {
        Command::Drivers(cmd) => handle_drivers(&config, cmd),
        Command::Metrics(cmd) => handle_metrics(&config, &cmd),
        Command::Nav(cmd) => handle_nav(&config, &cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn open_store(config: &Config) -> Result<DriverStore, Box<dyn std::error::Error>> {
    let path = config.database_path();
    debug!(path = %path.display(), "Opening driver store");
    Ok(DriverStore::open(path)?)
}

fn provider(config: &Config, mock: bool) -> Result<Box<dyn DataProvider>, Box<dyn std::error::Error>> {
    if mock {
        Ok(Box::new(MockProvider::new()))
    } else {
        Ok(Box::new(open_store(config)?))
    }
}

fn handle_drivers(config: &Config, cmd: DriversCommand) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        DriversCommand::List(list) => handle_list(config, &list),
        DriversCommand::Show { id, json } => handle_show(config, id, json),
        DriversCommand::Add(edit) => handle_add(config, &edit),
        DriversCommand::Update { id, edit } => handle_update(config, id, &edit),
        DriversCommand::Delete { id, yes } => handle_delete(config, id, yes),
        DriversCommand::Status(status) => handle_status(config, &status),
        DriversCommand::History { id, json } => handle_history(config, id, json),
        DriversCommand::Seed => handle_seed(config),
        DriversCommand::Form(form) => handle_form(&form),
        DriversCommand::Segments(segments) => handle_segments(config, &segments),
    }
}

fn handle_list(config: &Config, cmd: &ListCommand) -> Result<(), Box<dyn std::error::Error>> {
    let drivers = provider(config, cmd.mock)?.drivers()?;
    let page_size = cmd.page_size.unwrap_or(config.table.page_size).max(1);

    let mut table = driver_table(drivers, page_size);
    table.set_filter(cmd.status.as_deref());
    if let Some(query) = &cmd.query {
        table.set_query(query.as_str());
    }
    table.go_to_page(cmd.page);

    let rendered = table.render();
    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&rendered)?);
    } else {
        println!("{rendered}");
        println!();
        println!(
            "{}  ({} matching, status: {})",
            rendered.page_label(),
            rendered.matched,
            table.filter().unwrap_or(fleetdesk::table::FILTER_ALL)
        );
    }
    Ok(())
}

fn handle_show(config: &Config, id: i64, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(config)?;
    let driver = store.get(id)?.ok_or(Error::DriverNotFound { id })?;
    let latest = store.latest_status_change(id)?;

    if json {
        let value = serde_json::json!({
            "driver": driver,
            "latest_status_change": latest,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let (title, description) = latest.as_ref().map_or(
        (NO_REASON_TITLE, NO_REASON_DESCRIPTION),
        |c| (c.reason_title.as_str(), c.reason_description.as_str()),
    );

    println!("{}  [{}]", driver.display_name(), status_badge_label(&driver.status));
    println!("Reason:  {title}");
    println!("         {description}");

    for section in driver_sections() {
        println!();
        println!("[{}]", section.title);
        let width = section.fields.iter().map(|f| f.label.len()).max().unwrap_or(0);
        for field in &section.fields {
            let value = driver
                .attribute(&field.name)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(fleetdesk::table::EMPTY_CELL);
            println!("  {:<width$}  {value}", field.label);
        }
    }
    Ok(())
}

/// Apply `--set` and `--attach` edits to a driver form.
fn apply_edits(form: &mut Form<Driver>, edit: &EditArgs) -> Result<(), Box<dyn std::error::Error>> {
    for (field, value) in &edit.set {
        form.set_value(field, value.as_str())?;
    }
    for (field, path) in &edit.attach {
        debug!(field = %field, path = %path.display(), "Reading attachment");
        let bytes = fs::read(path).map_err(Error::from)?;
        let file = form.attach_file(field, &file_name(path), &bytes)?;
        info!(field = %field, url = %file, "Attached document");
    }
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned())
}

fn driver_form(config: &Config, driver: &Driver) -> Result<Form<Driver>, Box<dyn std::error::Error>> {
    let uploader = LocalUploader::new(config.uploads_dir(), config.uploads.max_file_bytes);
    Ok(Form::with_record(driver_form_layout(), driver)?.with_uploader(Arc::new(uploader)))
}

fn report_invalid(errors: &BTreeMap<String, String>) -> Box<dyn std::error::Error> {
    for (field, message) in errors {
        eprintln!("  {field}: {message}");
    }
    Error::invalid_argument(format!("{} field(s) failed validation", errors.len())).into()
}

fn handle_add(config: &Config, edit: &EditArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(config)?;
    let mut form = driver_form(config, &Driver::default())?.with_submit_label("Add Driver");
    apply_edits(&mut form, edit)?;

    match form.submit(|driver| store.insert(&driver))? {
        SubmitOutcome::Submitted(id) => {
            println!("Added driver {id}.");
            Ok(())
        }
        SubmitOutcome::Invalid(errors) => Err(report_invalid(&errors)),
    }
}

fn handle_update(config: &Config, id: i64, edit: &EditArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(config)?;
    let driver = store.get(id)?.ok_or(Error::DriverNotFound { id })?;
    let mut form = driver_form(config, &driver)?.with_submit_label("Update Driver");
    apply_edits(&mut form, edit)?;

    match form.submit(|driver| store.update(&driver))? {
        SubmitOutcome::Submitted(true) => {
            println!("Updated driver {id}.");
            Ok(())
        }
        SubmitOutcome::Submitted(false) => {
            println!("Driver {id} is unchanged.");
            Ok(())
        }
        SubmitOutcome::Invalid(errors) => Err(report_invalid(&errors)),
    }
}

fn handle_delete(config: &Config, id: i64, yes: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !yes {
        println!("This will delete driver {id} and its status history.");
        println!("Use --yes to confirm.");
        return Ok(());
    }

    let store = open_store(config)?;
    if store.delete(id)? {
        println!("Deleted driver {id}.");
        Ok(())
    } else {
        Err(Error::DriverNotFound { id }.into())
    }
}

fn handle_status(config: &Config, cmd: &StatusCommand) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(config)?;
    let driver = store.get(cmd.id)?.ok_or(Error::DriverNotFound { id: cmd.id })?;

    let mut form = Form::with_record(status_form_layout(), &StatusUpdate::for_status(&driver.status))?
        .with_submit_label("Update Status");
    // The select takes canonical labels; accept any casing on the command line.
    let status = cmd
        .status
        .parse::<fleetdesk::DriverStatus>()
        .map_or_else(|_| cmd.status.clone(), |s| s.label().to_string());
    form.set_value("status", status)?;
    form.set_value("reason_title", cmd.reason_title.as_str())?;
    form.set_value("reason_description", cmd.reason_description.as_str())?;

    match form.submit(|update| store.update_status(cmd.id, &update))? {
        SubmitOutcome::Submitted(change) => {
            println!(
                "Driver {}: {} -> {}",
                change.driver_id,
                status_badge_label(&change.from_status),
                status_badge_label(&change.to_status)
            );
            Ok(())
        }
        SubmitOutcome::Invalid(errors) => Err(report_invalid(&errors)),
    }
}

fn handle_history(config: &Config, id: i64, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(config)?;
    if store.get(id)?.is_none() {
        return Err(Error::DriverNotFound { id }.into());
    }
    let history = store.status_history(id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&history)?);
    } else if history.is_empty() {
        println!("{NO_REASON_TITLE}.");
    } else {
        for change in &history {
            println!(
                "{}  {} -> {}  {}",
                change.changed_at.format("%Y-%m-%d %H:%M"),
                status_badge_label(&change.from_status),
                status_badge_label(&change.to_status),
                change.reason_title
            );
            println!("    {}", change.reason_description);
        }
    }
    Ok(())
}

fn handle_seed(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(config)?;
    let ids = store.insert_many(&fixture_drivers())?;
    println!("Seeded {} drivers into {}.", ids.len(), store.path().display());
    Ok(())
}

fn handle_form(cmd: &FormCommand) -> Result<(), Box<dyn std::error::Error>> {
    let rendered: RenderedForm = match cmd.kind {
        FormKind::Driver => {
            let layout = match &cmd.section {
                Some(id) => {
                    let full = driver_form_layout();
                    full.section(id).ok_or_else(|| {
                        Error::invalid_argument(format!(
                            "unknown section '{id}', expected one of: {}",
                            full.section_ids().join(", ")
                        ))
                    })?
                }
                None => driver_form_layout(),
            };
            Form::<Driver>::new(layout)?
                .with_submit_label("Add Driver")
                .render()
        }
        FormKind::Status => {
            if cmd.section.is_some() {
                return Err(Error::invalid_argument("the status form has no sections").into());
            }
            Form::<StatusUpdate>::new(status_form_layout())?
                .with_submit_label("Update Status")
                .render()
        }
    };

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&rendered)?);
    } else {
        print!("{rendered}");
    }
    Ok(())
}

fn handle_segments(config: &Config, cmd: &SegmentsCommand) -> Result<(), Box<dyn std::error::Error>> {
    let segments = match &cmd.segment {
        Some(id) => vec![Segment::from_id(id)
            .ok_or_else(|| Error::invalid_argument(format!("unknown segment '{id}'")))?],
        None => Segment::ALL.to_vec(),
    };
    let drivers = provider(config, cmd.mock)?.drivers()?;

    for (i, segment) in segments.into_iter().enumerate() {
        if i > 0 {
            println!();
        }
        let rows = segment.select(&drivers).into_iter().cloned().collect();
        let table = TableView::new(summary_columns(), rows).with_page_size(config.table.page_size);
        println!("{}", segment.title());
        println!("{}", segment.description());
        println!();
        println!("{}", table.render());
    }
    Ok(())
}

fn handle_metrics(config: &Config, cmd: &MetricsCommand) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = provider(config, cmd.mock)?.metrics()?;
    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&metrics)?);
    } else {
        println!("{metrics}");
    }
    Ok(())
}

fn handle_nav(config: &Config, cmd: &NavCommand) -> Result<(), Box<dyn std::error::Error>> {
    let sidebar = Sidebar::new(config.navigation.clone());

    match &cmd.path {
        Some(path) => {
            let trail = sidebar.active_trail(path);
            if cmd.json {
                println!("{}", serde_json::to_string_pretty(&trail)?);
            } else if trail.is_empty() {
                println!("No navigation entry matches {path}.");
            } else {
                println!("{}", trail.join(" > "));
            }
        }
        None => {
            if cmd.json {
                println!("{}", serde_json::to_string_pretty(sidebar.config())?);
            } else {
                print!("{sidebar}");
            }
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!();
                println!("[Uploads]");
                println!("  Directory:          {}", config.uploads_dir().display());
                println!("  Max file bytes:     {}", config.uploads.max_file_bytes);
                println!();
                println!("[Table]");
                println!("  Page size:          {}", config.table.page_size);
                println!();
                println!("[Navigation]");
                println!("  Brand:              {}", config.navigation.brand);
                println!(
                    "  Links:              {}",
                    config.navigation.main.len()
                        + config.navigation.secondary.len()
                        + config.navigation.registration.len()
                );
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
