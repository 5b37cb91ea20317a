//! Driver listing columns, status badges and quick-view segments.

use chrono::NaiveDate;

use super::{Driver, DriverStatus};
use crate::form::DATE_FORMAT;
use crate::table::{Column, TableView, EMPTY_CELL};

/// Attributes the listing's free-text search covers.
pub const SEARCH_KEYS: [&str; 6] = [
    "driver_name",
    "cnic_no",
    "vehicle_no",
    "license_number",
    "cell_no",
    "status",
];

/// Attribute the listing's categorical filter applies to.
pub const FILTER_KEY: &str = "status";

/// Columns of the driver listing.
#[must_use]
pub fn listing_columns() -> Vec<Column<Driver>> {
    vec![
        Column::new("driver_image", "Driver Image").with_renderer(|d: &Driver| {
            d.driver_image
                .as_deref()
                .map_or_else(|| EMPTY_CELL.to_string(), |_| "[image]".to_string())
        }),
        Column::new("driver_id", "Driver ID"),
        Column::new("driver_name", "Driver Name"),
        Column::new("father_name", "Father Name"),
        Column::new("cnic_no", "CNIC"),
        Column::new("license_number", "License"),
        Column::new("cell_no", "Phone"),
        Column::new("status", "Status"),
        Column::new("vehicle_no", "Vehicle No"),
    ]
}

/// Compact columns used by quick-view segments.
#[must_use]
pub fn summary_columns() -> Vec<Column<Driver>> {
    vec![
        Column::new("driver_name", "Driver").with_renderer(|d: &Driver| {
            if d.cnic_no.is_empty() {
                d.display_name()
            } else {
                format!("{} ({})", d.display_name(), d.cnic_no)
            }
        }),
        Column::new("cnic_no", "CNIC"),
        Column::new("license_number", "License"),
        Column::new("vehicle_no", "Vehicle No"),
        Column::new("status", "Status").with_renderer(|d: &Driver| status_badge_label(&d.status)),
    ]
}

/// The driver listing table over `drivers`.
#[must_use]
pub fn driver_table(drivers: Vec<Driver>, page_size: usize) -> TableView<Driver> {
    TableView::new(listing_columns(), drivers)
        .with_search_keys(SEARCH_KEYS)
        .with_filter_key(FILTER_KEY)
        .with_page_size(page_size)
}

/// Badge text for a raw status value.
///
/// Known statuses are matched case-insensitively after trimming and shown
/// with their canonical label. Other non-empty values are shown as-is.
#[must_use]
pub fn status_badge_label(raw: &str) -> String {
    if let Ok(status) = raw.parse::<DriverStatus>() {
        return status.label().to_string();
    }
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        "Unknown".to_string()
    } else {
        raw.to_string()
    }
}

/// Predefined quick views over the driver list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// Inducted before [`Segment::OLD_DRIVER_CUTOFF`].
    Old,
    /// Currently suspended.
    Suspended,
    /// On leave.
    OnLeave,
    /// Under warning.
    Warnings,
}

impl Segment {
    /// Every segment, in display order.
    pub const ALL: [Self; 4] = [Self::Old, Self::Suspended, Self::OnLeave, Self::Warnings];

    /// Induction dates before this one count as old.
    pub const OLD_DRIVER_CUTOFF: &'static str = "2022-01-01";

    /// Stable identifier.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Old => "old",
            Self::Suspended => "suspended",
            Self::OnLeave => "on-leave",
            Self::Warnings => "warnings",
        }
    }

    /// Heading.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Old => "Old Drivers",
            Self::Suspended => "Suspended Drivers",
            Self::OnLeave => "Drivers on Leave",
            Self::Warnings => "Warning Drivers",
        }
    }

    /// One-line description.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Old => "Drivers inducted before 2022",
            Self::Suspended => "Currently suspended drivers",
            Self::OnLeave => "Approved leaves in progress",
            Self::Warnings => "Drivers with active warnings",
        }
    }

    /// Look a segment up by [`Segment::id`].
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }

    /// Whether `driver` belongs to this segment.
    #[must_use]
    pub fn matches(self, driver: &Driver) -> bool {
        match self {
            Self::Old => {
                let Ok(cutoff) = NaiveDate::parse_from_str(Self::OLD_DRIVER_CUTOFF, DATE_FORMAT)
                else {
                    return false;
                };
                NaiveDate::parse_from_str(driver.induction_date.trim(), DATE_FORMAT)
                    .is_ok_and(|joined| joined < cutoff)
            }
            Self::Suspended => driver.status == DriverStatus::Suspended.label(),
            Self::OnLeave => driver.status == DriverStatus::OnLeave.label(),
            Self::Warnings => driver.status == DriverStatus::Warning.label(),
        }
    }

    /// Drivers belonging to this segment, in input order.
    #[must_use]
    pub fn select<'a>(self, drivers: &'a [Driver]) -> Vec<&'a Driver> {
        drivers.iter().filter(|d| self.matches(d)).collect()
    }
}
