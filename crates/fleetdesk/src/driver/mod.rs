//! The driver domain: record type, statuses, form sections and table columns.

mod columns;
pub mod options;
mod sections;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::table::TableRow;

pub use columns::{
    driver_table, listing_columns, status_badge_label, summary_columns, Segment, FILTER_KEY,
    SEARCH_KEYS,
};
pub use sections::{driver_form_layout, driver_sections, status_form_layout, StatusUpdate};

macro_rules! driver_record {
    (
        attachments { $($file:ident),* $(,)? }
        text { $($text:ident),* $(,)? }
    ) => {
        /// A driver record.
        ///
        /// Text attributes default to the empty string and attachments to
        /// `None`. `driver_id` is assigned by the store.
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(default)]
        pub struct Driver {
            /// Store-assigned identifier.
            pub driver_id: Option<i64>,
            $(
                #[doc = concat!("URL of the `", stringify!($file), "` attachment.")]
                pub $file: Option<String>,
            )*
            $(
                #[doc = concat!("The `", stringify!($text), "` attribute.")]
                pub $text: String,
            )*
            /// Employment status, one of [`DriverStatus`] labels in practice.
            pub status: String,
        }

        impl Driver {
            /// Names of the document attachment attributes.
            pub const ATTACHMENT_FIELDS: &'static [&'static str] = &[$(stringify!($file)),*];

            /// Names of the free-text attributes, excluding `status`.
            pub const TEXT_FIELDS: &'static [&'static str] = &[$(stringify!($text)),*];

            /// Borrow an attribute by name.
            ///
            /// Returns `None` for unknown names and for missing attachments.
            #[must_use]
            pub fn attribute(&self, key: &str) -> Option<&str> {
                match key {
                    $(stringify!($file) => self.$file.as_deref(),)*
                    $(stringify!($text) => Some(self.$text.as_str()),)*
                    "status" => Some(self.status.as_str()),
                    _ => None,
                }
            }
        }
    };
}

driver_record! {
    attachments {
        driver_image,
        booster_certificate,
        cnic_front_image,
        cnic_back_image,
        license_front_image,
        license_back_image,
        ddc_document,
        police_verification_image,
        medical_document,
    }
    text {
        induction_date,
        driver_file_id,
        pk_code,
        vehicle_no,
        driver_name,
        father_name,
        date_of_birth,
        age,
        place_of_birth,
        address,
        marital_status,
        blood_group,
        qualification,
        cell_no,
        driving_since,
        police_verification,
        tppl_policy,
        cnic_verification_status,
        cnic_no,
        cnic_issue_date,
        cnic_expiry_date,
        license_number,
        license_type,
        license_issue_date,
        license_expiry_date,
        license_status,
        online_verification,
        ddc_result,
        ddc_issue_date,
        ddc_expiry_date,
        vaccine_status,
        first_dose_date,
        first_dose_expiry,
        second_dose_date,
        second_dose_expiry,
        booster_dose_date,
        booster_status,
        booster_date,
        medical_status,
        medical_issue_date,
        medical_expiry_date,
        random_drug_alcohol_status,
        random_drug_alcohol_date,
        random_drug_alcohol_count,
        job_status,
        previous_job,
        type_of_vehicle,
        experience_years,
        experience_months,
        responsibilities,
        language_preference,
        reference_name,
        reference_relation,
        reference_phone,
        reference_address,
    }
}

impl Driver {
    /// Parsed status, if the raw value names a known one.
    #[must_use]
    pub fn known_status(&self) -> Option<DriverStatus> {
        self.status.parse().ok()
    }

    /// Display name, falling back to the id.
    #[must_use]
    pub fn display_name(&self) -> String {
        match (self.driver_name.trim(), self.driver_id) {
            ("", Some(id)) => format!("Driver #{id}"),
            ("", None) => "Unnamed driver".to_string(),
            (name, _) => name.to_string(),
        }
    }
}

impl TableRow for Driver {
    fn cell(&self, key: &str) -> Option<String> {
        if key == "driver_id" {
            return self.driver_id.map(|id| id.to_string());
        }
        self.attribute(key)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }
}

/// Known employment statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DriverStatus {
    /// Recently inducted.
    #[serde(rename = "New Joining")]
    NewJoining,
    /// Working normally.
    Active,
    /// Temporarily barred from duty.
    Suspended,
    /// On approved leave.
    #[serde(rename = "On Leave")]
    OnLeave,
    /// Working under a warning.
    Warning,
    /// Employment ended.
    Terminated,
    /// Not currently assigned.
    Inactive,
}

impl DriverStatus {
    /// Every status, in display order.
    pub const ALL: [Self; 7] = [
        Self::NewJoining,
        Self::Active,
        Self::Suspended,
        Self::OnLeave,
        Self::Warning,
        Self::Terminated,
        Self::Inactive,
    ];

    /// Display label, also the stored value.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::NewJoining => "New Joining",
            Self::Active => "Active",
            Self::Suspended => "Suspended",
            Self::OnLeave => "On Leave",
            Self::Warning => "Warning",
            Self::Terminated => "Terminated",
            Self::Inactive => "Inactive",
        }
    }

    /// Whether moving into this status counts as an incident.
    #[must_use]
    pub fn is_incident(self) -> bool {
        matches!(self, Self::Warning | Self::Suspended | Self::Terminated)
    }
}

impl fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DriverStatus {
    type Err = Error;

    /// Case-insensitive, whitespace-tolerant lookup by label.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.label().to_lowercase() == wanted)
            .ok_or_else(|| Error::invalid_argument(format!("unknown driver status '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_is_empty() {
        let driver = Driver::default();
        assert_eq!(driver.driver_id, None);
        assert!(Driver::TEXT_FIELDS
            .iter()
            .all(|f| driver.attribute(f) == Some("")));
        assert!(Driver::ATTACHMENT_FIELDS
            .iter()
            .all(|f| driver.attribute(f).is_none()));
    }

    #[test]
    fn test_field_lists_match_serialized_keys() {
        let value = serde_json::to_value(Driver::default()).unwrap();
        let map = value.as_object().unwrap();
        assert_eq!(
            map.len(),
            Driver::TEXT_FIELDS.len() + Driver::ATTACHMENT_FIELDS.len() + 2
        );
        for key in Driver::TEXT_FIELDS.iter().chain(Driver::ATTACHMENT_FIELDS) {
            assert!(map.contains_key(*key), "{key} missing");
        }
    }

    #[test]
    fn test_deserialize_partial_record() {
        let driver: Driver =
            serde_json::from_str(r#"{"driver_name": "Ali", "driver_id": 7}"#).unwrap();
        assert_eq!(driver.driver_name, "Ali");
        assert_eq!(driver.driver_id, Some(7));
        assert_eq!(driver.cnic_no, "");
    }

    #[test]
    fn test_table_cells() {
        let driver = Driver {
            driver_id: Some(3),
            driver_name: "Ali".to_string(),
            ..Driver::default()
        };
        assert_eq!(driver.cell("driver_id").as_deref(), Some("3"));
        assert_eq!(driver.cell("driver_name").as_deref(), Some("Ali"));
        assert_eq!(driver.cell("cnic_no"), None);
        assert_eq!(driver.cell("driver_image"), None);
        assert_eq!(driver.cell("nonsense"), None);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("on leave".parse::<DriverStatus>().unwrap(), DriverStatus::OnLeave);
        assert_eq!(
            "  NEW JOINING ".parse::<DriverStatus>().unwrap(),
            DriverStatus::NewJoining
        );
        assert!("retired".parse::<DriverStatus>().is_err());
    }

    #[test]
    fn test_status_serde_uses_labels() {
        assert_eq!(
            serde_json::to_string(&DriverStatus::OnLeave).unwrap(),
            "\"On Leave\""
        );
    }

    #[test]
    fn test_incidents() {
        let incidents: Vec<_> = DriverStatus::ALL
            .into_iter()
            .filter(|s| s.is_incident())
            .collect();
        assert_eq!(
            incidents,
            [
                DriverStatus::Suspended,
                DriverStatus::Warning,
                DriverStatus::Terminated
            ]
        );
    }

    #[test]
    fn test_display_name() {
        let mut driver = Driver::default();
        assert_eq!(driver.display_name(), "Unnamed driver");
        driver.driver_id = Some(4);
        assert_eq!(driver.display_name(), "Driver #4");
        driver.driver_name = "Sana".to_string();
        assert_eq!(driver.display_name(), "Sana");
    }
}
