//! Field layouts of the driver form and the status update form.

use serde::{Deserialize, Serialize};

use super::options;
use crate::form::{FieldDescriptor as Field, FieldWidth, FormLayout, SectionDescriptor};

const CNIC_PATTERN: &str = r"^\d{5}-?\d{7}-?\d$";
const DOCUMENT_ACCEPT: &str = "application/pdf,image/*";

/// The four sections of the add/update driver form, in display order.
#[must_use]
pub fn driver_sections() -> Vec<SectionDescriptor> {
    vec![
        driver_information(),
        identification_licensing(),
        health_compliance(),
        experience_references(),
    ]
}

/// [`driver_sections`] as a form layout.
#[must_use]
pub fn driver_form_layout() -> FormLayout {
    FormLayout::Sections(driver_sections())
}

fn driver_information() -> SectionDescriptor {
    SectionDescriptor::new("driver-information", "Driver Information")
        .description(
            "Identity, assignment, and personal background collected per compliance requirements.",
        )
        .fields(vec![
            Field::file("driver_image", "Driver Image")
                .placeholder("Upload a square driver portrait")
                .width(FieldWidth::Double),
            Field::date("induction_date", "Induction Date"),
            Field::text("driver_file_id", "Driver File / ID").placeholder("e.g. DRV-0157"),
            Field::text("pk_code", "PK Code").placeholder("Internal code"),
            Field::select("vehicle_no", "Vehicle No", options::vehicle())
                .placeholder("Assign vehicle"),
            Field::text("driver_name", "Driver Name").placeholder("Enter full name"),
            Field::text("father_name", "Father Name").placeholder("Enter father name"),
            Field::date("date_of_birth", "Date of Birth"),
            Field::number("age", "Age").placeholder("35"),
            Field::text("place_of_birth", "Place of Birth").placeholder("City / Province"),
            Field::textarea("address", "Address", 3)
                .placeholder("Street, City, Province")
                .width(FieldWidth::Full),
            Field::select("marital_status", "Marital Status", options::marital_status())
                .placeholder("Select status"),
            Field::select("blood_group", "Blood Group", options::blood_group())
                .placeholder("Select group"),
            Field::select("qualification", "Qualification", options::qualification())
                .placeholder("Education level"),
            Field::text("cell_no", "Cell Number").placeholder("03xx-xxxxxxx"),
            Field::date("driving_since", "Driving Since"),
            Field::select("police_verification", "Police Verification", options::yes_no())
                .placeholder("Select status"),
            Field::select("tppl_policy", "TPPL Policy", options::yes_no())
                .placeholder("Select status"),
        ])
}

fn identification_licensing() -> SectionDescriptor {
    SectionDescriptor::new("identification-licensing", "Identification & Licensing")
        .description("CNIC, license, and DDC credentials with supporting documents.")
        .fields(vec![
            Field::select(
                "cnic_verification_status",
                "CNIC Verified",
                options::verification_status(),
            )
            .placeholder("Verification status"),
            Field::text("cnic_no", "CNIC Number")
                .placeholder("13-digit CNIC")
                .pattern(CNIC_PATTERN, "CNIC Number must have 13 digits"),
            Field::date("cnic_issue_date", "CNIC Issue Date"),
            Field::date("cnic_expiry_date", "CNIC Expiry Date"),
            Field::file("cnic_front_image", "Upload Image")
                .placeholder("Upload Image")
                .width(FieldWidth::Full),
            Field::text("license_number", "License Number").placeholder("Enter license number"),
            Field::select("license_type", "License Type", options::license_type())
                .placeholder("Select license type"),
            Field::date("license_issue_date", "License Issue Date"),
            Field::date("license_expiry_date", "License Expiry Date"),
            Field::select(
                "license_status",
                "License Status",
                options::verification_status(),
            )
            .placeholder("Verification status"),
            Field::select(
                "online_verification",
                "Online License Verification",
                options::yes_no(),
            )
            .placeholder("Select status"),
            Field::select("ddc_result", "DDC (NH&MP) Result", options::ddc_result())
                .placeholder("Select result"),
            Field::date("ddc_issue_date", "DDC Issue Date"),
            Field::date("ddc_expiry_date", "DDC Expiry Date"),
            Field::file("ddc_document", "DDC Certificate")
                .placeholder("Attach DDC certificate")
                .accept(DOCUMENT_ACCEPT)
                .width(FieldWidth::Full),
        ])
}

fn health_compliance() -> SectionDescriptor {
    SectionDescriptor::new("health-compliance", "Health & Compliance")
        .description("Vaccination, medical fitness, and substance screening checkpoints.")
        .fields(vec![
            Field::select(
                "vaccine_status",
                "COVID Vaccination Status",
                options::vaccine_status(),
            )
            .placeholder("Select status"),
            Field::date("first_dose_date", "First Dose Date"),
            Field::date("first_dose_expiry", "First Dose Expiry"),
            Field::date("second_dose_date", "Second Dose Date"),
            Field::date("second_dose_expiry", "Second Dose Expiry"),
            Field::date("booster_dose_date", "Booster Dose Date"),
            Field::select(
                "booster_status",
                "Booster Status",
                options::verification_status(),
            )
            .placeholder("Select status"),
            Field::date("booster_date", "Booster Issue Date"),
            Field::file("booster_certificate", "Upload Image")
                .placeholder("Upload Image")
                .accept(DOCUMENT_ACCEPT)
                .width(FieldWidth::Full),
            Field::select("medical_status", "Medical Status", options::medical_status())
                .placeholder("Select status"),
            Field::date("medical_issue_date", "Medical Issue Date"),
            Field::date("medical_expiry_date", "Medical Expiry Date"),
            Field::select(
                "random_drug_alcohol_status",
                "Random Drug/Alcohol Status",
                options::drug_test_status(),
            )
            .placeholder("Select status"),
            Field::date("random_drug_alcohol_date", "Last Drug/Alcohol Test"),
            Field::number("random_drug_alcohol_count", "Tests Per Year").placeholder("0"),
        ])
}

fn experience_references() -> SectionDescriptor {
    SectionDescriptor::new("experience-references", "Experience & References")
        .description("Operational history, preferred languages, and verification contacts.")
        .fields(vec![
            Field::select("job_status", "Job Status", options::job_status())
                .placeholder("Select status"),
            Field::text("previous_job", "Previous Employer").placeholder("Company / Fleet name"),
            Field::select(
                "type_of_vehicle",
                "Primary Vehicle Type",
                options::type_of_vehicle(),
            )
            .placeholder("Select vehicle type"),
            Field::number("experience_years", "Experience (Years)").placeholder("5"),
            Field::number("experience_months", "Experience (Months)").placeholder("6"),
            Field::textarea("responsibilities", "Key Responsibilities", 2)
                .placeholder("Summarize key responsibilities or achievements")
                .width(FieldWidth::Full),
            Field::select(
                "language_preference",
                "Primary Language",
                options::language(),
            )
            .placeholder("Select language"),
            Field::text("reference_name", "Reference Name")
                .placeholder("Fleet manager / Supervisor"),
            Field::text("reference_relation", "Reference Relation")
                .placeholder("e.g. Fleet Supervisor"),
            Field::text("reference_phone", "Reference Phone").placeholder("03xx-xxxxxxx"),
            Field::textarea("reference_address", "Reference Address", 2)
                .placeholder("Office address")
                .width(FieldWidth::Full),
        ])
}

/// Values collected by the status update form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusUpdate {
    /// New status label.
    pub status: String,
    /// Short reason.
    pub reason_title: String,
    /// Detailed reason.
    pub reason_description: String,
}

impl StatusUpdate {
    /// Seed the form with a driver's current status.
    #[must_use]
    pub fn for_status(current: impl Into<String>) -> Self {
        Self {
            status: current.into(),
            ..Self::default()
        }
    }
}

/// Layout of the status update form. Every field is required.
#[must_use]
pub fn status_form_layout() -> FormLayout {
    FormLayout::Fields(vec![
        Field::select("status", "Driver Status", options::driver_status())
            .placeholder("Select a status")
            .required(),
        Field::text("reason_title", "Reason Title")
            .placeholder("Enter reason title")
            .required(),
        Field::textarea("reason_description", "Reason Description", 4)
            .placeholder("Enter detailed reason description")
            .width(FieldWidth::Full)
            .required(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::Driver;
    use crate::form::{Form, FormRecord, SubmitOutcome};

    #[test]
    fn test_section_order() {
        let layout = driver_form_layout();
        assert_eq!(
            layout.section_ids(),
            [
                "driver-information",
                "identification-licensing",
                "health-compliance",
                "experience-references"
            ]
        );
    }

    #[test]
    fn test_every_field_binds_to_driver() {
        let form = Form::<Driver>::new(driver_form_layout());
        assert!(form.is_ok(), "{:?}", form.err());
    }

    #[test]
    fn test_every_attachment_has_a_field_or_is_unlisted() {
        let layout = driver_form_layout();
        for field in layout.fields().filter(|f| f.kind.is_file()) {
            assert!(Driver::ATTACHMENT_FIELDS.contains(&field.name.as_str()));
        }
    }

    #[test]
    fn test_default_driver_submits_unchanged() {
        let mut form = Form::<Driver>::new(driver_form_layout()).unwrap();
        let outcome = form.submit(Ok).unwrap();
        assert_eq!(outcome, SubmitOutcome::Submitted(Driver::default()));
    }

    #[test]
    fn test_cnic_pattern() {
        let mut form = Form::<Driver>::new(driver_form_layout()).unwrap();
        form.set_value("cnic_no", "12345").unwrap();
        assert!(!form.validate());
        assert_eq!(form.error("cnic_no"), Some("CNIC Number must have 13 digits"));

        form.set_value("cnic_no", "35202-1234567-1").unwrap();
        assert!(form.validate());
    }

    #[test]
    fn test_status_form_requires_everything() {
        let mut form = Form::<StatusUpdate>::new(status_form_layout()).unwrap();
        let outcome = form.submit(Ok).unwrap();
        assert_eq!(outcome.errors().map(std::collections::BTreeMap::len), Some(3));
        assert_eq!(form.error("reason_title"), Some("Reason Title is required"));
    }

    #[test]
    fn test_status_form_rejects_unknown_status() {
        let seed = StatusUpdate::for_status("Active");
        let mut form = Form::with_record(status_form_layout(), &seed).unwrap();
        form.set_value("status", "Retired").unwrap();
        form.set_value("reason_title", "Retired").unwrap();
        form.set_value("reason_description", "Left the fleet").unwrap();
        assert!(!form.validate());
        assert!(form.error("status").is_some());
    }

    fn assert_record<R: FormRecord>() {}

    #[test]
    fn test_records_are_form_records() {
        assert_record::<Driver>();
        assert_record::<StatusUpdate>();
    }
}
