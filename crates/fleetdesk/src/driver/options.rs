//! Option lists for the driver form's select fields.

use crate::form::SelectOption;

/// Turn an enum-style value into a display label: `FIRST_DOSE` becomes
/// `First Dose`.
#[must_use]
pub fn format_enum_label(value: &str) -> String {
    value
        .to_lowercase()
        .split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Options whose labels are derived with [`format_enum_label`].
#[must_use]
pub fn build_options(values: &[&str]) -> Vec<SelectOption> {
    values
        .iter()
        .map(|v| SelectOption::new(*v, format_enum_label(v)))
        .collect()
}

fn pairs(pairs: &[(&str, &str)]) -> Vec<SelectOption> {
    pairs
        .iter()
        .map(|(value, label)| SelectOption::new(*value, *label))
        .collect()
}

/// Yes/no answers stored as `"true"`/`"false"`.
#[must_use]
pub fn yes_no() -> Vec<SelectOption> {
    pairs(&[("true", "Yes"), ("false", "No")])
}

/// Marital statuses.
#[must_use]
pub fn marital_status() -> Vec<SelectOption> {
    build_options(&["SINGLE", "MARRIED", "DIVORCED", "WIDOWED", "OTHER"])
}

/// Blood groups, labelled as-is.
#[must_use]
pub fn blood_group() -> Vec<SelectOption> {
    ["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"]
        .iter()
        .map(|v| SelectOption::new(*v, *v))
        .collect()
}

/// Education levels.
#[must_use]
pub fn qualification() -> Vec<SelectOption> {
    build_options(&["NONE", "MATRIC", "INTERMEDIATE", "BACHELOR", "OTHER"])
}

/// Document verification outcomes.
#[must_use]
pub fn verification_status() -> Vec<SelectOption> {
    build_options(&["VERIFIED", "EXPIRED", "PENDING", "REJECTED"])
}

/// License classes.
#[must_use]
pub fn license_type() -> Vec<SelectOption> {
    build_options(&["LTV", "HTV", "PSV"])
}

/// Vaccination stages.
#[must_use]
pub fn vaccine_status() -> Vec<SelectOption> {
    build_options(&["FIRST_DOSE", "SECOND_DOSE", "BOOSTER", "OTHER"])
}

/// Defensive driving course results.
#[must_use]
pub fn ddc_result() -> Vec<SelectOption> {
    build_options(&["PASS", "FAIL", "PENDING"])
}

/// Medical fitness outcomes.
#[must_use]
pub fn medical_status() -> Vec<SelectOption> {
    build_options(&["FIT", "UNFIT", "PENDING"])
}

/// Drug and alcohol test outcomes.
#[must_use]
pub fn drug_test_status() -> Vec<SelectOption> {
    build_options(&["NEGATIVE", "POSITIVE", "INCONCLUSIVE", "PENDING"])
}

/// Job statuses; values are the labels upper-cased with `_` for spaces.
#[must_use]
pub fn job_status() -> Vec<SelectOption> {
    ["Probation", "Active", "Inactive", "On Leave"]
        .iter()
        .map(|label| SelectOption::new(label.to_uppercase().replace(' ', "_"), *label))
        .collect()
}

/// Assignable fleet vehicles.
#[must_use]
pub fn vehicle() -> Vec<SelectOption> {
    pairs(&[
        ("none", "Unassigned"),
        ("fleet-porter", "Fleet Porter"),
        ("fleet-rig", "Fleet Rig"),
        ("fleet-van", "Fleet Van"),
    ])
}

/// Preferred languages.
#[must_use]
pub fn language() -> Vec<SelectOption> {
    build_options(&["URDU", "PANJABI", "SINDHI", "PASHTO", "OTHER"])
}

/// Vehicle classes a driver has experience with.
#[must_use]
pub fn type_of_vehicle() -> Vec<SelectOption> {
    pairs(&[
        ("HTV", "Heavy Truck (HTV)"),
        ("LTV", "Light Truck (LTV)"),
        ("PSV", "Passenger Service Vehicle"),
        ("TRAILER", "Trailer"),
    ])
}

/// Driver statuses, as offered by the status update form.
#[must_use]
pub fn driver_status() -> Vec<SelectOption> {
    super::DriverStatus::ALL
        .iter()
        .map(|s| SelectOption::new(s.label(), s.label()))
        .collect()
}
