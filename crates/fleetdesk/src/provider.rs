//! Data provider capability.
//!
//! Screens read drivers and summary counters through [`DataProvider`]. The
//! SQLite store implements it for real use; [`MockProvider`] serves fixed
//! fixture data.

use crate::driver::{Driver, DriverStatus};
use crate::error::{Error, Result};
use crate::metrics::MetricsSnapshot;

/// Source of driver records and metrics.
pub trait DataProvider {
    /// All drivers, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing source cannot be read.
    fn drivers(&self) -> Result<Vec<Driver>>;

    /// Current summary counters.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing source cannot be read.
    fn metrics(&self) -> Result<MetricsSnapshot>;

    /// A single driver by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DriverNotFound`] if no driver has that id.
    fn driver(&self, id: i64) -> Result<Driver> {
        self.drivers()?
            .into_iter()
            .find(|d| d.driver_id == Some(id))
            .ok_or(Error::DriverNotFound { id })
    }
}

/// In-memory provider returning fixture data.
#[derive(Debug, Clone)]
pub struct MockProvider {
    drivers: Vec<Driver>,
    metrics: MetricsSnapshot,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// Provider with [`fixture_drivers`] and placeholder metrics.
    #[must_use]
    pub fn new() -> Self {
        let drivers = fixture_drivers()
            .into_iter()
            .zip(1..)
            .map(|(mut driver, id)| {
                driver.driver_id = Some(id);
                driver
            })
            .collect();
        Self {
            drivers,
            metrics: MetricsSnapshot {
                total_drivers: 150,
                new_joinings: 3,
                total_incidents: 12,
                on_warning: 5,
                on_leave: 2,
                on_termination: 1,
                on_suspension: 4,
            },
        }
    }

    /// Provider over caller-supplied data.
    #[must_use]
    pub fn with_data(drivers: Vec<Driver>, metrics: MetricsSnapshot) -> Self {
        Self { drivers, metrics }
    }
}

impl DataProvider for MockProvider {
    fn drivers(&self) -> Result<Vec<Driver>> {
        Ok(self.drivers.clone())
    }

    fn metrics(&self) -> Result<MetricsSnapshot> {
        Ok(self.metrics)
    }
}

struct Fixture {
    name: &'static str,
    father: &'static str,
    cnic: &'static str,
    license: &'static str,
    phone: &'static str,
    vehicle: &'static str,
    inducted: &'static str,
    status: DriverStatus,
}

const FIXTURES: [Fixture; 8] = [
    Fixture {
        name: "Ali Raza",
        father: "Muhammad Raza",
        cnic: "35202-1234567-1",
        license: "LHE-908123",
        phone: "0300-1234567",
        vehicle: "fleet-rig",
        inducted: "2019-03-14",
        status: DriverStatus::Active,
    },
    Fixture {
        name: "Bilal Ahmed",
        father: "Ahmed Khan",
        cnic: "42101-7654321-3",
        license: "KHI-552019",
        phone: "0321-7654321",
        vehicle: "fleet-porter",
        inducted: "2021-11-02",
        status: DriverStatus::Warning,
    },
    Fixture {
        name: "Usman Tariq",
        father: "Tariq Mehmood",
        cnic: "61101-2345678-5",
        license: "ISB-100457",
        phone: "0333-2345678",
        vehicle: "fleet-van",
        inducted: "2023-06-20",
        status: DriverStatus::OnLeave,
    },
    Fixture {
        name: "Hamza Saleem",
        father: "Saleem Akhtar",
        cnic: "35201-3456789-7",
        license: "LHE-774310",
        phone: "0345-3456789",
        vehicle: "none",
        inducted: "2024-01-08",
        status: DriverStatus::NewJoining,
    },
    Fixture {
        name: "Imran Shah",
        father: "Zahid Shah",
        cnic: "17301-4567890-9",
        license: "PES-330981",
        phone: "0312-4567890",
        vehicle: "fleet-rig",
        inducted: "2018-09-30",
        status: DriverStatus::Suspended,
    },
    Fixture {
        name: "Kashif Nawaz",
        father: "Nawaz Ali",
        cnic: "36302-5678901-1",
        license: "MUL-640215",
        phone: "0301-5678901",
        vehicle: "fleet-porter",
        inducted: "2020-02-17",
        status: DriverStatus::Active,
    },
    Fixture {
        name: "Faisal Iqbal",
        father: "Iqbal Hussain",
        cnic: "37405-6789012-3",
        license: "RWP-118472",
        phone: "0322-6789012",
        vehicle: "fleet-van",
        inducted: "2022-07-11",
        status: DriverStatus::Terminated,
    },
    Fixture {
        name: "Naveed Akram",
        father: "Akram Javed",
        cnic: "33100-7890123-5",
        license: "FSD-902736",
        phone: "0334-7890123",
        vehicle: "none",
        inducted: "2024-05-02",
        status: DriverStatus::NewJoining,
    },
];

/// Sample drivers without ids, valid against the driver form.
#[must_use]
pub fn fixture_drivers() -> Vec<Driver> {
    FIXTURES
        .iter()
        .map(|f| Driver {
            driver_name: f.name.to_string(),
            father_name: f.father.to_string(),
            cnic_no: f.cnic.to_string(),
            license_number: f.license.to_string(),
            cell_no: f.phone.to_string(),
            vehicle_no: f.vehicle.to_string(),
            induction_date: f.inducted.to_string(),
            status: f.status.label().to_string(),
            license_type: "HTV".to_string(),
            blood_group: "O+".to_string(),
            language_preference: "URDU".to_string(),
            ..Driver::default()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::driver_form_layout;
    use crate::form::Form;

    #[test]
    fn test_mock_metrics() {
        let metrics = MockProvider::new().metrics().unwrap();
        assert_eq!(metrics.total_drivers, 150);
        assert_eq!(metrics.total_incidents, 12);
        assert_eq!(metrics.on_suspension, 4);
    }

    #[test]
    fn test_mock_assigns_ids() {
        let provider = MockProvider::new();
        let drivers = provider.drivers().unwrap();
        assert_eq!(drivers.len(), 8);
        assert_eq!(drivers[0].driver_id, Some(1));
        assert_eq!(provider.driver(3).unwrap().driver_name, "Usman Tariq");
    }

    #[test]
    fn test_missing_driver() {
        let err = MockProvider::new().driver(99).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_fixtures_pass_form_validation() {
        for driver in fixture_drivers() {
            let mut form = Form::with_record(driver_form_layout(), &driver).unwrap();
            assert!(form.validate(), "{}: {:?}", driver.driver_name, form.state().errors());
        }
    }
}
