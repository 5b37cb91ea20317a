//! Fleet summary counters.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Point-in-time counters produced by a [`crate::provider::DataProvider`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Drivers on record.
    pub total_drivers: u64,
    /// Drivers with the "New Joining" status.
    pub new_joinings: u64,
    /// Status changes into Warning, Suspended or Terminated.
    pub total_incidents: u64,
    /// Drivers under warning.
    pub on_warning: u64,
    /// Drivers on leave.
    pub on_leave: u64,
    /// Terminated drivers.
    pub on_termination: u64,
    /// Suspended drivers.
    pub on_suspension: u64,
}

/// One labelled counter for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricCard {
    /// Card title.
    pub title: &'static str,
    /// Counter value.
    pub value: u64,
}

impl MetricsSnapshot {
    /// The dashboard cards, in display order.
    #[must_use]
    pub fn cards(&self) -> Vec<MetricCard> {
        [
            ("Total Drivers", self.total_drivers),
            ("New Joinings", self.new_joinings),
            ("Drivers on Leave", self.on_leave),
            ("Drivers on Termination", self.on_termination),
            ("Drivers on Suspension", self.on_suspension),
            ("Drivers on Warning", self.on_warning),
            ("Total Incidents", self.total_incidents),
        ]
        .into_iter()
        .map(|(title, value)| MetricCard { title, value })
        .collect()
    }
}

impl fmt::Display for MetricsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cards = self.cards();
        let width = cards.iter().map(|c| c.title.len()).max().unwrap_or(0);
        for (i, card) in cards.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{:<width$}  {}", card.title, card.value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cards_order() {
        let snapshot = MetricsSnapshot {
            total_drivers: 150,
            new_joinings: 3,
            total_incidents: 12,
            on_warning: 5,
            on_leave: 2,
            on_termination: 1,
            on_suspension: 4,
        };
        let cards = snapshot.cards();
        assert_eq!(cards[0], MetricCard { title: "Total Drivers", value: 150 });
        assert_eq!(cards[5].value, 5);
        assert_eq!(cards.len(), 7);
    }

    #[test]
    fn test_display() {
        let text = MetricsSnapshot::default().to_string();
        assert_eq!(text.lines().count(), 7);
        assert!(text.starts_with("Total Drivers"));
        assert!(text.lines().all(|l| l.ends_with(" 0")));
    }

    #[test]
    fn test_serde_field_names() {
        let json = serde_json::to_value(MetricsSnapshot::default()).unwrap();
        assert!(json.get("total_incidents").is_some());
        assert!(json.get("on_suspension").is_some());
    }
}
