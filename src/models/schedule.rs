//! Daily schedule model.
//!
//! One `DailySchedule` per scheduled business day. It maps each technician
//! (in roster order) to the location fragments they maintain that day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::LocationFragment;

/// The fragments assigned to one technician on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicianAssignment {
    /// Technician identifier.
    pub technician: String,
    /// Location fragments to maintain, in assignment order.
    pub locations: Vec<LocationFragment>,
}

impl TechnicianAssignment {
    /// Creates an empty bucket for a technician.
    pub fn new(technician: impl Into<String>) -> Self {
        Self {
            technician: technician.into(),
            locations: Vec::new(),
        }
    }

    /// On-site units assigned to this technician.
    pub fn on_site_count(&self) -> usize {
        self.locations.iter().map(|l| l.on_site_count()).sum()
    }

    /// Off-site units assigned to this technician.
    pub fn off_site_count(&self) -> usize {
        self.locations.iter().map(|l| l.off_site_count()).sum()
    }

    /// Total units assigned to this technician.
    pub fn equipment_count(&self) -> usize {
        self.on_site_count() + self.off_site_count()
    }
}

/// Maintenance work for one business day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySchedule {
    /// Scheduled date.
    pub date: NaiveDate,
    /// Technician buckets, in roster order.
    pub assignments: Vec<TechnicianAssignment>,
}

impl DailySchedule {
    /// Opens a day with one empty bucket per technician.
    pub fn new(date: NaiveDate, technicians: &[String]) -> Self {
        Self {
            date,
            assignments: technicians
                .iter()
                .map(|t| TechnicianAssignment::new(t.as_str()))
                .collect(),
        }
    }

    /// Fragments assigned to a technician (`None` if not on the roster).
    pub fn locations_for(&self, technician: &str) -> Option<&[LocationFragment]> {
        self.assignments
            .iter()
            .find(|a| a.technician == technician)
            .map(|a| a.locations.as_slice())
    }

    /// Technician identifiers in roster order.
    pub fn technicians(&self) -> impl Iterator<Item = &str> {
        self.assignments.iter().map(|a| a.technician.as_str())
    }

    /// On-site units scheduled this day.
    pub fn on_site_count(&self) -> usize {
        self.assignments.iter().map(TechnicianAssignment::on_site_count).sum()
    }

    /// Off-site units scheduled this day.
    pub fn off_site_count(&self) -> usize {
        self.assignments.iter().map(TechnicianAssignment::off_site_count).sum()
    }

    /// Total units scheduled this day.
    pub fn equipment_count(&self) -> usize {
        self.on_site_count() + self.off_site_count()
    }

    /// Every equipment identifier scheduled this day.
    pub fn equipment_ids(&self) -> Vec<&str> {
        self.assignments
            .iter()
            .flat_map(|a| a.locations.iter())
            .flat_map(|l| l.equipment_ids())
            .collect()
    }

    /// Whether nothing is scheduled this day.
    pub fn is_empty(&self) -> bool {
        self.equipment_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Location;

    fn roster() -> Vec<String> {
        vec!["T1".to_string(), "T2".to_string()]
    }

    fn sample_day() -> DailySchedule {
        let mut day = DailySchedule::new(NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(), &roster());
        day.assignments[0]
            .locations
            .push(Location::new("L1").with_on_site("a").with_on_site("b"));
        day.assignments[1]
            .locations
            .push(Location::new("L2").with_off_site("S1", "c"));
        day
    }

    #[test]
    fn test_new_day_has_empty_buckets() {
        let day = DailySchedule::new(NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(), &roster());
        assert_eq!(day.technicians().collect::<Vec<_>>(), vec!["T1", "T2"]);
        assert!(day.is_empty());
        assert_eq!(day.locations_for("T1").unwrap().len(), 0);
        assert!(day.locations_for("T9").is_none());
    }

    #[test]
    fn test_day_counts() {
        let day = sample_day();
        assert_eq!(day.on_site_count(), 2);
        assert_eq!(day.off_site_count(), 1);
        assert_eq!(day.equipment_count(), 3);
        assert_eq!(day.assignments[0].equipment_count(), 2);
        assert_eq!(day.assignments[1].off_site_count(), 1);
    }

    #[test]
    fn test_equipment_ids() {
        let day = sample_day();
        assert_eq!(day.equipment_ids(), vec!["a", "b", "c"]);
    }
}
