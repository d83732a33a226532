//! Plan summary metrics.
//!
//! Tallies a finished plan: units per day, per technician and overall,
//! plus the worst per-day imbalance between technicians.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total equipment | Units scheduled across all days |
//! | Per-technician total | Units a technician maintains over the whole plan |
//! | On-site imbalance | max over days of (max - min) on-site units per technician |
//! | Off-site imbalance | Same, for off-site units |

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::DailySchedule;

/// Totals for one scheduled day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySummary {
    /// Scheduled date.
    pub date: NaiveDate,
    /// On-site units.
    pub on_site: usize,
    /// Off-site units.
    pub off_site: usize,
    /// Units per technician, in roster order.
    pub per_technician: Vec<(String, usize)>,
    /// Largest difference in on-site units between two technicians.
    pub on_site_imbalance: usize,
    /// Largest difference in off-site units between two technicians.
    pub off_site_imbalance: usize,
}

impl DaySummary {
    fn from_day(day: &DailySchedule) -> Self {
        let on_counts: Vec<usize> = day.assignments.iter().map(|a| a.on_site_count()).collect();
        let off_counts: Vec<usize> = day.assignments.iter().map(|a| a.off_site_count()).collect();

        Self {
            date: day.date,
            on_site: on_counts.iter().sum(),
            off_site: off_counts.iter().sum(),
            per_technician: day
                .assignments
                .iter()
                .map(|a| (a.technician.clone(), a.equipment_count()))
                .collect(),
            on_site_imbalance: spread(&on_counts),
            off_site_imbalance: spread(&off_counts),
        }
    }

    /// Units scheduled this day.
    #[inline]
    pub fn total(&self) -> usize {
        self.on_site + self.off_site
    }
}

/// Summary of a complete plan.
#[derive(Debug, Clone)]
pub struct PlanSummary {
    /// Per-day totals, in plan order.
    pub days: Vec<DaySummary>,
    /// Units scheduled across the plan.
    pub total_equipment: usize,
    /// On-site units scheduled across the plan.
    pub total_on_site: usize,
    /// Off-site units scheduled across the plan.
    pub total_off_site: usize,
    /// Units per technician across the plan.
    pub per_technician: HashMap<String, usize>,
    /// Worst single-day on-site imbalance.
    pub max_on_site_imbalance: usize,
    /// Worst single-day off-site imbalance.
    pub max_off_site_imbalance: usize,
}

impl PlanSummary {
    /// Computes the summary of a plan.
    pub fn calculate(schedules: &[DailySchedule]) -> Self {
        let days: Vec<DaySummary> = schedules.iter().map(DaySummary::from_day).collect();

        let mut per_technician: HashMap<String, usize> = HashMap::new();
        for day in &days {
            for (technician, units) in &day.per_technician {
                *per_technician.entry(technician.clone()).or_insert(0) += units;
            }
        }

        let total_on_site: usize = days.iter().map(|d| d.on_site).sum();
        let total_off_site: usize = days.iter().map(|d| d.off_site).sum();

        Self {
            total_equipment: total_on_site + total_off_site,
            total_on_site,
            total_off_site,
            per_technician,
            max_on_site_imbalance: days.iter().map(|d| d.on_site_imbalance).max().unwrap_or(0),
            max_off_site_imbalance: days.iter().map(|d| d.off_site_imbalance).max().unwrap_or(0),
            days,
        }
    }

    /// Number of scheduled days (including empty ones).
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Day with the most units (first one on ties).
    pub fn busiest_day(&self) -> Option<&DaySummary> {
        self.days
            .iter()
            .reduce(|best, d| if d.total() > best.total() { d } else { best })
    }

    /// Whether every day keeps technicians within one unit of each other.
    pub fn is_balanced(&self) -> bool {
        self.max_on_site_imbalance <= 1 && self.max_off_site_imbalance <= 1
    }
}

fn spread(counts: &[usize]) -> usize {
    match (counts.iter().max(), counts.iter().min()) {
        (Some(max), Some(min)) => max - min,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Location;

    fn day(d: u32, buckets: Vec<Vec<Location>>) -> DailySchedule {
        let technicians: Vec<String> = (1..=buckets.len()).map(|i| format!("T{i}")).collect();
        let mut schedule = DailySchedule::new(NaiveDate::from_ymd_opt(2024, 1, d).unwrap(), &technicians);
        for (assignment, locations) in schedule.assignments.iter_mut().zip(buckets) {
            assignment.locations = locations;
        }
        schedule
    }

    fn sample_plan() -> Vec<DailySchedule> {
        vec![
            day(
                8,
                vec![
                    vec![Location::new("L1").with_on_site("a").with_on_site("b")],
                    vec![Location::new("L2").with_off_site("S", "x")],
                ],
            ),
            day(
                9,
                vec![
                    vec![Location::new("L1").with_on_site("c")],
                    vec![Location::new("L1").with_on_site("d")],
                ],
            ),
        ]
    }

    #[test]
    fn test_plan_totals() {
        let summary = PlanSummary::calculate(&sample_plan());
        assert_eq!(summary.day_count(), 2);
        assert_eq!(summary.total_equipment, 5);
        assert_eq!(summary.total_on_site, 4);
        assert_eq!(summary.total_off_site, 1);
        assert_eq!(summary.per_technician["T1"], 3);
        assert_eq!(summary.per_technician["T2"], 2);
    }

    #[test]
    fn test_imbalance() {
        let summary = PlanSummary::calculate(&sample_plan());
        // Day 1: on-site 2 vs 0
        assert_eq!(summary.days[0].on_site_imbalance, 2);
        assert_eq!(summary.days[1].on_site_imbalance, 0);
        assert_eq!(summary.max_on_site_imbalance, 2);
        assert_eq!(summary.max_off_site_imbalance, 1);
        assert!(!summary.is_balanced());
    }

    #[test]
    fn test_busiest_day() {
        let summary = PlanSummary::calculate(&sample_plan());
        let busiest = summary.busiest_day().unwrap();
        assert_eq!(busiest.date, NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
        assert_eq!(busiest.total(), 3);
    }

    #[test]
    fn test_empty_plan() {
        let summary = PlanSummary::calculate(&[]);
        assert_eq!(summary.total_equipment, 0);
        assert!(summary.busiest_day().is_none());
        assert!(summary.is_balanced());
    }
}
