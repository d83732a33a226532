//! Fixed-days allocator.
//!
//! Spreads an inventory as evenly as possible across a fixed number of
//! business days.
//!
//! # Algorithm
//!
//! 1. Open `number_of_days` consecutive business days.
//! 2. Soft per-day ceilings: `ceil(total_on_site / days)` and
//!    `ceil(total_off_site / days)`.
//! 3. Per-day budget: `total / days`, the first `total % days` days one more.
//! 4. Visit locations by total equipment, largest first.
//! 5. On-site: split ceiling `ceil(count / 2)` from the original count;
//!    repeatedly pick the least-loaded day and draw
//!    `min(ceiling, per-day ceiling, remaining)` units from the front.
//! 6. Off-site: the same per sublocation, largest sublocation first.
//! 7. Hand each day's staged fragments to the technician distributor.
//!
//! # Least-loaded day
//! A day's load key is `load - budget`: units placed so far minus its
//! budget. The first day (creation order) with the smallest key wins.
//!
//! # Complexity
//! O(u * d) where u=equipment units, d=days.
//!
//! # Reference
//! Graham (1969), "Bounds on Multiprocessing Timing Anomalies": greedy
//! least-loaded assignment

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::distributor::distribute;
use super::inventory::{split_ceiling, Inventory, LocationStock};
use crate::error::AllocationResult;
use crate::models::{BusinessCalendar, DailySchedule, Location, LocationFragment};
use crate::validation::validate_fixed_days;

/// Input container for fixed-days allocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedDaysRequest {
    /// Number of business days to spread the inventory across.
    pub number_of_days: i32,
    /// First candidate date (moved forward to a business day).
    pub start_date: NaiveDate,
    /// Inventory to allocate. Consumed by the run.
    pub locations: Vec<Location>,
    /// Technician roster.
    pub technicians: Vec<String>,
    /// Open days of the week. Empty = Monday to Friday.
    #[serde(default)]
    pub open_days: Vec<Weekday>,
}

impl FixedDaysRequest {
    /// Creates a request with the default open days.
    pub fn new(
        number_of_days: i32,
        start_date: NaiveDate,
        locations: Vec<Location>,
        technicians: Vec<String>,
    ) -> Self {
        Self {
            number_of_days,
            start_date,
            locations,
            technicians,
            open_days: Vec::new(),
        }
    }

    /// Sets the open days of the week.
    pub fn with_open_days(mut self, open_days: &[Weekday]) -> Self {
        self.open_days = open_days.to_vec();
        self
    }
}

/// Running load of each opened day.
#[derive(Debug, Clone)]
struct DayLoads {
    budget: Vec<usize>,
    load: Vec<usize>,
}

impl DayLoads {
    fn new(total: usize, days: usize) -> Self {
        let (base, extra) = (total / days, total % days);
        Self {
            budget: (0..days).map(|i| base + usize::from(i < extra)).collect(),
            load: vec![0; days],
        }
    }

    /// Day to receive the next draw.
    ///
    /// Each day is keyed by `load - budget`, the units placed so far minus
    /// its share of the total. The smallest key wins; on a tie the earliest
    /// day (creation order) wins, so a lone unit lands on day 0.
    fn least_loaded(&self) -> usize {
        let key = |i: usize| self.load[i] as i64 - self.budget[i] as i64;
        let mut best = 0;
        for i in 1..self.load.len() {
            if key(i) < key(best) {
                best = i;
            }
        }
        best
    }

    fn add(&mut self, day: usize, units: usize) {
        self.load[day] += units;
    }
}

/// Allocates an inventory over a fixed number of business days.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_maintenance::allocator::{FixedDaysAllocator, FixedDaysRequest};
/// use u_maintenance::models::Location;
///
/// let mut site = Location::new("Plant");
/// for i in 0..9 {
///     site = site.with_on_site(format!("E{i}"));
/// }
/// let start = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
/// let request = FixedDaysRequest::new(3, start, vec![site], vec!["T1".into()]);
///
/// let days = FixedDaysAllocator::new().allocate(request).unwrap();
/// assert_eq!(days.len(), 3);
/// assert!(days.iter().all(|d| d.equipment_count() == 3));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FixedDaysAllocator;

impl FixedDaysAllocator {
    /// Creates an allocator.
    pub fn new() -> Self {
        Self
    }

    /// Runs the allocation.
    ///
    /// Fails with [`AllocationError::InvalidArgument`](crate::AllocationError)
    /// before touching the inventory if the request is invalid.
    #[instrument(skip(self, request), fields(
        number_of_days = request.number_of_days,
        start_date = %request.start_date,
        locations = request.locations.len(),
        technicians = request.technicians.len()
    ))]
    pub fn allocate(&self, request: FixedDaysRequest) -> AllocationResult<Vec<DailySchedule>> {
        validate_fixed_days(&request)?;

        let calendar = BusinessCalendar::new(&request.open_days);
        let day_count = request.number_of_days as usize;
        let dates = calendar.business_days(request.start_date, day_count);

        let mut inventory = Inventory::new(request.locations);
        let total_on_site = inventory.on_site_remaining();
        let total_off_site = inventory.off_site_remaining();
        let total = total_on_site + total_off_site;

        let on_site_per_day = total_on_site.div_ceil(day_count);
        let off_site_per_day = total_off_site.div_ceil(day_count);
        let mut loads = DayLoads::new(total, day_count);
        let mut staging: Vec<Vec<LocationFragment>> = vec![Vec::new(); day_count];

        debug!(
            total_on_site,
            total_off_site, on_site_per_day, off_site_per_day, "fixed-days targets"
        );

        for idx in inventory.order_by_desc(LocationStock::total_remaining) {
            let location = &mut inventory.locations[idx];
            place_on_site(location, on_site_per_day, &mut loads, &mut staging);
            place_off_site(location, off_site_per_day, &mut loads, &mut staging);
        }

        let schedules: Vec<DailySchedule> = dates
            .into_iter()
            .zip(staging)
            .map(|(date, fragments)| DailySchedule {
                date,
                assignments: distribute(fragments, &request.technicians),
            })
            .collect();

        info!(days = schedules.len(), units = total, "fixed-days allocation complete");
        Ok(schedules)
    }
}

/// Spreads a location's on-site list over the least-loaded days.
///
/// A single unit is its own ceiling, so it lands on the least-loaded day.
fn place_on_site(
    location: &mut LocationStock,
    per_day: usize,
    loads: &mut DayLoads,
    staging: &mut [Vec<LocationFragment>],
) {
    let ceiling = split_ceiling(location.on_site_remaining());
    while location.on_site_remaining() > 0 {
        let day = loads.least_loaded();
        let take = ceiling.min(per_day).min(location.on_site_remaining());
        let units = location.draw_on_site(take);
        loads.add(day, units.len());
        debug!(location = %location.name, day, units = units.len(), "on-site draw");
        staging[day].push(location.on_site_fragment(units));
    }
}

/// Spreads each sublocation over the least-loaded days, largest sublocation first.
fn place_off_site(
    location: &mut LocationStock,
    per_day: usize,
    loads: &mut DayLoads,
    staging: &mut [Vec<LocationFragment>],
) {
    for sub_idx in location.sublocations_by_remaining() {
        let ceiling = split_ceiling(location.sublocations[sub_idx].remaining());
        while location.sublocations[sub_idx].remaining() > 0 {
            let day = loads.least_loaded();
            let sublocation = &mut location.sublocations[sub_idx];
            let take = ceiling.min(per_day).min(sublocation.remaining());
            let units = sublocation.draw(take);
            let name = sublocation.name.clone();
            loads.add(day, units.len());
            debug!(location = %location.name, sublocation = %name, day, units = units.len(), "off-site draw");
            staging[day].push(location.off_site_fragment(&name, units));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    fn monday() -> NaiveDate {
        // 2024-01-08 is a Monday
        NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()
    }

    fn on_site_location(name: &str, count: usize) -> Location {
        (0..count).fold(Location::new(name), |loc, i| {
            loc.with_on_site(format!("{name}-E{i}"))
        })
    }

    fn technicians(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("T{i}")).collect()
    }

    #[test]
    fn test_day_loads_budget() {
        let loads = DayLoads::new(7, 3);
        assert_eq!(loads.budget, vec![3, 2, 2]);
        assert_eq!(loads.least_loaded(), 0);
    }

    #[test]
    fn test_day_loads_tie_breaks_to_first() {
        let mut loads = DayLoads::new(6, 3);
        loads.add(0, 2);
        // keys: [-1, -2, -2] → day 1
        assert_eq!(loads.least_loaded(), 1);
    }

    #[test]
    fn test_budget_binds_over_ceiling() {
        // 9 units / 3 days: ceiling 5, per-day 3
        let request = FixedDaysRequest::new(3, monday(), vec![on_site_location("L", 9)], technicians(1));
        let days = FixedDaysAllocator::new().allocate(request).unwrap();

        assert_eq!(days.len(), 3);
        for day in &days {
            assert_eq!(day.equipment_count(), 3);
        }
        // Front-of-list order preserved
        assert_eq!(days[0].equipment_ids(), vec!["L-E0", "L-E1", "L-E2"]);
    }

    #[test]
    fn test_single_off_site_unit_lands_on_first_day() {
        let location = Location::new("L").with_off_site("Sub", "only");
        let request = FixedDaysRequest::new(2, monday(), vec![location], technicians(1));
        let days = FixedDaysAllocator::new().allocate(request).unwrap();

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].equipment_ids(), vec!["only"]);
        assert!(days[1].is_empty());
    }

    #[test]
    fn test_split_ceiling_limits_single_day() {
        // 4 units over 1 day: ceiling 2, still everything lands on day 0
        let request = FixedDaysRequest::new(1, monday(), vec![on_site_location("L", 4)], technicians(1));
        let days = FixedDaysAllocator::new().allocate(request).unwrap();
        assert_eq!(days[0].equipment_count(), 4);
        // Two draws of two units each
        assert_eq!(days[0].locations_for("T1").unwrap().len(), 2);
    }

    #[test]
    fn test_more_days_than_units() {
        let request = FixedDaysRequest::new(5, monday(), vec![on_site_location("L", 2)], technicians(1));
        let days = FixedDaysAllocator::new().allocate(request).unwrap();
        assert_eq!(days.len(), 5);
        let total: usize = days.iter().map(DailySchedule::equipment_count).sum();
        assert_eq!(total, 2);
        assert!(days[4].is_empty());
    }

    #[test]
    fn test_dates_skip_weekends() {
        // Friday start, 3 days → Fri, Mon, Tue
        let friday = NaiveDate::from_ymd_opt(2024, 1, 12).unwrap();
        let request = FixedDaysRequest::new(3, friday, vec![on_site_location("L", 3)], technicians(1));
        let days = FixedDaysAllocator::new().allocate(request).unwrap();
        let dates: Vec<NaiveDate> = days.iter().map(|d| d.date).collect();
        assert_eq!(
            dates,
            vec![
                friday,
                NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 16).unwrap(),
            ]
        );
    }

    #[test]
    fn test_custom_open_days() {
        let request = FixedDaysRequest::new(2, monday(), vec![on_site_location("L", 2)], technicians(1))
            .with_open_days(&[Weekday::Sat]);
        let days = FixedDaysAllocator::new().allocate(request).unwrap();
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 1, 13).unwrap());
        assert_eq!(days[1].date, NaiveDate::from_ymd_opt(2024, 1, 20).unwrap());
    }

    #[test]
    fn test_largest_location_placed_first() {
        // Small location listed first; the big one still claims day 0 first
        let locations = vec![on_site_location("A", 1), on_site_location("B", 4)];
        let request = FixedDaysRequest::new(2, monday(), locations, technicians(1));
        let days = FixedDaysAllocator::new().allocate(request).unwrap();

        assert_eq!(days[0].equipment_ids(), vec!["B-E0", "B-E1", "A-E0"]);
        assert_eq!(days[1].equipment_ids(), vec!["B-E2", "B-E3"]);
    }

    #[test]
    fn test_largest_sublocation_placed_first() {
        let location = (0..4).fold(Location::new("L").with_off_site("Small", "s0"), |loc, i| {
            loc.with_off_site("Big", format!("b{i}"))
        });
        let request = FixedDaysRequest::new(2, monday(), vec![location], technicians(1));
        let days = FixedDaysAllocator::new().allocate(request).unwrap();

        assert_eq!(days[0].equipment_ids(), vec!["b0", "b1", "s0"]);
        assert_eq!(days[1].equipment_ids(), vec!["b2", "b3"]);
    }

    #[test]
    fn test_mixed_inventory_conserved() {
        let locations = vec![
            Location::new("Loc-1")
                .with_on_site("E20-1")
                .with_on_site("E30-2")
                .with_off_site("Sub2", "E22-1")
                .with_off_site("Sub2", "E24-2")
                .with_off_site("Sub3", "E36-1"),
            Location::new("Loc-5").with_on_site("E50-1").with_on_site("E56-2"),
        ];
        let request = FixedDaysRequest::new(2, monday(), locations, technicians(2));
        let days = FixedDaysAllocator::new().allocate(request).unwrap();

        let mut ids: Vec<&str> = days.iter().flat_map(|d| d.equipment_ids()).collect();
        ids.sort_unstable();
        assert_eq!(
            ids,
            vec!["E20-1", "E22-1", "E24-2", "E30-2", "E36-1", "E50-1", "E56-2"]
        );
    }

    #[test]
    fn test_invalid_day_count_rejected() {
        let request = FixedDaysRequest::new(0, monday(), vec![on_site_location("L", 2)], technicians(1));
        let err = FixedDaysAllocator::new().allocate(request).unwrap_err();
        assert_eq!(err.errors()[0].kind, ValidationErrorKind::InvalidDayCount);
    }
}
