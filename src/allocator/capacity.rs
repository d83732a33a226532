//! Capacity-per-day allocator.
//!
//! Opens as many business days as needed to consume an inventory under a
//! daily equipment cap, optionally overridden for specific dates.
//!
//! # Algorithm (per day, until nothing remains)
//!
//! 1. Cap = override for this date, else the default cap.
//! 2. Split the cap between on-site and off-site in proportion to what
//!    remains of each (on-site share rounded up).
//! 3. On-site pass: locations by remaining on-site count, largest first.
//!    Each draws up to the remaining target, limited by its split ceiling
//!    until its first draw.
//! 4. Any on-site shortfall is added to the off-site target of the same day.
//!    An off-site shortfall is not handed back to on-site.
//! 5. Off-site pass: the same per sublocation.
//! 6. Distribute the day across technicians, advance to the next business day.
//!
//! # Termination
//! With every cap positive, each day draws at least one unit.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 4: Priority Dispatching (largest
//! remaining work first)

use std::collections::BTreeMap;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::distributor::distribute;
use super::inventory::{Inventory, LocationStock};
use crate::error::AllocationResult;
use crate::models::{BusinessCalendar, DailySchedule, Location, LocationFragment};
use crate::validation::validate_capacity;

/// Input container for capacity-per-day allocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacityRequest {
    /// Default maximum number of units per day.
    pub max_per_day: i32,
    /// Cap overrides for specific dates.
    #[serde(default)]
    pub per_date_overrides: BTreeMap<NaiveDate, i32>,
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

impl CapacityRequest {
    /// Creates a request with no overrides and the default open days.
    pub fn new(
        max_per_day: i32,
        start_date: NaiveDate,
        locations: Vec<Location>,
        technicians: Vec<String>,
    ) -> Self {
        Self {
            max_per_day,
            per_date_overrides: BTreeMap::new(),
            start_date,
            locations,
            technicians,
            open_days: Vec::new(),
        }
    }

    /// Overrides the cap for one date.
    pub fn with_override(mut self, date: NaiveDate, max_per_day: i32) -> Self {
        self.per_date_overrides.insert(date, max_per_day);
        self
    }

    /// Replaces all per-date overrides.
    pub fn with_overrides(mut self, overrides: BTreeMap<NaiveDate, i32>) -> Self {
        self.per_date_overrides = overrides;
        self
    }

    /// Sets the open days of the week.
    pub fn with_open_days(mut self, open_days: &[Weekday]) -> Self {
        self.open_days = open_days.to_vec();
        self
    }

    /// Cap in force on a date.
    pub fn cap_for(&self, date: NaiveDate) -> i32 {
        self.per_date_overrides
            .get(&date)
            .copied()
            .unwrap_or(self.max_per_day)
    }
}

/// Allocates an inventory under a daily cap until nothing remains.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_maintenance::allocator::{CapacityAllocator, CapacityRequest};
/// use u_maintenance::models::Location;
///
/// let mut site = Location::new("Plant");
/// for i in 0..12 {
///     site = site.with_on_site(format!("E{i}"));
/// }
/// let start = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
/// let request = CapacityRequest::new(5, start, vec![site], vec!["T1".into()]);
///
/// let days = CapacityAllocator::new().allocate(request).unwrap();
/// let counts: Vec<usize> = days.iter().map(|d| d.equipment_count()).collect();
/// assert_eq!(counts, vec![5, 5, 2]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CapacityAllocator;

impl CapacityAllocator {
    /// Creates an allocator.
    pub fn new() -> Self {
        Self
    }

    /// Runs the allocation.
    ///
    /// Fails with [`AllocationError::InvalidArgument`](crate::AllocationError)
    /// before touching the inventory if the request is invalid.
    #[instrument(skip(self, request), fields(
        max_per_day = request.max_per_day,
        overrides = request.per_date_overrides.len(),
        start_date = %request.start_date,
        locations = request.locations.len(),
        technicians = request.technicians.len()
    ))]
    pub fn allocate(&self, mut request: CapacityRequest) -> AllocationResult<Vec<DailySchedule>> {
        validate_capacity(&request)?;

        let calendar = BusinessCalendar::new(&request.open_days);
        let mut date = calendar.advance(request.start_date);
        let mut inventory = Inventory::new(std::mem::take(&mut request.locations));
        let total = inventory.total_remaining();
        let mut schedules = Vec::new();

        while !inventory.is_exhausted() {
            let cap = request.cap_for(date).max(0) as usize;
            let (on_target, off_target) = split_targets(
                cap,
                inventory.on_site_remaining(),
                inventory.off_site_remaining(),
            );

            let mut staged = Vec::new();
            let on_drawn = draw_on_site(&mut inventory, on_target, &mut staged);
            let off_target = off_target + (on_target - on_drawn);
            let off_drawn = draw_off_site(&mut inventory, off_target, &mut staged);

            debug!(
                %date,
                cap, on_target, on_drawn, off_target, off_drawn, "capacity day filled"
            );

            schedules.push(DailySchedule {
                date,
                assignments: distribute(staged, &request.technicians),
            });
            date = calendar.next(date);
        }

        info!(days = schedules.len(), units = total, "capacity allocation complete");
        Ok(schedules)
    }
}

/// Splits a day's cap between on-site and off-site targets.
///
/// Proportional to the remaining counts with the on-site share rounded up.
/// A target above its remaining count is clamped and the difference offered
/// to the other category, within the cap.
fn split_targets(cap: usize, on_site: usize, off_site: usize) -> (usize, usize) {
    let remaining = on_site + off_site;
    let day_cap = cap.min(remaining);

    if on_site > 0 && off_site > 0 {
        let mut on = (day_cap * on_site).div_ceil(remaining);
        let mut off = day_cap - on;
        if on > on_site {
            on = on_site;
            off = off_site.min(day_cap - on);
        } else if off > off_site {
            off = off_site;
            on = on_site.min(day_cap - off);
        }
        (on, off)
    } else if on_site > 0 {
        (day_cap.min(on_site), 0)
    } else {
        (0, day_cap.min(off_site))
    }
}

/// On-site priority pass. Returns the number of units drawn.
fn draw_on_site(inventory: &mut Inventory, target: usize, staged: &mut Vec<LocationFragment>) -> usize {
    let mut drawn = 0;
    if target == 0 {
        return drawn;
    }

    for idx in inventory.order_by_desc(LocationStock::on_site_remaining) {
        if drawn >= target {
            break;
        }
        let location = &mut inventory.locations[idx];
        if location.on_site_remaining() == 0 {
            continue;
        }
        let take = (target - drawn).min(location.on_site_draw_limit());
        let units = location.draw_on_site(take);
        drawn += units.len();
        staged.push(location.on_site_fragment(units));
    }
    drawn
}

/// Off-site priority pass, sublocation by sublocation. Returns the number of units drawn.
fn draw_off_site(inventory: &mut Inventory, target: usize, staged: &mut Vec<LocationFragment>) -> usize {
    let mut drawn = 0;
    if target == 0 {
        return drawn;
    }

    for idx in inventory.order_by_desc(LocationStock::off_site_remaining) {
        let location = &mut inventory.locations[idx];
        for sub_idx in location.sublocations_by_remaining() {
            if drawn >= target {
                return drawn;
            }
            let sublocation = &mut location.sublocations[sub_idx];
            if sublocation.remaining() == 0 {
                continue;
            }
            let take = (target - drawn).min(sublocation.draw_limit());
            let units = sublocation.draw(take);
            let name = sublocation.name.clone();
            drawn += units.len();
            staged.push(location.off_site_fragment(&name, units));
        }
    }
    drawn
}
