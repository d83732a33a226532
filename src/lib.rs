//! Maintenance work allocation for the U-Engine ecosystem.
//!
//! Plans recurring equipment maintenance across business days and a pool of
//! technicians. Equipment is organized by location, with off-site equipment
//! grouped by sublocation.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Location`, `Sublocation`, `DailySchedule`,
//!   `TechnicianAssignment`, `BusinessCalendar`
//! - **`allocator`**: Fixed-days and capacity-per-day allocators, the
//!   technician distributor and `PlanSummary` metrics
//! - **`validation`**: Input checks run before any equipment is drawn
//!
//! # Planning Modes
//!
//! | Mode | Input | Output days |
//! |------|-------|-------------|
//! | Fixed days | number of days | exactly that many, trailing ones may be empty |
//! | Capacity per day | daily cap (+ per-date overrides) | as many as needed |
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use u_maintenance::models::Location;
//!
//! let site = Location::new("Plant")
//!     .with_on_site("P-1")
//!     .with_on_site("P-2")
//!     .with_off_site("Annex", "A-1");
//! let start = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
//! let technicians = vec!["T1".to_string(), "T2".to_string()];
//!
//! let plan = u_maintenance::fixed_days(2, start, vec![site], &technicians, &[]).unwrap();
//! assert_eq!(plan.len(), 2);
//! ```

use std::collections::BTreeMap;

use chrono::{NaiveDate, Weekday};

pub mod allocator;
pub mod error;
pub mod models;
pub mod validation;

pub use error::{AllocationError, AllocationResult};

use allocator::{CapacityAllocator, CapacityRequest, FixedDaysAllocator, FixedDaysRequest};
use models::{DailySchedule, Location};

/// Spreads `locations` over `number_of_days` business days.
///
/// `open_days` empty = Monday to Friday. The inventory is consumed.
pub fn fixed_days(
    number_of_days: i32,
    start_date: NaiveDate,
    locations: Vec<Location>,
    technicians: &[String],
    open_days: &[Weekday],
) -> AllocationResult<Vec<DailySchedule>> {
    let request = FixedDaysRequest::new(number_of_days, start_date, locations, technicians.to_vec())
        .with_open_days(open_days);
    FixedDaysAllocator::new().allocate(request)
}

/// Consumes `locations` under a daily cap, opening business days as needed.
///
/// `per_date_overrides` replaces the cap on specific dates. `open_days`
/// empty = Monday to Friday. The inventory is consumed.
pub fn capacity_per_day(
    max_per_day: i32,
    per_date_overrides: &BTreeMap<NaiveDate, i32>,
    start_date: NaiveDate,
    locations: Vec<Location>,
    technicians: &[String],
    open_days: &[Weekday],
) -> AllocationResult<Vec<DailySchedule>> {
    let request = CapacityRequest::new(max_per_day, start_date, locations, technicians.to_vec())
        .with_overrides(per_date_overrides.clone())
        .with_open_days(open_days);
    CapacityAllocator::new().allocate(request)
}
