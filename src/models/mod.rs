//! Maintenance planning domain models.
//!
//! Provides the data types handed to and returned by the allocators:
//! equipment inventories, business-day calendars and per-day technician
//! schedules.
//!
//! # Domain Mappings
//!
//! | u-maintenance | Facilities | Field Service | Fleet |
//! |---------------|-----------|---------------|-------|
//! | Location | Building | Customer Site | Depot |
//! | Sublocation | Annex | Remote Cabinet | Satellite Yard |
//! | Equipment | HVAC Unit | Meter | Vehicle |
//! | Technician | Maintenance Crew | Field Engineer | Mechanic |

mod calendar;
mod location;
mod schedule;

pub use calendar::{
    advance_to_business_day, next_business_day, BusinessCalendar, DEFAULT_OPEN_DAYS,
};
pub use location::{Location, LocationFragment, Sublocation};
pub use schedule::{DailySchedule, TechnicianAssignment};
