//! Maintenance allocators and plan metrics.
//!
//! Two batch allocators share one working-set model and one technician
//! distributor:
//!
//! - `FixedDaysAllocator` spreads an inventory over a fixed number of
//!   business days, always picking the least-loaded day.
//! - `CapacityAllocator` fills one business day at a time under a daily
//!   cap until the inventory is exhausted.
//!
//! Both apply the split ceiling (at most half of a location's or
//! sublocation's equipment on one day) and finish every day by spreading
//! its units evenly across technicians.
//!
//! # Ownership
//! Allocators take the inventory by value and drain it. Callers that need
//! the original inventory afterwards pass a clone.
//!
//! # Concurrency
//! A run is synchronous and touches only its own inputs; independent runs
//! may execute on separate threads.

mod capacity;
pub mod distributor;
mod fixed_days;
mod inventory;
mod summary;

pub use capacity::{CapacityAllocator, CapacityRequest};
pub use distributor::{distribute, redistribute};
pub use fixed_days::{FixedDaysAllocator, FixedDaysRequest};
pub use summary::{DaySummary, PlanSummary};
