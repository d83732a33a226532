//! Equipment inventory model.
//!
//! A location owns the equipment to be maintained: an ordered on-site list
//! plus off-site equipment grouped by named sublocation. The same shape is
//! reused for day-scoped allocation fragments, which carry only the subset
//! of a location's equipment assigned on a given day.
//!
//! # Ordering
//! Sublocations keep insertion order. That order is the priority order the
//! allocators use when two sublocations hold the same amount of equipment.

use serde::{Deserialize, Serialize};

/// Off-site equipment grouped under one sublocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sublocation {
    /// Sublocation name (unique within its location).
    pub name: String,
    /// Ordered equipment identifiers.
    pub equipment: Vec<String>,
}

impl Sublocation {
    /// Creates an empty sublocation.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            equipment: Vec::new(),
        }
    }

    /// Number of equipment units in this sublocation.
    #[inline]
    pub fn count(&self) -> usize {
        self.equipment.len()
    }
}

/// A location and its equipment.
///
/// Used both as the canonical inventory owner handed to an allocator and
/// as a day-scoped fragment inside a [`DailySchedule`](super::DailySchedule).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Location name (unique within a planning run).
    pub name: String,
    /// On-site equipment identifiers.
    pub on_site: Vec<String>,
    /// Off-site equipment by sublocation, in insertion order.
    pub off_site: Vec<Sublocation>,
}

/// A partial, day-scoped slice of a location's equipment.
pub type LocationFragment = Location;

impl Location {
    /// Creates a location with no equipment.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            on_site: Vec::new(),
            off_site: Vec::new(),
        }
    }

    /// Adds an on-site equipment unit.
    pub fn with_on_site(mut self, equipment_id: impl Into<String>) -> Self {
        self.on_site.push(equipment_id.into());
        self
    }

    /// Adds an off-site equipment unit to a sublocation.
    pub fn with_off_site(
        mut self,
        sublocation: impl Into<String>,
        equipment_id: impl Into<String>,
    ) -> Self {
        self.add_off_site(sublocation, equipment_id);
        self
    }

    /// Appends an off-site unit, creating the sublocation on first use.
    pub fn add_off_site(&mut self, sublocation: impl Into<String>, equipment_id: impl Into<String>) {
        let sublocation = sublocation.into();
        match self.off_site.iter_mut().find(|s| s.name == sublocation) {
            Some(existing) => existing.equipment.push(equipment_id.into()),
            None => {
                let mut created = Sublocation::new(sublocation);
                created.equipment.push(equipment_id.into());
                self.off_site.push(created);
            }
        }
    }

    /// Number of on-site units.
    #[inline]
    pub fn on_site_count(&self) -> usize {
        self.on_site.len()
    }

    /// Number of off-site units across all sublocations.
    pub fn off_site_count(&self) -> usize {
        self.off_site.iter().map(Sublocation::count).sum()
    }

    /// Total number of units (on-site + off-site).
    pub fn total_count(&self) -> usize {
        self.on_site_count() + self.off_site_count()
    }

    /// Number of sublocations.
    pub fn sublocation_count(&self) -> usize {
        self.off_site.len()
    }

    /// Number of units in a given sublocation (`None` if absent).
    pub fn sublocation_count_of(&self, sublocation: &str) -> Option<usize> {
        self.sublocation(sublocation).map(Sublocation::count)
    }

    /// Finds a sublocation by name.
    pub fn sublocation(&self, name: &str) -> Option<&Sublocation> {
        self.off_site.iter().find(|s| s.name == name)
    }

    /// Whether this location carries no equipment at all.
    pub fn is_empty(&self) -> bool {
        self.total_count() == 0
    }

    /// All equipment identifiers: on-site first, then off-site in sublocation order.
    pub fn equipment_ids(&self) -> impl Iterator<Item = &str> {
        self.on_site
            .iter()
            .chain(self.off_site.iter().flat_map(|s| s.equipment.iter()))
            .map(String::as_str)
    }
}
