//! Allocation working set.
//!
//! The allocators drain equipment from an [`Inventory`] built from the
//! caller's locations. Each location and sublocation carries its own
//! split-required flag here instead of on [`Location`], so the caller-visible
//! model holds data only.
//!
//! # Split ceiling
//! While a list's flag is set, a single day may take at most
//! `ceil(remaining / 2)` units from it. The first draw clears the flag and
//! the whole remaining stock becomes eligible from then on.

use std::collections::VecDeque;

use crate::models::{Location, LocationFragment, Sublocation};

/// Half of `count`, rounded up.
#[inline]
pub(crate) fn split_ceiling(count: usize) -> usize {
    count.div_ceil(2)
}

/// Drain state of one sublocation.
#[derive(Debug, Clone)]
pub(crate) struct SublocationStock {
    pub name: String,
    pub equipment: VecDeque<String>,
    pub split_required: bool,
}

impl SublocationStock {
    #[inline]
    pub fn remaining(&self) -> usize {
        self.equipment.len()
    }

    /// Most units a single day may take, honoring the split flag.
    pub fn draw_limit(&self) -> usize {
        if self.split_required {
            split_ceiling(self.remaining())
        } else {
            self.remaining()
        }
    }

    /// Removes up to `n` units from the front and clears the split flag.
    pub fn draw(&mut self, n: usize) -> Vec<String> {
        let n = n.min(self.remaining());
        if n > 0 {
            self.split_required = false;
        }
        self.equipment.drain(..n).collect()
    }
}

/// Drain state of one location.
#[derive(Debug, Clone)]
pub(crate) struct LocationStock {
    pub name: String,
    pub on_site: VecDeque<String>,
    pub split_required_on_site: bool,
    pub sublocations: Vec<SublocationStock>,
}

impl LocationStock {
    fn from_location(location: Location) -> Self {
        Self {
            name: location.name,
            on_site: location.on_site.into(),
            split_required_on_site: true,
            sublocations: location
                .off_site
                .into_iter()
                .map(|s| SublocationStock {
                    name: s.name,
                    equipment: s.equipment.into(),
                    split_required: true,
                })
                .collect(),
        }
    }

    #[inline]
    pub fn on_site_remaining(&self) -> usize {
        self.on_site.len()
    }

    pub fn off_site_remaining(&self) -> usize {
        self.sublocations.iter().map(SublocationStock::remaining).sum()
    }

    pub fn total_remaining(&self) -> usize {
        self.on_site_remaining() + self.off_site_remaining()
    }

    /// Most on-site units a single day may take, honoring the split flag.
    pub fn on_site_draw_limit(&self) -> usize {
        if self.split_required_on_site {
            split_ceiling(self.on_site_remaining())
        } else {
            self.on_site_remaining()
        }
    }

    /// Removes up to `n` on-site units from the front and clears the split flag.
    pub fn draw_on_site(&mut self, n: usize) -> Vec<String> {
        let n = n.min(self.on_site_remaining());
        if n > 0 {
            self.split_required_on_site = false;
        }
        self.on_site.drain(..n).collect()
    }

    /// Sublocation indices by remaining count, largest first.
    ///
    /// Stable: equal counts keep insertion order.
    pub fn sublocations_by_remaining(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.sublocations.len()).collect();
        order.sort_by(|&a, &b| {
            self.sublocations[b]
                .remaining()
                .cmp(&self.sublocations[a].remaining())
        });
        order
    }

    /// Fragment carrying on-site units of this location.
    pub fn on_site_fragment(&self, equipment: Vec<String>) -> LocationFragment {
        LocationFragment {
            name: self.name.clone(),
            on_site: equipment,
            off_site: Vec::new(),
        }
    }

    /// Fragment carrying off-site units of one sublocation.
    pub fn off_site_fragment(&self, sublocation: &str, equipment: Vec<String>) -> LocationFragment {
        LocationFragment {
            name: self.name.clone(),
            on_site: Vec::new(),
            off_site: vec![Sublocation {
                name: sublocation.to_string(),
                equipment,
            }],
        }
    }
}

/// Equipment still waiting for a day.
#[derive(Debug, Clone, Default)]
pub(crate) struct Inventory {
    pub locations: Vec<LocationStock>,
}

impl Inventory {
    /// Takes ownership of the caller's locations.
    pub fn new(locations: Vec<Location>) -> Self {
        Self {
            locations: locations
                .into_iter()
                .map(LocationStock::from_location)
                .collect(),
        }
    }

    pub fn on_site_remaining(&self) -> usize {
        self.locations.iter().map(LocationStock::on_site_remaining).sum()
    }

    pub fn off_site_remaining(&self) -> usize {
        self.locations.iter().map(LocationStock::off_site_remaining).sum()
    }

    pub fn total_remaining(&self) -> usize {
        self.on_site_remaining() + self.off_site_remaining()
    }

    pub fn is_exhausted(&self) -> bool {
        self.total_remaining() == 0
    }

    /// Location indices ordered by `key`, largest first (stable).
    pub fn order_by_desc<F>(&self, key: F) -> Vec<usize>
    where
        F: Fn(&LocationStock) -> usize,
    {
        let mut order: Vec<usize> = (0..self.locations.len()).collect();
        order.sort_by(|&a, &b| key(&self.locations[b]).cmp(&key(&self.locations[a])));
        order
    }
}
