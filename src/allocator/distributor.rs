//! Technician distributor.
//!
//! Spreads a day's allocated equipment across the technician roster.
//!
//! # Algorithm
//!
//! 1. With one technician (or none), the day's fragments are kept as-is.
//! 2. Otherwise every fragment is exploded into one-unit fragments: an
//!    on-site list and an off-site list (keyed by sublocation), both in
//!    discovery order.
//! 3. Each list of `n` units is dealt in roster order: every technician gets
//!    `n / t` units, plus one extra for the remainder. On-site extras go to
//!    the first technicians; off-site extras continue the rotation from the
//!    technician after the last on-site extra.
//! 4. A technician's bucket holds its on-site units first, then off-site.
//!
//! Per day, any two technicians differ by at most one on-site unit, at most
//! one off-site unit, and at most one unit overall.
//!
//! # Reference
//! Graham (1969), "Bounds on Multiprocessing Timing Anomalies" (list scheduling
//! on identical machines)

use tracing::debug;

use crate::models::{DailySchedule, LocationFragment, Sublocation, TechnicianAssignment};

/// Builds a day's technician buckets from staged fragments.
///
/// A single technician receives the staged fragments unchanged.
pub fn distribute(
    fragments: Vec<LocationFragment>,
    technicians: &[String],
) -> Vec<TechnicianAssignment> {
    match technicians {
        [] => Vec::new(),
        [only] => vec![TechnicianAssignment {
            technician: only.clone(),
            locations: fragments,
        }],
        _ => deal(fragments, technicians),
    }
}

/// Rebalances an already populated day across the roster.
///
/// Leaves the day untouched when the roster has fewer than two technicians.
pub fn redistribute(schedule: &mut DailySchedule, technicians: &[String]) {
    if technicians.len() <= 1 {
        return;
    }

    let fragments: Vec<LocationFragment> = schedule
        .assignments
        .iter_mut()
        .flat_map(|a| std::mem::take(&mut a.locations))
        .collect();

    schedule.assignments = deal(fragments, technicians);
}

fn deal(fragments: Vec<LocationFragment>, technicians: &[String]) -> Vec<TechnicianAssignment> {
    let (on_site, off_site) = explode(fragments);
    let count = technicians.len();

    let (on_base, on_extra) = (on_site.len() / count, on_site.len() % count);
    let (off_base, off_extra) = (off_site.len() / count, off_site.len() % count);

    debug!(
        technicians = count,
        on_site = on_site.len(),
        off_site = off_site.len(),
        "distributing day across technicians"
    );

    let mut on_site = on_site.into_iter();
    let mut off_site = off_site.into_iter();

    technicians
        .iter()
        .enumerate()
        .map(|(i, technician)| {
            let on_take = on_base + usize::from(i < on_extra);
            let off_take = off_base + usize::from((i + count - on_extra) % count < off_extra);

            let mut locations = Vec::with_capacity(on_take + off_take);
            locations.extend(on_site.by_ref().take(on_take));
            locations.extend(off_site.by_ref().take(off_take));

            TechnicianAssignment {
                technician: technician.clone(),
                locations,
            }
        })
        .collect()
}

/// Splits fragments into one-unit on-site and off-site fragments.
fn explode(fragments: Vec<LocationFragment>) -> (Vec<LocationFragment>, Vec<LocationFragment>) {
    let mut on_site = Vec::new();
    let mut off_site = Vec::new();

    for fragment in fragments {
        for id in fragment.on_site {
            on_site.push(LocationFragment {
                name: fragment.name.clone(),
                on_site: vec![id],
                off_site: Vec::new(),
            });
        }
        for sublocation in fragment.off_site {
            for id in sublocation.equipment {
                off_site.push(LocationFragment {
                    name: fragment.name.clone(),
                    on_site: Vec::new(),
                    off_site: vec![Sublocation {
                        name: sublocation.name.clone(),
                        equipment: vec![id],
                    }],
                });
            }
        }
    }

    (on_site, off_site)
}
