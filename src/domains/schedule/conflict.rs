//! Booking-conflict detection for a single engineer's calendar.

use super::entry::{Schedule, TimeWindow};

/// Returns every schedule of `engineer_id` whose window overlaps `candidate`
/// under the half-open rule, so callers can name the offending bookings.
///
/// The candidate is assumed valid (`end > start`); this is the caller's
/// contract and is not re-checked here. Adjacency — a candidate starting
/// exactly when an existing booking ends, or vice versa — never counts as a
/// conflict. Purely a query; callers decide which slice to test (the dispatch
/// service passes the engineer's non-cancelled bookings).
pub fn find_conflicts<'a>(
    engineer_id: &str,
    candidate: &TimeWindow,
    existing: &'a [Schedule],
) -> Vec<&'a Schedule> {
    existing
        .iter()
        .filter(|schedule| schedule.engineer_id == engineer_id)
        .filter(|schedule| candidate.overlaps(&schedule.window))
        .collect()
}
