use crate::domain::model::{Call, Zone, ZoneTally};

/// Counts calls per zone. Every zone is present, zero when unused.
pub fn tally<'a>(calls: impl IntoIterator<Item = &'a Call>) -> ZoneTally {
    let mut counts: ZoneTally = Zone::ALL.iter().map(|&zone| (zone, 0)).collect();
    for call in calls {
        *counts.entry(call.zone).or_insert(0) += 1;
    }
    counts
}
