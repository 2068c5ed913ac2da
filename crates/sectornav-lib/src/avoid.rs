use std::collections::HashSet;

use crate::grid::SectorId;
use crate::map::Faction;

/// Resolve a query's faction filter into the concrete set of sectors it
/// must not enter.
///
/// With no `for_faction` there is nothing to avoid. Otherwise every sector
/// occupied by a different faction is out of bounds, and when unexplored
/// sectors are assumed to belong to `unexplored_assumed` (and that faction
/// is not our own), they are out of bounds too.
///
/// Pure and cheap; recomputed per query so no "no restriction" value is ever
/// shared between calls.
pub fn avoidance_set(
    occupied: &[(Faction, SectorId)],
    for_faction: Option<&Faction>,
    unexplored_assumed: Option<&Faction>,
    unexplored: &HashSet<SectorId>,
) -> HashSet<SectorId> {
    let Some(own) = for_faction else {
        return HashSet::new();
    };
    let mut retval: HashSet<SectorId> = occupied
        .iter()
        .filter(|(faction, _)| faction != own)
        .map(|&(_, sector)| sector)
        .collect();
    if unexplored_assumed.is_some_and(|assumed| assumed != own) {
        retval.extend(unexplored.iter().copied());
    }
    retval
}
