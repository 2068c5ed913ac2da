use std::collections::HashSet;

use tracing::debug;

use crate::grid::{GridTopology, SectorId};
use crate::links::BlockedLinks;

/// Per-depth reachability table: `reachable(d, s)` is the set of sectors
/// reachable from `s` using at most `d` grid moves, ignoring obstacles but
/// honoring blocked links and the diagonal flag.
///
/// Depends only on the snapshot's fixed topology, so it is computed once per
/// snapshot and never invalidated. Each level is built by dilating the
/// previous one with the one-step closure rather than re-running a full
/// breadth-first search per depth.
#[derive(Debug, Clone)]
pub struct ReachTable {
    // depths[d][sector - 1]; sector ids are dense so a Vec beats a map here.
    depths: Vec<Vec<HashSet<SectorId>>>,
}

impl ReachTable {
    pub fn build(
        grid: GridTopology,
        diagonal: bool,
        blocked: &BlockedLinks,
        max_depth: u32,
    ) -> Self {
        debug!(
            width = grid.width(),
            diagonal, max_depth, "building reachability table"
        );
        let mut depths: Vec<Vec<HashSet<SectorId>>> = Vec::with_capacity(max_depth as usize + 1);
        depths.push(grid.sectors().map(|s| HashSet::from([s])).collect());

        if max_depth >= 1 {
            // One-step closure: stay put, or take any unblocked adjacent move.
            let one_step: Vec<HashSet<SectorId>> = grid
                .sectors()
                .map(|s| {
                    let mut set = HashSet::from([s]);
                    for adj in grid.adjacent_sectors(s, diagonal) {
                        let is_blocked = blocked
                            .get(&s)
                            .is_some_and(|links| links.contains(&adj));
                        if !is_blocked {
                            set.insert(adj);
                        }
                    }
                    set
                })
                .collect();
            depths.push(one_step);
        }

        for d in 2..=max_depth as usize {
            let level: Vec<HashSet<SectorId>> = {
                let prev = &depths[d - 1];
                let one = &depths[1];
                prev.iter()
                    .map(|from_prev| {
                        let mut set = HashSet::new();
                        for &s1 in from_prev {
                            set.extend(one[usize::from(s1) - 1].iter().copied());
                        }
                        set
                    })
                    .collect()
            };
            depths.push(level);
        }

        Self { depths }
    }

    /// Largest depth the table covers.
    pub fn max_depth(&self) -> u32 {
        (self.depths.len() - 1) as u32
    }

    /// Sectors reachable from `sector` in at most `depth` moves.
    pub fn reachable(&self, depth: u32, sector: SectorId) -> &HashSet<SectorId> {
        &self.depths[depth as usize][usize::from(sector) - 1]
    }
}
