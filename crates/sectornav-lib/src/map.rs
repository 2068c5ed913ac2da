use std::collections::HashSet;

use chrono::NaiveDateTime;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::grid::{GridTopology, SectorId};
use crate::links::{BlockedLinks, LinkRegistry};
use crate::reach::ReachTable;

/// Occupying party whose presence in a sector can trigger avoidance.
pub type Faction = String;

/// Default bound on the memoized reachability table. Queries needing more
/// moves fall back to a direct search up to the per-query cap; this is a
/// balance between table build time and how often that fallback runs.
pub const DEFAULT_CACHE_DEPTH: u32 = 15;

/// A landmark joining the zero-cost, bidirectional clique with every other
/// planet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Planet {
    pub name: String,
    pub sector: SectorId,
}

/// A landmark offering a one-directional, zero-cost hop from its own sector
/// to a named destination planet. Never usable as a travel target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beacon {
    pub name: String,
    pub sector: SectorId,
    pub destination: String,
}

/// Everything the map loader hands over to assemble one snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapSource {
    pub width: u16,
    pub captured_at: NaiveDateTime,
    pub planets: Vec<Planet>,
    pub beacons: Vec<Beacon>,
    pub occupied: Vec<(Faction, SectorId)>,
    pub unexplored: Vec<SectorId>,
    pub forgotten: Vec<SectorId>,
}

/// Immutable snapshot of one captured map: topology, hubs, hostile
/// occupation, and exploration state, with the epoch already resolved.
///
/// Nothing here mutates after construction. The reachability table is the
/// one lazily-computed piece of state; it is guarded by a compute-once cell,
/// so concurrent queries at worst race to do the same pure work.
#[derive(Debug, Clone)]
pub struct SectorMap {
    pub grid: GridTopology,
    pub captured_at: NaiveDateTime,
    pub epoch: usize,
    pub diagonal: bool,
    pub blocked: BlockedLinks,
    pub planets: Vec<Planet>,
    pub beacons: Vec<Beacon>,
    pub occupied: Vec<(Faction, SectorId)>,
    pub unexplored: HashSet<SectorId>,
    pub forgotten: HashSet<SectorId>,
    cache_depth: u32,
    reach: OnceCell<ReachTable>,
}

impl SectorMap {
    /// Assemble a snapshot from loader data, resolving the capture timestamp
    /// against the registry's epoch table. Sector ids are validated against
    /// the grid; a beacon pointing at an unknown planet is logged and kept
    /// (its distance math does not depend on the destination existing).
    pub fn assemble(source: MapSource, registry: &LinkRegistry) -> Result<Self> {
        let grid = GridTopology::new(source.width)?;

        for planet in &source.planets {
            grid.check(planet.sector)?;
        }
        for beacon in &source.beacons {
            grid.check(beacon.sector)?;
        }
        for &(_, sector) in &source.occupied {
            grid.check(sector)?;
        }
        for &sector in source.unexplored.iter().chain(&source.forgotten) {
            grid.check(sector)?;
        }

        for beacon in &source.beacons {
            let known = source
                .planets
                .iter()
                .any(|planet| planet.name == beacon.destination);
            if !known {
                warn!(
                    beacon = %beacon.name,
                    destination = %beacon.destination,
                    "beacon points at a planet missing from this map"
                );
            }
        }

        let (epoch, rules) = registry.resolve(source.captured_at);
        debug!(epoch, diagonal = rules.diagonal, "resolved map epoch");

        Ok(Self {
            grid,
            captured_at: source.captured_at,
            epoch,
            diagonal: rules.diagonal,
            blocked: rules.blocked.clone(),
            planets: source.planets,
            beacons: source.beacons,
            occupied: source.occupied,
            unexplored: source.unexplored.into_iter().collect(),
            forgotten: source.forgotten.into_iter().collect(),
            cache_depth: DEFAULT_CACHE_DEPTH,
            reach: OnceCell::new(),
        })
    }

    /// Override the reachability table depth. Discards any table already
    /// computed for the previous depth.
    pub fn with_cache_depth(mut self, depth: u32) -> Self {
        self.cache_depth = depth;
        self.reach = OnceCell::new();
        self
    }

    pub fn cache_depth(&self) -> u32 {
        self.cache_depth
    }

    /// The memoized reachability table, built on first use.
    pub fn reach(&self) -> &ReachTable {
        self.reach.get_or_init(|| {
            ReachTable::build(self.grid, self.diagonal, &self.blocked, self.cache_depth)
        })
    }

    /// The faction occupying `sector`, if any.
    pub fn faction_at(&self, sector: SectorId) -> Option<&Faction> {
        self.occupied
            .iter()
            .find(|&&(_, occupied)| occupied == sector)
            .map(|(faction, _)| faction)
    }

    /// The factions met in order along a route, one entry per occupied
    /// sector on it.
    pub fn factions_en_route(&self, route: &[SectorId]) -> Vec<Faction> {
        route
            .iter()
            .filter_map(|&sector| self.faction_at(sector).cloned())
            .collect()
    }

    /// Whether `sector` is unexplored or forgotten, i.e. its contents are
    /// unknown.
    pub fn is_uncharted(&self, sector: SectorId) -> bool {
        self.unexplored.contains(&sector) || self.forgotten.contains(&sector)
    }

    /// Whether any sector on the route is uncharted, making the route's
    /// reported factions uncertain.
    pub fn traverses_uncharted(&self, route: &[SectorId]) -> bool {
        route.iter().any(|&sector| self.is_uncharted(sector))
    }
}
