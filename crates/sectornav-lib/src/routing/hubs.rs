//! Nearest-hub queries over the two-layer travel graph.
//!
//! Planets form a zero-cost bidirectional clique; a beacon adds a zero-cost
//! one-directional hop from its own sector into that clique. Finding the
//! nearest hub to a sector is therefore the whole cost of reaching the hub
//! network from there.

use std::collections::HashSet;

use serde::Serialize;
use tracing::trace;

use crate::error::Result;
use crate::grid::SectorId;
use crate::map::{Faction, SectorMap};
use crate::search::{a_route, a_route_of_length, SearchSpace};

use super::RouteQuery;

/// Which layer of the hub network a landmark belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HubKind {
    Planet,
    Beacon,
}

/// A hub resolved as nearest to some sector, with the cost of the grid leg
/// between them and what that leg runs into.
#[derive(Debug, Clone, Serialize)]
pub struct NearestHub {
    pub name: String,
    pub kind: HubKind,
    pub sector: SectorId,
    pub distance: u32,
    /// Factions met along the confirming leg, in travel order.
    pub factions_en_route: Vec<Faction>,
    /// Whether the leg crosses sectors whose contents are unknown.
    pub via_unexplored: bool,
}

/// Shared scan behind the public nearest-* queries.
///
/// Walks the reachability cache depth by depth; a cache hit only proves the
/// hub is reachable ignoring obstacles, so each hit must be confirmed by
/// extracting an obstacle-free route of exactly that length (hub → sector,
/// the direction the cache was consulted in). Past the cache depth, falls
/// back to per-candidate iterative deepening up to the query cap.
fn nearest_landmark(
    map: &SectorMap,
    to: SectorId,
    candidates: &[(&str, SectorId)],
    kind: HubKind,
    obstacles: &HashSet<SectorId>,
    query: &RouteQuery,
) -> Option<NearestHub> {
    if obstacles.contains(&to) {
        return None;
    }
    let space = SearchSpace {
        grid: map.grid,
        diagonal: map.diagonal,
        blocked: &map.blocked,
        obstacles,
        deadline: query.deadline,
    };
    let reach = map.reach();

    for d in 0..=reach.max_depth().min(query.max_len) {
        for &(name, sector) in candidates {
            if obstacles.contains(&sector) {
                continue;
            }
            if !reach.reachable(d, to).contains(&sector) {
                continue;
            }
            trace!(hub = name, sector, distance = d, "confirming cached hub distance");
            if let Some(route) = a_route_of_length(&space, d, sector, to) {
                return Some(NearestHub {
                    name: name.to_string(),
                    kind,
                    sector,
                    distance: d,
                    factions_en_route: map.factions_en_route(&route),
                    via_unexplored: map.traverses_uncharted(&route),
                });
            }
        }
    }

    if query.max_len <= reach.max_depth() {
        return None;
    }
    let mut best: Option<(Vec<SectorId>, &str, SectorId)> = None;
    for &(name, sector) in candidates {
        if obstacles.contains(&sector) {
            continue;
        }
        if let Some(route) = a_route(&space, sector, to, query.max_len, reach.max_depth() + 1) {
            if best.as_ref().map_or(true, |(held, _, _)| route.len() < held.len()) {
                best = Some((route, name, sector));
            }
        }
    }
    best.map(|(route, name, sector)| NearestHub {
        name: name.to_string(),
        kind,
        sector,
        distance: route.len() as u32,
        factions_en_route: map.factions_en_route(&route),
        via_unexplored: map.traverses_uncharted(&route),
    })
}

/// Where is the nearest planet to `sector`?
///
/// The conceptual direction of travel is planet → sector, so the factions
/// and uncertainty at `sector` itself count toward the result.
pub fn nearest_planet(
    map: &SectorMap,
    sector: SectorId,
    query: &RouteQuery,
) -> Result<Option<NearestHub>> {
    map.grid.check(sector)?;
    let obstacles = query.obstacles(map);
    let candidates: Vec<(&str, SectorId)> = map
        .planets
        .iter()
        .map(|planet| (planet.name.as_str(), planet.sector))
        .collect();
    let found = nearest_landmark(map, sector, &candidates, HubKind::Planet, &obstacles, query);
    Ok(found.map(|mut hub| {
        if let Some(faction) = map.faction_at(sector) {
            hub.factions_en_route.push(faction.clone());
        }
        hub.via_unexplored = hub.via_unexplored || map.is_uncharted(sector);
        hub
    }))
}

/// Where is the nearest beacon to `sector`?
pub fn nearest_beacon(
    map: &SectorMap,
    sector: SectorId,
    query: &RouteQuery,
) -> Result<Option<NearestHub>> {
    map.grid.check(sector)?;
    let obstacles = query.obstacles(map);
    let candidates: Vec<(&str, SectorId)> = map
        .beacons
        .iter()
        .map(|beacon| (beacon.name.as_str(), beacon.sector))
        .collect();
    Ok(nearest_landmark(
        map,
        sector,
        &candidates,
        HubKind::Beacon,
        &obstacles,
        query,
    ))
}

/// Where is the nearest hub of either kind to `sector`? Planets win ties,
/// and the winner's own route data is returned.
pub fn nearest_planet_or_beacon(
    map: &SectorMap,
    sector: SectorId,
    query: &RouteQuery,
) -> Result<Option<NearestHub>> {
    let planet = nearest_planet(map, sector, query)?;
    let beacon = nearest_beacon(map, sector, query)?;
    Ok(match (planet, beacon) {
        (Some(planet), Some(beacon)) => {
            if beacon.distance < planet.distance {
                Some(beacon)
            } else {
                Some(planet)
            }
        }
        (planet, beacon) => planet.or(beacon),
    })
}
