//! Route planning over a map snapshot.
//!
//! This module provides:
//! - [`RouteQuery`] - Per-query parameters (faction filter, length cap, deadline)
//! - [`RouteSummary`] - Result of a shortest-distance query
//! - [`RoutePlan`] - Result of a full route query, phrased between landmarks
//! - [`shortest_distance`] / [`shortest_route`] - Main entry points
//! - [`best_routes`] - Bulk query over many destinations
//!
//! Every entry point is a pure function of the snapshot plus the query;
//! there is no state between calls, and route-not-found comes back as a
//! typed error rather than a sentinel distance.

mod hubs;

pub use hubs::{nearest_beacon, nearest_planet, nearest_planet_or_beacon, HubKind, NearestHub};

use std::collections::HashSet;
use std::time::Instant;

use serde::Serialize;
use tracing::debug;

use crate::avoid::avoidance_set;
use crate::error::{Error, NoRouteReason, Result};
use crate::grid::SectorId;
use crate::map::{Faction, SectorMap};
use crate::search::{a_route, a_route_of_length, SearchSpace};

/// Longest route any query will look for unless told otherwise. The bound
/// is inclusive; raising it buys a better chance of finding a route at the
/// cost of search time.
pub const MAX_ROUTE_LENGTH: u32 = 30;

/// Parameters of a single routing query.
///
/// A fresh value per call carries no state between queries; the default is
/// "no avoidance, default cap, no deadline".
#[derive(Debug, Clone)]
pub struct RouteQuery {
    /// Avoid sectors occupied by factions other than this one.
    pub for_faction: Option<Faction>,
    /// Treat unexplored sectors as belonging to this faction.
    pub unexplored_assumed: Option<Faction>,
    /// Inclusive cap on any searched route length.
    pub max_len: u32,
    /// Give up on searches still running at this instant.
    pub deadline: Option<Instant>,
}

impl Default for RouteQuery {
    fn default() -> Self {
        Self {
            for_faction: None,
            unexplored_assumed: None,
            max_len: MAX_ROUTE_LENGTH,
            deadline: None,
        }
    }
}

impl RouteQuery {
    /// Convenience constructor for a query that avoids every faction other
    /// than `faction`.
    pub fn avoiding(faction: impl Into<Faction>) -> Self {
        Self {
            for_faction: Some(faction.into()),
            ..Self::default()
        }
    }

    /// Additionally treat unexplored sectors as held by `faction`.
    pub fn assume_unexplored(mut self, faction: impl Into<Faction>) -> Self {
        self.unexplored_assumed = Some(faction.into());
        self
    }

    pub fn with_max_len(mut self, max_len: u32) -> Self {
        self.max_len = max_len;
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// The concrete sectors this query must not enter.
    pub(crate) fn obstacles(&self, map: &SectorMap) -> HashSet<SectorId> {
        avoidance_set(
            &map.occupied,
            self.for_faction.as_ref(),
            self.unexplored_assumed.as_ref(),
            &map.unexplored,
        )
    }
}

/// The pair of hubs a hub-assisted route passes through: the network is
/// entered at `entry` (reached from the origin) and left at the `exit`
/// planet (toward the destination). Travel between them is free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HubTransit {
    pub entry: SectorId,
    pub exit: SectorId,
}

/// Result of a shortest-distance query.
#[derive(Debug, Clone, Serialize)]
pub struct RouteSummary {
    pub distance: u32,
    /// Hubs used, or `None` for a direct grid flight.
    pub via: Option<HubTransit>,
    pub factions_en_route: Vec<Faction>,
    pub via_unexplored: bool,
}

/// Result of a full route query, phrased relative to known landmarks:
/// an inbound leg from the nearest planet to the origin, the core
/// origin-to-destination distance, and an outbound leg from the destination
/// back to the hub network.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub from: SectorId,
    pub to: SectorId,
    /// Total moves: inbound + core + outbound.
    pub moves: u32,
    pub inbound: NearestHub,
    pub core: RouteSummary,
    pub outbound: NearestHub,
    pub factions_en_route: Vec<Faction>,
    pub via_unexplored: bool,
}

impl RoutePlan {
    /// The landmark-phrased sector sequence: inbound planet, origin, any
    /// hubs the core leg transits, destination, outbound hub.
    pub fn waypoints(&self) -> Vec<SectorId> {
        let mut retval = vec![self.inbound.sector, self.from];
        if let Some(via) = self.core.via {
            retval.push(via.entry);
            retval.push(via.exit);
        }
        retval.push(self.to);
        retval.push(self.outbound.sector);
        retval
    }
}

/// A destination paired with its route outcome, as produced by
/// [`best_routes`].
#[derive(Debug)]
pub struct RankedRoute {
    pub to: SectorId,
    pub plan: Result<RoutePlan>,
}

/// How many moves to get between the two sectors by the shortest route?
///
/// Considers both the direct grid flight and the cheapest hub-assisted
/// alternative (exit the grid at the nearest planet-or-beacon to `from`,
/// ride the free hub network, re-enter at the nearest planet to `to`). The
/// hub route wins only when strictly shorter.
pub fn shortest_distance(
    map: &SectorMap,
    from: SectorId,
    to: SectorId,
    query: &RouteQuery,
) -> Result<RouteSummary> {
    map.grid.check(from)?;
    map.grid.check(to)?;
    let obstacles = query.obstacles(map);
    // Short-circuit on obstructed endpoints; without this, heavy occupation
    // sends the search crawling to the cap before failing.
    if query.for_faction.is_some() && (obstacles.contains(&from) || obstacles.contains(&to)) {
        return Err(Error::RouteNotFound {
            from,
            to,
            reason: NoRouteReason::EndpointBlocked,
        });
    }

    let dest = nearest_planet(map, to, query)?;
    let via = match &dest {
        Some(_) => nearest_planet_or_beacon(map, from, query)?,
        // No planet reaches the destination, so no exit hub can help.
        None => None,
    };
    let assisted = via.as_ref().zip(dest.as_ref());

    if let Some((via, dest)) = assisted {
        if via.distance + dest.distance < map.grid.chebyshev(from, to) {
            // Beats even the unobstructed direct lower bound.
            debug!(from, to, "hub route is provably optimal");
            return Ok(hub_summary(via, dest));
        }
    }

    let direct = direct_flight(map, from, to, &obstacles, query);
    match (assisted, direct) {
        (Some((via, dest)), Some(flight)) => {
            if via.distance + dest.distance < flight.distance {
                Ok(hub_summary(via, dest))
            } else {
                Ok(flight)
            }
        }
        (None, Some(flight)) => Ok(flight),
        (Some((via, dest)), None) => Ok(hub_summary(via, dest)),
        (None, None) => Err(Error::RouteNotFound {
            from,
            to,
            reason: NoRouteReason::CapExceeded {
                max_len: query.max_len,
            },
        }),
    }
}

fn hub_summary(via: &NearestHub, dest: &NearestHub) -> RouteSummary {
    let mut factions = via.factions_en_route.clone();
    factions.extend(dest.factions_en_route.iter().cloned());
    RouteSummary {
        distance: via.distance + dest.distance,
        via: Some(HubTransit {
            entry: via.sector,
            exit: dest.sector,
        }),
        factions_en_route: factions,
        via_unexplored: via.via_unexplored || dest.via_unexplored,
    }
}

/// Direct grid distance from `from` to `to`, scanning the reachability
/// cache depth by depth. A cache hit ignores obstacles, so whenever the map
/// has occupation or the query has an obstacle set, the hit must be
/// confirmed by extracting an obstacle-free route of exactly that length;
/// a failed confirmation sends the scan one depth deeper. Past the cache,
/// one obstacle-aware iterative-deepening search runs up to the cap.
fn direct_flight(
    map: &SectorMap,
    from: SectorId,
    to: SectorId,
    obstacles: &HashSet<SectorId>,
    query: &RouteQuery,
) -> Option<RouteSummary> {
    let reach = map.reach();
    let space = SearchSpace {
        grid: map.grid,
        diagonal: map.diagonal,
        blocked: &map.blocked,
        obstacles,
        deadline: query.deadline,
    };
    let must_confirm = !obstacles.is_empty() || !map.occupied.is_empty();

    for d in 0..=reach.max_depth().min(query.max_len) {
        if !reach.reachable(d, from).contains(&to) {
            continue;
        }
        if !must_confirm {
            return Some(RouteSummary {
                distance: d,
                via: None,
                factions_en_route: Vec::new(),
                via_unexplored: false,
            });
        }
        if let Some(route) = a_route_of_length(&space, d, from, to) {
            return Some(RouteSummary {
                distance: d,
                via: None,
                factions_en_route: map.factions_en_route(&route),
                via_unexplored: map.traverses_uncharted(&route),
            });
        }
        // Obstacles invalidated this cache hit; a longer route may remain.
    }

    if query.max_len <= reach.max_depth() {
        return None;
    }
    let route = a_route(&space, from, to, query.max_len, reach.max_depth() + 1)?;
    Some(RouteSummary {
        distance: route.len() as u32,
        via: None,
        factions_en_route: map.factions_en_route(&route),
        via_unexplored: map.traverses_uncharted(&route),
    })
}

/// Full route query: [`shortest_distance`] plus the bootstrap legs that
/// anchor the answer to known landmarks. With `from == to` the bootstrap
/// legs still run and the core may legitimately be zero moves.
pub fn shortest_route(
    map: &SectorMap,
    from: SectorId,
    to: SectorId,
    query: &RouteQuery,
) -> Result<RoutePlan> {
    map.grid.check(from)?;
    map.grid.check(to)?;
    let obstacles = query.obstacles(map);
    if query.for_faction.is_some() && (obstacles.contains(&from) || obstacles.contains(&to)) {
        return Err(Error::RouteNotFound {
            from,
            to,
            reason: NoRouteReason::EndpointBlocked,
        });
    }

    let inbound = nearest_planet(map, from, query)?.ok_or(Error::RouteNotFound {
        from,
        to,
        reason: NoRouteReason::NoInboundLandmark,
    })?;
    let outbound = nearest_planet_or_beacon(map, to, query)?.ok_or(Error::RouteNotFound {
        from,
        to,
        reason: NoRouteReason::NoOutboundLandmark,
    })?;
    let core = shortest_distance(map, from, to, query)?;

    let moves = inbound.distance + core.distance + outbound.distance;
    let mut factions = inbound.factions_en_route.clone();
    factions.extend(core.factions_en_route.iter().cloned());
    factions.extend(outbound.factions_en_route.iter().cloned());
    let via_unexplored = inbound.via_unexplored || core.via_unexplored || outbound.via_unexplored;

    Ok(RoutePlan {
        from,
        to,
        moves,
        factions_en_route: factions,
        via_unexplored,
        inbound,
        core,
        outbound,
    })
}

/// Bulk query: route from `from` to each destination, ordered by ascending
/// total moves with failures last. `from = None` asks for a route to each
/// destination from anywhere, i.e. a stay-here query per destination.
pub fn best_routes(
    map: &SectorMap,
    from: Option<SectorId>,
    to_sectors: &[SectorId],
    query: &RouteQuery,
) -> Vec<RankedRoute> {
    let mut retval: Vec<RankedRoute> = to_sectors
        .iter()
        .map(|&to| RankedRoute {
            to,
            plan: shortest_route(map, from.unwrap_or(to), to, query),
        })
        .collect();
    retval.sort_by_key(|ranked| match &ranked.plan {
        Ok(plan) => (false, plan.moves, ranked.to),
        Err(_) => (true, 0, ranked.to),
    });
    retval
}
