//! Sector map routing library entry points.
//!
//! This crate models a fixed-size square sector grid and answers routing
//! questions over it: shortest distance and route between two sectors,
//! nearest hub to a sector, and avoidance-aware pathfinding around hostile
//! territory. The map loader supplies a fully materialized snapshot
//! ([`MapSource`] assembled into a [`SectorMap`]); higher-level consumers
//! (reports, trade tooling) should only depend on the functions exported
//! here and receive typed results, never formatted text.
//!
//! All queries are synchronous, side-effect-free functions over the
//! immutable snapshot. The only lazily-computed state is the per-snapshot
//! reachability table, built once under a compute-once guard.

#![deny(warnings)]

pub mod avoid;
pub mod error;
pub mod grid;
pub mod links;
pub mod map;
pub mod reach;
pub mod routing;
pub mod search;

pub use avoid::avoidance_set;
pub use error::{Error, NoRouteReason, Result};
pub use grid::{GridTopology, SectorId};
pub use links::{can_move, BlockedLinks, EpochRules, LinkRegistry};
pub use map::{Beacon, Faction, MapSource, Planet, SectorMap, DEFAULT_CACHE_DEPTH};
pub use reach::ReachTable;
pub use routing::{
    best_routes, nearest_beacon, nearest_planet, nearest_planet_or_beacon, shortest_distance,
    shortest_route, HubKind, HubTransit, NearestHub, RankedRoute, RoutePlan, RouteQuery,
    RouteSummary, MAX_ROUTE_LENGTH,
};
pub use search::{a_route, a_route_of_length, routes, routes_of_length, SearchSpace};
