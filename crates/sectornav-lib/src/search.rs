use std::collections::HashSet;
use std::time::Instant;

use tracing::{debug, trace};

use crate::grid::{GridTopology, SectorId};
use crate::links::{can_move, BlockedLinks};

/// Everything a path search needs to know about the world: adjacency mode,
/// blocked links, the obstacle set for this query, and an optional deadline
/// after which the search gives up.
///
/// Paths are returned as the sequence of sectors entered: the destination is
/// included, the origin is not, so `path.len()` equals the move count.
#[derive(Debug, Clone, Copy)]
pub struct SearchSpace<'a> {
    pub grid: GridTopology,
    pub diagonal: bool,
    pub blocked: &'a BlockedLinks,
    pub obstacles: &'a HashSet<SectorId>,
    pub deadline: Option<Instant>,
}

impl SearchSpace<'_> {
    fn can_enter(&self, from: SectorId, to: SectorId) -> bool {
        can_move(from, to, self.blocked, self.obstacles)
    }

    fn expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// All neighbours of `sector` are obstructed, so no route can pass
    /// through it. Blocked links are deliberately not considered here; this
    /// is a cheap early-out, not a full reachability test.
    fn sealed(&self, sector: SectorId) -> bool {
        self.grid
            .adjacent_sectors(sector, self.diagonal)
            .iter()
            .all(|adj| self.obstacles.contains(adj))
    }
}

/// Find one route of exactly `length` moves between the two sectors, if any.
///
/// Depth-first with the admissible prune "only explore a sector that could
/// still reach the destination in the remaining moves"; first fit wins.
pub fn a_route_of_length(
    space: &SearchSpace<'_>,
    length: u32,
    from: SectorId,
    to: SectorId,
) -> Option<Vec<SectorId>> {
    trace!(length, from, to, "searching for an exact-length route");
    if length == 0 {
        return (from == to).then(Vec::new);
    }
    let mut visited = HashSet::from([from]);
    let mut path = Vec::with_capacity(length as usize);
    dfs_first(space, from, to, length, &mut visited, &mut path).then_some(path)
}

fn dfs_first(
    space: &SearchSpace<'_>,
    current: SectorId,
    to: SectorId,
    remaining: u32,
    visited: &mut HashSet<SectorId>,
    path: &mut Vec<SectorId>,
) -> bool {
    if space.expired() {
        return false;
    }
    for next in space.grid.adjacent_sectors(current, space.diagonal) {
        if visited.contains(&next) || !space.can_enter(current, next) {
            continue;
        }
        if space.grid.chebyshev(next, to) > remaining - 1 {
            continue;
        }
        if remaining == 1 {
            // The prune left only sectors within Chebyshev 0 of the goal.
            debug_assert_eq!(next, to);
            path.push(next);
            return true;
        }
        visited.insert(next);
        path.push(next);
        if dfs_first(space, next, to, remaining - 1, visited, path) {
            return true;
        }
        path.pop();
        visited.remove(&next);
    }
    false
}

/// Enumerate every simple route of exactly `length` moves between the two
/// sectors. Exponential in `length`; intended for short lengths or
/// validation, not production queries.
pub fn routes_of_length(
    space: &SearchSpace<'_>,
    length: u32,
    from: SectorId,
    to: SectorId,
) -> Vec<Vec<SectorId>> {
    let mut retval = Vec::new();
    if length == 0 {
        if from == to {
            retval.push(Vec::new());
        }
        return retval;
    }
    let mut visited = HashSet::from([from]);
    let mut path = Vec::with_capacity(length as usize);
    dfs_all(space, from, to, length, &mut visited, &mut path, &mut retval);
    retval
}

fn dfs_all(
    space: &SearchSpace<'_>,
    current: SectorId,
    to: SectorId,
    remaining: u32,
    visited: &mut HashSet<SectorId>,
    path: &mut Vec<SectorId>,
    retval: &mut Vec<Vec<SectorId>>,
) {
    if space.expired() {
        return;
    }
    for next in space.grid.adjacent_sectors(current, space.diagonal) {
        if visited.contains(&next) || !space.can_enter(current, next) {
            continue;
        }
        if space.grid.chebyshev(next, to) > remaining - 1 {
            continue;
        }
        if remaining == 1 {
            debug_assert_eq!(next, to);
            let mut route = path.clone();
            route.push(next);
            retval.push(route);
            continue;
        }
        visited.insert(next);
        path.push(next);
        dfs_all(space, next, to, remaining - 1, visited, path, retval);
        path.pop();
        visited.remove(&next);
    }
}

/// Find one shortest route from `from` to `to` by iterative deepening:
/// start at the Chebyshev lower bound (or `min_len` if larger) and lengthen
/// until a route turns up or the inclusive `max_len` cap is exhausted.
pub fn a_route(
    space: &SearchSpace<'_>,
    from: SectorId,
    to: SectorId,
    max_len: u32,
    min_len: u32,
) -> Option<Vec<SectorId>> {
    if space.obstacles.contains(&from) || space.obstacles.contains(&to) {
        return None;
    }
    let mut length = space.grid.chebyshev(from, to).max(min_len);
    if length > 0 && (space.sealed(from) || space.sealed(to)) {
        return None;
    }
    while length <= max_len {
        if space.expired() {
            debug!(from, to, length, "route search hit its deadline");
            return None;
        }
        if let Some(route) = a_route_of_length(space, length, from, to) {
            return Some(route);
        }
        length += 1;
    }
    None
}

/// Enumerate all shortest routes from `from` to `to`: the same iterative
/// deepening as [`a_route`], returning every route of the first length that
/// yields any. All returned routes therefore have equal length.
pub fn routes(
    space: &SearchSpace<'_>,
    from: SectorId,
    to: SectorId,
    max_len: u32,
) -> Vec<Vec<SectorId>> {
    if space.obstacles.contains(&from) || space.obstacles.contains(&to) {
        return Vec::new();
    }
    let mut length = space.grid.chebyshev(from, to);
    while length <= max_len {
        let found = routes_of_length(space, length, from, to);
        if !found.is_empty() {
            return found;
        }
        length += 1;
    }
    Vec::new()
}
