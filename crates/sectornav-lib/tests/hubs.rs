mod common;

use common::{assemble, beacon, held_by, planet, source};
use sectornav_lib::{
    nearest_beacon, nearest_planet, nearest_planet_or_beacon, shortest_distance, HubKind,
    MapSource, RouteQuery, SectorMap,
};

fn map_with(build: impl FnOnce(&mut MapSource)) -> SectorMap {
    let mut src = source();
    build(&mut src);
    assemble(src).with_cache_depth(6)
}

#[test]
fn a_planet_in_the_sector_itself_is_at_distance_zero() {
    let map = map_with(|src| src.planets = vec![planet("Earth", 1)]);
    let hub = nearest_planet(&map, 1, &RouteQuery::default())
        .expect("valid sector")
        .expect("planet found");
    assert_eq!(hub.name, "Earth");
    assert_eq!(hub.sector, 1);
    assert_eq!(hub.distance, 0);
    assert_eq!(hub.kind, HubKind::Planet);
    assert!(hub.factions_en_route.is_empty());
    assert!(!hub.via_unexplored);
}

#[test]
fn the_closest_of_several_planets_wins() {
    let map = map_with(|src| {
        src.planets = vec![planet("Earth", 1), planet("Solaris", 70)];
    });
    // Earth is two moves from sector 36, Solaris only one.
    let hub = nearest_planet(&map, 36, &RouteQuery::default())
        .expect("valid sector")
        .expect("planet found");
    assert_eq!(hub.name, "Solaris");
    assert_eq!(hub.distance, 1);
}

#[test]
fn cached_distances_reach_past_the_cache_when_needed() {
    let map = map_with(|src| src.planets = vec![planet("Earth", 1)]);
    // Sector 11 is ten moves out, past this fixture's cache depth of six.
    let hub = nearest_planet(&map, 11, &RouteQuery::default())
        .expect("valid sector")
        .expect("planet found");
    assert_eq!(hub.distance, 10);
}

#[test]
fn hubs_outside_the_cap_are_not_found() {
    let map = map_with(|src| src.planets = vec![planet("Earth", 1)]);
    let query = RouteQuery::default().with_max_len(5);
    let found = nearest_planet(&map, 11, &query).expect("valid sector");
    assert!(found.is_none());
}

#[test]
fn nearest_planet_reports_factions_at_the_target() {
    let map = map_with(|src| {
        src.planets = vec![planet("Earth", 1)];
        src.occupied = vec![held_by("Amaranth", 3)];
    });
    let hub = nearest_planet(&map, 3, &RouteQuery::default())
        .expect("valid sector")
        .expect("planet found");
    assert_eq!(hub.distance, 2);
    // Once for the arrival sector on the route, once for the fold-in that
    // accounts for the planet -> destination direction of travel.
    assert_eq!(hub.factions_en_route, vec!["Amaranth", "Amaranth"]);
}

#[test]
fn occupied_hubs_are_skipped_for_avoiding_queries() {
    let map = map_with(|src| {
        src.planets = vec![planet("Earth", 3), planet("Solaris", 9)];
        src.occupied = vec![held_by("Amaranth", 3)];
    });
    let query = RouteQuery::avoiding("Illuminati");
    let hub = nearest_planet(&map, 6, &query)
        .expect("valid sector")
        .expect("a clean planet remains");
    assert_eq!(hub.name, "Solaris");
    assert_eq!(hub.sector, 9);
    assert_eq!(hub.distance, 3);
}

#[test]
fn an_uncharted_leg_is_flagged() {
    let map = map_with(|src| {
        src.planets = vec![planet("Earth", 1)];
        src.unexplored = vec![2];
    });
    let hub = nearest_planet(&map, 3, &RouteQuery::default())
        .expect("valid sector")
        .expect("planet found");
    assert!(hub.via_unexplored);
}

#[test]
fn beacons_are_found_by_their_own_sector() {
    let map = map_with(|src| {
        src.planets = vec![planet("Earth", 1)];
        src.beacons = vec![beacon("Relay", 5, "Earth")];
    });
    let hub = nearest_beacon(&map, 6, &RouteQuery::default())
        .expect("valid sector")
        .expect("beacon found");
    assert_eq!(hub.name, "Relay");
    assert_eq!(hub.kind, HubKind::Beacon);
    assert_eq!(hub.distance, 1);
}

#[test]
fn a_strictly_closer_beacon_beats_the_planet() {
    let map = map_with(|src| {
        src.planets = vec![planet("Earth", 1)];
        src.beacons = vec![beacon("Relay", 5, "Earth")];
    });
    let hub = nearest_planet_or_beacon(&map, 6, &RouteQuery::default())
        .expect("valid sector")
        .expect("hub found");
    assert_eq!(hub.kind, HubKind::Beacon);
    assert_eq!(hub.distance, 1);
}

#[test]
fn the_planet_wins_a_distance_tie() {
    let map = map_with(|src| {
        src.planets = vec![planet("Earth", 3)];
        src.beacons = vec![beacon("Relay", 9, "Earth")];
    });
    // Sector 6 is three moves from both hubs.
    let hub = nearest_planet_or_beacon(&map, 6, &RouteQuery::default())
        .expect("valid sector")
        .expect("hub found");
    assert_eq!(hub.kind, HubKind::Planet);
    assert_eq!(hub.name, "Earth");
    assert_eq!(hub.distance, 3);
}

#[test]
fn a_beacon_serves_as_exit_but_never_as_entry() {
    let map = map_with(|src| {
        src.planets = vec![planet("Earth", 1089)];
        src.beacons = vec![beacon("Relay", 2, "Earth")];
    });
    let query = RouteQuery::default();

    // The far corner planet is unreachable inside the cap by flying, so the
    // only way from sector 1 to 1088 is out through the adjacent beacon.
    let summary = shortest_distance(&map, 1, 1088, &query).expect("beacon route exists");
    assert_eq!(summary.distance, 2);
    let via = summary.via.expect("hub assisted");
    assert_eq!(via.entry, 2);
    assert_eq!(via.exit, 1089);

    // Coming the other way the beacon is no help: nothing can target it.
    let inbound = nearest_planet(&map, 1, &query).expect("valid sector");
    assert!(inbound.is_none());
}
