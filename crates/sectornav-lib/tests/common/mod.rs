// Shared fixture helpers for integration tests.
#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use sectornav_lib::{
    Beacon, EpochRules, Faction, LinkRegistry, MapSource, Planet, SectorId, SectorMap,
};

/// Capture timestamp used by every fixture map.
pub fn captured_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(3016, 5, 2)
        .unwrap()
        .and_hms_opt(11, 0, 0)
        .unwrap()
}

/// Loader output for an empty 33x33 map; tests fill in what they need.
pub fn source() -> MapSource {
    MapSource {
        width: 33,
        captured_at: captured_at(),
        planets: Vec::new(),
        beacons: Vec::new(),
        occupied: Vec::new(),
        unexplored: Vec::new(),
        forgotten: Vec::new(),
    }
}

pub fn planet(name: &str, sector: SectorId) -> Planet {
    Planet {
        name: name.to_string(),
        sector,
    }
}

pub fn beacon(name: &str, sector: SectorId, destination: &str) -> Beacon {
    Beacon {
        name: name.to_string(),
        sector,
        destination: destination.to_string(),
    }
}

pub fn held_by(faction: &str, sector: SectorId) -> (Faction, SectorId) {
    (faction.to_string(), sector)
}

/// Assemble a snapshot against a single-epoch registry with default rules.
pub fn assemble(source: MapSource) -> SectorMap {
    SectorMap::assemble(source, &LinkRegistry::constant(EpochRules::default()))
        .expect("fixture map assembles")
}
