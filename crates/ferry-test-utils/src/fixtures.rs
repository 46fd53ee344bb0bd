//! Reusable world fixtures.
//!
//! - [`single_planet`]: one supplier and a row of receivers on one planet.
//! - [`two_planets`]: a supplier planet and a receiver-only planet.
//! - [`random_world`]: seeded, reproducible worlds for property tests
//!   and benchmarks.

use ferry_core::{ItemId, LogisticMode, PartitionIndex, StationHandle, StorageSlot};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{MockStation, MockWorld};

/// Handles into a fixture world.
#[derive(Clone, Debug)]
pub struct Fixture {
    pub world: MockWorld,
    pub suppliers: Vec<StationHandle>,
    pub receivers: Vec<StationHandle>,
}

/// Planet 1 with a local supplier holding `stock` (slot 1) followed by
/// one receiver per entry of `counts` (slots 2, 3, ...).
pub fn single_planet(stock: u32, counts: &[u32]) -> Fixture {
    let mut world = MockWorld::new();
    let planet = world.add_planet(1);
    let supplier = world.add_station(planet, MockStation::local_supplier(1, 1, stock));
    let receivers = counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            let id = i as u32 + 2;
            world.add_station(planet, MockStation::receiver(id, 1, count).with_gid(id))
        })
        .collect();
    Fixture {
        world,
        suppliers: vec![supplier],
        receivers,
    }
}

/// Planet 1 holds a stellar station supplying `stock` through a
/// remote-only slot; planet 2 holds one receiver at `count`.
///
/// With remote supply off, planet 2 can never be served.
pub fn two_planets(stock: u32, count: u32) -> Fixture {
    let mut world = MockWorld::new();
    let home = world.add_planet(1);
    let away = world.add_planet(2);
    let supplier = world.add_station(home, MockStation::remote_supplier(1, 1, stock).with_gid(1));
    let receiver = world.add_station(away, MockStation::receiver(1, 2, count).stellar().with_gid(2));
    Fixture {
        world,
        suppliers: vec![supplier],
        receivers: vec![receiver],
    }
}

/// A reproducible world of `planets` planets with `stations_per_planet`
/// stations each.
///
/// Roughly a third of the stations supply (locally, remotely or both),
/// the rest are potential receivers; a few are collectors or have
/// their "required" toggle off. Stellar stations get distinct gids.
pub fn random_world(seed: u64, planets: u32, stations_per_planet: u32) -> MockWorld {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut world = MockWorld::new();
    let mut next_gid = 1;

    for planet in 1..=planets {
        let partition: PartitionIndex = world.add_planet(planet);
        for id in 1..=stations_per_planet {
            let mut station = MockStation::new(id, planet);
            if rng.random_bool(0.4) {
                station = station.stellar().with_gid(next_gid);
                next_gid += 1;
            }
            if rng.random_bool(0.05) {
                station = station.collector();
            }

            if rng.random_bool(0.35) {
                let local = if rng.random_bool(0.7) {
                    LogisticMode::Supply
                } else {
                    LogisticMode::None
                };
                let remote = if rng.random_bool(0.5) {
                    LogisticMode::Supply
                } else {
                    LogisticMode::Demand
                };
                let units = rng.random_range(0..200);
                station = station.with_slot(StorageSlot::new(ItemId::WARPER, units, local, remote));
                if rng.random_bool(0.2) {
                    let extra = rng.random_range(0..50);
                    station = station.with_slot(StorageSlot::new(
                        ItemId::WARPER,
                        extra,
                        LogisticMode::Supply,
                        LogisticMode::None,
                    ));
                }
            } else {
                let count = rng.random_range(0..60);
                station = station.with_count(count).requires(rng.random_bool(0.85));
            }
            let _ = world.add_station(partition, station);
        }
    }
    world
}
