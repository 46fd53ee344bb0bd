//! Snapshot phase: classify stations into suppliers and receivers.
//!
//! One read-only walk over every partition's pool, plus a second walk
//! over the network-wide pool when remote supply is enabled. Nothing in
//! the world is mutated.

use ferry_core::storage::{has_supply_slot, supply_stock};
use ferry_core::{ItemId, Partition, PartitionIndex, Station, StationHandle, World};

use crate::config::CycleParams;
use crate::working_set::{ReceiverEntry, WorkingSet};

/// Clear `set` and fill its supplier and receiver lists from `world`.
///
/// A station that qualifies as a supplier is never also queued as a
/// receiver.
pub(crate) fn snapshot_stations<W: World>(world: &W, params: &CycleParams, set: &mut WorkingSet) {
    set.clear();

    for index in 0..world.partition_count() {
        let Ok(raw) = u32::try_from(index) else {
            break;
        };
        let partition_index = PartitionIndex(raw);
        let Some(partition) = world.partition(partition_index) else {
            continue;
        };

        for slot in 1..partition.station_cursor() {
            let Some(station) = partition.station(slot) else {
                continue;
            };
            if station.id().0 != slot || station.is_collector() {
                continue;
            }
            let handle = StationHandle::new(partition_index, slot);

            // Roles are exclusive: a supplier never serves itself.
            if is_supplier(station, params.item, params.remote_mode) {
                set.suppliers.push(handle);
            } else if is_receiver(station, params) {
                set.receivers.push(ReceiverEntry {
                    handle,
                    id: station.id(),
                    planet: station.planet_id(),
                    gid: station.gid(),
                    count: station.resource_count(),
                });
            }
        }
    }

    if params.remote_mode {
        collect_network_suppliers(world, params.item, set);
    }
}

/// Add stellar remote-supply stations reachable only through the
/// network-wide pool.
fn collect_network_suppliers<W: World>(world: &W, item: ItemId, set: &mut WorkingSet) {
    for index in 0..world.network_pool_len() {
        let Some(handle) = world.network_station(index) else {
            continue;
        };
        let Some(station) = world.station(handle) else {
            continue;
        };
        if station.is_collector() || !station.is_stellar() {
            continue;
        }
        let storage = station.storage();
        if !has_supply_slot(storage, item, false, true) || supply_stock(storage, item, true) == 0 {
            continue;
        }
        // Handle equality is station identity.
        if !set.suppliers.contains(&handle) {
            set.suppliers.push(handle);
        }
    }
}

/// A station supplies if a slot for `item` is flagged for supply under
/// the current remote policy and those slots hold at least one unit.
fn is_supplier<S: Station>(station: &S, item: ItemId, remote_mode: bool) -> bool {
    let storage = station.storage();
    let flagged = has_supply_slot(storage, item, true, remote_mode);
    flagged && supply_stock(storage, item, remote_mode) > 0
}

fn is_receiver<S: Station>(station: &S, params: &CycleParams) -> bool {
    let wants = !params.respect_required_toggle || station.requires_resource();
    wants && station.resource_count() < params.target_level
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DistributionConfig;
    use ferry_core::{LogisticMode, StorageSlot};
    use ferry_test_utils::{MockStation, MockWorld};

    fn params(remote: bool) -> CycleParams {
        DistributionConfig {
            remote_mode: remote,
            target_level: 10,
            ..DistributionConfig::default()
        }
        .resolve()
    }

    fn run(world: &MockWorld, p: &CycleParams) -> WorkingSet {
        let mut set = WorkingSet::default();
        snapshot_stations(world, p, &mut set);
        set
    }

    #[test]
    fn classifies_local_supplier_and_receiver() {
        let mut world = MockWorld::new();
        let planet = world.add_planet(1);
        let s = world.add_station(planet, MockStation::local_supplier(1, 1, 20));
        let r = world.add_station(planet, MockStation::receiver(2, 1, 4));
        let set = run(&world, &params(false));
        assert_eq!(set.suppliers(), &[s]);
        assert_eq!(set.receivers().len(), 1);
        assert_eq!(set.receivers()[0].handle, r);
        assert_eq!(set.receivers()[0].count, 4);
    }

    #[test]
    fn skips_collectors_and_stale_slots() {
        let mut world = MockWorld::new();
        let planet = world.add_planet(1);
        world.add_station(planet, MockStation::local_supplier(1, 1, 20).collector());
        // Station whose id no longer matches the slot it sits in.
        world.add_station_at(planet, 2, MockStation::receiver(9, 1, 0));
        let set = run(&world, &params(false));
        assert!(set.suppliers().is_empty());
        assert!(set.receivers().is_empty());
    }

    #[test]
    fn supply_flag_without_stock_is_not_a_supplier() {
        let mut world = MockWorld::new();
        let planet = world.add_planet(1);
        world.add_station(planet, MockStation::local_supplier(1, 1, 0).with_count(50));
        let set = run(&world, &params(false));
        assert!(set.suppliers().is_empty());
    }

    #[test]
    fn remote_only_supplier_excluded_when_remote_disabled() {
        let mut world = MockWorld::new();
        let planet = world.add_planet(1);
        world.add_station(planet, MockStation::remote_supplier(1, 1, 30));
        assert!(run(&world, &params(false)).suppliers().is_empty());
        assert_eq!(run(&world, &params(true)).suppliers().len(), 1);
    }

    #[test]
    fn network_pass_does_not_duplicate_partition_suppliers() {
        let mut world = MockWorld::new();
        let planet = world.add_planet(1);
        let h = world.add_station(planet, MockStation::remote_supplier(1, 1, 30));
        assert_eq!(world.network_pool_len(), 1);
        let set = run(&world, &params(true));
        assert_eq!(set.suppliers(), &[h]);
    }

    #[test]
    fn network_pass_finds_stations_outside_enumerated_partitions() {
        let mut world = MockWorld::new();
        let planet = world.add_planet(1);
        let h = world.add_station(planet, MockStation::remote_supplier(1, 1, 30));
        world.hide_partition(planet);
        let set = run(&world, &params(true));
        assert_eq!(set.suppliers(), &[h]);
    }

    #[test]
    fn required_toggle_policy() {
        let mut world = MockWorld::new();
        let planet = world.add_planet(1);
        world.add_station(planet, MockStation::receiver(1, 1, 0).requires(false));
        let respecting = params(false);
        assert!(run(&world, &respecting).receivers().is_empty());

        let ignoring = DistributionConfig {
            respect_required_toggle: false,
            target_level: 10,
            ..DistributionConfig::default()
        }
        .resolve();
        assert_eq!(run(&world, &ignoring).receivers().len(), 1);
    }

    #[test]
    fn supplier_below_target_is_not_also_a_receiver() {
        let mut world = MockWorld::new();
        let planet = world.add_planet(1);
        let h = world.add_station(planet, MockStation::local_supplier(1, 1, 20).requires(true));
        let set = run(&world, &params(false));
        assert_eq!(set.suppliers(), &[h]);
        assert!(set.receivers().is_empty());

        // Without stock it is an ordinary receiver.
        let mut world = MockWorld::new();
        let planet = world.add_planet(1);
        world.add_station(planet, MockStation::local_supplier(1, 1, 0).requires(true));
        let set = run(&world, &params(false));
        assert!(set.suppliers().is_empty());
        assert_eq!(set.receivers().len(), 1);
    }

    #[test]
    fn station_at_target_is_not_a_receiver() {
        let mut world = MockWorld::new();
        let planet = world.add_planet(1);
        world.add_station(planet, MockStation::receiver(1, 1, 10));
        assert!(run(&world, &params(false)).receivers().is_empty());
    }

    #[test]
    fn snapshot_never_mutates_storage() {
        let mut world = MockWorld::new();
        let planet = world.add_planet(1);
        let slot = StorageSlot::new(ItemId::WARPER, 12, LogisticMode::Supply, LogisticMode::Supply);
        let h = world.add_station(planet, MockStation::new(1, 1).stellar().with_slot(slot));
        let before = world.station_ref(h).clone();
        let _ = run(&world, &params(true));
        assert_eq!(world.station_ref(h), &before);
    }

    #[test]
    fn partitions_without_pools_are_skipped() {
        let mut world = MockWorld::new();
        world.add_partition_without_pool();
        let planet = world.add_planet(2);
        let h: StationHandle = world.add_station(planet, MockStation::receiver(1, 2, 0));
        let set = run(&world, &params(false));
        assert_eq!(set.receivers()[0].handle, h);
    }
}
