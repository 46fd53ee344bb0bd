//! Test utilities and mock types for Ferry development.
//!
//! Provides an in-memory host world ([`MockWorld`]) implementing the
//! [`World`], [`Partition`] and [`Station`] traits, plus
//! [`fixtures`] for the standard distribution scenarios and seeded
//! random worlds.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use ferry_core::{
    Gid, ItemId, LogisticMode, Partition, PartitionIndex, PlanetId, RefreshError, RefreshTarget,
    Station, StationHandle, StationId, StorageSlot, World,
};
use smallvec::SmallVec;

// ── MockStation ─────────────────────────────────────────────────

/// In-memory station with builder-style setup.
///
/// A fresh station holds nothing and does not require the resource, so
/// it is neither a supplier nor a receiver until configured as one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockStation {
    id: StationId,
    planet: PlanetId,
    gid: Gid,
    collector: bool,
    stellar: bool,
    count: u32,
    requires: bool,
    slots: SmallVec<[StorageSlot; 4]>,
    take_limit: Option<u32>,
    update_needs_calls: u32,
}

impl MockStation {
    pub fn new(id: u32, planet: u32) -> Self {
        Self {
            id: StationId(id),
            planet: PlanetId(planet),
            gid: Gid(0),
            collector: false,
            stellar: false,
            count: 0,
            requires: false,
            slots: SmallVec::new(),
            take_limit: None,
            update_needs_calls: 0,
        }
    }

    /// Station offering `units` warpers to its own planet.
    pub fn local_supplier(id: u32, planet: u32, units: u32) -> Self {
        Self::new(id, planet).with_slot(StorageSlot::new(
            ItemId::WARPER,
            units,
            LogisticMode::Supply,
            LogisticMode::None,
        ))
    }

    /// Stellar station offering `units` warpers across the network only.
    pub fn remote_supplier(id: u32, planet: u32, units: u32) -> Self {
        Self::new(id, planet).stellar().with_slot(StorageSlot::new(
            ItemId::WARPER,
            units,
            LogisticMode::None,
            LogisticMode::Supply,
        ))
    }

    /// Station holding `count` warpers with its "required" toggle on.
    pub fn receiver(id: u32, planet: u32, count: u32) -> Self {
        Self::new(id, planet).with_count(count).requires(true)
    }

    pub fn collector(mut self) -> Self {
        self.collector = true;
        self
    }

    /// Mark the station interstellar; it joins the network pool when added.
    pub fn stellar(mut self) -> Self {
        self.stellar = true;
        self
    }

    pub fn with_gid(mut self, gid: u32) -> Self {
        self.gid = Gid(gid);
        self
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn requires(mut self, requires: bool) -> Self {
        self.requires = requires;
        self
    }

    pub fn with_slot(mut self, slot: StorageSlot) -> Self {
        self.slots.push(slot);
        self
    }

    /// Make every `take_item` call remove at most `limit` units.
    pub fn with_take_limit(mut self, limit: u32) -> Self {
        self.take_limit = Some(limit);
        self
    }

    /// Units of `item` across every storage slot.
    pub fn item_count(&self, item: ItemId) -> u64 {
        self.slots
            .iter()
            .filter(|s| s.item == item)
            .map(|s| u64::from(s.count))
            .sum()
    }

    /// How many times the engine asked this station to recompute needs.
    pub fn update_needs_calls(&self) -> u32 {
        self.update_needs_calls
    }
}

impl Station for MockStation {
    fn id(&self) -> StationId {
        self.id
    }

    fn planet_id(&self) -> PlanetId {
        self.planet
    }

    fn gid(&self) -> Gid {
        self.gid
    }

    fn is_collector(&self) -> bool {
        self.collector
    }

    fn is_stellar(&self) -> bool {
        self.stellar
    }

    fn resource_count(&self) -> u32 {
        self.count
    }

    fn set_resource_count(&mut self, count: u32) {
        self.count = count;
    }

    fn requires_resource(&self) -> bool {
        self.requires
    }

    fn storage(&self) -> &[StorageSlot] {
        &self.slots
    }

    fn take_item(&mut self, item: ItemId, count: u32) -> u32 {
        let mut wanted = self.take_limit.map_or(count, |limit| count.min(limit));
        let mut taken = 0;
        for slot in self.slots.iter_mut().filter(|s| s.item == item) {
            if wanted == 0 {
                break;
            }
            let n = slot.count.min(wanted);
            slot.count -= n;
            wanted -= n;
            taken += n;
        }
        taken
    }

    fn update_needs(&mut self) {
        self.update_needs_calls += 1;
    }
}

// ── MockPartition ───────────────────────────────────────────────

/// One planet's station pool, indexed by slot. Slot 0 stays empty.
#[derive(Clone, Debug)]
pub struct MockPartition {
    planet: PlanetId,
    pool: Vec<Option<MockStation>>,
}

impl MockPartition {
    fn new(planet: PlanetId) -> Self {
        Self {
            planet,
            pool: vec![None],
        }
    }

    fn put(&mut self, slot: u32, station: MockStation) {
        let slot = slot as usize;
        if self.pool.len() <= slot {
            self.pool.resize(slot + 1, None);
        }
        self.pool[slot] = Some(station);
    }
}

impl Partition for MockPartition {
    type Station = MockStation;

    fn planet_id(&self) -> PlanetId {
        self.planet
    }

    fn station_cursor(&self) -> u32 {
        self.pool.len() as u32
    }

    fn station(&self, slot: u32) -> Option<&MockStation> {
        self.pool.get(slot as usize)?.as_ref()
    }
}

// ── MockWorld ───────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct PartitionEntry {
    partition: MockPartition,
    has_pool: bool,
    hidden: bool,
}

/// In-memory host world.
///
/// Successful refresh calls are appended to a log so tests can assert
/// exactly what the engine asked the host to recompute; individual
/// refresh targets can be made to fail.
#[derive(Clone, Debug)]
pub struct MockWorld {
    partitions: Vec<PartitionEntry>,
    network: Vec<Option<StationHandle>>,
    ready: bool,
    refresh_log: Vec<RefreshTarget>,
    failing: Vec<RefreshTarget>,
}

impl MockWorld {
    pub fn new() -> Self {
        Self {
            partitions: Vec::new(),
            network: Vec::new(),
            ready: true,
            refresh_log: Vec::new(),
            failing: Vec::new(),
        }
    }

    /// Add a partition with an empty station pool for `planet`.
    pub fn add_planet(&mut self, planet: u32) -> PartitionIndex {
        self.partitions.push(PartitionEntry {
            partition: MockPartition::new(PlanetId(planet)),
            has_pool: true,
            hidden: false,
        });
        PartitionIndex(self.partitions.len() as u32 - 1)
    }

    /// Add a partition that reports no station pool (an unvisited planet).
    pub fn add_partition_without_pool(&mut self) -> PartitionIndex {
        let index = self.add_planet(0);
        self.partitions[index.0 as usize].has_pool = false;
        index
    }

    /// Place `station` in the slot matching its id.
    pub fn add_station(&mut self, partition: PartitionIndex, station: MockStation) -> StationHandle {
        let slot = station.id().0;
        self.add_station_at(partition, slot, station)
    }

    /// Place `station` in an explicit slot, which may disagree with its id.
    pub fn add_station_at(&mut self, partition: PartitionIndex, slot: u32, station: MockStation) -> StationHandle {
        let handle = StationHandle::new(partition, slot);
        if station.is_stellar() {
            self.network.push(Some(handle));
        }
        self.partitions[partition.0 as usize].partition.put(slot, station);
        handle
    }

    /// Stop enumerating `partition`. Its stations stay reachable by
    /// handle and through the network pool.
    pub fn hide_partition(&mut self, partition: PartitionIndex) {
        self.partitions[partition.0 as usize].hidden = true;
    }

    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    /// Make every refresh call for `target` fail.
    pub fn fail_refresh(&mut self, target: RefreshTarget) {
        self.failing.push(target);
    }

    /// Successful refresh calls, in call order.
    pub fn refresh_log(&self) -> &[RefreshTarget] {
        &self.refresh_log
    }

    /// Empty the refresh log, keeping its capacity.
    pub fn clear_refresh_log(&mut self) {
        self.refresh_log.clear();
    }

    /// Pre-size the refresh log so recording `additional` refreshes does
    /// not allocate.
    pub fn reserve_refresh_log(&mut self, additional: usize) {
        self.refresh_log.reserve(additional);
    }

    /// Station behind `handle`.
    ///
    /// # Panics
    ///
    /// Panics if the handle does not name a populated slot.
    pub fn station_ref(&self, handle: StationHandle) -> &MockStation {
        self.station(handle).expect("no station behind handle")
    }

    /// Every populated slot, hidden partitions included.
    pub fn stations(&self) -> impl Iterator<Item = (StationHandle, &MockStation)> + '_ {
        self.partitions.iter().enumerate().flat_map(|(p, entry)| {
            entry
                .partition
                .pool
                .iter()
                .enumerate()
                .filter_map(move |(slot, s)| {
                    s.as_ref()
                        .map(|s| (StationHandle::new(PartitionIndex(p as u32), slot as u32), s))
                })
        })
    }

    /// Units of `item` in storage across the whole world.
    pub fn total_item(&self, item: ItemId) -> u64 {
        self.stations().map(|(_, s)| s.item_count(item)).sum()
    }

    /// Sum of every station's live resource count.
    pub fn total_resource(&self) -> u64 {
        self.stations().map(|(_, s)| u64::from(s.resource_count())).sum()
    }

    fn refresh(&mut self, target: RefreshTarget, known: bool) -> Result<(), RefreshError> {
        if self.failing.contains(&target) {
            return Err(RefreshError::Failed {
                target,
                reason: "injected failure".to_string(),
            });
        }
        if !known {
            return Err(RefreshError::Missing { target });
        }
        self.refresh_log.push(target);
        Ok(())
    }

    fn has_planet(&self, planet: PlanetId) -> bool {
        self.partitions
            .iter()
            .any(|e| e.has_pool && e.partition.planet == planet)
    }
}

impl Default for MockWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl World for MockWorld {
    type Station = MockStation;
    type Partition = MockPartition;

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn partition_count(&self) -> usize {
        self.partitions.len()
    }

    fn partition(&self, index: PartitionIndex) -> Option<&MockPartition> {
        let entry = self.partitions.get(index.0 as usize)?;
        (entry.has_pool && !entry.hidden).then_some(&entry.partition)
    }

    fn station(&self, handle: StationHandle) -> Option<&MockStation> {
        let entry = self.partitions.get(handle.partition().0 as usize)?;
        entry.partition.station(handle.slot())
    }

    fn station_mut(&mut self, handle: StationHandle) -> Option<&mut MockStation> {
        let entry = self.partitions.get_mut(handle.partition().0 as usize)?;
        entry.partition.pool.get_mut(handle.slot() as usize)?.as_mut()
    }

    fn network_pool_len(&self) -> usize {
        self.network.len()
    }

    fn network_station(&self, index: usize) -> Option<StationHandle> {
        self.network.get(index).copied().flatten()
    }

    fn refresh_station_traffic(&mut self, planet: PlanetId) -> Result<(), RefreshError> {
        let known = self.has_planet(planet);
        self.refresh(RefreshTarget::StationTraffic(planet), known)
    }

    fn refresh_dispenser_traffic(&mut self, planet: PlanetId) -> Result<(), RefreshError> {
        let known = self.has_planet(planet);
        self.refresh(RefreshTarget::DispenserTraffic(planet), known)
    }

    fn refresh_network_traffic(&mut self, gid: Gid) -> Result<(), RefreshError> {
        self.refresh(RefreshTarget::NetworkTraffic(gid), true)
    }
}
