//! Host-world abstraction traits.
//!
//! The engine owns none of the stations it moves resources between. It
//! reaches them through these traits, which a host implements over its
//! own entity storage. Every method is a narrow accessor: the engine
//! reads ids and storage, adjusts live quantities, requests storage
//! removal, and asks the host to recompute derived state.

use crate::error::RefreshError;
use crate::id::{Gid, ItemId, PartitionIndex, PlanetId, StationHandle, StationId};
use crate::storage::StorageSlot;

/// A station that can hold, supply and demand the distributed resource.
pub trait Station {
    /// Stable id; equals the station's pool slot while the slot is live.
    fn id(&self) -> StationId;

    /// Planet the station is built on.
    fn planet_id(&self) -> PlanetId;

    /// Network id used for network-wide traffic refresh.
    fn gid(&self) -> Gid;

    /// Collectors harvest rather than trade and are never transferable.
    fn is_collector(&self) -> bool;

    /// Whether the station participates in cross-planet logistics.
    fn is_stellar(&self) -> bool;

    /// Units of the resource held for the station's own use.
    fn resource_count(&self) -> u32;

    /// Overwrite the live resource quantity.
    fn set_resource_count(&mut self, count: u32);

    /// Host-side demand flag ("resource required" toggle).
    fn requires_resource(&self) -> bool;

    /// Ordered storage ledger.
    fn storage(&self) -> &[StorageSlot];

    /// Remove up to `count` units of `item` from storage.
    ///
    /// Returns the number of units actually removed, which may be less
    /// than requested.
    fn take_item(&mut self, item: ItemId, count: u32) -> u32;

    /// Recompute the station's derived demand state.
    fn update_needs(&mut self);
}

/// One world partition's station pool.
///
/// Slots run from `1` up to (but excluding) [`station_cursor`](Self::station_cursor);
/// slot 0 is never populated.
pub trait Partition {
    /// Station type held in this pool.
    type Station: Station;

    /// Planet this partition belongs to.
    fn planet_id(&self) -> PlanetId;

    /// One past the highest slot that has ever been populated.
    fn station_cursor(&self) -> u32;

    /// Station at `slot`, or `None` for an empty slot.
    fn station(&self, slot: u32) -> Option<&Self::Station>;
}

/// The host world a distribution cycle runs against.
pub trait World {
    /// Station type shared by all partitions.
    type Station: Station;

    /// Partition type exposing station pools.
    type Partition: Partition<Station = Self::Station>;

    /// Whether the world's data is loaded and safe to read.
    ///
    /// Cycles against a world that is not ready do nothing.
    fn is_ready(&self) -> bool;

    /// Number of partitions, including ones without a station pool.
    fn partition_count(&self) -> usize;

    /// Partition at `index`, or `None` if it has no station pool.
    fn partition(&self, index: PartitionIndex) -> Option<&Self::Partition>;

    /// Resolve a handle to a station.
    fn station(&self, handle: StationHandle) -> Option<&Self::Station> {
        self.partition(handle.partition())?.station(handle.slot())
    }

    /// Resolve a handle to a mutable station.
    fn station_mut(&mut self, handle: StationHandle) -> Option<&mut Self::Station>;

    /// Length of the network-wide station pool.
    fn network_pool_len(&self) -> usize;

    /// Canonical handle of the station at `index` in the network-wide
    /// pool, or `None` for an empty entry.
    ///
    /// Must return the same handle the station has in its partition
    /// pool, so that handle equality is station identity.
    fn network_station(&self, index: usize) -> Option<StationHandle>;

    /// Refresh same-planet station traffic on `planet`.
    fn refresh_station_traffic(&mut self, planet: PlanetId) -> Result<(), RefreshError>;

    /// Refresh dispenser (courier) traffic on `planet`.
    fn refresh_dispenser_traffic(&mut self, planet: PlanetId) -> Result<(), RefreshError>;

    /// Refresh network traffic involving the station with `gid`.
    fn refresh_network_traffic(&mut self, gid: Gid) -> Result<(), RefreshError>;
}
