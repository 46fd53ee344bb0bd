//! Pre-allocated per-cycle working set.
//!
//! The engine builds its supplier and receiver lists, the aligned
//! target/cap columns and the affected-partition sets into buffers that
//! are cleared, never dropped, between cycles. Once the buffers have
//! grown to the world's size a cycle performs no heap allocation.

use ferry_core::{Gid, PlanetId, StationHandle, StationId};
use indexmap::IndexSet;

/// Default station capacity for each buffer.
pub const DEFAULT_STATION_CAPACITY: usize = 256;
/// Default planet capacity for the affected-planet set.
pub const DEFAULT_PLANET_CAPACITY: usize = 64;

/// A station queued to receive this cycle.
///
/// Everything except the live quantity is immutable for the duration of
/// a cycle, so it is read once during the snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReceiverEntry {
    /// Handle used to reach the station.
    pub handle: StationHandle,
    /// Station id, the ordering tiebreaker.
    pub id: StationId,
    /// Planet the station is on.
    pub planet: PlanetId,
    /// Network id, recorded for refresh when the station is served.
    pub gid: Gid,
    /// Resource quantity observed at snapshot time.
    pub count: u32,
}

impl ReceiverEntry {
    /// Shortfall against `target_level` as of the snapshot.
    pub fn deficit(&self, target_level: u32) -> u32 {
        target_level.saturating_sub(self.count)
    }
}

/// Scratch buffers reused across cycles.
///
/// `receiver_targets[i]` and `receiver_caps[i]` always describe
/// `receivers[i]`; the three columns are rebuilt together.
#[derive(Debug)]
pub struct WorkingSet {
    pub(crate) suppliers: Vec<StationHandle>,
    pub(crate) receivers: Vec<ReceiverEntry>,
    pub(crate) receiver_targets: Vec<u32>,
    pub(crate) receiver_caps: Vec<u32>,
    pub(crate) affected_planets: IndexSet<PlanetId>,
    pub(crate) affected_gids: IndexSet<Gid>,
}

impl WorkingSet {
    /// Create a working set sized for `stations` stations across
    /// `planets` planets.
    pub fn with_capacity(stations: usize, planets: usize) -> Self {
        Self {
            suppliers: Vec::with_capacity(stations),
            receivers: Vec::with_capacity(stations),
            receiver_targets: Vec::with_capacity(stations),
            receiver_caps: Vec::with_capacity(stations),
            affected_planets: IndexSet::with_capacity(planets),
            affected_gids: IndexSet::with_capacity(stations),
        }
    }

    /// Empty every buffer, keeping capacity. Called at cycle start.
    pub fn clear(&mut self) {
        self.suppliers.clear();
        self.receivers.clear();
        self.receiver_targets.clear();
        self.receiver_caps.clear();
        self.affected_planets.clear();
        self.affected_gids.clear();
    }

    /// Record a served receiver's planet and gid for refresh.
    pub(crate) fn mark_affected(&mut self, planet: PlanetId, gid: Gid) {
        self.affected_planets.insert(planet);
        self.affected_gids.insert(gid);
    }

    /// Suppliers in snapshot order.
    pub fn suppliers(&self) -> &[StationHandle] {
        &self.suppliers
    }

    /// Receivers in planned (descending deficit) order.
    pub fn receivers(&self) -> &[ReceiverEntry] {
        &self.receivers
    }

    /// Remaining per-receiver targets, aligned with [`receivers()`](Self::receivers).
    pub fn receiver_targets(&self) -> &[u32] {
        &self.receiver_targets
    }

    /// Remaining per-receiver caps, aligned with [`receivers()`](Self::receivers).
    pub fn receiver_caps(&self) -> &[u32] {
        &self.receiver_caps
    }

    /// Distinct planets touched this cycle, in first-touch order.
    pub fn affected_planets(&self) -> impl ExactSizeIterator<Item = PlanetId> + '_ {
        self.affected_planets.iter().copied()
    }

    /// Distinct gids touched this cycle, in first-touch order.
    pub fn affected_gids(&self) -> impl ExactSizeIterator<Item = Gid> + '_ {
        self.affected_gids.iter().copied()
    }

    /// Smallest station capacity across the station buffers.
    pub fn station_capacity(&self) -> usize {
        self.suppliers
            .capacity()
            .min(self.receivers.capacity())
            .min(self.receiver_targets.capacity())
            .min(self.receiver_caps.capacity())
    }
}

impl Default for WorkingSet {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_STATION_CAPACITY, DEFAULT_PLANET_CAPACITY)
    }
}
