//! Strongly-typed identifiers and the [`StationHandle`] type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Host-assigned station id, unique within one partition.
///
/// The host stores each station at the pool slot equal to its id; a
/// mismatch marks a stale slot. Used as the sort tiebreaker when two
/// receivers have the same deficit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(pub u32);

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for StationId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a world partition (a planet).
///
/// Transfers between stations with the same `PlanetId` are local; all
/// others are remote.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlanetId(pub u32);

impl fmt::Display for PlanetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PlanetId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Global transport-network id of a station.
///
/// Zero means the station is not registered with the network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Gid(pub u32);

impl fmt::Display for Gid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Gid {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies an item type held in station storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u32);

impl ItemId {
    /// The space warper item.
    pub const WARPER: ItemId = ItemId(1210);
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ItemId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Position of a partition in the host's partition list.
///
/// This is an enumeration index, not an identity: use [`PlanetId`] to
/// talk to the host about a planet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartitionIndex(pub u32);

impl fmt::Display for PartitionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-owning reference to a host station.
///
/// A handle names the pool slot that holds the station. Hosts hand out
/// exactly one canonical handle per live station, so two handles compare
/// equal if and only if they refer to the same station object. The
/// engine uses that equality wherever identity matters (deduplicating the
/// network-wide supplier pass) and never retains a handle past the end
/// of a cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[must_use]
pub struct StationHandle {
    partition: PartitionIndex,
    slot: u32,
}

impl StationHandle {
    /// Create a handle for `slot` within `partition`.
    pub fn new(partition: PartitionIndex, slot: u32) -> Self {
        Self { partition, slot }
    }

    /// The partition whose pool holds the station.
    pub fn partition(&self) -> PartitionIndex {
        self.partition
    }

    /// The pool slot within that partition.
    pub fn slot(&self) -> u32 {
        self.slot
    }
}

impl fmt::Display for StationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationHandle({}:{})", self.partition, self.slot)
    }
}
