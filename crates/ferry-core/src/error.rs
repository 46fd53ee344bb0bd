//! Error types for host faults surfaced to the engine.
//!
//! The engine never fails a cycle because of these: every refresh call
//! is isolated, logged and counted, and the remaining refreshes proceed.

use std::error::Error;
use std::fmt;

use crate::id::{Gid, PlanetId};

/// Which host refresh operation failed, and for what.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshTarget {
    /// Same-planet station traffic for a planet.
    StationTraffic(PlanetId),
    /// Dispenser (courier) traffic for a planet.
    DispenserTraffic(PlanetId),
    /// Network traffic for one station gid.
    NetworkTraffic(Gid),
}

impl fmt::Display for RefreshTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StationTraffic(planet) => write!(f, "station traffic on planet {planet}"),
            Self::DispenserTraffic(planet) => write!(f, "dispenser traffic on planet {planet}"),
            Self::NetworkTraffic(gid) => write!(f, "network traffic for gid {gid}"),
        }
    }
}

/// Errors returned by the host's traffic-refresh operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RefreshError {
    /// The refresh target no longer exists (planet unloaded, gid freed).
    Missing {
        /// The operation that could not find its target.
        target: RefreshTarget,
    },
    /// The host raised a fault while refreshing.
    Failed {
        /// The operation that faulted.
        target: RefreshTarget,
        /// Human-readable description of the fault.
        reason: String,
    },
}

impl RefreshError {
    /// The operation this error belongs to.
    pub fn target(&self) -> RefreshTarget {
        match self {
            Self::Missing { target } | Self::Failed { target, .. } => *target,
        }
    }
}

impl fmt::Display for RefreshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { target } => write!(f, "refresh target missing: {target}"),
            Self::Failed { target, reason } => write!(f, "refresh of {target} failed: {reason}"),
        }
    }
}

impl Error for RefreshError {}
