//! The distribution engine: one cycle of snapshot, plan, execute, refresh.
//!
//! [`DistributionEngine`] is constructed once by the host and passed
//! every cycle. Between cycles it keeps only the supplier rotation
//! cursor and the capacity of its scratch buffers.
//!
//! # No rollback
//!
//! A cycle mutates many stations without a transaction. If the host
//! misbehaves partway through, the allocation is left partial; receivers
//! that were not served are still below target and stay eligible next
//! cycle.

use std::fmt;
use std::time::Instant;

use ferry_core::World;
use tracing::debug;

use crate::config::DistributionConfig;
use crate::execute::serve_suppliers;
use crate::metrics::CycleMetrics;
use crate::plan::{apply_fair_share, build_targets_and_caps, sort_receivers_by_deficit, total_supply};
use crate::refresh::post_refresh;
use crate::snapshot::snapshot_stations;
use crate::working_set::{WorkingSet, DEFAULT_PLANET_CAPACITY, DEFAULT_STATION_CAPACITY};

// ── CycleOutcome ─────────────────────────────────────────────────

/// Why a cycle did no work.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The kill-switch is set.
    Disabled,
    /// The tick interval has not elapsed yet.
    NotDue,
    /// The world, or its data, is not available.
    Unavailable,
    /// No station needs the resource.
    NoReceivers,
    /// No station has the resource to give.
    NoSuppliers,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => write!(f, "distribution disabled"),
            Self::NotDue => write!(f, "cycle not due"),
            Self::Unavailable => write!(f, "world unavailable"),
            Self::NoReceivers => write!(f, "no receivers"),
            Self::NoSuppliers => write!(f, "no suppliers"),
        }
    }
}

/// Result of one [`DistributionEngine::run_cycle()`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Nothing was planned, moved or refreshed.
    Skipped(SkipReason),
    /// All four phases ran.
    Completed(CycleMetrics),
}

impl CycleOutcome {
    /// Metrics of a completed cycle.
    pub fn metrics(&self) -> Option<&CycleMetrics> {
        match self {
            Self::Completed(m) => Some(m),
            Self::Skipped(_) => None,
        }
    }

    /// Why the cycle was skipped, if it was.
    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Self::Skipped(reason) => Some(*reason),
            Self::Completed(_) => None,
        }
    }
}

// ── DistributionEngine ───────────────────────────────────────────

/// Fair, rotation-balanced resource distribution across a host world.
#[derive(Debug)]
pub struct DistributionEngine {
    set: WorkingSet,
    rotation_start_supplier: usize,
}

impl DistributionEngine {
    /// Create an engine with buffers sized for a typical world.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_STATION_CAPACITY, DEFAULT_PLANET_CAPACITY)
    }

    /// Create an engine with buffers sized for `stations` stations
    /// across `planets` planets, so the first cycles do not grow them.
    pub fn with_capacity(stations: usize, planets: usize) -> Self {
        Self {
            set: WorkingSet::with_capacity(stations, planets),
            rotation_start_supplier: 0,
        }
    }

    /// Index of the supplier served first next cycle.
    pub fn rotation_start(&self) -> usize {
        self.rotation_start_supplier
    }

    /// The working set as the last cycle left it.
    pub fn working_set(&self) -> &WorkingSet {
        &self.set
    }

    /// Run one full cycle against `world`.
    ///
    /// `config` is clamped into range before use. Returns
    /// [`CycleOutcome::Skipped`] without touching the world when it is
    /// not ready or when the snapshot finds no receivers or no
    /// suppliers.
    pub fn run_cycle<W: World>(&mut self, world: &mut W, config: &DistributionConfig) -> CycleOutcome {
        if !world.is_ready() {
            return CycleOutcome::Skipped(SkipReason::Unavailable);
        }
        let started = Instant::now();
        let params = config.resolve();

        // 1. Snapshot.
        snapshot_stations(world, &params, &mut self.set);
        if self.set.receivers.is_empty() {
            return CycleOutcome::Skipped(SkipReason::NoReceivers);
        }
        if self.set.suppliers.is_empty() {
            return CycleOutcome::Skipped(SkipReason::NoSuppliers);
        }

        // 2. Plan.
        sort_receivers_by_deficit(&mut self.set, params.target_level);
        let total_demand = build_targets_and_caps(&mut self.set, params.target_level, params.per_cycle_cap);
        let total_supply = total_supply(world, &self.set, &params);
        let fair_share_applied = params.fair_share && total_demand > 0 && total_supply > 0;
        let planned_units = if fair_share_applied {
            apply_fair_share(&mut self.set, total_demand, total_supply)
        } else {
            total_demand
        };

        let mut metrics = CycleMetrics {
            suppliers: self.set.suppliers.len(),
            receivers: self.set.receivers.len(),
            total_demand,
            total_supply,
            fair_share_applied,
            planned_units,
            ..CycleMetrics::default()
        };

        // 3. Execute.
        serve_suppliers(
            world,
            &mut self.set,
            &mut self.rotation_start_supplier,
            &params,
            &mut metrics,
        );

        // 4. Refresh.
        post_refresh(world, &self.set, &mut metrics);

        metrics.elapsed_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        debug!(
            suppliers = metrics.suppliers,
            receivers = metrics.receivers,
            total_demand,
            total_supply,
            fair_share_applied,
            transfers = metrics.transfers,
            delivered = metrics.units_delivered,
            cost = metrics.cost_paid,
            refresh_failures = metrics.refresh_failures,
            "distribution cycle complete"
        );
        CycleOutcome::Completed(metrics)
    }
}

impl Default for DistributionEngine {
    fn default() -> Self {
        Self::new()
    }
}
