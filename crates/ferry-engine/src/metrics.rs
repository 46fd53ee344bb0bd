//! Per-cycle counters for the distribution engine.
//!
//! [`CycleMetrics`] is a plain `Copy` struct so that filling it in costs
//! nothing on the hot path; hosts forward it to whatever telemetry they
//! run.

/// Counters collected during a single completed cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CycleMetrics {
    /// Suppliers found by the snapshot.
    pub suppliers: usize,
    /// Receivers found by the snapshot.
    pub receivers: usize,
    /// Sum of receiver deficits against the target level.
    pub total_demand: u64,
    /// Sum of supplier stock above reserve.
    pub total_supply: u64,
    /// Whether fair-share rescaling ran this cycle.
    pub fair_share_applied: bool,
    /// Sum of receiver targets after planning.
    pub planned_units: u64,
    /// Successful moves between a supplier and a receiver.
    pub transfers: u32,
    /// Units credited to receivers.
    pub units_delivered: u64,
    /// Units consumed as transport cost.
    pub cost_paid: u64,
    /// Moves where the host removed fewer units than requested.
    pub short_removals: u32,
    /// Distinct planets refreshed.
    pub affected_planets: usize,
    /// Distinct gids refreshed.
    pub affected_gids: usize,
    /// Host refresh calls that failed and were skipped.
    pub refresh_failures: u32,
    /// Wall-clock time for the entire cycle, in microseconds.
    pub elapsed_us: u64,
}

impl CycleMetrics {
    /// Units that left supplier storage, delivered or spent.
    pub fn units_removed(&self) -> u64 {
        self.units_delivered + self.cost_paid
    }
}
