//! Engine configuration, bounds, and resolution into per-cycle parameters.
//!
//! [`FerryConfig`] is the read-only snapshot a host hands to every cycle.
//! Integer settings are stored signed, exactly as a user may have typed
//! them into a settings file, and [`DistributionConfig::resolve()`] clamps
//! each one into its documented range. An out-of-range stored value can
//! therefore never fail or crash a cycle.

use std::ops::RangeInclusive;

use ferry_core::ItemId;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Valid range for [`DistributionConfig::target_level`].
pub const TARGET_LEVEL_RANGE: RangeInclusive<i32> = 1..=50;
/// Valid range for [`DistributionConfig::max_per_cycle_per_receiver`].
pub const PER_CYCLE_CAP_RANGE: RangeInclusive<i32> = 0..=50;
/// Valid range for [`DistributionConfig::supplier_reserve`].
pub const SUPPLIER_RESERVE_RANGE: RangeInclusive<i32> = 0..=50;
/// Valid range for both transport cost settings.
pub const TRANSPORT_COST_RANGE: RangeInclusive<i32> = 0..=10;
/// Valid range for [`CadenceConfig::tick_interval`].
pub const TICK_INTERVAL_RANGE: RangeInclusive<i32> = 1..=275;

// ── DistributionConfig ─────────────────────────────────────────────

/// Tunables for the allocation engine.
///
/// Deserializes with every missing key falling back to its default.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistributionConfig {
    /// Item distributed between stations. Default: the space warper.
    pub item: ItemId,
    /// Units each receiver should hold. Default: 50. Range: 1–50.
    pub target_level: i32,
    /// Most units one receiver may get per cycle, 0 for no limit.
    /// Default: 10. Range: 0–50.
    pub max_per_cycle_per_receiver: i32,
    /// Units every supplier keeps back. Default: 0. Range: 0–50.
    pub supplier_reserve: i32,
    /// Scale receiver targets to their share of total supply. Default: true.
    pub fair_share: bool,
    /// Allow cross-planet supply. Default: false.
    pub remote_mode: bool,
    /// Charge transport cost on every move. Default: true.
    pub transport_cost: bool,
    /// Units consumed per same-planet move. Default: 1. Range: 0–10.
    pub local_cost: i32,
    /// Units consumed per cross-planet move. Default: 2. Range: 0–10.
    pub remote_cost: i32,
    /// Only fill stations whose host-side "required" toggle is on.
    /// Default: true.
    pub respect_required_toggle: bool,
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            item: ItemId::WARPER,
            target_level: 50,
            max_per_cycle_per_receiver: 10,
            supplier_reserve: 0,
            fair_share: true,
            remote_mode: false,
            transport_cost: true,
            local_cost: 1,
            remote_cost: 2,
            respect_required_toggle: true,
        }
    }
}

impl DistributionConfig {
    /// Clamp every setting into range and fold the cost and cap
    /// switches into the values the engine uses directly.
    pub fn resolve(&self) -> CycleParams {
        let target_level = clamp_setting("target_level", self.target_level, TARGET_LEVEL_RANGE);
        let cap = clamp_setting(
            "max_per_cycle_per_receiver",
            self.max_per_cycle_per_receiver,
            PER_CYCLE_CAP_RANGE,
        );
        let reserve = clamp_setting("supplier_reserve", self.supplier_reserve, SUPPLIER_RESERVE_RANGE);
        let local_cost = clamp_setting("local_cost", self.local_cost, TRANSPORT_COST_RANGE);
        let remote_cost = clamp_setting("remote_cost", self.remote_cost, TRANSPORT_COST_RANGE);

        CycleParams {
            item: self.item,
            target_level,
            per_cycle_cap: if cap == 0 { u32::MAX } else { cap },
            supplier_reserve: reserve,
            fair_share: self.fair_share,
            remote_mode: self.remote_mode,
            local_cost: if self.transport_cost { local_cost } else { 0 },
            remote_cost: if self.transport_cost { remote_cost } else { 0 },
            respect_required_toggle: self.respect_required_toggle,
        }
    }
}

// ── CycleParams ────────────────────────────────────────────────────

/// In-range, unsigned parameters for one cycle.
///
/// Produced by [`DistributionConfig::resolve()`]; never constructed from
/// raw user input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleParams {
    /// Item distributed between stations.
    pub item: ItemId,
    /// Units each receiver should hold, in `1..=50`.
    pub target_level: u32,
    /// Per-receiver delivery budget; `u32::MAX` when unlimited.
    pub per_cycle_cap: u32,
    /// Units every supplier keeps back.
    pub supplier_reserve: u32,
    /// Whether fair-share rescaling is on.
    pub fair_share: bool,
    /// Whether cross-planet supply is on.
    pub remote_mode: bool,
    /// Cost per local move, already zeroed when cost is disabled.
    pub local_cost: u32,
    /// Cost per remote move, already zeroed when cost is disabled.
    pub remote_cost: u32,
    /// Whether only "required"-flagged stations may receive.
    pub respect_required_toggle: bool,
}

// ── CadenceConfig ──────────────────────────────────────────────────

/// When the [`CycleDriver`](crate::driver::CycleDriver) runs a cycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CadenceConfig {
    /// Host ticks between cycles. Default: 60. Range: 1–275.
    pub tick_interval: i32,
    /// Kill-switch: while set, ticks are ignored entirely. Default: false.
    pub disabled: bool,
    /// Set while the host is being removed from a save. Suppresses
    /// cycles exactly like `disabled`. Default: false.
    pub uninstall: bool,
}

impl Default for CadenceConfig {
    fn default() -> Self {
        Self {
            tick_interval: 60,
            disabled: false,
            uninstall: false,
        }
    }
}

impl CadenceConfig {
    /// The tick interval clamped into `1..=275`.
    pub fn resolved_tick_interval(&self) -> u64 {
        u64::from(clamp_setting("tick_interval", self.tick_interval, TICK_INTERVAL_RANGE))
    }

    /// True while either the kill-switch or the uninstall flag is set.
    pub fn is_suppressed(&self) -> bool {
        self.disabled || self.uninstall
    }
}

// ── FerryConfig ────────────────────────────────────────────────────

/// Complete host-facing configuration, grouped the way it is stored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FerryConfig {
    /// Scheduling and kill-switch.
    pub cadence: CadenceConfig,
    /// Engine tunables.
    pub distribution: DistributionConfig,
}

fn clamp_setting(name: &'static str, value: i32, range: RangeInclusive<i32>) -> u32 {
    let clamped = value.clamp(*range.start(), *range.end());
    if clamped != value {
        debug!(setting = name, value, clamped, "configuration value out of range");
    }
    // Every range starts at 0 or above.
    u32::try_from(clamped).unwrap_or(0)
}
