//! Planning phase: receiver ordering, targets, caps and fair share.

use std::cmp::Ordering;

use ferry_core::storage::supply_stock;
use ferry_core::{Station, World};

use crate::config::CycleParams;
use crate::working_set::{ReceiverEntry, WorkingSet};

/// Order receivers by descending deficit.
///
/// Ties fall back to ascending station id, then planet, then handle, so
/// the comparison is a total order over distinct stations and the
/// in-place unstable sort is reproducible without allocating.
pub(crate) fn sort_receivers_by_deficit(set: &mut WorkingSet, target_level: u32) {
    set.receivers
        .sort_unstable_by(|a, b| compare_receivers(a, b, target_level));
}

fn compare_receivers(a: &ReceiverEntry, b: &ReceiverEntry, target_level: u32) -> Ordering {
    b.deficit(target_level)
        .cmp(&a.deficit(target_level))
        .then_with(|| a.id.cmp(&b.id))
        .then_with(|| a.planet.cmp(&b.planet))
        .then_with(|| a.handle.cmp(&b.handle))
}

/// Rebuild the target and cap columns and return total demand.
pub(crate) fn build_targets_and_caps(set: &mut WorkingSet, target_level: u32, per_cycle_cap: u32) -> u64 {
    set.receiver_targets.clear();
    set.receiver_caps.clear();
    let mut total_demand = 0u64;
    for receiver in &set.receivers {
        let deficit = receiver.deficit(target_level);
        set.receiver_targets.push(deficit);
        set.receiver_caps.push(per_cycle_cap);
        total_demand += u64::from(deficit);
    }
    total_demand
}

/// Sum of every supplier's stock above its reserve.
pub(crate) fn total_supply<W: World>(world: &W, set: &WorkingSet, params: &CycleParams) -> u64 {
    let reserve = u64::from(params.supplier_reserve);
    set.suppliers
        .iter()
        .filter_map(|&handle| world.station(handle))
        .map(|station| supply_stock(station.storage(), params.item, params.remote_mode).saturating_sub(reserve))
        .sum()
}

/// Rescale every target to `min(deficit, floor(supply * deficit / demand))`.
///
/// Truncation guarantees the rescaled targets sum to at most
/// `total_supply`. Returns that sum.
pub(crate) fn apply_fair_share(set: &mut WorkingSet, total_demand: u64, total_supply: u64) -> u64 {
    if total_demand == 0 {
        return 0;
    }
    let mut planned = 0u64;
    for target in &mut set.receiver_targets {
        let deficit = *target;
        let share = u128::from(total_supply) * u128::from(deficit) / u128::from(total_demand);
        // share <= deficit whenever supply <= demand, so the min fits u32.
        let capped = share.min(u128::from(deficit));
        *target = u32::try_from(capped).unwrap_or(deficit);
        planned += u64::from(*target);
    }
    planned
}
