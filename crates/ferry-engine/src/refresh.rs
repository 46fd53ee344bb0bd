//! Refresh phase: demand recomputation and deduplicated traffic refresh.

use ferry_core::{RefreshError, Station, World};
use tracing::warn;

use crate::metrics::CycleMetrics;
use crate::working_set::WorkingSet;

/// Notify the host of everything this cycle touched.
///
/// Every snapshotted receiver recomputes its needs, served or not. Each
/// distinct affected planet gets one station-traffic and one
/// dispenser-traffic refresh, and each distinct gid one network
/// refresh. A failing call is logged and counted; the rest still run.
pub(crate) fn post_refresh<W: World>(world: &mut W, set: &WorkingSet, metrics: &mut CycleMetrics) {
    for receiver in &set.receivers {
        if let Some(station) = world.station_mut(receiver.handle) {
            station.update_needs();
        }
    }

    for &planet in &set.affected_planets {
        record(world.refresh_station_traffic(planet), metrics);
        record(world.refresh_dispenser_traffic(planet), metrics);
    }
    for &gid in &set.affected_gids {
        record(world.refresh_network_traffic(gid), metrics);
    }

    metrics.affected_planets = set.affected_planets.len();
    metrics.affected_gids = set.affected_gids.len();
}

fn record(result: Result<(), RefreshError>, metrics: &mut CycleMetrics) {
    if let Err(err) = result {
        warn!(target_kind = %err.target(), %err, "traffic refresh failed");
        metrics.refresh_failures += 1;
    }
}
