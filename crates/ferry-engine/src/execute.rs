//! Execution phase: supplier rotation and the transfer loops.
//!
//! Each supplier serves same-planet receivers first and, when remote
//! supply is enabled, other planets with whatever remains. Every move
//! removes `give + cost` units from the supplier's storage and credits
//! `give` to the receiver, so transport cost is always paid by the
//! supplier and never comes out of a receiver's allocation.

use ferry_core::storage::supply_stock;
use ferry_core::{PlanetId, Station, StationHandle, World};
use tracing::{trace, warn};

use crate::config::CycleParams;
use crate::metrics::CycleMetrics;
use crate::working_set::WorkingSet;

/// Which side of the planet boundary a pass serves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pass {
    Local,
    Remote,
}

#[derive(Clone, Copy, Debug)]
struct SupplierRef {
    handle: StationHandle,
    planet: PlanetId,
}

/// Serve every supplier once, starting at the rotation cursor.
///
/// The cursor advances by one afterwards regardless of how many moves
/// happened, and is reset first if the supplier list shrank under it.
pub(crate) fn serve_suppliers<W: World>(
    world: &mut W,
    set: &mut WorkingSet,
    rotation: &mut usize,
    params: &CycleParams,
    metrics: &mut CycleMetrics,
) {
    let count = set.suppliers.len();
    if count == 0 {
        return;
    }
    if *rotation >= count {
        *rotation = 0;
    }
    for n in 0..count {
        let handle = set.suppliers[(*rotation + n) % count];
        serve_from_supplier(world, set, handle, params, metrics);
    }
    *rotation = (*rotation + 1) % count;
}

fn serve_from_supplier<W: World>(
    world: &mut W,
    set: &mut WorkingSet,
    handle: StationHandle,
    params: &CycleParams,
    metrics: &mut CycleMetrics,
) {
    let Some(station) = world.station(handle) else {
        return;
    };
    let supplier = SupplierRef {
        handle,
        planet: station.planet_id(),
    };
    let stock = supply_stock(station.storage(), params.item, params.remote_mode);
    let available = stock.saturating_sub(u64::from(params.supplier_reserve));
    if available == 0 {
        return;
    }

    let available = serve_pass(world, set, supplier, available, Pass::Local, params, metrics);
    if available > 0 && params.remote_mode {
        serve_pass(world, set, supplier, available, Pass::Remote, params, metrics);
    }
}

/// Move units from one supplier to the receivers on one side of the
/// planet boundary. Returns the supplier's remaining availability.
fn serve_pass<W: World>(
    world: &mut W,
    set: &mut WorkingSet,
    supplier: SupplierRef,
    mut available: u64,
    pass: Pass,
    params: &CycleParams,
    metrics: &mut CycleMetrics,
) -> u64 {
    let cost = match pass {
        Pass::Local => params.local_cost,
        Pass::Remote => params.remote_cost,
    };

    for i in 0..set.receivers.len() {
        if available == 0 {
            break;
        }
        let receiver = set.receivers[i];
        let same_planet = receiver.planet == supplier.planet;
        if same_planet != (pass == Pass::Local) {
            continue;
        }
        let Some(live) = world.station(receiver.handle).map(Station::resource_count) else {
            continue;
        };

        let mut target_left = set.receiver_targets[i];
        if target_left == 0 {
            // Overflow: the plan allots nothing more, but a real deficit
            // against the absolute target may remain.
            target_left = params.target_level.saturating_sub(live);
            if target_left == 0 {
                continue;
            }
        }

        let cap_left = set.receiver_caps[i];
        if cap_left == 0 {
            continue;
        }

        // Not even one unit plus its transport cost fits.
        if available <= u64::from(cost) {
            break;
        }
        let room = available - u64::from(cost);
        let give = target_left.min(cap_left);
        let give = u32::try_from(room).map_or(give, |room| give.min(room));
        if give == 0 {
            continue;
        }

        let requested = give.saturating_add(cost);
        let removed = world
            .station_mut(supplier.handle)
            .map_or(0, |s| s.take_item(params.item, requested))
            .min(requested);
        let delivered = if removed == requested {
            give
        } else {
            removed.saturating_sub(cost).min(give)
        };

        if delivered > 0 {
            if let Some(station) = world.station_mut(receiver.handle) {
                station.set_resource_count(live.saturating_add(delivered));
            }
            set.mark_affected(receiver.planet, receiver.gid);
            metrics.transfers += 1;
        }
        set.receiver_targets[i] = set.receiver_targets[i].saturating_sub(delivered);
        set.receiver_caps[i] = cap_left.saturating_sub(delivered);
        metrics.units_delivered += u64::from(delivered);
        metrics.cost_paid += u64::from(removed - delivered);

        trace!(
            supplier = %supplier.handle,
            receiver = %receiver.handle,
            delivered,
            cost,
            ?pass,
            "transfer"
        );

        if removed < requested {
            warn!(
                supplier = %supplier.handle,
                requested,
                removed,
                "supplier storage returned fewer units than verified; skipping rest of supplier"
            );
            metrics.short_removals += 1;
            return 0;
        }
        available -= u64::from(requested);
    }

    available
}
