//! Station storage slots and the supply queries the engine runs over them.

use crate::id::ItemId;

/// Logistic behaviour configured on one side (local or remote) of a slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LogisticMode {
    /// The slot neither offers nor requests its item.
    #[default]
    None,
    /// The slot offers its item to other stations.
    Supply,
    /// The slot requests its item from other stations.
    Demand,
}

/// One entry of a station's ordered storage ledger.
///
/// Local and remote logic are independent: a slot may supply on the
/// planet while demanding across the network, or any other combination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StorageSlot {
    /// Item held by this slot.
    pub item: ItemId,
    /// Units currently held.
    pub count: u32,
    /// Same-planet logistic behaviour.
    pub local_logic: LogisticMode,
    /// Cross-planet logistic behaviour.
    pub remote_logic: LogisticMode,
}

impl StorageSlot {
    /// Create a slot with the given logic on each side.
    pub fn new(item: ItemId, count: u32, local_logic: LogisticMode, remote_logic: LogisticMode) -> Self {
        Self {
            item,
            count,
            local_logic,
            remote_logic,
        }
    }

    /// Whether this slot offers `item` under the current remote policy.
    ///
    /// Remote-supply only counts when `remote_enabled` is set.
    pub fn supplies(&self, item: ItemId, remote_enabled: bool) -> bool {
        self.item == item
            && (self.local_logic == LogisticMode::Supply
                || (remote_enabled && self.remote_logic == LogisticMode::Supply))
    }
}

/// Whether any slot for `item` has the requested supply flag set.
///
/// Flags only: the slot count is not inspected.
pub fn has_supply_slot(slots: &[StorageSlot], item: ItemId, check_local: bool, check_remote: bool) -> bool {
    slots.iter().filter(|s| s.item == item).any(|s| {
        (check_local && s.local_logic == LogisticMode::Supply)
            || (check_remote && s.remote_logic == LogisticMode::Supply)
    })
}

/// Sum of units held in slots that supply `item`.
///
/// This is the stock a supplier can draw on before its reserve is
/// applied. Widened to `u64` so a station with several full slots can
/// never overflow.
pub fn supply_stock(slots: &[StorageSlot], item: ItemId, remote_enabled: bool) -> u64 {
    slots
        .iter()
        .filter(|s| s.supplies(item, remote_enabled))
        .map(|s| u64::from(s.count))
        .sum()
}
