//! Ferry: fair, rotation-balanced distribution of a resource between
//! stations owned by a host world.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Ferry sub-crates. For most hosts, adding `ferry` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use ferry::prelude::*;
//! use ferry_test_utils::{MockStation, MockWorld};
//!
//! // One planet, one supplier holding 30 warpers, two empty receivers.
//! let mut world = MockWorld::new();
//! let planet = world.add_planet(1);
//! world.add_station(planet, MockStation::local_supplier(1, 1, 30));
//! let a = world.add_station(planet, MockStation::receiver(2, 1, 0));
//! let b = world.add_station(planet, MockStation::receiver(3, 1, 0));
//!
//! let config = DistributionConfig {
//!     target_level: 10,
//!     max_per_cycle_per_receiver: 0,
//!     transport_cost: false,
//!     ..DistributionConfig::default()
//! };
//! let mut engine = DistributionEngine::new();
//! let outcome = engine.run_cycle(&mut world, &config);
//!
//! assert_eq!(outcome.metrics().map(|m| m.units_delivered), Some(20));
//! assert_eq!(world.station_ref(a).resource_count(), 10);
//! assert_eq!(world.station_ref(b).resource_count(), 10);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `ferry-core` | IDs, storage slots, host-world traits, refresh errors |
//! | [`engine`] | `ferry-engine` | Distribution engine, configuration, metrics, cadence driver |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`ferry-core`).
///
/// Hosts implement [`types::World`], [`types::Partition`] and
/// [`types::Station`] over their own entity storage.
pub use ferry_core as types;

/// The distribution engine (`ferry-engine`).
///
/// [`engine::DistributionEngine`] runs one cycle on demand;
/// [`engine::CycleDriver`] runs cycles on a tick cadence.
pub use ferry_engine as engine;

/// Common imports for typical Ferry usage.
///
/// ```rust
/// use ferry::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use ferry_core::{
        Gid, ItemId, LogisticMode, Partition, PartitionIndex, PlanetId, Station, StationHandle,
        StationId, StorageSlot, World,
    };

    // Errors
    pub use ferry_core::{RefreshError, RefreshTarget};

    // Engine
    pub use ferry_engine::{
        CadenceConfig, CycleDriver, CycleMetrics, CycleOutcome, DistributionConfig,
        DistributionEngine, FerryConfig, SkipReason,
    };
}
