//! Fair, rotation-balanced resource distribution across a host world.
//!
//! Each [`DistributionEngine::run_cycle()`] runs four phases against a
//! host implementing [`ferry_core::World`]:
//!
//! 1. **Snapshot**: classify stations into suppliers and receivers.
//! 2. **Plan**: order receivers by deficit, set per-receiver targets and
//!    caps, and rescale targets to a fair share of supply.
//! 3. **Execute**: serve receivers from each supplier, starting at a
//!    rotation cursor that advances every cycle.
//! 4. **Refresh**: recompute receiver needs and refresh host traffic for
//!    every planet and network id touched.
//!
//! [`CycleDriver`] wraps the engine with tick-based cadence and a
//! kill-switch. All scratch buffers live in the engine and are reused,
//! so a warmed-up cycle does not allocate.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod driver;
pub mod engine;
mod execute;
pub mod metrics;
mod plan;
mod refresh;
mod snapshot;
pub mod working_set;

pub use config::{CadenceConfig, CycleParams, DistributionConfig, FerryConfig};
pub use driver::CycleDriver;
pub use engine::{CycleOutcome, DistributionEngine, SkipReason};
pub use metrics::CycleMetrics;
pub use working_set::{ReceiverEntry, WorkingSet};
