//! Core types and traits for the Ferry distribution engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the engine and its hosts: strongly-typed
//! ids, the station storage model, the host-world traits the engine
//! reads and mutates through, and the error types for host faults.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod storage;
pub mod traits;

pub use error::{RefreshError, RefreshTarget};
pub use id::{Gid, ItemId, PartitionIndex, PlanetId, StationHandle, StationId};
pub use storage::{LogisticMode, StorageSlot};
pub use traits::{Partition, Station, World};
