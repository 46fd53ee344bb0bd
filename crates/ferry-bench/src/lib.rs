//! Benchmark profiles for the Ferry distribution engine.
//!
//! Provides pre-built worlds and configurations for benchmarking:
//!
//! - [`reference_world`]: 8 planets x 64 stations (512 stations)
//! - [`stress_world`]: 64 planets x 128 stations (~8K stations)
//! - [`bench_config`]: defaults with remote supply on, so both passes run

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use ferry_engine::{DistributionConfig, DistributionEngine};
use ferry_test_utils::fixtures::random_world;
use ferry_test_utils::MockWorld;

/// Planets in the reference profile.
pub const REFERENCE_PLANETS: u32 = 8;
/// Stations per planet in the reference profile.
pub const REFERENCE_STATIONS_PER_PLANET: u32 = 64;
/// Planets in the stress profile.
pub const STRESS_PLANETS: u32 = 64;
/// Stations per planet in the stress profile.
pub const STRESS_STATIONS_PER_PLANET: u32 = 128;

/// A 512-station world, typical of a mid-game save.
pub fn reference_world(seed: u64) -> MockWorld {
    random_world(seed, REFERENCE_PLANETS, REFERENCE_STATIONS_PER_PLANET)
}

/// A ~8K-station world for worst-case cycle cost.
pub fn stress_world(seed: u64) -> MockWorld {
    random_world(seed, STRESS_PLANETS, STRESS_STATIONS_PER_PLANET)
}

/// Default tunables with cross-planet supply enabled.
pub fn bench_config() -> DistributionConfig {
    DistributionConfig {
        remote_mode: true,
        ..DistributionConfig::default()
    }
}

/// An engine whose buffers already fit `planets x stations_per_planet`.
pub fn sized_engine(planets: u32, stations_per_planet: u32) -> DistributionEngine {
    let stations = (planets * stations_per_planet) as usize;
    DistributionEngine::with_capacity(stations, planets as usize)
}
