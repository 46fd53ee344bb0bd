//! Tick-driven cadence around a [`DistributionEngine`].
//!
//! [`CycleDriver`] is the host-facing entry point for games and
//! simulations that call in every frame. It counts ticks and runs one
//! engine cycle every `tick_interval` ticks, honouring the kill-switch
//! and the uninstall flag, and tolerating a world that is not loaded yet.

use ferry_core::World;

use crate::config::FerryConfig;
use crate::engine::{CycleOutcome, DistributionEngine, SkipReason};

/// Counts host ticks and runs a cycle when one is due.
#[derive(Debug, Default)]
pub struct CycleDriver {
    engine: DistributionEngine,
    tick_counter: u64,
}

impl CycleDriver {
    /// Wrap an engine with a fresh tick counter.
    pub fn new(engine: DistributionEngine) -> Self {
        Self {
            engine,
            tick_counter: 0,
        }
    }

    /// Ticks counted while enabled.
    pub fn ticks(&self) -> u64 {
        self.tick_counter
    }

    /// The wrapped engine.
    pub fn engine(&self) -> &DistributionEngine {
        &self.engine
    }

    /// Advance by one host tick.
    ///
    /// While the kill-switch or the uninstall flag is set nothing is
    /// counted. Otherwise the
    /// counter advances and, on every `tick_interval`-th tick, a cycle
    /// runs against `world`; `None` stands for a world that is not
    /// loaded.
    pub fn on_tick<W: World>(&mut self, world: Option<&mut W>, config: &FerryConfig) -> CycleOutcome {
        if config.cadence.is_suppressed() {
            return CycleOutcome::Skipped(SkipReason::Disabled);
        }
        self.tick_counter = self.tick_counter.wrapping_add(1);
        if self.tick_counter % config.cadence.resolved_tick_interval() != 0 {
            return CycleOutcome::Skipped(SkipReason::NotDue);
        }
        match world {
            Some(world) => self.engine.run_cycle(world, &config.distribution),
            None => CycleOutcome::Skipped(SkipReason::Unavailable),
        }
    }
}
