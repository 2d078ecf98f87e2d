//! Lazily decaying item temperature
//!
//! An item stores the temperature it was last set to and the tick it was set
//! at. The live temperature is recomputed on every read from the elapsed
//! ticks, so items nobody looks at (chests, dropped stacks, unloaded forges)
//! never need a per-tick update.

use serde::{Deserialize, Serialize};

use crate::config::ForgeConfig;

/// Snapshot of an item temperature
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LazyTemperature {
    snapshot: f32,
    /// `None` once the snapshot is known to have fully decayed
    snapshot_tick: Option<u64>,
}

impl LazyTemperature {
    /// Fully decayed temperature
    pub const COLD: LazyTemperature = LazyTemperature {
        snapshot: 0.0,
        snapshot_tick: None,
    };

    pub fn snapshot(&self) -> f32 {
        self.snapshot
    }

    pub fn snapshot_tick(&self) -> Option<u64> {
        self.snapshot_tick
    }

    /// Live temperature at `now`
    ///
    /// `max(0, snapshot - (now - snapshot_tick) * rate)`. A `now` earlier
    /// than the snapshot tick counts as zero elapsed ticks.
    pub fn get(&self, now: u64, decay_per_tick: f32) -> f32 {
        match self.snapshot_tick {
            None => 0.0,
            Some(tick) => {
                let elapsed = now.saturating_sub(tick) as f32;
                (self.snapshot - elapsed * decay_per_tick).max(0.0)
            }
        }
    }

    /// Store `value`, clamped to `0..=max_temperature`, as the snapshot at `now`
    pub fn set(&mut self, value: f32, now: u64, max_temperature: f32) {
        self.snapshot = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, max_temperature)
        };
        self.snapshot_tick = Some(now);
    }

    /// Add `delta * heating_modifier` to the live temperature
    ///
    /// Reads the decayed value first, so several calls within one tick
    /// compound on the true temperature rather than a stale snapshot.
    pub fn add(&mut self, delta: f32, now: u64, config: &ForgeConfig) {
        let current = self.get(now, config.temperature_decay_per_tick);
        self.set(
            current + delta * config.heating_modifier,
            now,
            config.max_temperature,
        );
    }

    /// True when nothing remains to decay at `now`
    pub fn is_cold(&self, now: u64, decay_per_tick: f32) -> bool {
        self.get(now, decay_per_tick) <= 0.0
    }
}
