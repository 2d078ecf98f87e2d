//! Tick clock for the forge simulation

/// Ticks per second of simulated time
pub const TICKS_PER_SECOND: u32 = 20;

const FIXED_TIMESTEP: f32 = 1.0 / TICKS_PER_SECOND as f32;

/// Cap simulation steps per frame so a slow host falls behind instead of
/// spiralling
const MAX_STEPS_PER_FRAME: u32 = 4;

/// Monotonic tick counter plus a real-time accumulator
#[derive(Debug, Clone, Default)]
pub struct TickClock {
    tick: u64,
    time_accumulator: f32,
}

impl TickClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock resumed at a saved tick
    pub fn starting_at(tick: u64) -> Self {
        Self {
            tick,
            time_accumulator: 0.0,
        }
    }

    pub fn now(&self) -> u64 {
        self.tick
    }

    pub fn advance(&mut self) {
        self.tick += 1;
    }

    /// Feed `dt` seconds of wall time; returns how many ticks are due
    pub fn accumulate(&mut self, dt: f32) -> u32 {
        if dt.is_finite() && dt > 0.0 {
            self.time_accumulator += dt;
        }

        let mut steps = 0;
        while self.time_accumulator >= FIXED_TIMESTEP && steps < MAX_STEPS_PER_FRAME {
            self.time_accumulator -= FIXED_TIMESTEP;
            steps += 1;
        }

        // Clamp accumulator to prevent runaway
        if self.time_accumulator > FIXED_TIMESTEP * 2.0 {
            self.time_accumulator = FIXED_TIMESTEP;
        }
        steps
    }
}
