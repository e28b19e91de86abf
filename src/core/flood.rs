use std::time::Duration;

use bevy::math::IVec2;
use tracing::{debug, info};

use crate::core::bounds::BoundsOriginRoot;
use crate::core::consts::BORDER_STRIDE;
use crate::core::events::{PresentationEvent, RenderGroup};
use crate::core::models::{GamePhase, Layer, Terrain, TileKind};
use crate::core::world::World;

/// One-shot countdown to the flood.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FloodTimer {
    duration: Duration,
    elapsed: Duration,
    running: bool,
}

impl FloodTimer {
    pub fn new(duration: Duration) -> FloodTimer {
        FloodTimer {
            duration,
            elapsed: Duration::ZERO,
            running: true,
        }
    }

    /// Advances the timer. Returns true only on the tick that expires it.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(delta).min(self.duration);
        if self.elapsed >= self.duration {
            self.running = false;
            return true;
        }
        false
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn remaining(&self) -> Duration {
        self.duration.saturating_sub(self.elapsed)
    }

    /// Whole seconds left, rounded up, for the countdown text.
    pub fn remaining_secs_ceil(&self) -> u64 {
        self.remaining().as_millis().div_ceil(1000) as u64
    }

    /// 0 at the start of the build phase, 1 when the flood arrives.
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }
}

/// Where water enters the city: every other cell along the top and bottom
/// rows, and every other cell down the left and right columns, stopping
/// short of the two rows above the bottom edge.
pub fn border_seed_positions(bounds: BoundsOriginRoot) -> Vec<IVec2> {
    let (width, height) = (bounds.width(), bounds.height());
    let mut positions = Vec::new();
    if width <= 0 || height <= 0 {
        return positions;
    }

    let mut push = |pos: IVec2| {
        if !positions.contains(&pos) {
            positions.push(pos);
        }
    };

    for x in (0..width).step_by(BORDER_STRIDE) {
        push(IVec2::new(x, 0));
        push(IVec2::new(x, height - 1));
    }
    for y in (BORDER_STRIDE as i32..height - 2).step_by(BORDER_STRIDE) {
        push(IVec2::new(0, y));
        push(IVec2::new(width - 1, y));
    }
    positions
}

impl World {
    /// Ends the build phase: stops the timer and lets the water in.
    pub fn flood(&mut self) -> Vec<IVec2> {
        self.timer_mut().stop();
        if self.phase() != GamePhase::Flooding {
            self.set_phase(GamePhase::Flooding);
            info!("flood started");
        }
        let seeded = self.seed_water();
        self.emit(PresentationEvent::BringToTop(RenderGroup::Water));
        seeded
    }

    /// Marks the border seeds in the level and puts a water source on each.
    /// Returns the positions that got a new water source; seeding twice
    /// changes nothing the second time.
    pub fn seed_water(&mut self) -> Vec<IVec2> {
        let mut seeded = Vec::new();
        for pos in border_seed_positions(self.level().bounds()) {
            self.level_mut().set(&pos, Terrain::WaterBorder);
            if self.map().occupant(Layer::Water, &pos).is_none() {
                self.spawn_actor(TileKind::Water, pos);
                seeded.push(pos);
            }
        }
        debug!(count = seeded.len(), "seeded water");
        seeded
    }
}
