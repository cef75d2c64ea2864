// particle.rs - Drifting dots
//
// Constant heading and speed. Leaving the canvas teleports the particle to
// the opposite edge (see Bounds::wrap), it is never re-randomized.

use glam::DVec2;
use rand::Rng;

use super::{Entity, EntityKind, sample};
use crate::config::SimConfig;
use crate::error::Result;
use crate::render::{PARTICLE_FILL, Surface};
use crate::world::{Bounds, advance, random_heading};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: DVec2,
    pub speed: f64,
    pub angle: f64,
    pub size: f64,
}

impl Entity for Particle {
    const KIND: EntityKind = EntityKind::Particle;
    const FILL: &'static str = PARTICLE_FILL;

    fn spawn<R: Rng + ?Sized>(config: &SimConfig, bounds: &Bounds, rng: &mut R) -> Self {
        let pos = bounds.random_point(rng);
        let speed = sample(config.speed, rng);
        let size = sample(config.size, rng);
        let angle = random_heading(rng);
        Self { pos, speed, angle, size }
    }

    fn update<R: Rng + ?Sized>(&mut self, bounds: &Bounds, _rng: &mut R) {
        self.pos = bounds.wrap(advance(self.pos, self.angle, self.speed));
    }

    fn draw<S: Surface + ?Sized>(&self, surface: &mut S) -> Result<()> {
        surface.fill_circle(self.pos, self.size)
    }
}
