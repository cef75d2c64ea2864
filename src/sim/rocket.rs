// rocket.rs - Arrowheads flying straight
//
// Same kinematics as particles, but leaving the canvas on either axis
// respawns the rocket: fresh position, fresh heading, same speed.

use glam::DVec2;
use rand::Rng;
use tracing::trace;

use super::{Entity, EntityKind};
use crate::config::SimConfig;
use crate::error::Result;
use crate::render::{ROCKET_FILL, ROCKET_SHAPE, Surface};
use crate::world::{Bounds, advance, random_heading};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rocket {
    pub pos: DVec2,
    pub speed: f64,
    pub angle: f64,
}

impl Rocket {
    fn respawn<R: Rng + ?Sized>(&mut self, bounds: &Bounds, rng: &mut R) {
        self.pos = bounds.random_point(rng);
        self.angle = random_heading(rng);
    }
}

impl Entity for Rocket {
    const KIND: EntityKind = EntityKind::Rocket;
    const FILL: &'static str = ROCKET_FILL;

    fn spawn<R: Rng + ?Sized>(config: &SimConfig, bounds: &Bounds, rng: &mut R) -> Self {
        let pos = bounds.random_point(rng);
        let angle = random_heading(rng);
        Self { pos, speed: config.rocket_speed, angle }
    }

    fn update<R: Rng + ?Sized>(&mut self, bounds: &Bounds, rng: &mut R) {
        let next = advance(self.pos, self.angle, self.speed);
        if bounds.contains(next) {
            self.pos = next;
            return;
        }

        trace!(x = next.x, y = next.y, "rocket left canvas, respawning");
        self.respawn(bounds, rng);
    }

    fn draw<S: Surface + ?Sized>(&self, surface: &mut S) -> Result<()> {
        // Rotating by the heading puts the nose (10, 0) on the direction of travel
        surface.fill_polygon(self.pos, self.angle, &ROCKET_SHAPE)
    }
}
