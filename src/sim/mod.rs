// sim/ - Particle and rocket simulation
//
// One module per entity kind. Each kind is a strategy behind the `Entity`
// trait: how it spawns, how it moves, how it draws. The `Simulation` owns
// the collections and runs one update+draw pass per frame.

mod particle;
mod rocket;


pub use particle::Particle;
pub use rocket::Rocket;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::config::{CANVAS_HEIGHT, CANVAS_WIDTH, SimConfig, Span};
use crate::error::Result;
use crate::render::Surface;
use crate::world::Bounds;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Particle,
    Rocket,
}

/// Per-kind behavior. Implementors decide what "leaving the canvas" means.
pub trait Entity: Sized {
    const KIND: EntityKind;
    /// Fill color used for every entity of this kind
    const FILL: &'static str;

    fn spawn<R: Rng + ?Sized>(config: &SimConfig, bounds: &Bounds, rng: &mut R) -> Self;

    /// Advance one tick
    fn update<R: Rng + ?Sized>(&mut self, bounds: &Bounds, rng: &mut R);

    fn draw<S: Surface + ?Sized>(&self, surface: &mut S) -> Result<()>;
}

/// Build a fresh population of exactly `count` entities.
///
/// Pure in its inputs plus the random source: the same config, bounds and
/// RNG state always give the same collection.
pub fn populate<E: Entity, R: Rng + ?Sized>(
    count: usize,
    config: &SimConfig,
    bounds: &Bounds,
    rng: &mut R,
) -> Vec<E> {
    let entities: Vec<E> = (0..count).map(|_| E::spawn(config, bounds, &mut *rng)).collect();
    debug!(kind = ?E::KIND, count, "populated");
    entities
}

/// Uniform sample from a span, tolerating swapped bounds
#[inline]
pub fn sample<R: Rng + ?Sized>(span: Span, rng: &mut R) -> f64 {
    let (lo, hi) = span.ordered();
    rng.gen_range(lo..=hi)
}

/// Particle + rocket world
pub struct Simulation {
    bounds: Bounds,
    config: SimConfig,

    particles: Vec<Particle>,
    rockets: Vec<Rocket>,

    rng: ChaCha8Rng,
    frame: u64,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(Bounds::new(CANVAS_WIDTH, CANVAS_HEIGHT), SimConfig::default())
    }
}

impl Simulation {
    pub fn new(bounds: Bounds, config: SimConfig) -> Self {
        let config = config.sanitized();
        let mut sim = Self {
            bounds: Bounds::clamped(bounds.w, bounds.h),
            config,
            particles: Vec::new(),
            rockets: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed_or_default()),
            frame: 0,
        };
        sim.reset();
        sim
    }

    /// Clear, move everything, draw everything
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<()> {
        surface.clear_rect(0.0, 0.0, self.bounds.w, self.bounds.h)?;
        self.update();
        self.draw(surface)
    }

    /// Update phase only
    pub fn update(&mut self) {
        step_all(&mut self.particles, &self.bounds, &mut self.rng);
        step_all(&mut self.rockets, &self.bounds, &mut self.rng);
        self.frame += 1;
    }

    /// Draw phase only. Background is left to the host.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) -> Result<()> {
        draw_all(&self.particles, surface)?;
        draw_all(&self.rockets, surface)
    }

    /// Apply a new configuration.
    ///
    /// Each collection whose inputs changed is thrown away and rebuilt;
    /// an unchanged configuration touches nothing.
    pub fn configure(&mut self, config: SimConfig) {
        let config = config.sanitized();
        let old = std::mem::replace(&mut self.config, config);

        if config.seed.is_some() && config.seed != old.seed {
            self.rng = ChaCha8Rng::seed_from_u64(config.seed_or_default());
        }
        if config.particles_differ(&old) {
            self.regenerate_particles();
        }
        if config.rockets_differ(&old) {
            self.regenerate_rockets();
        }
    }

    /// Rebuild both collections from the current configuration
    pub fn reset(&mut self) {
        self.regenerate_particles();
        self.regenerate_rockets();
    }

    /// New canvas size; everything is rebuilt inside it
    pub fn resize(&mut self, w: f64, h: f64) {
        self.bounds = Bounds::clamped(w, h);
        self.reset();
    }

    // Slider setters

    pub fn set_particle_count(&mut self, count: u32) {
        self.configure(SimConfig { particle_count: count, ..self.config });
    }

    pub fn set_min_speed(&mut self, v: f64) {
        self.configure(SimConfig { speed: Span::new(v, self.config.speed.max), ..self.config });
    }

    pub fn set_max_speed(&mut self, v: f64) {
        self.configure(SimConfig { speed: Span::new(self.config.speed.min, v), ..self.config });
    }

    pub fn set_min_size(&mut self, v: f64) {
        self.configure(SimConfig { size: Span::new(v, self.config.size.max), ..self.config });
    }

    pub fn set_max_size(&mut self, v: f64) {
        self.configure(SimConfig { size: Span::new(self.config.size.min, v), ..self.config });
    }

    pub fn set_rocket_count(&mut self, count: u32) {
        self.configure(SimConfig { rocket_count: count, ..self.config });
    }

    pub fn set_rocket_speed(&mut self, v: f64) {
        self.configure(SimConfig { rocket_speed: v, ..self.config });
    }

    // Accessors

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn rockets(&self) -> &[Rocket] {
        &self.rockets
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[cfg(test)]
    pub(crate) fn replace_particles(&mut self, particles: Vec<Particle>) {
        self.particles = particles;
    }

    fn regenerate_particles(&mut self) {
        let count = self.config.particle_count as usize;
        self.particles = populate(count, &self.config, &self.bounds, &mut self.rng);
    }

    fn regenerate_rockets(&mut self) {
        let count = self.config.rocket_count as usize;
        self.rockets = populate(count, &self.config, &self.bounds, &mut self.rng);
    }
}

fn step_all<E: Entity, R: Rng + ?Sized>(entities: &mut [E], bounds: &Bounds, rng: &mut R) {
    for e in entities.iter_mut() {
        e.update(bounds, &mut *rng);
    }
}

fn draw_all<E: Entity, S: Surface + ?Sized>(entities: &[E], surface: &mut S) -> Result<()> {
    if entities.is_empty() {
        return Ok(());
    }
    surface.set_fill(E::FILL)?;
    for e in entities {
        e.draw(surface)?;
    }
    Ok(())
}
