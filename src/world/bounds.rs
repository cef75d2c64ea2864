// bounds.rs - The canvas rectangle [0, w] x [0, h]
//
// Both edges are inclusive. An entity sitting exactly on `w` or `h` is in
// bounds and is left alone; only strictly-outside positions are acted on.

use glam::DVec2;
use rand::Rng;
use std::f64::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub w: f64,
    pub h: f64,
}

impl Bounds {
    pub const fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }

    /// Negative or non-finite sizes collapse to zero
    pub fn clamped(w: f64, h: f64) -> Self {
        Self::new(extent(w), extent(h))
    }

    /// Inclusive containment on both axes
    #[inline]
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= 0.0 && p.x <= self.w && p.y >= 0.0 && p.y <= self.h
    }

    /// Uniform point inside the rectangle
    #[inline]
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> DVec2 {
        DVec2::new(rng.gen_range(0.0..=self.w), rng.gen_range(0.0..=self.h))
    }

    /// Teleport to the opposite edge, one axis at a time.
    ///
    /// Left of 0 lands on `w`, right of `w` lands on 0 (same for y).
    /// This is not modulo: the overshoot is discarded.
    #[inline]
    pub fn wrap(&self, mut p: DVec2) -> DVec2 {
        if p.x < 0.0 { p.x = self.w; }
        if p.x > self.w { p.x = 0.0; }
        if p.y < 0.0 { p.y = self.h; }
        if p.y > self.h { p.y = 0.0; }
        p
    }
}

#[inline]
fn extent(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

/// Uniform heading in [0, 2π)
#[inline]
pub fn random_heading<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(0.0..TAU)
}

/// One Euler step at unit time delta
#[inline]
pub fn advance(p: DVec2, angle: f64, speed: f64) -> DVec2 {
    p + DVec2::new(angle.cos(), angle.sin()) * speed
}
