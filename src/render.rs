// render.rs - Drawing seam between the simulation and the host
//
// The simulation only ever talks to a `Surface`. The browser build backs it
// with a 2D canvas context (see canvas.rs); tests and headless hosts use the
// `Recorder`, which keeps the draw calls as data.

use glam::DVec2;

use crate::error::Result;

pub const PARTICLE_FILL: &str = "rgba(255, 255, 255, 0.8)";
pub const ROCKET_FILL: &str = "red";

/// Arrowhead in local space, nose on +x
pub const ROCKET_SHAPE: [DVec2; 3] = [
    DVec2::new(10.0, 0.0),
    DVec2::new(-10.0, 5.0),
    DVec2::new(-10.0, -5.0),
];

/// The 2D operations the stepper needs from a host
pub trait Surface {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<()>;

    /// CSS color for subsequent fills
    fn set_fill(&mut self, color: &str) -> Result<()>;

    fn fill_circle(&mut self, center: DVec2, radius: f64) -> Result<()>;

    /// Fill `points` after translating to `origin` and rotating by `rotation`
    /// radians around it. The transform must not leak into later calls.
    fn fill_polygon(&mut self, origin: DVec2, rotation: f64, points: &[DVec2]) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear { x: f64, y: f64, w: f64, h: f64 },
    Fill(String),
    Circle { center: DVec2, radius: f64 },
    Polygon { origin: DVec2, rotation: f64, points: Vec<DVec2> },
}

#[cfg(test)]
impl DrawOp {
    /// Polygon vertices in canvas space
    pub fn world_points(&self) -> Option<Vec<DVec2>> {
        match self {
            DrawOp::Polygon { origin, rotation, points } => {
                let rot = DVec2::from_angle(*rotation);
                Some(points.iter().map(|p| *origin + rot.rotate(*p)).collect())
            }
            _ => None,
        }
    }
}

/// Surface that records instead of drawing
#[derive(Debug, Default)]
pub struct Recorder {
    pub ops: Vec<DrawOp>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn circles(&self) -> impl Iterator<Item = (DVec2, f64)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Circle { center, radius } => Some((*center, *radius)),
            _ => None,
        })
    }

    pub fn polygons(&self) -> impl Iterator<Item = &DrawOp> + '_ {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Polygon { .. }))
    }
}

impl Surface for Recorder {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<()> {
        self.ops.push(DrawOp::Clear { x, y, w, h });
        Ok(())
    }

    fn set_fill(&mut self, color: &str) -> Result<()> {
        self.ops.push(DrawOp::Fill(color.to_owned()));
        Ok(())
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64) -> Result<()> {
        self.ops.push(DrawOp::Circle { center, radius });
        Ok(())
    }

    fn fill_polygon(&mut self, origin: DVec2, rotation: f64, points: &[DVec2]) -> Result<()> {
        self.ops.push(DrawOp::Polygon { origin, rotation, points: points.to_vec() });
        Ok(())
    }
}
