// canvas.rs - Surface backed by a browser 2D context
//
// Thin mapping onto CanvasRenderingContext2d. Calls that can throw in JS
// (arc, translate, rotate) come back as Error::Surface.

use glam::DVec2;
use std::f64::consts::TAU;
use web_sys::CanvasRenderingContext2d;

use crate::error::{Error, Result};
use crate::render::Surface;

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    fn trace_polygon(&self, origin: DVec2, rotation: f64, points: &[DVec2]) -> Result<()> {
        self.ctx.translate(origin.x, origin.y).map_err(Error::surface)?;
        self.ctx.rotate(rotation).map_err(Error::surface)?;

        let Some((first, rest)) = points.split_first() else { return Ok(()) };
        self.ctx.begin_path();
        self.ctx.move_to(first.x, first.y);
        for p in rest {
            self.ctx.line_to(p.x, p.y);
        }
        self.ctx.close_path();
        self.ctx.fill();
        Ok(())
    }
}

impl Surface for CanvasSurface {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<()> {
        self.ctx.clear_rect(x, y, w, h);
        Ok(())
    }

    fn set_fill(&mut self, color: &str) -> Result<()> {
        self.ctx.set_fill_style_str(color);
        Ok(())
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64) -> Result<()> {
        self.ctx.begin_path();
        self.ctx.arc(center.x, center.y, radius, 0.0, TAU).map_err(Error::surface)?;
        self.ctx.fill();
        Ok(())
    }

    fn fill_polygon(&mut self, origin: DVec2, rotation: f64, points: &[DVec2]) -> Result<()> {
        // Restore even when a transform call throws
        self.ctx.save();
        let drawn = self.trace_polygon(origin, rotation, points);
        self.ctx.restore();
        drawn
    }
}
