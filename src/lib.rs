use std::cell::RefCell;
use std::rc::Rc;

use tracing::{error, warn};
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

pub mod canvas;
pub mod config;
pub mod error;
pub mod logging;
pub mod render;
pub mod schedule;
pub mod sim;
pub mod world;

use canvas::CanvasSurface;
use config::SimConfig;
use schedule::{AnimationFrameScheduler, FrameLoop, TickScheduler};
use sim::Simulation;
use world::Bounds;

// ============================================================================
// VISUALIZER - Drifting particles and rockets on a 2D canvas
// ============================================================================

/// Install console logging. `directives` uses RUST_LOG syntax.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(directives: Option<String>) -> Result<(), JsValue> {
    logging::init(directives.as_deref()).map_err(JsValue::from)
}

#[wasm_bindgen]
pub struct Visualizer {
    sim: Rc<RefCell<Simulation>>,
    surface: Rc<RefCell<CanvasSurface>>,
    scheduler: AnimationFrameScheduler,
    frame_loop: Option<FrameLoop>,
}

#[wasm_bindgen]
impl Visualizer {
    /// `config` is an optional JSON object; missing keys take defaults.
    /// Without a `seed` the wall clock is used.
    #[wasm_bindgen(constructor)]
    pub fn new(
        ctx: CanvasRenderingContext2d,
        w: f64,
        h: f64,
        config: Option<String>,
    ) -> Result<Visualizer, JsValue> {
        let mut config = match config {
            Some(text) => SimConfig::from_json(&text)?,
            None => SimConfig::default(),
        };
        if config.seed.is_none() {
            config.seed = Some(js_sys::Date::now() as u64);
        }

        Ok(Self {
            sim: Rc::new(RefCell::new(Simulation::new(Bounds::new(w, h), config))),
            surface: Rc::new(RefCell::new(CanvasSurface::new(ctx))),
            scheduler: AnimationFrameScheduler,
            frame_loop: None,
        })
    }

    /// Start the per-frame loop. No-op when already running.
    pub fn start(&mut self) -> Result<(), JsValue> {
        if self.is_running() {
            return Ok(());
        }

        let sim = Rc::clone(&self.sim);
        let surface = Rc::clone(&self.surface);
        let handle = self.scheduler.start(Box::new(move || {
            if let Err(err) = sim.borrow_mut().tick(&mut *surface.borrow_mut()) {
                error!(error = %err, "frame failed");
            }
        }))?;

        self.frame_loop = Some(handle);
        Ok(())
    }

    /// Stop the loop; nothing is drawn after this returns
    pub fn stop(&mut self) {
        if let Some(handle) = self.frame_loop.take() {
            self.scheduler.stop(handle);
        }
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.frame_loop.as_ref().is_some_and(FrameLoop::is_running)
    }

    /// Advance and draw a single frame by hand
    pub fn tick(&mut self) -> Result<(), JsValue> {
        let mut surface = self.surface.borrow_mut();
        self.sim.borrow_mut().tick(&mut *surface)?;
        Ok(())
    }

    /// Regenerate everything from the current settings
    pub fn reset(&mut self) {
        self.sim.borrow_mut().reset();
    }

    pub fn resize(&mut self, w: f64, h: f64) {
        self.sim.borrow_mut().resize(w, h);
    }

    /// Merge a JSON object into the current settings
    pub fn configure(&mut self, patch: &str) -> Result<(), JsValue> {
        let mut sim = self.sim.borrow_mut();
        let config = sim.config().patched(patch)?;
        sim.configure(config);
        Ok(())
    }

    /// Current settings as JSON
    pub fn config(&self) -> Result<String, JsValue> {
        Ok(self.sim.borrow().config().to_json()?)
    }

    // Sliders

    #[wasm_bindgen(js_name = setParticleCount)]
    pub fn set_particle_count(&mut self, count: u32) {
        self.sim.borrow_mut().set_particle_count(count);
    }

    #[wasm_bindgen(js_name = setMinSpeed)]
    pub fn set_min_speed(&mut self, v: f64) {
        self.slider("minSpeed", v, Simulation::set_min_speed);
    }

    #[wasm_bindgen(js_name = setMaxSpeed)]
    pub fn set_max_speed(&mut self, v: f64) {
        self.slider("maxSpeed", v, Simulation::set_max_speed);
    }

    #[wasm_bindgen(js_name = setMinSize)]
    pub fn set_min_size(&mut self, v: f64) {
        self.slider("minSize", v, Simulation::set_min_size);
    }

    #[wasm_bindgen(js_name = setMaxSize)]
    pub fn set_max_size(&mut self, v: f64) {
        self.slider("maxSize", v, Simulation::set_max_size);
    }

    #[wasm_bindgen(js_name = setRocketCount)]
    pub fn set_rocket_count(&mut self, count: u32) {
        self.sim.borrow_mut().set_rocket_count(count);
    }

    #[wasm_bindgen(js_name = setRocketSpeed)]
    pub fn set_rocket_speed(&mut self, v: f64) {
        self.slider("rocketSpeed", v, Simulation::set_rocket_speed);
    }

    // Accessors

    #[wasm_bindgen(getter, js_name = particleCount)]
    pub fn particle_count(&self) -> usize {
        self.sim.borrow().particles().len()
    }

    #[wasm_bindgen(getter, js_name = rocketCount)]
    pub fn rocket_count(&self) -> usize {
        self.sim.borrow().rockets().len()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f64 {
        self.sim.borrow().bounds().w
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f64 {
        self.sim.borrow().bounds().h
    }
}

impl Visualizer {
    fn slider(&mut self, name: &str, v: f64, apply: fn(&mut Simulation, f64)) {
        if !v.is_finite() {
            warn!(slider = name, value = v, "non-finite slider value ignored");
            return;
        }
        apply(&mut self.sim.borrow_mut(), v);
    }
}

impl Drop for Visualizer {
    fn drop(&mut self) {
        self.stop();
    }
}
