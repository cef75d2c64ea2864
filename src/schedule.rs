// schedule.rs - Per-frame driving
//
// The simulation does not know who calls it. A scheduler takes a tick
// function, runs it once per display refresh, and hands back a handle that
// stops the chain. Stopping never interrupts a tick already running; it only
// prevents the next one.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{error, info};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Window;

use crate::error::{Error, Result};

pub type TickFn = Box<dyn FnMut()>;

pub trait TickScheduler {
    type Handle;

    /// Begin calling `tick` once per frame
    fn start(&mut self, tick: TickFn) -> Result<Self::Handle>;

    /// End the chain; no further calls after this returns
    fn stop(&mut self, handle: Self::Handle);
}

// ============================================================================
// Browser: requestAnimationFrame / cancelAnimationFrame
// ============================================================================

#[derive(Default)]
pub struct AnimationFrameScheduler;

#[derive(Default)]
struct LoopState {
    running: Cell<bool>,
    pending: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut()>>>,
}

/// Live animation-frame loop. Dropping it stops the loop.
pub struct FrameLoop {
    state: Rc<LoopState>,
    window: Window,
}

impl FrameLoop {
    pub fn is_running(&self) -> bool {
        self.state.running.get()
    }

    fn cancel(&self) {
        if !self.state.running.replace(false) {
            return;
        }
        if let Some(id) = self.state.pending.take() {
            if let Err(err) = self.window.cancel_animation_frame(id) {
                error!(error = %Error::schedule(err), "cancelAnimationFrame failed");
            }
        }
        // Breaks the closure <-> state link
        self.state.callback.borrow_mut().take();
        info!("frame loop stopped");
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn request_frame(window: &Window, state: &LoopState) -> Result<()> {
    let callback = state.callback.borrow();
    let Some(callback) = callback.as_ref() else { return Ok(()) };
    let id = window
        .request_animation_frame(callback.as_ref().unchecked_ref::<js_sys::Function>())
        .map_err(Error::schedule)?;
    state.pending.set(Some(id));
    Ok(())
}

impl TickScheduler for AnimationFrameScheduler {
    type Handle = FrameLoop;

    fn start(&mut self, mut tick: TickFn) -> Result<FrameLoop> {
        let window = web_sys::window().ok_or_else(|| Error::Schedule("no global window".into()))?;
        let state = Rc::new(LoopState::default());

        // The closure only holds a weak link so the handle alone owns the loop
        let weak = Rc::downgrade(&state);
        let frame_window = window.clone();
        let callback = Closure::<dyn FnMut()>::new(move || {
            let Some(state) = weak.upgrade() else { return };
            state.pending.set(None);
            if !state.running.get() {
                return;
            }

            tick();

            if let Err(err) = request_frame(&frame_window, &state) {
                error!(error = %err, "could not schedule next frame");
                state.running.set(false);
            }
        });

        state.callback.replace(Some(callback));
        state.running.set(true);
        request_frame(&window, &state)?;
        info!("frame loop started");

        Ok(FrameLoop { state, window })
    }

    fn stop(&mut self, handle: FrameLoop) {
        drop(handle);
    }
}

// ============================================================================
// Host-driven: each `pump` is one display refresh
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopId(usize);

/// Scheduler for native hosts and tests. Nothing runs until `pump`.
#[derive(Default)]
pub struct ManualScheduler {
    loops: Vec<Option<TickFn>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every live loop once. Returns how many ran.
    pub fn pump(&mut self) -> usize {
        let mut ran = 0;
        for tick in self.loops.iter_mut().flatten() {
            tick();
            ran += 1;
        }
        ran
    }

    pub fn active(&self) -> usize {
        self.loops.iter().filter(|l| l.is_some()).count()
    }
}

impl TickScheduler for ManualScheduler {
    type Handle = LoopId;

    fn start(&mut self, tick: TickFn) -> Result<LoopId> {
        self.loops.push(Some(tick));
        Ok(LoopId(self.loops.len() - 1))
    }

    fn stop(&mut self, handle: LoopId) {
        if let Some(slot) = self.loops.get_mut(handle.0) {
            *slot = None;
        }
    }
}
