//! Owns the current scene across resizes and drives the frame loop.

use std::cell::Cell;
use std::rc::Rc;

use super::config::BoardConfig;
use super::layout::Viewport;
use super::rng::RandomSource;
use super::scene::{generate_scene, Scene};

/// Outcome of a regeneration attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Regen {
    Generated,
    /// Container not laid out yet; the next resize or mount signal retries.
    Skipped,
    /// A newer resize superseded this one.
    Stale,
}

pub struct BoardController<R: RandomSource> {
    config: BoardConfig,
    rng: R,
    latest: u64,
    pending: Option<Viewport>,
    scene: Option<Scene>,
}

impl<R: RandomSource> BoardController<R> {
    pub fn new(config: BoardConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            latest: 0,
            pending: None,
            scene: None,
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    /// Records a new measurement and returns its ticket.
    pub fn request_resize(&mut self, viewport: Viewport) -> u64 {
        self.latest += 1;
        self.pending = Some(viewport);
        self.latest
    }

    pub fn regenerate(&mut self, ticket: u64) -> Regen {
        if ticket != self.latest {
            return Regen::Stale;
        }
        let Some(viewport) = self.pending else {
            return Regen::Skipped;
        };
        match generate_scene(viewport, &self.config, &mut self.rng) {
            Some(scene) => {
                self.scene = Some(scene);
                Regen::Generated
            }
            None => Regen::Skipped,
        }
    }

    /// Measure-and-generate in one step, as done on mount.
    pub fn resize_now(&mut self, viewport: Viewport) -> Regen {
        let ticket = self.request_resize(viewport);
        self.regenerate(ticket)
    }
}

/// Animation clock. Holds only the start time; each step receives elapsed
/// seconds, so motion is reproducible from the start time alone.
pub struct FrameLoop {
    running: Rc<Cell<bool>>,
    start_ms: Option<f64>,
    step: Box<dyn FnMut(f64)>,
}

impl FrameLoop {
    pub fn new(step: impl FnMut(f64) + 'static) -> Self {
        Self {
            running: Rc::new(Cell::new(true)),
            start_ms: None,
            step: Box::new(step),
        }
    }

    /// Runs one step at `now_ms`; returns whether another frame should be requested.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        if !self.running.get() {
            return false;
        }
        let start = *self.start_ms.get_or_insert(now_ms);
        (self.step)(((now_ms - start) / 1000.0).max(0.0));
        self.running.get()
    }

    pub fn stop(&self) {
        self.running.set(false);
    }
}
