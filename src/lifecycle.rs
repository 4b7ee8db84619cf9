//! Lifecycle controller: owns the particle store and drives the frame loop.
//!
//! States run `Idle -> Initialized -> Animating -> Disposed` and never go
//! back. The host environment is reached only through [`Host`], so the loop
//! can be driven by `requestAnimationFrame` in a browser or by hand in tests.
//!
//! Cancellation is cooperative. [`FieldController::dispose`] cancels the
//! pending frame and drops the resize listener together, and a frame that
//! still fires afterwards finds the controller disposed and does nothing.

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::color::Color;
use crate::config::{FieldConfig, ResizePolicy};
use crate::connections::edges_with;
use crate::error::FieldError;
use crate::particle::{Particle, ParticleStore};
use crate::renderer::Renderer;
use crate::simulator::{advance, Bounds};
use crate::surface::DrawingSurface;

/// Id of a scheduled frame callback, as handed out by the host.
pub type FrameHandle = i32;

/// Scheduling and event hooks of the host environment.
pub trait Host {
    /// Schedules one call of the frame callback.
    fn request_frame(&mut self) -> Result<FrameHandle, FieldError>;
    fn cancel_frame(&mut self, handle: FrameHandle);
    fn watch_resize(&mut self) -> Result<(), FieldError>;
    fn unwatch_resize(&mut self);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FieldState {
    Idle,
    Initialized,
    Animating,
    Disposed,
}

impl FieldState {
    pub fn name(&self) -> &'static str {
        match self {
            FieldState::Idle => "Idle",
            FieldState::Initialized => "Initialized",
            FieldState::Animating => "Animating",
            FieldState::Disposed => "Disposed",
        }
    }
}

pub struct FieldController<S: DrawingSurface, H: Host> {
    config: FieldConfig,
    palette: Vec<Color>,
    renderer: Renderer,
    store: ParticleStore,
    bounds: Bounds,
    surface: S,
    host: H,
    rng: StdRng,
    state: FieldState,
    pending_frame: Option<FrameHandle>,
    watching_resize: bool,
    frames: u64,
    last_edge_count: usize,
}

impl<S: DrawingSurface, H: Host> FieldController<S, H> {
    pub fn new(config: FieldConfig, surface: S, host: H) -> Result<Self, FieldError> {
        config.validate()?;
        let palette = config.parse_palette()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(FieldController {
            renderer: Renderer::new(&config),
            config,
            palette,
            store: ParticleStore::new(),
            bounds: Bounds::new(0.0, 0.0),
            surface,
            host,
            rng,
            state: FieldState::Idle,
            pending_frame: None,
            watching_resize: false,
            frames: 0,
            last_edge_count: 0,
        })
    }

    fn expect_state(&self, operation: &'static str, allowed: &[FieldState]) -> Result<(), FieldError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(FieldError::InvalidTransition {
                operation,
                state: self.state.name(),
            })
        }
    }

    /// `Idle -> Initialized`: spawns the first generation and starts watching resizes.
    pub fn mount(&mut self, bounds: Bounds) -> Result<(), FieldError> {
        self.expect_state("mount", &[FieldState::Idle])?;
        self.host.watch_resize()?;
        self.watching_resize = true;
        self.bounds = bounds;
        self.store
            .regenerate(&self.config, &self.palette, bounds, &mut self.rng);
        self.state = FieldState::Initialized;
        debug!(
            "particle field mounted at {}x{} with {} particles",
            bounds.width,
            bounds.height,
            self.store.len()
        );
        Ok(())
    }

    /// `Initialized -> Animating`: schedules the first frame.
    pub fn start(&mut self) -> Result<(), FieldError> {
        self.expect_state("start", &[FieldState::Initialized])?;
        self.pending_frame = Some(self.host.request_frame()?);
        self.state = FieldState::Animating;
        debug!("particle field animating");
        Ok(())
    }

    /// Frame callback: simulate, connect, paint, then schedule the next frame.
    ///
    /// Does nothing unless animating. Returns whether the surface was painted.
    pub fn tick(&mut self) -> Result<bool, FieldError> {
        if self.state != FieldState::Animating {
            trace!("ignoring frame in state {}", self.state.name());
            return Ok(false);
        }
        self.pending_frame = None;

        let next = advance(self.store.particles(), self.bounds);
        self.store.replace(next);
        let edges = edges_with(
            self.config.connection_strategy,
            self.store.particles(),
            self.config.connection_threshold,
        );
        self.last_edge_count = edges.len();
        let painted = self
            .renderer
            .paint(&mut self.surface, self.bounds, self.store.particles(), &edges);
        self.frames += 1;

        self.pending_frame = Some(self.host.request_frame()?);
        Ok(painted)
    }

    /// Applies a viewport change before the next frame. Allowed while
    /// initialized or animating; the lifecycle state is unchanged.
    pub fn resize(&mut self, bounds: Bounds) -> Result<(), FieldError> {
        self.expect_state("resize", &[FieldState::Initialized, FieldState::Animating])?;
        match self.config.resize_policy {
            ResizePolicy::Regenerate => {
                self.store
                    .regenerate(&self.config, &self.palette, bounds, &mut self.rng);
            }
            ResizePolicy::Rescale if self.bounds.width > 0.0 && self.bounds.height > 0.0 => {
                self.store.rescale(self.bounds, bounds)
            }
            // nothing to scale from a zero-extent viewport
            ResizePolicy::Rescale => {
                self.store
                    .regenerate(&self.config, &self.palette, bounds, &mut self.rng);
            }
        }
        self.bounds = bounds;
        debug!(
            "particle field resized to {}x{} (generation {})",
            bounds.width,
            bounds.height,
            self.store.generation()
        );
        Ok(())
    }

    /// Terminal teardown. Cancels the pending frame and stops watching resizes
    /// in one step. Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.state == FieldState::Disposed {
            return;
        }
        if let Some(handle) = self.pending_frame.take() {
            self.host.cancel_frame(handle);
        }
        if self.watching_resize {
            self.host.unwatch_resize();
            self.watching_resize = false;
        }
        self.store.clear();
        self.state = FieldState::Disposed;
        debug!("particle field disposed after {} frames", self.frames);
    }

    pub fn state(&self) -> FieldState {
        self.state
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        self.store.particles()
    }

    pub fn generation(&self) -> u64 {
        self.store.generation()
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Edges found on the most recent frame.
    pub fn last_edge_count(&self) -> usize {
        self.last_edge_count
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending_frame
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<S: DrawingSurface, H: Host> Drop for FieldController<S, H> {
    fn drop(&mut self) {
        self.dispose();
    }
}
