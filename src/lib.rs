//! Ambient particle field: a drifting point cloud with proximity lines, painted
//! on a transparent canvas behind page content.
//!
//! Each frame the [`lifecycle::FieldController`] runs the three stages in order:
//! [`simulator::advance`], [`connections::edges`], then [`renderer::Renderer::paint`].
//! The engine is host-agnostic; the `web` module binds it to a browser canvas.

mod utils;

pub mod color;
pub mod config;
pub mod connections;
pub mod error;
pub mod input;
pub mod lifecycle;
pub mod particle;
pub mod renderer;
pub mod simulator;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub mod canvas;
#[cfg(target_arch = "wasm32")]
pub mod web;

use wasm_bindgen::prelude::*;

pub use color::Color;
pub use config::{ConnectionStrategy, FieldConfig, Range, ResizePolicy};
pub use connections::ConnectionEdge;
pub use error::FieldError;
pub use input::{InputState, InputTracker};
pub use lifecycle::{FieldController, FieldState, FrameHandle, Host};
pub use particle::{Particle, ParticleStore};
pub use renderer::Renderer;
pub use simulator::Bounds;
pub use surface::DrawingSurface;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Installs the panic hook and the console logger. Call once before creating a field.
#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    utils::init_logging(log::Level::Info);
}

#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
