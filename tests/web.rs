//! Test suite for the Web and headless browsers.

#![cfg(target_arch = "wasm32")]

extern crate wasm_bindgen_test;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlCanvasElement;

use particle_field::canvas::CanvasSurface;
use particle_field::web::{ParticleField, PointerTracker};
use particle_field::{Bounds, DrawingSurface};

wasm_bindgen_test_configure!(run_in_browser);

fn canvas() -> HtmlCanvasElement {
    web_sys::window()
        .unwrap()
        .document()
        .unwrap()
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap()
}

#[wasm_bindgen_test]
fn canvas_surface_acquires_a_2d_context() {
    let mut surface = CanvasSurface::new(canvas());
    assert!(surface.acquire());
    surface.fit(Bounds::new(120.0, 80.0));
    assert_eq!(surface.canvas().width(), 120);
    surface.clear(Bounds::new(120.0, 80.0));
    surface.fill_disc([10.0, 10.0], 3.0, "#3b82f6b2");
    surface.stroke_line([0.0, 0.0], [50.0, 50.0], "#3b82f620", 0.5);
}

#[wasm_bindgen_test]
fn field_mounts_starts_and_disposes() {
    let field = ParticleField::new(canvas(), r#"{ "particleCount": 12, "seed": 1 }"#).unwrap();
    assert_eq!(field.state(), "Initialized");
    assert_eq!(field.particle_count(), 12);
    field.start().unwrap();
    assert_eq!(field.state(), "Animating");
    field.dispose();
    assert_eq!(field.state(), "Disposed");
    assert_eq!(field.particle_count(), 0);
    assert!(field.start().is_err());
}

#[wasm_bindgen_test]
fn pointer_tracker_attaches_and_detaches() {
    let mut tracker = PointerTracker::new();
    tracker.attach().unwrap();
    // a second attach keeps the existing listeners
    tracker.attach().unwrap();
    assert_eq!(tracker.pointer_x(), 0.0);
    assert!(tracker.gradient_css().ends_with('%'));
    tracker.detach();
    tracker.detach();
    tracker.attach().unwrap();
    tracker.detach();
}
