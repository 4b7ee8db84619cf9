//! Browser binding: wires the lifecycle controller to `requestAnimationFrame`,
//! window resizes, and a canvas element, and exposes it to JS.
//!
//! ```js
//! const field = new ParticleField(canvas, JSON.stringify({ particleCount: 60 }));
//! field.start();
//! // on page exit
//! field.dispose();
//! ```
//!
//! The frame and resize closures only hold a `Weak` to the controller. Once the
//! controller is disposed or dropped, a callback that still fires does nothing.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::Function;
use log::{error, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, PointerEvent, Window};

use crate::canvas::CanvasSurface;
use crate::config::FieldConfig;
use crate::error::FieldError;
use crate::input::InputTracker;
use crate::lifecycle::{FieldController, FrameHandle, Host};
use crate::simulator::Bounds;
use crate::utils::Timer;

type BrowserController = FieldController<CanvasSurface, BrowserHost>;

fn js_error(context: &str, value: JsValue) -> FieldError {
    FieldError::Host(format!("{}: {:?}", context, value))
}

fn browser_window() -> Result<Window, FieldError> {
    web_sys::window().ok_or_else(|| FieldError::Host("no global window".into()))
}

pub fn viewport_bounds(window: &Window) -> Bounds {
    let read = |value: Result<JsValue, JsValue>| value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Bounds::new(read(window.inner_width()), read(window.inner_height()))
}

pub struct BrowserHost {
    window: Window,
    frame_callback: Option<Closure<dyn FnMut()>>,
    resize_callback: Option<Closure<dyn FnMut()>>,
}

impl BrowserHost {
    pub fn new(window: Window) -> Self {
        BrowserHost {
            window,
            frame_callback: None,
            resize_callback: None,
        }
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    fn install(&mut self, frame: Closure<dyn FnMut()>, resize: Closure<dyn FnMut()>) {
        self.frame_callback = Some(frame);
        self.resize_callback = Some(resize);
    }
}

impl Host for BrowserHost {
    fn request_frame(&mut self) -> Result<FrameHandle, FieldError> {
        let callback = self
            .frame_callback
            .as_ref()
            .ok_or_else(|| FieldError::Host("frame callback not installed".into()))?;
        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref::<Function>())
            .map_err(|e| js_error("requestAnimationFrame failed", e))
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Err(e) = self.window.cancel_animation_frame(handle) {
            warn!("cancelAnimationFrame failed: {:?}", e);
        }
    }

    fn watch_resize(&mut self) -> Result<(), FieldError> {
        let callback = self
            .resize_callback
            .as_ref()
            .ok_or_else(|| FieldError::Host("resize callback not installed".into()))?;
        self.window
            .add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref::<Function>())
            .map_err(|e| js_error("adding resize listener failed", e))
    }

    fn unwatch_resize(&mut self) {
        if let Some(callback) = &self.resize_callback {
            if let Err(e) = self
                .window
                .remove_event_listener_with_callback("resize", callback.as_ref().unchecked_ref::<Function>())
            {
                warn!("removing resize listener failed: {:?}", e);
            }
        }
    }
}

fn install_callbacks(controller: &Rc<RefCell<BrowserController>>, profile: bool) {
    let weak: Weak<RefCell<BrowserController>> = Rc::downgrade(controller);
    let frame = Closure::wrap(Box::new(move || {
        let field = match weak.upgrade() {
            Some(field) => field,
            None => return,
        };
        let _timer = if profile {
            Some(Timer::new("ParticleField::tick"))
        } else {
            None
        };
        let result = field.borrow_mut().tick();
        if let Err(e) = result {
            error!("particle field frame failed: {}", e);
        }
    }) as Box<dyn FnMut()>);

    let weak: Weak<RefCell<BrowserController>> = Rc::downgrade(controller);
    let resize = Closure::wrap(Box::new(move || {
        let shared = match weak.upgrade() {
            Some(shared) => shared,
            None => return,
        };
        let mut field = shared.borrow_mut();
        let bounds = viewport_bounds(field.host().window());
        field.surface().fit(bounds);
        if let Err(e) = field.resize(bounds) {
            warn!("ignoring resize: {}", e);
        }
    }) as Box<dyn FnMut()>);

    controller.borrow_mut().host_mut().install(frame, resize);
}

/// A particle field animating on a full-viewport canvas.
#[wasm_bindgen]
pub struct ParticleField {
    controller: Rc<RefCell<BrowserController>>,
}

#[wasm_bindgen]
impl ParticleField {
    /// Mounts a field on `canvas`. `config_json` may be empty for the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config_json: &str) -> Result<ParticleField, JsValue> {
        let config = FieldConfig::from_json(config_json)?;
        let profile = config.profile_frames;
        let window = browser_window()?;
        let bounds = viewport_bounds(&window);

        let surface = CanvasSurface::new(canvas);
        surface.fit(bounds);
        let controller = FieldController::new(config, surface, BrowserHost::new(window))?;
        let controller = Rc::new(RefCell::new(controller));
        install_callbacks(&controller, profile);
        controller.borrow_mut().mount(bounds)?;
        Ok(ParticleField { controller })
    }

    pub fn start(&self) -> Result<(), JsValue> {
        self.controller.borrow_mut().start().map_err(JsValue::from)
    }

    /// Stops the loop and detaches the resize listener. Terminal.
    pub fn dispose(&self) {
        self.controller.borrow_mut().dispose();
    }

    pub fn frame_count(&self) -> f64 {
        self.controller.borrow().frame_count() as f64
    }

    pub fn particle_count(&self) -> usize {
        self.controller.borrow().particles().len()
    }

    pub fn edge_count(&self) -> usize {
        self.controller.borrow().last_edge_count()
    }

    pub fn state(&self) -> String {
        self.controller.borrow().state().name().to_owned()
    }
}

/// `pointermove` and `scroll` listeners feeding an [`InputTracker`].
/// Dropping it removes both listeners.
pub struct InputListeners {
    window: Window,
    pointer: Closure<dyn FnMut(PointerEvent)>,
    scroll: Closure<dyn FnMut()>,
}

impl InputListeners {
    pub fn attach(window: &Window, tracker: &InputTracker) -> Result<InputListeners, FieldError> {
        let pointer_tracker = tracker.clone();
        let pointer = Closure::wrap(Box::new(move |event: PointerEvent| {
            pointer_tracker.on_pointer_move(event.client_x() as f64, event.client_y() as f64);
        }) as Box<dyn FnMut(PointerEvent)>);

        let scroll_tracker = tracker.clone();
        let scroll_window = window.clone();
        let scroll = Closure::wrap(Box::new(move || {
            if let Ok(offset) = scroll_window.scroll_y() {
                scroll_tracker.on_scroll(offset);
            }
        }) as Box<dyn FnMut()>);

        window
            .add_event_listener_with_callback("pointermove", pointer.as_ref().unchecked_ref::<Function>())
            .map_err(|e| js_error("adding pointermove listener failed", e))?;
        let listeners = InputListeners {
            window: window.clone(),
            pointer,
            scroll,
        };
        window
            .add_event_listener_with_callback("scroll", listeners.scroll.as_ref().unchecked_ref::<Function>())
            .map_err(|e| js_error("adding scroll listener failed", e))?;
        Ok(listeners)
    }
}

impl Drop for InputListeners {
    fn drop(&mut self) {
        if let Err(e) = self
            .window
            .remove_event_listener_with_callback("pointermove", self.pointer.as_ref().unchecked_ref::<Function>())
        {
            warn!("removing pointermove listener failed: {:?}", e);
        }
        if let Err(e) = self
            .window
            .remove_event_listener_with_callback("scroll", self.scroll.as_ref().unchecked_ref::<Function>())
        {
            warn!("removing scroll listener failed: {:?}", e);
        }
    }
}

/// Pointer and scroll state for gradient and parallax layers.
#[wasm_bindgen]
pub struct PointerTracker {
    tracker: InputTracker,
    listeners: Option<InputListeners>,
}

#[wasm_bindgen]
impl PointerTracker {
    #[wasm_bindgen(constructor)]
    pub fn new() -> PointerTracker {
        PointerTracker {
            tracker: InputTracker::new(),
            listeners: None,
        }
    }

    pub fn attach(&mut self) -> Result<(), JsValue> {
        if self.listeners.is_none() {
            let window = browser_window()?;
            self.listeners = Some(InputListeners::attach(&window, &self.tracker)?);
        }
        Ok(())
    }

    pub fn detach(&mut self) {
        self.listeners = None;
    }

    pub fn pointer_x(&self) -> f64 {
        self.tracker.snapshot().pointer[0]
    }

    pub fn pointer_y(&self) -> f64 {
        self.tracker.snapshot().pointer[1]
    }

    pub fn scroll_offset(&self) -> f64 {
        self.tracker.snapshot().scroll_offset
    }

    /// Css `background-position` style value, e.g. `"25.0% 40.0%"`.
    pub fn gradient_css(&self) -> String {
        let bounds = match browser_window() {
            Ok(window) => viewport_bounds(&window),
            Err(_) => Bounds::new(0.0, 0.0),
        };
        let [x, y] = self.tracker.gradient_position(bounds);
        format!("{:.1}% {:.1}%", x, y)
    }

    pub fn parallax(&self, factor: f64) -> f64 {
        self.tracker.parallax_offset(factor)
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        PointerTracker::new()
    }
}
