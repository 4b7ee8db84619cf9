// Pointer and scroll tracking for the decorative layers around the field
// The particle engine itself never reads this state

use std::cell::Cell;
use std::rc::Rc;

use crate::simulator::Bounds;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct InputState {
    pub pointer: [f64; 2],
    pub scroll_offset: f64,
}

/// Latest pointer position and scroll offset, written on events and read on paint.
/// Clones share the same cell.
#[derive(Clone, Debug, Default)]
pub struct InputTracker {
    state: Rc<Cell<InputState>>,
}

impl InputTracker {
    pub fn new() -> Self {
        InputTracker::default()
    }

    pub fn on_pointer_move(&self, x: f64, y: f64) {
        let mut state = self.state.get();
        state.pointer = [x, y];
        self.state.set(state);
    }

    pub fn on_scroll(&self, offset: f64) {
        let mut state = self.state.get();
        state.scroll_offset = offset;
        self.state.set(state);
    }

    pub fn snapshot(&self) -> InputState {
        self.state.get()
    }

    /// Pointer as a percentage of the viewport, clamped to [0, 100] per axis.
    /// Used to position a radial gradient under the cursor.
    pub fn gradient_position(&self, bounds: Bounds) -> [f64; 2] {
        let pointer = self.state.get().pointer;
        let percent = |v: f64, extent: f64| {
            if extent > 0.0 {
                (v / extent * 100.0).max(0.0).min(100.0)
            } else {
                50.0
            }
        };
        [percent(pointer[0], bounds.width), percent(pointer[1], bounds.height)]
    }

    /// Vertical translation for a parallax layer moving at `factor` times the scroll speed.
    pub fn parallax_offset(&self, factor: f64) -> f64 {
        self.state.get().scroll_offset * factor
    }
}
