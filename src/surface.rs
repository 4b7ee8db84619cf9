// The drawing surface the renderer paints onto
// Colors are css strings so a 2d canvas context can take them as-is

use crate::simulator::Bounds;

pub trait DrawingSurface {
    /// Whether a drawing context is available right now. Implementations may
    /// retry acquiring one here; returning false skips this tick's paint.
    fn acquire(&mut self) -> bool;

    /// Clears `bounds` to fully transparent.
    fn clear(&mut self, bounds: Bounds);

    fn fill_disc(&mut self, center: [f64; 2], radius: f64, fill: &str);

    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], stroke: &str, line_width: f64);
}
