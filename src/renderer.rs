// Renderer that paints one frame of the field: a transparent clear, one filled
// disc per particle, then a thin line per connection edge.

use log::trace;

use crate::color::alpha_byte;
use crate::config::FieldConfig;
use crate::connections::ConnectionEdge;
use crate::particle::Particle;
use crate::simulator::Bounds;
use crate::surface::DrawingSurface;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Renderer {
    pub edge_alpha: u8,
    pub line_width: f64,
}

impl Renderer {
    pub fn new(config: &FieldConfig) -> Self {
        Renderer {
            edge_alpha: config.edge_alpha,
            line_width: config.line_width,
        }
    }

    /// Paints a frame. Returns false, having drawn nothing, when the surface
    /// has no drawing context yet.
    pub fn paint<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        bounds: Bounds,
        particles: &[Particle],
        edges: &[ConnectionEdge],
    ) -> bool {
        if !surface.acquire() {
            trace!("drawing surface unavailable, skipping paint");
            return false;
        }
        surface.clear(bounds);

        for p in particles {
            let fill = p.color.to_css_with_alpha(alpha_byte(p.opacity));
            surface.fill_disc(p.pos, p.size, &fill);
        }

        // edge alpha is fixed, independent of distance
        for edge in edges {
            let stroke = edge.color.to_css_with_alpha(self.edge_alpha);
            surface.stroke_line(edge.from, edge.to, &stroke, self.line_width);
        }
        true
    }
}
