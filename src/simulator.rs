// One Euler step of the particle field with reflecting walls

use vecmath::vec2_add;

use crate::particle::Particle;

/// Viewport size in px. Particles live in `[0, width] x [0, height]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Bounds {
        Bounds {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn contains(&self, pos: [f64; 2]) -> bool {
        pos[0] >= 0.0 && pos[0] <= self.width && pos[1] >= 0.0 && pos[1] <= self.height
    }
}

/// Advances every particle by one tick and returns the next state.
///
/// The input is never touched. A component that reaches or crosses a wall is
/// clamped onto it and its velocity sign flips. Speed never changes.
pub fn advance(particles: &[Particle], bounds: Bounds) -> Vec<Particle> {
    particles.iter().map(|p| step(p, bounds)).collect()
}

pub fn step(particle: &Particle, bounds: Bounds) -> Particle {
    let tentative = vec2_add(particle.pos, particle.vel);
    let limits = [bounds.width, bounds.height];
    let mut next = *particle;
    for axis in 0..2 {
        let (pos, vel) = reflect(tentative[axis], particle.vel[axis], limits[axis]);
        next.pos[axis] = pos;
        next.vel[axis] = vel;
    }
    next
}

// Reaching the wall counts as a hit. Only a velocity heading into the wall is
// flipped, so a clamped particle always leaves inward on the next tick.
fn reflect(pos: f64, vel: f64, limit: f64) -> (f64, f64) {
    if pos <= 0.0 {
        (0.0, if vel < 0.0 { -vel } else { vel })
    } else if pos >= limit {
        (limit, if vel > 0.0 { -vel } else { vel })
    } else {
        (pos, vel)
    }
}
