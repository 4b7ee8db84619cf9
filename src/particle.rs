// Particle struct and the store that owns the current generation of them

use rand::Rng;

use crate::color::Color;
use crate::config::FieldConfig;
use crate::simulator::Bounds;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub id: u32,
    pub pos: [f64; 2],
    pub vel: [f64; 2],
    pub size: f64,
    pub opacity: f64,
    pub color: Color,
}

impl Particle {
    pub fn new(id: u32, pos: [f64; 2], vel: [f64; 2], size: f64, opacity: f64, color: Color) -> Particle {
        Particle {
            id,
            pos,
            vel,
            size,
            opacity,
            color,
        }
    }
}

/// Owns the particles of the current generation.
///
/// A generation is replaced as a whole; ids keep counting up across
/// generations so no id is ever reused by a later generation.
#[derive(Debug, Default)]
pub struct ParticleStore {
    particles: Vec<Particle>,
    next_id: u32,
    generation: u64,
}

impl ParticleStore {
    pub fn new() -> ParticleStore {
        ParticleStore::default()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Number of generations spawned so far. Zero before the first one.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Discards the current particles and spawns `config.particle_count` new ones
    /// uniformly across `bounds`.
    pub fn regenerate<R: Rng>(&mut self, config: &FieldConfig, palette: &[Color], bounds: Bounds, rng: &mut R) {
        let mut particles = Vec::with_capacity(config.particle_count);
        for _ in 0..config.particle_count {
            let pos = [rng.gen::<f64>() * bounds.width, rng.gen::<f64>() * bounds.height];
            let vel = [
                config.speed_range.lerp(rng.gen::<f64>()),
                config.speed_range.lerp(rng.gen::<f64>()),
            ];
            let size = config.size_range.lerp(rng.gen::<f64>());
            let opacity = config.opacity_range.lerp(rng.gen::<f64>());
            let color = palette[rng.gen_range(0, palette.len())];
            particles.push(Particle::new(self.next_id, pos, vel, size, opacity, color));
            self.next_id = self.next_id.wrapping_add(1);
        }
        self.particles = particles;
        self.generation += 1;
    }

    /// Keeps the current particles, scaling their positions from `from` onto `to`.
    /// An axis with no extent in `from` has no proportions to keep; positions
    /// on it collapse to 0.
    pub fn rescale(&mut self, from: Bounds, to: Bounds) {
        let sx = if from.width > 0.0 { to.width / from.width } else { 0.0 };
        let sy = if from.height > 0.0 { to.height / from.height } else { 0.0 };
        for p in &mut self.particles {
            p.pos[0] = (p.pos[0] * sx).max(0.0).min(to.width);
            p.pos[1] = (p.pos[1] * sy).max(0.0).min(to.height);
        }
    }

    /// Swaps in the next state of the same generation.
    pub(crate) fn replace(&mut self, particles: Vec<Particle>) {
        debug_assert_eq!(particles.len(), self.particles.len());
        self.particles = particles;
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}
