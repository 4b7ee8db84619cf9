//! Proximity edges between particles.
//!
//! [`edges`] is the plain all-pairs scan: n(n-1)/2 distance checks per tick,
//! 1225 at the default 50 particles. That is fine for an ambient background
//! and does not scale. [`edges_bucketed`] buckets particles into cells one
//! threshold wide and only compares each cell with its 8 neighbours; it yields the same
//! edge set and is meant for larger particle counts.
//!
//! Both only ever emit `a < b` index pairs, so every unordered pair shows up
//! at most once and never in both directions.

extern crate nalgebra_glm as glm;

use std::collections::HashMap;

use crate::color::Color;
use crate::config::ConnectionStrategy;
use crate::particle::Particle;

/// Two particles closer than the threshold. Derived every tick, never stored.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ConnectionEdge {
    /// Index of the first particle in the slice the edge was computed from.
    pub a: usize,
    pub b: usize,
    pub from: [f64; 2],
    pub to: [f64; 2],
    /// Stroke color, taken from the first particle.
    pub color: Color,
    pub opacity: f64,
    pub distance: f64,
}

fn distance(a: &Particle, b: &Particle) -> f64 {
    glm::distance(&glm::vec2(a.pos[0], a.pos[1]), &glm::vec2(b.pos[0], b.pos[1]))
}

fn edge_between(particles: &[Particle], a: usize, b: usize, threshold: f64) -> Option<ConnectionEdge> {
    let (pa, pb) = (&particles[a], &particles[b]);
    let d = distance(pa, pb);
    if d < threshold {
        Some(ConnectionEdge {
            a,
            b,
            from: pa.pos,
            to: pb.pos,
            color: pa.color,
            opacity: pa.opacity,
            distance: d,
        })
    } else {
        None
    }
}

/// Every unordered pair strictly closer than `threshold`, in `(a, b)` order.
pub fn edges(particles: &[Particle], threshold: f64) -> Vec<ConnectionEdge> {
    let mut out = Vec::new();
    for a in 0..particles.len() {
        for b in (a + 1)..particles.len() {
            if let Some(edge) = edge_between(particles, a, b, threshold) {
                out.push(edge);
            }
        }
    }
    out
}

// Cell coordinates stay far from i64 overflow, so neighbour offsets are safe.
const MAX_CELL_INDEX: f64 = (1u64 << 40) as f64;

/// Same edge set as [`edges`], found through a uniform grid. Output is sorted
/// by `(a, b)` so both searches are interchangeable. Falls back to the
/// all-pairs scan when the threshold is too small to index the viewport.
pub fn edges_bucketed(particles: &[Particle], threshold: f64) -> Vec<ConnectionEdge> {
    if !(threshold > 0.0) {
        return Vec::new();
    }
    let cell_index = |v: f64| {
        let cell = (v / threshold).floor();
        if cell.is_finite() && cell.abs() <= MAX_CELL_INDEX {
            Some(cell as i64)
        } else {
            None
        }
    };

    let mut cells: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
    for (i, p) in particles.iter().enumerate() {
        match (cell_index(p.pos[0]), cell_index(p.pos[1])) {
            (Some(cx), Some(cy)) => cells.entry((cx, cy)).or_insert_with(Vec::new).push(i),
            // threshold too small for a grid over this viewport
            _ => return edges(particles, threshold),
        }
    }

    let mut out = Vec::new();
    for (&(cx, cy), members) in &cells {
        for dx in -1..=1 {
            for dy in -1..=1 {
                let neighbours = match cells.get(&(cx + dx, cy + dy)) {
                    Some(n) => n,
                    None => continue,
                };
                for &a in members {
                    for &b in neighbours {
                        // each unordered pair is visited from both cells; keep a < b only
                        if a < b {
                            if let Some(edge) = edge_between(particles, a, b, threshold) {
                                out.push(edge);
                            }
                        }
                    }
                }
            }
        }
    }
    out.sort_by(|x, y| (x.a, x.b).cmp(&(y.a, y.b)));
    out
}

pub fn edges_with(strategy: ConnectionStrategy, particles: &[Particle], threshold: f64) -> Vec<ConnectionEdge> {
    match strategy {
        ConnectionStrategy::AllPairs => edges(particles, threshold),
        ConnectionStrategy::SpatialGrid => edges_bucketed(particles, threshold),
    }
}
