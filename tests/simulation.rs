use particle_field::connections::{edges, edges_bucketed};
use particle_field::simulator::advance;
use particle_field::{Bounds, Color, FieldConfig, Particle, ParticleStore};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn generation(bounds: Bounds, seed: u64) -> Vec<Particle> {
    let config = FieldConfig::default();
    let palette = config.parse_palette().unwrap();
    let mut store = ParticleStore::new();
    store.regenerate(&config, &palette, bounds, &mut StdRng::seed_from_u64(seed));
    store.particles().to_vec()
}

fn particle(pos: [f64; 2], vel: [f64; 2]) -> Particle {
    Particle::new(7, pos, vel, 3.0, 0.5, Color::new(0x8b, 0x5c, 0xf6))
}

#[test]
fn particles_stay_in_bounds_for_many_ticks() {
    let bounds = Bounds::new(320.0, 240.0);
    let mut particles = generation(bounds, 21);
    for _ in 0..5_000 {
        particles = advance(&particles, bounds);
        for p in &particles {
            assert!(bounds.contains(p.pos), "{:?} escaped", p.pos);
        }
    }
}

#[test]
fn speed_only_changes_sign_and_only_at_walls() {
    let bounds = Bounds::new(200.0, 150.0);
    let mut particles = generation(bounds, 8);
    for _ in 0..2_000 {
        let next = advance(&particles, bounds);
        assert_eq!(next.len(), particles.len());
        for (before, after) in particles.iter().zip(&next) {
            let limits = [bounds.width, bounds.height];
            for axis in 0..2 {
                assert_eq!(before.vel[axis].abs(), after.vel[axis].abs());
                if before.vel[axis] != after.vel[axis] {
                    let at_wall = after.pos[axis] == 0.0 || after.pos[axis] == limits[axis];
                    assert!(at_wall, "flipped away from a wall at {:?}", after.pos);
                }
            }
            assert_eq!(before.id, after.id);
            assert_eq!(before.size, after.size);
            assert_eq!(before.opacity, after.opacity);
            assert_eq!(before.color, after.color);
        }
        particles = next;
    }
}

#[test]
fn still_particles_never_move() {
    let bounds = Bounds::new(100.0, 100.0);
    let start: Vec<Particle> = generation(bounds, 4)
        .into_iter()
        .map(|mut p| {
            p.vel = [0.0, 0.0];
            p
        })
        .collect();
    let mut particles = start.clone();
    for _ in 0..100 {
        particles = advance(&particles, bounds);
    }
    assert_eq!(particles, start);
}

#[test]
fn drifts_then_reflects_at_the_right_edge() {
    let bounds = Bounds::new(800.0, 600.0);
    let first = advance(&[particle([799.0, 300.0], [0.5, 0.0])], bounds);
    assert_eq!(first[0].pos, [799.5, 300.0]);
    assert_eq!(first[0].vel, [0.5, 0.0]);

    let second = advance(&first, bounds);
    assert_eq!(second[0].pos, [800.0, 300.0]);
    assert_eq!(second[0].vel, [-0.5, 0.0]);

    let third = advance(&second, bounds);
    assert_eq!(third[0].pos, [799.5, 300.0]);
}

#[test]
fn overshoot_is_clamped_not_carried() {
    let bounds = Bounds::new(800.0, 600.0);
    let next = advance(&[particle([799.5, 300.0], [1.0, 0.0])], bounds);
    assert_eq!(next[0].pos[0], 800.0);
    assert_eq!(next[0].vel[0], -1.0);
}

#[test]
fn edges_are_unique_unordered_pairs() {
    let bounds = Bounds::new(400.0, 300.0);
    let particles = generation(bounds, 99);
    let found = edges(&particles, 100.0);
    assert!(!found.is_empty());
    for edge in &found {
        assert!(edge.a < edge.b);
        assert!(edge.distance < 100.0);
        let mirrored = found.iter().filter(|e| e.a == edge.b && e.b == edge.a).count();
        assert_eq!(mirrored, 0);
        let copies = found.iter().filter(|e| e.a == edge.a && e.b == edge.b).count();
        assert_eq!(copies, 1);
    }

    // a pair is connected exactly when it is within range, whichever way round
    for a in 0..particles.len() {
        for b in 0..particles.len() {
            if a == b {
                continue;
            }
            let (lo, hi) = if a < b { (a, b) } else { (b, a) };
            let listed = found.iter().any(|e| e.a == lo && e.b == hi);
            let dx = particles[a].pos[0] - particles[b].pos[0];
            let dy = particles[a].pos[1] - particles[b].pos[1];
            assert_eq!(listed, (dx * dx + dy * dy).sqrt() < 100.0);
        }
    }
    assert_eq!(found, edges_bucketed(&particles, 100.0));
}

#[test]
fn two_close_one_far() {
    let particles = [
        particle([0.0, 0.0], [0.0, 0.0]),
        particle([50.0, 0.0], [0.0, 0.0]),
        particle([500.0, 500.0], [0.0, 0.0]),
    ];
    let found = edges(&particles, 100.0);
    assert_eq!(found.len(), 1);
    assert_eq!((found[0].a, found[0].b), (0, 1));
}
