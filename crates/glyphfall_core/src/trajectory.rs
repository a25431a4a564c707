//! # Trajectory Precomputer
//!
//! Each particle gets a fixed number of positions describing a projectile
//! bounce that ends at its target. The samples are generated walking time
//! *backwards* from the target and stored from the last slot to the first,
//! so playing the buffer forward looks like the particle falling in from
//! afar and landing in place.
//!
//! All samples live in one contiguous [`TrajectoryArena`], `frames_per_particle`
//! entries per particle, indexed by particle id.

use glyphfall_shared::Vec3;

use crate::config::TrajectoryConfig;
use crate::particle::Particle;

/// Contiguous storage of every particle's trajectory.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryArena {
    /// Samples of particle `i` live at `i * frames_per_particle..`.
    samples: Vec<Vec3>,
    /// Samples per particle.
    frames_per_particle: usize,
}

impl TrajectoryArena {
    /// Precomputes trajectories for all `particles`.
    ///
    /// `dt` is the simulation tick; one sample is produced per tick.
    #[must_use]
    pub fn compute(particles: &[Particle], config: &TrajectoryConfig, dt: f32) -> Self {
        let frames = config.num_frames;
        let mut samples = vec![Vec3::ZERO; particles.len() * frames];

        for (particle, slot) in particles.iter().zip(samples.chunks_exact_mut(frames.max(1))) {
            fill_bounce(particle, config, dt, slot);
        }

        Self {
            samples,
            frames_per_particle: frames,
        }
    }

    /// Samples per particle.
    #[inline]
    #[must_use]
    pub fn frames_per_particle(&self) -> usize {
        self.frames_per_particle
    }

    /// Number of particles stored.
    #[inline]
    #[must_use]
    pub fn particle_count(&self) -> usize {
        if self.frames_per_particle == 0 {
            0
        } else {
            self.samples.len() / self.frames_per_particle
        }
    }

    /// Trajectory of one particle, first frame first.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a particle of this arena.
    #[must_use]
    pub fn positions(&self, id: usize) -> &[Vec3] {
        let start = id * self.frames_per_particle;
        &self.samples[start..start + self.frames_per_particle]
    }

    /// Sample `frame` of particle `id`, or `None` once the buffer is
    /// exhausted.
    #[inline]
    #[must_use]
    pub fn sample(&self, id: usize, frame: usize) -> Option<Vec3> {
        if frame < self.frames_per_particle {
            self.samples.get(id * self.frames_per_particle + frame).copied()
        } else {
            None
        }
    }
}

/// Smallest drop height, keeps the bounce period non-zero.
const MIN_DROP_HEIGHT: f32 = 1e-3;

/// Bounce period and peak speed for a particle dropped from `height` above
/// the floor.
#[must_use]
pub fn bounce_parameters(height: f32, gravity: f32) -> (f32, f32) {
    let period = (8.0 * height / gravity).sqrt();
    let peak_speed = (2.0 * height * gravity).sqrt();
    (period, peak_speed)
}

/// Writes one particle's trajectory into `slot`, last sample first.
fn fill_bounce(particle: &Particle, config: &TrajectoryConfig, dt: f32, slot: &mut [Vec3]) {
    let g = config.gravity;
    // Targets at or below the floor would give a zero period.
    let height = (particle.max_height - config.floor).max(MIN_DROP_HEIGHT);
    let (period, peak_speed) = bounce_parameters(height, g);

    let mut t = 0.0_f32;
    let mut pos = particle.center;
    for sample in slot.iter_mut().rev() {
        // Half-period offset puts t = 0 at the apex of the arc.
        let t_rem = (0.5 * period + t) % period;
        pos.y = config.floor + particle.ref_radius - 0.5 * g * t_rem * t_rem + peak_speed * t_rem;

        pos.x += dt * particle.velocity.x;
        pos.z += dt * particle.velocity.y;

        *sample = pos;
        t += dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphfall_shared::{Vec2, DELTA_TIME};

    fn particle(target: Vec3, velocity: Vec2) -> Particle {
        let mut p = Particle::at_rest(target, 0.012);
        p.velocity = velocity;
        p
    }

    #[test]
    fn test_fixed_length() {
        let particles = vec![
            particle(Vec3::new(0.0, 0.5, 0.0), Vec2::new(0.1, -1.0)),
            particle(Vec3::new(1.0, 0.2, 0.0), Vec2::new(-0.1, -0.9)),
        ];
        let arena = TrajectoryArena::compute(&particles, &TrajectoryConfig::default(), DELTA_TIME);
        assert_eq!(arena.particle_count(), 2);
        assert_eq!(arena.positions(0).len(), 150);
        assert_eq!(arena.positions(1).len(), 150);
        assert_eq!(arena.sample(1, 149), Some(arena.positions(1)[149]));
        assert_eq!(arena.sample(1, 150), None);
    }

    #[test]
    fn test_last_sample_at_apex() {
        let target = Vec3::new(0.3, 0.4, 0.0);
        let velocity = Vec2::new(0.2, -1.2);
        let p = particle(target, velocity);
        let arena = TrajectoryArena::compute(&[p], &TrajectoryConfig::default(), DELTA_TIME);
        let last = arena.positions(0)[149];

        // Apex of the arc is the target height plus one radius.
        assert!((last.y - (target.y + p.ref_radius)).abs() < 1e-4);
        assert!((last.x - (target.x + DELTA_TIME * velocity.x)).abs() < 1e-6);
        assert!((last.z - (target.z + DELTA_TIME * velocity.y)).abs() < 1e-6);
        assert!(last.distance(p.end_pos) <= p.ref_radius + DELTA_TIME * velocity.length() + 1e-4);
    }

    #[test]
    fn test_drift_accumulates_backwards() {
        let p = particle(Vec3::ZERO, Vec2::new(0.2, -1.0));
        let arena = TrajectoryArena::compute(&[p], &TrajectoryConfig::default(), DELTA_TIME);
        let first = arena.positions(0)[0];
        // 150 ticks of drift away from the target.
        assert!((first.x - 150.0 * DELTA_TIME * 0.2).abs() < 1e-3);
        assert!((first.z + 150.0 * DELTA_TIME).abs() < 1e-3);
    }

    #[test]
    fn test_samples_stay_above_floor() {
        let p = particle(Vec3::new(0.0, 0.5, 0.0), Vec2::ZERO);
        let arena = TrajectoryArena::compute(&[p], &TrajectoryConfig::default(), DELTA_TIME);
        for s in arena.positions(0) {
            assert!(s.y >= -1.0 + p.ref_radius - 1e-4);
            assert!(s.y <= p.max_height + p.ref_radius + 1e-4);
        }
    }

    #[test]
    fn test_bounce_parameters() {
        let (period, peak) = bounce_parameters(1.5, 9.81);
        assert!((period - (8.0 * 1.5 / 9.81_f32).sqrt()).abs() < 1e-6);
        assert!((peak - (2.0 * 1.5 * 9.81_f32).sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_target_below_floor_stays_finite() {
        let p = particle(Vec3::new(0.0, -1.5, 0.0), Vec2::ZERO);
        let arena = TrajectoryArena::compute(&[p], &TrajectoryConfig::default(), DELTA_TIME);
        assert!(arena.positions(0).iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_empty_set() {
        let arena = TrajectoryArena::compute(&[], &TrajectoryConfig::default(), DELTA_TIME);
        assert_eq!(arena.particle_count(), 0);
    }
}
