//! # Animation State Machine
//!
//! One global phase drives every particle:
//!
//! ```text
//! Playback ──> Wave ──> Delay ──> FadeOut ──> Done
//! ```
//!
//! - **Playback**: particles replay their precomputed trajectories.
//! - **Wave**: a ripple crosses the text left to right, pushing spheres
//!   towards the viewer and swelling them.
//! - **Delay**: nothing moves.
//! - **FadeOut**: each sphere shrinks to nothing over its own duration.
//! - **Done**: absorbing; ticks change nothing.
//!
//! ## Determinism
//!
//! Time is an integer tick counter times `delta_time`; no wall clock, no
//! float accumulation. A phase entered during tick `n` starts at tick
//! `n + 1`, so the first tick of every timed phase sees `t_rel = 0`.

use std::f32::consts::PI;
use std::fmt;

use crate::config::AnimationConfig;
use crate::particle::Particle;
use crate::trajectory::TrajectoryArena;

/// Horizontal extent of the text, captured on the first wave tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveBounds {
    /// Smallest particle `x`.
    pub x0: f32,
    /// Largest particle `x`.
    pub x1: f32,
}

impl WaveBounds {
    /// Extent of the given particles, `None` for an empty set.
    #[must_use]
    pub fn of(particles: &[Particle]) -> Option<Self> {
        particles.iter().fold(None, |bounds, p| {
            let x = p.center.x;
            Some(match bounds {
                None => Self { x0: x, x1: x },
                Some(b) => Self {
                    x0: b.x0.min(x),
                    x1: b.x1.max(x),
                },
            })
        })
    }

    /// A zero-width extent cannot be normalized; nothing is ever inside the
    /// wave window.
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        let span = self.x1 - self.x0;
        span.is_nan() || span <= 0.0
    }
}

/// Current phase, with the timer state it needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// Replaying trajectory frame `frame`.
    Playback {
        /// Next trajectory frame to show.
        frame: usize,
    },
    /// Traveling wave.
    Wave {
        /// First tick of the phase.
        start: u64,
        /// Text extent, captured on the first wave tick.
        bounds: Option<WaveBounds>,
    },
    /// Pause before the fade-out.
    Delay {
        /// First tick of the phase.
        start: u64,
    },
    /// Spheres shrinking away.
    FadeOut {
        /// First tick of the phase.
        start: u64,
    },
    /// Finished.
    Done,
}

impl Phase {
    /// The phase without its timer state.
    #[must_use]
    pub const fn kind(&self) -> PhaseKind {
        match self {
            Self::Playback { .. } => PhaseKind::Playback,
            Self::Wave { .. } => PhaseKind::Wave,
            Self::Delay { .. } => PhaseKind::Delay,
            Self::FadeOut { .. } => PhaseKind::FadeOut,
            Self::Done => PhaseKind::Done,
        }
    }
}

/// Phase identifiers, ordered as they are played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PhaseKind {
    /// Trajectory replay.
    Playback,
    /// Traveling wave.
    Wave,
    /// Pause.
    Delay,
    /// Shrinking.
    FadeOut,
    /// Finished.
    Done,
}

impl PhaseKind {
    /// All phases in play order.
    pub const ALL: [Self; 5] = [
        Self::Playback,
        Self::Wave,
        Self::Delay,
        Self::FadeOut,
        Self::Done,
    ];

    /// Position in [`PhaseKind::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Human readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Playback => "playback",
            Self::Wave => "wave",
            Self::Delay => "delay",
            Self::FadeOut => "fade-out",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The global animation state.
#[derive(Debug, Clone)]
pub struct Animation {
    phase: Phase,
    /// Ticks processed so far.
    tick: u64,
    config: AnimationConfig,
}

impl Animation {
    /// Creates an animation at the start of playback.
    #[must_use]
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            phase: Phase::Playback { frame: 0 },
            tick: 0,
            config,
        }
    }

    /// Current phase.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Ticks processed so far.
    #[inline]
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    /// Simulated seconds elapsed.
    #[must_use]
    pub fn time(&self) -> f32 {
        self.tick as f32 * self.config.delta_time
    }

    /// True once the animation reached [`Phase::Done`].
    #[inline]
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Animation parameters.
    #[must_use]
    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Advances one tick, mutating particle centers and radii in place.
    ///
    /// Returns `true` while the animation is running, including the tick
    /// that reaches [`Phase::Done`]. Ticking a finished animation is legal,
    /// changes nothing and returns `false`.
    pub fn tick(&mut self, particles: &mut [Particle], trajectories: &TrajectoryArena) -> bool {
        if self.phase == Phase::Done {
            return false;
        }

        if particles.is_empty() {
            self.transition(Phase::Done);
            self.tick += 1;
            return false;
        }

        let next = match self.phase {
            Phase::Playback { frame } => {
                if play_frame(particles, trajectories, frame) {
                    Phase::Playback { frame: frame + 1 }
                } else {
                    Phase::Wave {
                        start: self.tick + 1,
                        bounds: None,
                    }
                }
            }
            Phase::Wave { start, bounds } => {
                let bounds = bounds.or_else(|| {
                    let captured = WaveBounds::of(particles);
                    if let Some(b) = captured {
                        tracing::debug!("wave bounds captured: x0={:.3} x1={:.3}", b.x0, b.x1);
                    }
                    captured
                });
                let t_rel = self.elapsed_since(start);
                if self.wave(particles, bounds, t_rel) {
                    Phase::Wave { start, bounds }
                } else {
                    Phase::Delay {
                        start: self.tick + 1,
                    }
                }
            }
            Phase::Delay { start } => {
                if self.elapsed_since(start) >= self.config.delay {
                    Phase::FadeOut {
                        start: self.tick + 1,
                    }
                } else {
                    Phase::Delay { start }
                }
            }
            Phase::FadeOut { start } => {
                if fade_out(particles, self.elapsed_since(start)) {
                    Phase::FadeOut { start }
                } else {
                    Phase::Done
                }
            }
            Phase::Done => Phase::Done,
        };

        if next.kind() == self.phase.kind() {
            self.phase = next;
        } else {
            self.transition(next);
        }
        self.tick += 1;
        true
    }

    fn transition(&mut self, next: Phase) {
        tracing::info!(
            "animation phase transition: {} -> {} at tick {} ({:.3}s)",
            self.phase.kind(),
            next.kind(),
            self.tick,
            self.time()
        );
        self.phase = next;
    }

    /// Seconds since `start`; zero on the phase's first tick.
    fn elapsed_since(&self, start: u64) -> f32 {
        self.tick.saturating_sub(start) as f32 * self.config.delta_time
    }

    /// Applies the traveling wave. Returns `true` while any particle is
    /// inside its window.
    fn wave(&self, particles: &mut [Particle], bounds: Option<WaveBounds>, t_rel: f32) -> bool {
        let Some(bounds) = bounds.filter(|b| !b.is_degenerate()) else {
            tracing::debug!("wave skipped: text has no horizontal extent");
            return false;
        };

        let AnimationConfig {
            wave_width,
            wave_strength,
            wave_speed,
            wave_scale,
            ..
        } = self.config;
        let span = bounds.x1 - bounds.x0;

        let mut in_window = false;
        for p in particles.iter_mut() {
            let dx = (p.center.x - bounds.x0) / span;
            let mut t_wave = t_rel * wave_speed - dx;

            if (0.0..=wave_width).contains(&t_wave) {
                t_wave /= wave_width;
                let wave = 1.0 + (PI * (2.0 * t_wave - 0.5)).sin();
                p.center.z = p.end_pos.z + wave_strength * wave;
                p.radius = p.ref_radius * (1.0 + wave_scale * triangular_falloff(t_wave));
                in_window = true;
            }
        }
        in_window
    }
}

/// Shows trajectory frame `frame`. Particles whose buffer is exhausted sit
/// at their resting position. Returns `true` if any particle still had a
/// frame to show.
fn play_frame(particles: &mut [Particle], trajectories: &TrajectoryArena, frame: usize) -> bool {
    let mut updated = false;
    for (id, p) in particles.iter_mut().enumerate() {
        match trajectories.sample(id, frame) {
            Some(position) => {
                p.center = position;
                updated = true;
            }
            None => p.center = p.end_pos,
        }
    }
    updated
}

/// Shrinks every particle. Returns `true` while any particle is visible.
fn fade_out(particles: &mut [Particle], t_rel: f32) -> bool {
    let mut visible = false;
    for p in particles.iter_mut() {
        let scale = (1.0 - t_rel / p.fade_off_duration).max(0.0);
        p.radius = p.ref_radius * scale;
        if scale > 0.0 {
            visible = true;
        }
    }
    visible
}

/// Tent function over `[0, 1]` peaking at `0.5` with value `0.5`.
#[inline]
fn triangular_falloff(t: f32) -> f32 {
    let ramp = if t < 0.5 { t } else { 1.0 - t };
    ramp.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrajectoryConfig;
    use glyphfall_shared::{Vec3, DELTA_TIME};

    fn row(count: usize) -> Vec<Particle> {
        (0..count)
            .map(|i| {
                let mut p = Particle::at_rest(Vec3::new(i as f32 * 0.1, 0.3, 0.0), 0.01);
                p.fade_off_duration = 0.5;
                p
            })
            .collect()
    }

    fn arena(particles: &[Particle], frames: usize) -> TrajectoryArena {
        let config = TrajectoryConfig {
            num_frames: frames,
            ..TrajectoryConfig::default()
        };
        TrajectoryArena::compute(particles, &config, DELTA_TIME)
    }

    #[test]
    fn test_triangular_falloff() {
        assert_eq!(triangular_falloff(0.0), 0.0);
        assert_eq!(triangular_falloff(0.5), 0.5);
        assert_eq!(triangular_falloff(1.0), 0.0);
        assert_eq!(triangular_falloff(0.25), 0.25);
    }

    #[test]
    fn test_playback_replays_frames() {
        let mut particles = row(3);
        let trajectories = arena(&particles, 4);
        let mut anim = Animation::new(AnimationConfig::default());

        for frame in 0..4 {
            assert!(anim.tick(&mut particles, &trajectories));
            for (id, p) in particles.iter().enumerate() {
                assert_eq!(p.center, trajectories.positions(id)[frame]);
            }
        }
        assert_eq!(anim.phase(), Phase::Playback { frame: 4 });

        // Buffers exhausted: particles snap home and the wave starts.
        assert!(anim.tick(&mut particles, &trajectories));
        assert!(particles.iter().all(|p| p.center == p.end_pos));
        assert_eq!(anim.phase(), Phase::Wave { start: 5, bounds: None });
    }

    #[test]
    fn test_wave_first_tick_hits_leftmost() {
        let mut particles = row(5);
        let trajectories = arena(&particles, 1);
        let mut anim = Animation::new(AnimationConfig::default());
        anim.tick(&mut particles, &trajectories);
        anim.tick(&mut particles, &trajectories);
        assert_eq!(anim.phase().kind(), PhaseKind::Wave);

        anim.tick(&mut particles, &trajectories);
        // t_rel = 0: only the leftmost particle is in its window, at t_wave = 0.
        let first = particles[0];
        assert!((first.center.z - 0.0).abs() < 1e-6);
        assert!((first.radius - first.ref_radius).abs() < 1e-7);
        assert!(matches!(
            anim.phase(),
            Phase::Wave { bounds: Some(WaveBounds { x0, .. }), .. } if x0 == 0.0
        ));
    }

    #[test]
    fn test_wave_crest_values() {
        let mut particles = row(5);
        let trajectories = arena(&particles, 1);
        let mut anim = Animation::new(AnimationConfig::default());
        let AnimationConfig {
            wave_strength,
            wave_scale,
            ..
        } = *anim.config();
        anim.tick(&mut particles, &trajectories);
        anim.tick(&mut particles, &trajectories);
        assert_eq!(anim.phase().kind(), PhaseKind::Wave);

        // Wave tick `m` runs at t_rel = m * dt.
        let mut wave_ticks = 0;
        let mut advance_to = |m: u32, particles: &mut Vec<Particle>| {
            while wave_ticks <= m {
                assert!(anim.tick(particles, &trajectories));
                wave_ticks += 1;
            }
        };

        // Leftmost particle (dx = 0), t_rel = 0.125: quarter way through its window.
        advance_to(5, &mut particles);
        let p = particles[0];
        assert!((p.center.z - (p.end_pos.z + wave_strength)).abs() < 1e-5);
        assert!((p.radius - p.ref_radius * (1.0 + wave_scale * 0.25)).abs() < 1e-6);

        // t_rel = 0.25: crest.
        advance_to(10, &mut particles);
        let p = particles[0];
        assert!((p.center.z - (p.end_pos.z + 2.0 * wave_strength)).abs() < 1e-5);
        assert!((p.radius - p.ref_radius * (1.0 + wave_scale * 0.5)).abs() < 1e-6);

        // Middle particle (dx = 0.5) crests at t_rel = 0.75.
        advance_to(30, &mut particles);
        let p = particles[2];
        assert!((p.center.z - (p.end_pos.z + 2.0 * wave_strength)).abs() < 1e-5);
        assert!((p.radius - p.ref_radius * (1.0 + wave_scale * 0.5)).abs() < 1e-5);
    }

    #[test]
    fn test_wave_radius_bounded() {
        let mut particles = row(20);
        let trajectories = arena(&particles, 1);
        let mut anim = Animation::new(AnimationConfig::default());
        let max_scale = 1.0 + anim.config().wave_scale * 0.5;

        while anim.phase().kind() <= PhaseKind::Wave {
            anim.tick(&mut particles, &trajectories);
            for p in &particles {
                assert!(p.radius >= 0.0);
                assert!(p.radius <= p.ref_radius * max_scale + 1e-6);
                assert!(p.center.z >= -1e-6 && p.center.z <= 0.1 + 1e-6);
            }
        }
        assert_eq!(anim.phase().kind(), PhaseKind::Delay);
    }

    #[test]
    fn test_degenerate_wave_moves_on() {
        let mut particles = row(1);
        let trajectories = arena(&particles, 1);
        let mut anim = Animation::new(AnimationConfig::default());
        anim.tick(&mut particles, &trajectories);
        anim.tick(&mut particles, &trajectories);
        assert_eq!(anim.phase().kind(), PhaseKind::Wave);

        assert!(anim.tick(&mut particles, &trajectories));
        assert_eq!(anim.phase().kind(), PhaseKind::Delay);
        assert!(particles[0].center.is_finite());
        assert_eq!(particles[0].radius, particles[0].ref_radius);
    }

    #[test]
    fn test_delay_lasts_one_second() {
        let mut particles = row(1);
        let trajectories = arena(&particles, 1);
        let mut anim = Animation::new(AnimationConfig::default());
        while anim.phase().kind() != PhaseKind::Delay {
            anim.tick(&mut particles, &trajectories);
        }
        let entered = anim.ticks();
        let snapshot = particles.clone();
        while anim.phase().kind() == PhaseKind::Delay {
            anim.tick(&mut particles, &trajectories);
        }
        assert_eq!(particles, snapshot);
        // 40 ticks of 25ms, plus the tick that notices.
        assert_eq!(anim.ticks() - entered, 41);
    }

    #[test]
    fn test_fade_reaches_zero_and_stays() {
        let mut particles = row(1);
        let trajectories = arena(&particles, 1);
        let mut anim = Animation::new(AnimationConfig::default());
        while anim.phase().kind() != PhaseKind::FadeOut {
            anim.tick(&mut particles, &trajectories);
        }

        // First fade tick: t_rel = 0, full size.
        anim.tick(&mut particles, &trajectories);
        assert_eq!(particles[0].radius, particles[0].ref_radius);

        // 20 more ticks: t_rel = 0.5 = fade duration.
        for _ in 0..20 {
            anim.tick(&mut particles, &trajectories);
        }
        assert!(particles[0].radius.abs() < 1e-6);

        while anim.tick(&mut particles, &trajectories) {
            assert!(particles[0].radius >= 0.0);
            assert!(particles[0].radius < 1e-6);
        }
        assert!(anim.is_done());
        assert_eq!(particles[0].radius, 0.0);
    }

    #[test]
    fn test_empty_set_finishes_at_once() {
        let mut particles: Vec<Particle> = Vec::new();
        let trajectories = arena(&particles, 150);
        let mut anim = Animation::new(AnimationConfig::default());
        assert!(!anim.tick(&mut particles, &trajectories));
        assert!(anim.is_done());
        assert!(!anim.tick(&mut particles, &trajectories));
    }

    #[test]
    fn test_done_is_absorbing() {
        let mut particles = row(3);
        let trajectories = arena(&particles, 2);
        let mut anim = Animation::new(AnimationConfig::default());
        while anim.tick(&mut particles, &trajectories) {}

        let snapshot = particles.clone();
        let ticks = anim.ticks();
        for _ in 0..10 {
            assert!(!anim.tick(&mut particles, &trajectories));
        }
        assert_eq!(particles, snapshot);
        assert_eq!(anim.ticks(), ticks);
        assert_eq!(anim.phase(), Phase::Done);
    }

    #[test]
    fn test_phase_kind_order() {
        assert!(PhaseKind::ALL.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(PhaseKind::FadeOut.index(), 3);
        assert_eq!(PhaseKind::Wave.to_string(), "wave");
    }
}
