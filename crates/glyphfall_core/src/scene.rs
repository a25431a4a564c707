//! # Scene
//!
//! The simulation object. A [`Scene`] exclusively owns its particles, their
//! trajectories, the animation state and the static backdrop. The renderer
//! only ever sees read-only views between ticks.
//!
//! ```rust,ignore
//! let mut scene = Scene::new("Hello", &SceneConfig::default(), SceneSeed::new(7))?;
//! let mut upload = Vec::new();
//! while scene.tick() {
//!     scene.write_instances(&mut upload);
//!     renderer.commit(bytemuck::cast_slice(&upload));
//! }
//! ```

use bytemuck::{Pod, Zeroable};
use glyphfall_shared::{Vec3, Vec4};
use rand::Rng;

use crate::animation::{Animation, Phase};
use crate::config::{BackgroundConfig, SceneConfig};
use crate::error::{SceneError, SceneResult};
use crate::particle::{generate_particles, Particle};
use crate::seed::SceneSeed;
use crate::trajectory::TrajectoryArena;

/// Most trajectory samples a scene may hold across all particles.
pub const MAX_TRAJECTORY_SAMPLES: usize = 1 << 25;

/// Per-sphere record handed to a renderer.
///
/// 32 bytes, tightly packed: center, radius, rgba.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SphereInstance {
    /// Sphere center.
    pub center: Vec3,
    /// Sphere radius.
    pub radius: f32,
    /// RGBA color.
    pub color: Vec4,
}

impl SphereInstance {
    /// Size in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();
}

impl From<&Particle> for SphereInstance {
    fn from(p: &Particle) -> Self {
        Self {
            center: p.center,
            radius: p.radius,
            color: p.color,
        }
    }
}

/// One vertex of the backdrop.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BackgroundVertex {
    /// Vertex position.
    pub position: Vec3,
    /// Facing direction.
    pub normal: Vec3,
    /// Vertex color.
    pub color: Vec4,
}

/// The static plane behind the text.
#[derive(Debug, Clone, PartialEq)]
pub struct Background {
    /// Four corners, counter-clockwise seen from the viewer.
    pub vertices: [BackgroundVertex; 4],
    /// Quads as vertex indices.
    pub quads: Vec<[u32; 4]>,
}

impl Background {
    /// Builds a square plane facing `-z`.
    #[must_use]
    pub fn plane(config: &BackgroundConfig) -> Self {
        let e = config.extent;
        let z = config.depth;
        let normal = Vec3::new(0.0, 0.0, -1.0);
        let corner = |x: f32, y: f32| BackgroundVertex {
            position: Vec3::new(x, y, z),
            normal,
            color: config.color,
        };

        Self {
            vertices: [corner(-e, -e), corner(e, -e), corner(e, e), corner(-e, e)],
            quads: vec![[0, 1, 2, 3]],
        }
    }
}

/// Text particles plus the animation that drives them.
#[derive(Debug, Clone)]
pub struct Scene {
    particles: Vec<Particle>,
    trajectories: TrajectoryArena,
    animation: Animation,
    background: Background,
}

impl Scene {
    /// Builds a scene for `text`, drawing motion from `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SceneError::InvalidConfig`] if `config` fails
    /// validation.
    pub fn new(text: &str, config: &SceneConfig, seed: SceneSeed) -> SceneResult<Self> {
        tracing::info!("building scene with seed {:#x}", seed.value());
        Self::with_rng(text, config, &mut seed.rng())
    }

    /// Builds a scene drawing motion from an injected generator.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidConfig`] if `config` fails validation or
    /// the trajectories of `text` would exceed [`MAX_TRAJECTORY_SAMPLES`].
    pub fn with_rng<R: Rng + ?Sized>(
        text: &str,
        config: &SceneConfig,
        rng: &mut R,
    ) -> SceneResult<Self> {
        config.validate()?;

        let particles = generate_particles(text, &config.layout, &config.motion, rng);
        let samples = particles
            .len()
            .checked_mul(config.trajectory.num_frames)
            .filter(|&n| n <= MAX_TRAJECTORY_SAMPLES)
            .ok_or_else(|| {
                SceneError::InvalidConfig(format!(
                    "{} particles x {} frames exceeds {MAX_TRAJECTORY_SAMPLES} trajectory samples",
                    particles.len(),
                    config.trajectory.num_frames
                ))
            })?;
        let trajectories =
            TrajectoryArena::compute(&particles, &config.trajectory, config.animation.delta_time);

        tracing::info!(
            "scene built: {} particles, {} frames each, {} samples",
            particles.len(),
            trajectories.frames_per_particle(),
            samples
        );

        Ok(Self {
            particles,
            trajectories,
            animation: Animation::new(config.animation.clone()),
            background: Background::plane(&config.background),
        })
    }

    /// Advances the animation one tick.
    ///
    /// Returns `true` if particles changed and should be re-committed to
    /// the renderer; `false` once the animation is over.
    pub fn tick(&mut self) -> bool {
        self.animation.tick(&mut self.particles, &self.trajectories)
    }

    /// Current particle state.
    #[inline]
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Precomputed trajectories, indexed like [`Scene::particles`].
    #[must_use]
    pub fn trajectories(&self) -> &TrajectoryArena {
        &self.trajectories
    }

    /// The static backdrop.
    #[must_use]
    pub fn background(&self) -> &Background {
        &self.background
    }

    /// Animation state.
    #[must_use]
    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.animation.phase()
    }

    /// True once the animation finished.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.animation.is_done()
    }

    /// Number of particles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// True for a scene without particles (blank text).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Refills `out` with the renderer records of every particle. Reuses
    /// the vector's capacity, so steady-state ticks do not allocate.
    pub fn write_instances(&self, out: &mut Vec<SphereInstance>) {
        out.clear();
        out.extend(self.particles.iter().map(SphereInstance::from));
    }

    /// Renderer records of every particle.
    #[must_use]
    pub fn instances(&self) -> Vec<SphereInstance> {
        let mut out = Vec::with_capacity(self.particles.len());
        self.write_instances(&mut out);
        out
    }
}

/// Raw bytes of an instance buffer, ready for upload.
#[must_use]
pub fn instance_bytes(instances: &[SphereInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::PhaseKind;

    #[test]
    fn test_instance_layout() {
        assert_eq!(SphereInstance::SIZE, 32);
        assert_eq!(std::mem::size_of::<BackgroundVertex>(), 40);
    }

    #[test]
    fn test_background_plane() {
        let bg = Background::plane(&BackgroundConfig::default());
        assert_eq!(bg.quads, vec![[0, 1, 2, 3]]);
        for v in &bg.vertices {
            assert_eq!(v.position.z, -10.0);
            assert_eq!(v.position.x.abs(), 20.0);
            assert_eq!(v.normal, Vec3::new(0.0, 0.0, -1.0));
            assert_eq!(v.color, Vec4::new(0.05, 0.05, 0.05, 1.0));
        }
    }

    #[test]
    fn test_scene_build() {
        let scene = Scene::new("Hi.", &SceneConfig::default(), SceneSeed::new(3)).unwrap();
        assert_eq!(scene.len(), crate::font::lit_pixel_count("Hi."));
        assert_eq!(scene.trajectories().particle_count(), scene.len());
        assert_eq!(scene.phase().kind(), PhaseKind::Playback);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = SceneConfig::default();
        config.animation.delta_time = 0.0;
        let err = Scene::new("x", &config, SceneSeed::default()).unwrap_err();
        assert!(matches!(err, SceneError::InvalidConfig(_)));
    }

    #[test]
    fn test_oversized_trajectories_rejected() {
        let mut config = SceneConfig::default();
        config.trajectory.num_frames = crate::config::MAX_NUM_FRAMES;
        // 4 particles fit, a full line of text does not.
        assert!(Scene::new(".", &config, SceneSeed::new(2)).is_ok());
        let err = Scene::new(&"#".repeat(40), &config, SceneSeed::new(2)).unwrap_err();
        assert!(matches!(err, SceneError::InvalidConfig(_)));
    }

    #[test]
    fn test_instances_mirror_particles() {
        let mut scene = Scene::new("ok", &SceneConfig::default(), SceneSeed::new(9)).unwrap();
        let mut upload = Vec::new();
        for _ in 0..10 {
            assert!(scene.tick());
        }
        scene.write_instances(&mut upload);
        assert_eq!(upload.len(), scene.len());
        for (instance, p) in upload.iter().zip(scene.particles()) {
            assert_eq!(instance.center, p.center);
            assert_eq!(instance.radius, p.radius);
            assert_eq!(instance.color, p.color);
        }
        assert_eq!(instance_bytes(&upload).len(), upload.len() * SphereInstance::SIZE);
        assert_eq!(scene.instances(), upload);
    }

    #[test]
    fn test_blank_text() {
        let mut scene = Scene::new(" \n ", &SceneConfig::default(), SceneSeed::new(1)).unwrap();
        assert!(scene.is_empty());
        assert!(!scene.tick());
        assert!(scene.is_done());
    }
}
