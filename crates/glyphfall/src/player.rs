//! # Player
//!
//! Fixed-step driver between a [`Scene`] and a renderer.
//!
//! Each step ticks the scene once. When the tick reports the animation as
//! active, the updated spheres are committed to the [`FrameSink`]; once the
//! scene is done, nothing is committed and the run ends.

use glyphfall_core::{PhaseKind, Scene, SphereInstance};

/// Default cap on ticks per run. The default animation needs about 300.
pub const DEFAULT_MAX_TICKS: u64 = 10_000;

/// Receives frames from the player. Implemented by renderers.
pub trait FrameSink {
    /// Called once before the first tick with the full scene, including the
    /// static background.
    fn setup(&mut self, scene: &Scene) {
        let _ = scene;
    }

    /// Called after every active tick with the updated spheres.
    fn commit(&mut self, frame: u64, instances: &[SphereInstance]);
}

/// Discards every frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn commit(&mut self, _frame: u64, _instances: &[SphereInstance]) {}
}

/// Keeps a copy of every committed frame.
#[derive(Debug, Default, Clone)]
pub struct FrameRecorder {
    /// Background vertex count seen at setup.
    pub background_vertices: usize,
    /// Committed frames, in order.
    pub frames: Vec<(u64, Vec<SphereInstance>)>,
}

impl FrameSink for FrameRecorder {
    fn setup(&mut self, scene: &Scene) {
        self.background_vertices = scene.background().vertices.len();
    }

    fn commit(&mut self, frame: u64, instances: &[SphereInstance]) {
        self.frames.push((frame, instances.to_vec()));
    }
}

/// Configuration for a run.
#[derive(Clone, Debug)]
pub struct PlayerConfig {
    /// Ticks after which the run stops even if the scene is not done.
    pub max_ticks: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_ticks: DEFAULT_MAX_TICKS,
        }
    }
}

/// Statistics of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunStats {
    /// Ticks executed.
    pub ticks: u64,
    /// Frames handed to the sink.
    pub committed_frames: u64,
    /// Ticks spent in each phase, indexed by [`PhaseKind::index`].
    pub phase_ticks: [u64; 5],
    /// Particles in the scene.
    pub particle_count: usize,
    /// Whether the scene reached `Done` within the tick limit.
    pub finished: bool,
    /// Simulated seconds elapsed.
    pub simulated_seconds: f32,
}

impl RunStats {
    /// Ticks spent in `phase`.
    #[must_use]
    pub fn ticks_in(&self, phase: PhaseKind) -> u64 {
        self.phase_ticks[phase.index()]
    }
}

/// Drives a scene tick by tick.
pub struct Player {
    scene: Scene,
    config: PlayerConfig,
    /// Reused upload buffer.
    upload: Vec<SphereInstance>,
    stats: RunStats,
}

impl Player {
    /// Creates a player for `scene`.
    #[must_use]
    pub fn new(scene: Scene, config: PlayerConfig) -> Self {
        let stats = RunStats {
            particle_count: scene.len(),
            ..RunStats::default()
        };
        Self {
            upload: Vec::with_capacity(scene.len()),
            scene,
            config,
            stats,
        }
    }

    /// Ticks once and commits the frame if the scene is still active.
    ///
    /// Returns the scene's "still active" flag.
    pub fn step(&mut self, sink: &mut dyn FrameSink) -> bool {
        let phase = self.scene.phase().kind();
        let active = self.scene.tick();

        self.stats.phase_ticks[phase.index()] += 1;
        self.stats.ticks += 1;
        self.stats.simulated_seconds = self.scene.animation().time();

        if active {
            self.scene.write_instances(&mut self.upload);
            sink.commit(self.stats.ticks - 1, &self.upload);
            self.stats.committed_frames += 1;
        } else {
            self.stats.finished = true;
        }
        active
    }

    /// Runs until the scene is done or the tick limit is hit.
    pub fn run(&mut self, sink: &mut dyn FrameSink) -> RunStats {
        sink.setup(&self.scene);

        while self.stats.ticks < self.config.max_ticks {
            if !self.step(sink) {
                break;
            }
        }

        if self.stats.finished {
            tracing::info!(
                "run finished: {} particles, {} ticks, {} frames committed",
                self.stats.particle_count,
                self.stats.ticks,
                self.stats.committed_frames
            );
        } else {
            tracing::warn!(
                "run stopped at tick limit {} in phase {}",
                self.config.max_ticks,
                self.scene.phase().kind()
            );
        }
        self.stats
    }

    /// The scene being played.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Statistics so far.
    #[must_use]
    pub fn stats(&self) -> &RunStats {
        &self.stats
    }
}
