//! # Renderer Contract Tests
//!
//! A renderer only ever sees the scene through `FrameSink`. These tests
//! stand in for one and check what it is handed.

use glyphfall::core::{instance_bytes, Scene, SceneConfig, SceneSeed, SphereInstance};
use glyphfall::{FrameSink, Player, PlayerConfig};

/// Counts uploads and bytes like a ray tracer re-committing its buffer.
#[derive(Default)]
struct CountingRenderer {
    setups: u32,
    commits: u64,
    bytes: usize,
    last_frame: Option<u64>,
}

impl FrameSink for CountingRenderer {
    fn setup(&mut self, scene: &Scene) {
        self.setups += 1;
        assert_eq!(scene.background().quads.len(), 1);
    }

    fn commit(&mut self, frame: u64, instances: &[SphereInstance]) {
        if let Some(last) = self.last_frame {
            assert_eq!(frame, last + 1, "frames must arrive in order");
        }
        self.last_frame = Some(frame);
        self.commits += 1;
        self.bytes += instance_bytes(instances).len();
    }
}

#[test]
fn test_renderer_receives_every_active_frame() {
    let scene = Scene::new("Hello\nWorld", &SceneConfig::default(), SceneSeed::new(3)).unwrap();
    let count = scene.len();
    let mut player = Player::new(scene, PlayerConfig::default());
    let mut renderer = CountingRenderer::default();

    let stats = player.run(&mut renderer);

    assert!(stats.finished);
    assert_eq!(renderer.setups, 1);
    assert_eq!(renderer.commits, stats.committed_frames);
    assert_eq!(renderer.bytes, renderer.commits as usize * count * SphereInstance::SIZE);
}

#[test]
fn test_ticking_after_done_commits_nothing() {
    let scene = Scene::new("x", &SceneConfig::default(), SceneSeed::new(3)).unwrap();
    let mut player = Player::new(scene, PlayerConfig::default());
    let mut renderer = CountingRenderer::default();
    player.run(&mut renderer);

    let commits = renderer.commits;
    for _ in 0..5 {
        assert!(!player.step(&mut renderer));
    }
    assert_eq!(renderer.commits, commits);
}
