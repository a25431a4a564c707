//! # GLYPHFALL Core
//!
//! Turns a string into a field of spheres that fall in from afar, land on
//! the glyph shapes of the text, ripple in a traveling wave and fade away.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: same text + same seed = same frames, always
//! 2. **Precomputed**: trajectories are built once; ticks only copy and scale
//! 3. **Owned state**: a [`Scene`] owns everything; renderers read, never write
//! 4. **No rendering**: the output is a list of spheres per tick
//!
//! ## Pipeline
//!
//! ```text
//! text ─> font ─> pixel positions ─> particle ─> trajectory ─> animation
//!                                    (hsl ramp)   (arena)       (tick)
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use glyphfall_core::{Scene, SceneConfig, SceneSeed};
//!
//! let mut scene = Scene::new("Hello\nWorld", &SceneConfig::default(), SceneSeed::new(42))?;
//! while scene.tick() {
//!     draw(scene.particles());
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod animation;
pub mod config;
pub mod error;
pub mod font;
pub mod particle;
pub mod scene;
pub mod seed;
pub mod trajectory;

pub use animation::{Animation, Phase, PhaseKind, WaveBounds};
pub use config::{
    AnimationConfig, BackgroundConfig, LayoutConfig, MotionConfig, SceneConfig, Span,
    TrajectoryConfig, MAX_NUM_FRAMES,
};
pub use error::{SceneError, SceneResult};
pub use font::{glyph_bitmap, lit_pixel_count, text_pixels};
pub use particle::{apply_rainbow, generate_particles, Particle};
pub use scene::{
    instance_bytes, Background, BackgroundVertex, Scene, SphereInstance, MAX_TRAJECTORY_SAMPLES,
};
pub use seed::SceneSeed;
pub use trajectory::TrajectoryArena;
