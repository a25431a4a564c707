//! # Scene Configuration
//!
//! Every tunable of a scene, loadable from TOML. Missing keys fall back to
//! the defaults in [`glyphfall_shared::constants`], so an empty file is a
//! valid configuration.
//!
//! ```toml
//! [layout]
//! letter_size = 0.25
//!
//! [animation]
//! wave_speed = 0.5
//! ```

use std::path::Path;

use glyphfall_shared::constants::{
    FADE_DELAY, FLOOR_Y, LETTER_SIZE, LINE_HEIGHT, RADIUS_RATIO, TEXT_ORIGIN, WAVE_SCALE,
    WAVE_SPEED, WAVE_STRENGTH, WAVE_WIDTH,
};
use glyphfall_shared::{Vec3, Vec4, DELTA_TIME, GRAVITY, NUM_FRAMES};
use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};

/// Half-open interval `[min, max)` a random value is drawn from.
///
/// When `min == max` the value is always `min`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Lower bound (inclusive).
    pub min: f32,
    /// Upper bound (exclusive unless equal to `min`).
    pub max: f32,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    fn validate(self, name: &str) -> SceneResult<()> {
        if !(self.min.is_finite() && self.max.is_finite()) {
            return Err(SceneError::InvalidConfig(format!("{name} must be finite")));
        }
        if self.min > self.max {
            return Err(SceneError::InvalidConfig(format!(
                "{name}: min {} is greater than max {}",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Where the text lands in the world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Width of one glyph cell.
    pub letter_size: f32,
    /// Distance between two text lines.
    pub line_height: f32,
    /// Top-left corner of the first glyph.
    pub origin: Vec3,
    /// Sphere radius relative to the pixel pitch.
    pub radius_ratio: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            letter_size: LETTER_SIZE,
            line_height: LINE_HEIGHT,
            origin: Vec3::from_array(TEXT_ORIGIN),
            radius_ratio: RADIUS_RATIO,
        }
    }
}

/// Ranges of the per-particle random draws.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Sideways drift speed.
    pub drift_x: Span,
    /// Depth drift speed. Drawn positive, stored negated.
    pub drift_z: Span,
    /// Seconds a particle takes to fade out.
    pub fade_duration: Span,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            drift_x: Span::new(-0.2, 0.2),
            drift_z: Span::new(0.8, 1.2),
            fade_duration: Span::new(0.2, 1.0),
        }
    }
}

/// Most trajectory samples a particle may have.
pub const MAX_NUM_FRAMES: usize = 100_000;

/// Parameters of the precomputed bounce.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrajectoryConfig {
    /// Samples per particle.
    pub num_frames: usize,
    /// Gravity (positive, pulls down).
    pub gravity: f32,
    /// Height of the floor the spheres bounce on.
    pub floor: f32,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            num_frames: NUM_FRAMES,
            gravity: GRAVITY,
            floor: FLOOR_Y,
        }
    }
}

/// Timing of the animation phases.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Simulated seconds per tick.
    pub delta_time: f32,
    /// Width of the wave window (normalized time).
    pub wave_width: f32,
    /// Depth displacement at the crest.
    pub wave_strength: f32,
    /// Text widths crossed per second.
    pub wave_speed: f32,
    /// Extra relative radius at the crest.
    pub wave_scale: f32,
    /// Seconds between the wave and the fade-out.
    pub delay: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            delta_time: DELTA_TIME,
            wave_width: WAVE_WIDTH,
            wave_strength: WAVE_STRENGTH,
            wave_speed: WAVE_SPEED,
            wave_scale: WAVE_SCALE,
            delay: FADE_DELAY,
        }
    }
}

/// The static backdrop behind the text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    /// Half size of the square plane.
    pub extent: f32,
    /// Depth of the plane.
    pub depth: f32,
    /// Plane color.
    pub color: Vec4,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            extent: 20.0,
            depth: -10.0,
            color: Vec4::new(0.05, 0.05, 0.05, 1.0),
        }
    }
}

/// Complete scene configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Text layout.
    pub layout: LayoutConfig,
    /// Random motion ranges.
    pub motion: MotionConfig,
    /// Bounce trajectory.
    pub trajectory: TrajectoryConfig,
    /// Phase timing.
    pub animation: AnimationConfig,
    /// Backdrop.
    pub background: BackgroundConfig,
}

impl SceneConfig {
    /// Parses and validates a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::ConfigParse`] for malformed TOML and
    /// [`SceneError::InvalidConfig`] for out-of-range values.
    pub fn from_toml_str(text: &str) -> SceneResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| SceneError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Io`] when the file cannot be read, otherwise the
    /// errors of [`SceneConfig::from_toml_str`].
    pub fn from_toml_file(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| SceneError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    /// Serializes the configuration back to TOML.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::ConfigParse`] if a value cannot be represented.
    pub fn to_toml_string(&self) -> SceneResult<String> {
        toml::to_string_pretty(self).map_err(|e| SceneError::ConfigParse(e.to_string()))
    }

    /// Checks every value against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidConfig`] naming the first bad value.
    pub fn validate(&self) -> SceneResult<()> {
        positive("layout.letter_size", self.layout.letter_size)?;
        positive("layout.line_height", self.layout.line_height)?;
        positive("layout.radius_ratio", self.layout.radius_ratio)?;
        if !self.layout.origin.is_finite() {
            return Err(SceneError::InvalidConfig("layout.origin must be finite".into()));
        }

        self.motion.drift_x.validate("motion.drift_x")?;
        self.motion.drift_z.validate("motion.drift_z")?;
        self.motion.fade_duration.validate("motion.fade_duration")?;
        positive("motion.fade_duration.min", self.motion.fade_duration.min)?;

        if !(1..=MAX_NUM_FRAMES).contains(&self.trajectory.num_frames) {
            return Err(SceneError::InvalidConfig(format!(
                "trajectory.num_frames must be in 1..={MAX_NUM_FRAMES}, got {}",
                self.trajectory.num_frames
            )));
        }
        positive("trajectory.gravity", self.trajectory.gravity)?;
        finite("trajectory.floor", self.trajectory.floor)?;

        positive("animation.delta_time", self.animation.delta_time)?;
        positive("animation.wave_width", self.animation.wave_width)?;
        positive("animation.wave_speed", self.animation.wave_speed)?;
        finite("animation.wave_strength", self.animation.wave_strength)?;
        non_negative("animation.wave_scale", self.animation.wave_scale)?;
        non_negative("animation.delay", self.animation.delay)?;

        positive("background.extent", self.background.extent)?;
        finite("background.depth", self.background.depth)?;
        Ok(())
    }

    /// Largest radius a particle can reach, relative to its base radius.
    #[must_use]
    pub fn max_scale_factor(&self) -> f32 {
        1.0 + self.animation.wave_scale * 0.5
    }
}

fn finite(name: &str, value: f32) -> SceneResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SceneError::InvalidConfig(format!("{name} must be finite, got {value}")))
    }
}

fn positive(name: &str, value: f32) -> SceneResult<()> {
    finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(SceneError::InvalidConfig(format!("{name} must be positive, got {value}")))
    }
}

fn non_negative(name: &str, value: f32) -> SceneResult<()> {
    finite(name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(SceneError::InvalidConfig(format!("{name} must not be negative, got {value}")))
    }
}
