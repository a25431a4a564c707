//! # Animation Constants
//!
//! Fixed values of the animation. Config files may override most of them
//! per scene; these are the defaults everything falls back to.

// =============================================================================
// TIME STEP
// =============================================================================

/// Simulated seconds advanced by one tick.
pub const DELTA_TIME: f32 = 0.025;

// =============================================================================
// TRAJECTORY
// =============================================================================

/// Number of precomputed trajectory samples per particle.
pub const NUM_FRAMES: usize = 150;

/// Gravity used by the bounce trajectory (m/s²).
pub const GRAVITY: f32 = 9.81;

/// Height of the floor the particles bounce on.
pub const FLOOR_Y: f32 = -1.0;

// =============================================================================
// TEXT LAYOUT
// =============================================================================

/// Width (and height) of one glyph cell in world units.
pub const LETTER_SIZE: f32 = 0.2;

/// Vertical distance between two text lines in world units.
pub const LINE_HEIGHT: f32 = 0.3;

/// Sphere radius relative to the pixel pitch. Below 0.5 so neighbours
/// never touch.
pub const RADIUS_RATIO: f32 = 0.48;

/// World position of the top-left corner of the first glyph.
pub const TEXT_ORIGIN: [f32; 3] = [-2.0, 0.5, 0.0];

// =============================================================================
// WAVE / FADE
// =============================================================================

/// Width of the traveling wave window, in normalized time.
pub const WAVE_WIDTH: f32 = 0.5;

/// Depth displacement at the wave crest.
pub const WAVE_STRENGTH: f32 = 0.05;

/// How many text widths the wave crosses per second.
pub const WAVE_SPEED: f32 = 1.0;

/// Extra radius (relative) at the wave crest.
pub const WAVE_SCALE: f32 = 2.0;

/// Pause between the end of the wave and the fade-out, in seconds.
pub const FADE_DELAY: f32 = 1.0;

/// Text rendered when none is given.
pub const DEFAULT_TEXT: &str = "The Blue Brain\nProject is\nmindblowing!";
