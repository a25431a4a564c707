//! # Particle Generator
//!
//! One sphere per lit glyph pixel. Layout is fixed by [`LayoutConfig`],
//! motion parameters are drawn from an injected RNG, and colors follow a
//! half-spectrum rainbow in creation order.

use glyphfall_shared::{hsl, Vec2, Vec3, Vec4};
use rand::Rng;

use crate::config::{LayoutConfig, MotionConfig, Span};
use crate::font::{self, GLYPH_WIDTH};

/// Hue span of the rainbow ramp, in degrees.
pub const RAINBOW_HUE_SPAN: f32 = 180.0;

/// One animated sphere.
///
/// Only `center` and `radius` change after generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Current rendered position.
    pub center: Vec3,
    /// Current rendered radius.
    pub radius: f32,
    /// Base radius, derived from the pixel pitch.
    pub ref_radius: f32,
    /// RGBA color from the rainbow ramp.
    pub color: Vec4,
    /// Lateral drift per second, `x` sideways and `y` along depth.
    pub velocity: Vec2,
    /// Target height, used for the bounce apex.
    pub max_height: f32,
    /// Resting position.
    pub end_pos: Vec3,
    /// Seconds this particle takes to fade out.
    pub fade_off_duration: f32,
}

impl Particle {
    /// Creates a particle resting at `target` with no drift.
    ///
    /// Color is white until [`apply_rainbow`] runs.
    #[must_use]
    pub fn at_rest(target: Vec3, radius: f32) -> Self {
        Self {
            center: target,
            radius,
            ref_radius: radius,
            color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            velocity: Vec2::ZERO,
            max_height: target.y,
            end_pos: target,
            fade_off_duration: 1.0,
        }
    }

    /// Current radius relative to the base radius.
    #[inline]
    #[must_use]
    pub fn scale(&self) -> f32 {
        if self.ref_radius > 0.0 {
            self.radius / self.ref_radius
        } else {
            0.0
        }
    }
}

/// World position of a normalized text pixel.
#[must_use]
pub fn layout_position(layout: &LayoutConfig, x: f32, y: f32) -> Vec3 {
    let line = y.trunc();
    let within_line = y - line;
    Vec3::new(
        layout.origin.x + layout.letter_size * x,
        layout.origin.y - layout.letter_size * within_line - layout.line_height * line,
        layout.origin.z,
    )
}

/// Base sphere radius for a layout.
#[must_use]
pub fn base_radius(layout: &LayoutConfig) -> f32 {
    layout.radius_ratio * layout.letter_size / GLYPH_WIDTH as f32
}

/// Creates one particle per lit pixel of `text` and colors them.
///
/// Draw order per particle is fade duration, then x drift, then z drift, so
/// a given seed always produces the same motion.
pub fn generate_particles<R: Rng + ?Sized>(
    text: &str,
    layout: &LayoutConfig,
    motion: &MotionConfig,
    rng: &mut R,
) -> Vec<Particle> {
    let radius = base_radius(layout);
    let mut particles = Vec::with_capacity(font::lit_pixel_count(text));

    for (x, y) in font::text_pixels(text) {
        let mut particle = Particle::at_rest(layout_position(layout, x, y), radius);
        particle.fade_off_duration = draw(rng, motion.fade_duration);
        particle.velocity.x = draw(rng, motion.drift_x);
        particle.velocity.y = -draw(rng, motion.drift_z);
        particles.push(particle);
    }

    apply_rainbow(&mut particles);
    particles
}

/// Colors particles along the rainbow ramp: particle `i` of `n` gets hue
/// `180 * i / n`, full saturation, half lightness, opaque.
pub fn apply_rainbow(particles: &mut [Particle]) {
    let count = particles.len() as f32;
    for (i, particle) in particles.iter_mut().enumerate() {
        let hue = RAINBOW_HUE_SPAN * i as f32 / count;
        particle.color = hsl(hue, 1.0, 0.5).with_alpha(1.0);
    }
}

fn draw<R: Rng + ?Sized>(rng: &mut R, span: Span) -> f32 {
    if span.min < span.max {
        rng.gen_range(span.min..span.max)
    } else {
        span.min
    }
}
