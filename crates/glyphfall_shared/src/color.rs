//! HSL to RGB conversion used by the rainbow ramp.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::math::Vec4;

/// Linear RGB color, each channel in `[0, 1]`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
}

impl Rgb {
    /// Creates a new color
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Attaches an alpha channel.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Vec4 {
        Vec4::new(self.r, self.g, self.b, alpha)
    }
}

/// Converts a hue/saturation/lightness triple to RGB.
///
/// `h` is in degrees (`[0, 360]`), `s` and `l` in `[0, 1]`. The result is
/// continuous in `h` and wraps every 360 degrees.
#[must_use]
pub fn hsl(h: f32, s: f32, l: f32) -> Rgb {
    let a = s * l.min(1.0 - l);
    let channel = |n: f32| {
        let k = (n + h / 30.0).rem_euclid(12.0);
        l - a * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0)
    };
    Rgb::new(channel(0.0), channel(8.0), channel(4.0))
}
