//! # GLYPHFALL Shared
//!
//! Common types used by the simulation core and by whatever renders it.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on a window, GPU or ray-tracing crate.
//! It only knows about vectors, colors and the fixed constants of the
//! animation.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod color;
pub mod constants;
pub mod math;

pub use color::{hsl, Rgb};
pub use constants::{DELTA_TIME, GRAVITY, NUM_FRAMES};
pub use math::{Vec2, Vec3, Vec4};
