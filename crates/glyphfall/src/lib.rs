//! # GLYPHFALL
//!
//! The driver crate: builds a [`Scene`](glyphfall_core::Scene) and pumps it
//! one fixed tick at a time into whatever renders it.
//!
//! ```text
//! ┌────────────┐  tick()   ┌────────────┐  commit()  ┌────────────┐
//! │   Player   │ ────────> │   Scene    │ ─────────> │ FrameSink  │
//! │ (this one) │ <──────── │  (core)    │            │ (renderer) │
//! └────────────┘  active?  └────────────┘            └────────────┘
//! ```
//!
//! ## Modules
//!
//! - `player`: fixed-step loop, frame sinks and run statistics

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod player;

pub use glyphfall_core as core;
pub use glyphfall_shared as shared;

pub use player::{FrameRecorder, FrameSink, NullSink, Player, PlayerConfig, RunStats};
