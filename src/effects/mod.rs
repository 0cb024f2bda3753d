//! Timed status effects and their per-round bookkeeping.
//!
//! Moves can carry configured effects that land when the move wins a
//! round; the `StatusTracker` owns the live effects for both sides and
//! ticks them at every round start.

pub mod status;
pub mod tracker;

pub use status::{EffectTarget, MoveEffect, StatusEffect, StatusKind};
pub use tracker::{StatusTracker, Upkeep};
