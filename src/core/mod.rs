//! Core engine types: moves, sides, vitals, alignment, RNG,
//! configuration.
//!
//! This module contains the fundamental building blocks shared by every
//! other component. Battles configure numbers via `BattleConfig` rather
//! than the components hardcoding them.

pub mod alignment;
pub mod combatant;
pub mod config;
pub mod moves;
pub mod rng;
pub mod side;

pub use alignment::Alignment;
pub use combatant::Combatant;
pub use config::BattleConfig;
pub use moves::{Move, MoveTable};
pub use rng::{BattleRng, BattleRngState};
pub use side::Side;
