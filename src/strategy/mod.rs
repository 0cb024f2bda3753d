//! Enemy move-selection strategies.
//!
//! Behavior is a closed tagged variant (`EnemyPattern`) dispatched
//! through `pick`. Strategies read the buffered round history and the
//! enemy's HP; `Sequence` and `Phase` carry per-instance cursor state
//! cloned fresh for every battle.

pub mod engine;
pub mod pattern;

pub use engine::pick;
pub use pattern::{EnemyPattern, PhaseSpec};
