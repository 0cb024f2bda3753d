//! # symbol-duel
//!
//! The resolution core of a turn-based rock/paper/scissors duel.
//!
//! ## Design Principles
//!
//! 1. **Pure computation**: no I/O, no timers, no globals. Every call
//!    is synchronous; all pacing belongs to the presentation layer.
//!
//! 2. **Deterministic**: all randomness flows through an injectable,
//!    seedable RNG, so any battle can be replayed or driven
//!    deterministically in tests.
//!
//! 3. **Closed behavior variants**: enemy AI is a tagged enum
//!    dispatched through one engine. Adding a pattern is a
//!    compile-time-checked change, not a runtime string match.
//!
//! 4. **Rejection as values**: illegal transitions return a
//!    `BattleError` and leave state untouched. Numeric invariants
//!    (HP/resolve in range, winning hits at least 1 damage) are
//!    clamped at every mutation and never observable out of range.
//!
//! ## Architecture
//!
//! A `BattleSession` owns the player's alignment and one encounter at
//! a time. Submitting a move asks the `strategy` engine for the enemy
//! move, resolves the exchange through the damage formula (alignment,
//! combo, crits, status effects), and parks the `BattleMachine` in
//! `Resolving` until the caller commits the round.
//!
//! ## Modules
//!
//! - `core`: moves, sides, vitals, alignment, RNG, configuration
//! - `combat`: dominance rule, damage formula, combos, round history
//! - `strategy`: enemy patterns and the selection engine
//! - `effects`: timed status effects and their bookkeeping
//! - `battle`: state machine, enemy instancing, session

pub mod battle;
pub mod combat;
pub mod core;
pub mod effects;
pub mod strategy;

// Re-export commonly used types
pub use crate::core::{
    Alignment, BattleConfig, BattleRng, BattleRngState, Combatant, Move, MoveTable, Side,
};

pub use crate::combat::{
    ComboTracker, RoundHistory, RoundResult, RoundWinner, TriggeredEffect,
};

pub use crate::strategy::{EnemyPattern, PhaseSpec};

pub use crate::effects::{
    EffectTarget, MoveEffect, StatusEffect, StatusKind, StatusTracker,
};

pub use crate::battle::{
    terminal_state, BattleError, BattleMachine, BattleSession, BattleSnapshot, BattleState,
    EnemyInstance, EnemySpec,
};
