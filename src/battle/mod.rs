//! The battle orchestration layer: state machine, enemy instancing,
//! and the session composition root.
//!
//! Rejected operations are values, never panics: submitting while a
//! round is pending, committing with nothing pending, or firing the
//! Symbol Break with the gate closed all return a `BattleError` and
//! leave state untouched.

use thiserror::Error;

pub mod enemy;
pub mod machine;
pub mod session;

pub use enemy::{EnemyInstance, EnemySpec};
pub use machine::{terminal_state, BattleMachine, BattleSnapshot, BattleState};
pub use session::BattleSession;

/// Why a battle operation was rejected. State is never mutated by a
/// rejected call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum BattleError {
    /// A move or Symbol Break arrived while a round was pending commit.
    #[error("a round is pending commit; the machine is not waiting for input")]
    NotWaiting,
    /// A commit arrived with no round pending.
    #[error("no resolved round is pending commit")]
    NotResolving,
    /// The Symbol Break gate (full resolve, win streak, standing
    /// player) is not open.
    #[error("symbol break requirements are not met")]
    SymbolBreakUnavailable,
    /// The battle already reached Victory or Defeat.
    #[error("the battle has already ended")]
    BattleOver,
    /// The session has no encounter in progress.
    #[error("no battle is in progress")]
    NoBattle,
}
