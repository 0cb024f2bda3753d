//! Round outcomes.
//!
//! A `RoundResult` is immutable once produced and is appended to the
//! session's bounded round-history buffer. Everything the presentation
//! layer needs to narrate a round is here: moves, winner, damage on
//! each side, and typed tags for everything that triggered.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Move, Side};
use crate::effects::StatusKind;

/// Who won a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundWinner {
    Player,
    Enemy,
    Tie,
}

impl RoundWinner {
    /// The winning side, if the round was decisive.
    #[must_use]
    pub const fn side(self) -> Option<Side> {
        match self {
            RoundWinner::Player => Some(Side::Player),
            RoundWinner::Enemy => Some(Side::Enemy),
            RoundWinner::Tie => None,
        }
    }

    /// Wrap a winning side.
    #[must_use]
    pub const fn from_side(side: Side) -> Self {
        match side {
            Side::Player => RoundWinner::Player,
            Side::Enemy => RoundWinner::Enemy,
        }
    }
}

/// A typed tag for something that triggered during a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggeredEffect {
    /// The winning hit was a critical.
    Critical { side: Side },
    /// A move's configured status effect landed.
    StatusApplied { target: Side, kind: StatusKind },
    /// A side was stunned and lost the round without a move comparison.
    Stunned { side: Side },
    /// A side's move streak boosted its damage.
    Combo { side: Side, count: u32 },
    /// Periodic poison damage ticked.
    Poison { side: Side, amount: i32 },
    /// Periodic regeneration ticked.
    Regeneration { side: Side, amount: i32 },
    /// A confused side's move was scrambled.
    Confused { side: Side },
    /// The round was a Symbol Break, not a move exchange.
    SymbolBreak,
}

impl std::fmt::Display for TriggeredEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TriggeredEffect::Critical { side } => write!(f, "critical hit by {side}"),
            TriggeredEffect::StatusApplied { target, kind } => {
                write!(f, "{kind} applied to {target}")
            }
            TriggeredEffect::Stunned { side } => write!(f, "{side} was stunned"),
            TriggeredEffect::Combo { side, count } => {
                write!(f, "{side} combo x{count}")
            }
            TriggeredEffect::Poison { side, amount } => {
                write!(f, "{side} took {amount} poison damage")
            }
            TriggeredEffect::Regeneration { side, amount } => {
                write!(f, "{side} regenerated {amount}")
            }
            TriggeredEffect::Confused { side } => write!(f, "{side} fumbled in confusion"),
            TriggeredEffect::SymbolBreak => write!(f, "symbol break"),
        }
    }
}

/// The immutable record of one resolved round.
///
/// `player_damage` and `enemy_damage` are the damage *taken* by each
/// side, periodic effects included.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    /// 1-based round number.
    pub round: u32,
    /// The move the player's side resolved with.
    pub player_move: Move,
    /// The move the enemy's side resolved with.
    pub enemy_move: Move,
    /// Round winner.
    pub winner: RoundWinner,
    /// Damage the player took this round.
    pub player_damage: i32,
    /// Damage the enemy took this round.
    pub enemy_damage: i32,
    /// Typed tags for everything that triggered.
    pub effects: SmallVec<[TriggeredEffect; 4]>,
}

impl RoundResult {
    /// Whether the winning hit was a critical.
    #[must_use]
    pub fn was_critical(&self) -> bool {
        self.effects
            .iter()
            .any(|e| matches!(e, TriggeredEffect::Critical { .. }))
    }
}
