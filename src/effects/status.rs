//! Status effect definitions.
//!
//! Status effects are timed modifiers attached to one side of a duel.
//! They are created when a winning move's configured effect triggers,
//! ticked at the start of every round, and dropped when their duration
//! runs out.
//!
//! ## Kinds
//!
//! - `Defense`: flat reduction of incoming damage (additive, applied
//!   after all multipliers).
//! - `Speed`: adds `value` percentage points to the holder's crit
//!   chance.
//! - `Confusion`: `value`% chance per round that the holder's submitted
//!   move is replaced by a uniform-random one.
//! - `Stun`: the holder automatically loses the round with a reduced
//!   fixed penalty; no move comparison occurs.
//! - `Poison`: `value` damage to the holder at the start of each round.
//! - `Regeneration`: `value` healing to the holder at the start of each
//!   round.
//! - `Vulnerability`: incoming damage is multiplied by 1.5.

use serde::{Deserialize, Serialize};

use crate::core::Side;

/// The kind of a status effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    Defense,
    Speed,
    Confusion,
    Stun,
    Poison,
    Regeneration,
    Vulnerability,
}

impl std::fmt::Display for StatusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StatusKind::Defense => "Defense",
            StatusKind::Speed => "Speed",
            StatusKind::Confusion => "Confusion",
            StatusKind::Stun => "Stun",
            StatusKind::Poison => "Poison",
            StatusKind::Regeneration => "Regeneration",
            StatusKind::Vulnerability => "Vulnerability",
        };
        write!(f, "{name}")
    }
}

/// A live, timed modifier on one side of the duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    /// What the effect does.
    pub kind: StatusKind,
    /// Magnitude; meaning depends on `kind` (damage, heal, percent, ...).
    pub value: i32,
    /// Rounds left. Decremented at the start of every active round;
    /// the effect is removed when it reaches zero.
    pub remaining: u8,
    /// Which side created the effect.
    pub source: Side,
}

impl StatusEffect {
    /// Create a new effect.
    #[must_use]
    pub fn new(kind: StatusKind, value: i32, duration: u8, source: Side) -> Self {
        Self {
            kind,
            value,
            remaining: duration,
            source,
        }
    }
}

/// Who a triggered move effect lands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectTarget {
    /// The side whose move triggered the effect.
    Owner,
    /// The opposing side.
    Opponent,
}

impl EffectTarget {
    /// Resolve the concrete side given the owner of the triggering move.
    #[must_use]
    pub const fn resolve(self, owner: Side) -> Side {
        match self {
            EffectTarget::Owner => owner,
            EffectTarget::Opponent => owner.opponent(),
        }
    }
}

/// A status effect carried by a move, applied when that move wins a
/// round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEffect {
    pub kind: StatusKind,
    pub value: i32,
    pub duration: u8,
    pub target: EffectTarget,
}

impl MoveEffect {
    /// Instantiate the live effect for a winning side.
    #[must_use]
    pub fn instantiate(&self, winner: Side) -> (Side, StatusEffect) {
        (
            self.target.resolve(winner),
            StatusEffect::new(self.kind, self.value, self.duration, winner),
        )
    }
}
