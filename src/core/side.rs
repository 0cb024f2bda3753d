//! Combatant sides.
//!
//! Every battle has exactly two sides. Status effects, round winners,
//! and effect attributions are all keyed by `Side`.

use serde::{Deserialize, Serialize};

/// One of the two sides of a duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    /// The opposing side.
    ///
    /// ```
    /// use symbol_duel::core::Side;
    ///
    /// assert_eq!(Side::Player.opponent(), Side::Enemy);
    /// assert_eq!(Side::Enemy.opponent(), Side::Player);
    /// ```
    #[must_use]
    pub const fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Enemy => write!(f, "enemy"),
        }
    }
}
