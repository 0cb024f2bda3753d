//! Battle configuration.
//!
//! All tunable numbers live here rather than being scattered through
//! the resolver: damage constants, crit chances, resolve charging, the
//! Symbol Break gate, and the per-move effect table. `Default` carries
//! the canonical values; tests build variants through the struct
//! instead of touching engine code.

use serde::{Deserialize, Serialize};

use crate::effects::{EffectTarget, MoveEffect, StatusKind};

use super::moves::{Move, MoveTable};

/// Tunable constants for one battle.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BattleConfig {
    /// Raw damage of a winning hit before any modifier.
    pub base_damage: i32,
    /// Flat defense baked into every combatant.
    pub base_defense: i32,
    /// Fixed stamina loss both sides take on a tie.
    pub tie_damage: i32,
    /// Damage multiplier on a critical hit.
    pub crit_multiplier: f64,
    /// Crit chance for the player's winning attacks.
    pub player_crit_chance: f64,
    /// Crit chance for the enemy's winning attacks.
    pub enemy_crit_chance: f64,
    /// Fixed penalty a stunned side takes in place of normal resolution.
    pub stun_penalty: i32,

    /// Player starting/maximum HP.
    pub player_max_hp: i32,
    /// Resolve meter capacity for both sides.
    pub max_resolve: i32,

    /// Resolve gained by the winner of a round.
    pub resolve_on_win: i32,
    /// Resolve gained by the loser of a round.
    pub resolve_on_loss: i32,
    /// Resolve gained by both sides on a tie.
    pub resolve_on_tie: i32,

    /// Resolve required to unlock Symbol Break.
    pub symbol_break_resolve: i32,
    /// Consecutive wins required to unlock Symbol Break.
    pub symbol_break_streak: u32,
    /// Override damage Symbol Break deals to the enemy.
    pub symbol_break_damage: i32,

    /// Capacity of the round-history buffer.
    pub history_capacity: usize,
    /// How many trailing history entries the combo check inspects.
    pub combo_window: usize,

    /// Status effect each move applies when it wins a round.
    pub move_effects: MoveTable<Option<MoveEffect>>,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            base_damage: 20,
            base_defense: 5,
            tie_damage: 5,
            crit_multiplier: 2.0,
            player_crit_chance: 0.15,
            enemy_crit_chance: 0.10,
            stun_penalty: 10,

            player_max_hp: 100,
            max_resolve: 100,

            resolve_on_win: 20,
            resolve_on_loss: 10,
            resolve_on_tie: 5,

            symbol_break_resolve: 100,
            symbol_break_streak: 3,
            symbol_break_damage: 40,

            history_capacity: 10,
            combo_window: 2,

            move_effects: MoveTable::from_fn(|mv| {
                Some(match mv {
                    Move::Rock => MoveEffect {
                        kind: StatusKind::Defense,
                        value: 3,
                        duration: 2,
                        target: EffectTarget::Owner,
                    },
                    Move::Paper => MoveEffect {
                        kind: StatusKind::Confusion,
                        value: 30,
                        duration: 2,
                        target: EffectTarget::Opponent,
                    },
                    Move::Scissors => MoveEffect {
                        kind: StatusKind::Poison,
                        value: 2,
                        duration: 3,
                        target: EffectTarget::Opponent,
                    },
                })
            }),
        }
    }
}

impl BattleConfig {
    /// Flat damage of a winning hit before multipliers:
    /// `base_damage - base_defense`.
    #[must_use]
    pub fn raw_hit(&self) -> i32 {
        self.base_damage - self.base_defense
    }

    /// A configuration with no per-move status effects.
    ///
    /// Used by tests that exercise the bare damage formula.
    #[must_use]
    pub fn without_move_effects() -> Self {
        Self {
            move_effects: MoveTable::with_value(None),
            ..Self::default()
        }
    }
}
