//! Round resolution and the damage formula.
//!
//! ## Formula
//!
//! Equal moves tie and both sides take the fixed `tie_damage` stamina
//! loss. Otherwise the winner's hit starts from
//! `base_damage - base_defense` and is scaled in this order:
//!
//! 1. alignment multiplier (player wins only; enemies carry no
//!    alignment in the base formula),
//! 2. combo multiplier from the winner's move streak,
//! 3. crit multiplier (player 15%, enemy 10% by default, plus the
//!    winner's Speed bonus),
//! 4. the defender's Vulnerability multiplies by 1.5,
//! 5. the product is floored once,
//! 6. the defender's Defense is subtracted additively,
//! 7. the result is floored at a minimum of 1; a winning hit never
//!    deals zero.
//!
//! The loser takes the final damage; the winner takes none. A winning
//! move's configured status effect is returned for the state machine
//! to commit.

use smallvec::SmallVec;

use crate::core::{Alignment, BattleConfig, BattleRng, Move, Side};
use crate::effects::{StatusEffect, StatusTracker};

use super::combo::ComboTracker;
use super::result::RoundWinner;

/// The computed outcome of one move exchange, before it is committed
/// to combatants and history.
#[derive(Clone, Debug)]
pub struct Resolution {
    pub winner: RoundWinner,
    /// Damage the player takes from this exchange.
    pub player_damage: i32,
    /// Damage the enemy takes from this exchange.
    pub enemy_damage: i32,
    /// Which side landed a critical, if any.
    pub critical: Option<Side>,
    /// Combo credit for the winner: (side, trailing-window count).
    pub combo: Option<(Side, u32)>,
    /// Status effects to attach, with their target sides.
    pub applied: SmallVec<[(Side, StatusEffect); 2]>,
}

/// Everything the resolver reads but does not mutate.
pub struct RoundContext<'a> {
    pub config: &'a BattleConfig,
    pub alignment: &'a Alignment,
    pub statuses: &'a StatusTracker,
    /// The player's buffered moves before this round, oldest first.
    pub player_prior: &'a [Move],
    /// The enemy's buffered moves before this round, oldest first.
    pub enemy_prior: &'a [Move],
}

/// Resolve one move exchange.
///
/// Pure except for the crit roll drawn from the injected RNG.
pub fn resolve_round(
    ctx: &RoundContext<'_>,
    player_move: Move,
    enemy_move: Move,
    rng: &mut BattleRng,
) -> Resolution {
    if player_move == enemy_move {
        return Resolution {
            winner: RoundWinner::Tie,
            player_damage: ctx.config.tie_damage,
            enemy_damage: ctx.config.tie_damage,
            critical: None,
            combo: None,
            applied: SmallVec::new(),
        };
    }

    let (winner_side, winning_move) = if player_move.beats(enemy_move) {
        (Side::Player, player_move)
    } else {
        (Side::Enemy, enemy_move)
    };
    let defender = winner_side.opponent();

    let alignment_multiplier = match winner_side {
        Side::Player => ctx.alignment.multiplier_for(player_move),
        Side::Enemy => 1.0,
    };

    let combo = ComboTracker::new(ctx.config.combo_window);
    let prior = match winner_side {
        Side::Player => ctx.player_prior,
        Side::Enemy => ctx.enemy_prior,
    };
    let combo_count = combo.count_for(prior, winning_move);
    let combo_multiplier = combo.multiplier_for(prior, winning_move);

    let crit_chance = match winner_side {
        Side::Player => ctx.config.player_crit_chance,
        Side::Enemy => ctx.config.enemy_crit_chance,
    } + ctx.statuses.crit_bonus(winner_side);
    let critical = rng.roll(crit_chance);
    let crit_multiplier = if critical {
        ctx.config.crit_multiplier
    } else {
        1.0
    };

    let scaled = ctx.config.raw_hit() as f64
        * alignment_multiplier
        * combo_multiplier
        * crit_multiplier
        * ctx.statuses.vulnerability_factor(defender);
    let damage = (scaled.floor() as i32 - ctx.statuses.defense_reduction(defender)).max(1);

    let mut applied = SmallVec::new();
    if let Some(spec) = &ctx.config.move_effects[winning_move] {
        applied.push(spec.instantiate(winner_side));
    }

    Resolution {
        winner: RoundWinner::from_side(winner_side),
        player_damage: if defender == Side::Player { damage } else { 0 },
        enemy_damage: if defender == Side::Enemy { damage } else { 0 },
        critical: critical.then_some(winner_side),
        combo: (combo_count >= 2).then_some((winner_side, combo_count)),
        applied,
    }
}
