//! The battle state machine.
//!
//! ## States
//!
//! `Waiting` is the only state that accepts a move submission. A
//! resolved round parks the machine in `Resolving` until the caller
//! commits it; any pacing between "move submitted" and "result shown"
//! belongs to the presentation layer, never to this machine. The commit
//! re-checks the terminal condition and lands in `Waiting`, `Victory`,
//! or `Defeat`.
//!
//! ## Terminal precedence
//!
//! Player HP is checked before enemy HP, so a round that zeroes both
//! sides resolves to `Defeat`.
//!
//! ## Round flow
//!
//! Submission picks the enemy move from the strategy engine, scrambles
//! confused sides, ticks status effects (periodic damage/heal, duration
//! decrement), then either short-circuits through stun or resolves the
//! move exchange. Resolve meters and win streaks update from the
//! outcome, the boss phase is recomputed after every enemy HP change,
//! and the round is appended to the bounded history.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::combat::{
    resolve_round, RoundContext, RoundHistory, RoundResult, RoundWinner, TriggeredEffect,
};
use crate::core::{Alignment, BattleConfig, BattleRng, BattleRngState, Combatant, Move, Side};
use crate::effects::StatusTracker;

use super::enemy::{EnemyInstance, EnemySpec};
use super::BattleError;

/// The four battle states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattleState {
    /// Accepting the next move submission.
    Waiting,
    /// A round has been resolved but not yet committed.
    Resolving,
    /// Terminal: the enemy fell.
    Victory,
    /// Terminal: the player fell.
    Defeat,
}

impl BattleState {
    /// Whether the battle has ended.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, BattleState::Victory | BattleState::Defeat)
    }
}

/// Terminal condition with explicit precedence: the player's HP is
/// checked first, so both sides at zero is a `Defeat`.
///
/// ```
/// use symbol_duel::battle::{terminal_state, BattleState};
///
/// assert_eq!(terminal_state(0, 10), Some(BattleState::Defeat));
/// assert_eq!(terminal_state(10, 0), Some(BattleState::Victory));
/// assert_eq!(terminal_state(0, 0), Some(BattleState::Defeat));
/// assert_eq!(terminal_state(10, 10), None);
/// ```
#[must_use]
pub fn terminal_state(player_hp: i32, enemy_hp: i32) -> Option<BattleState> {
    if player_hp <= 0 {
        Some(BattleState::Defeat)
    } else if enemy_hp <= 0 {
        Some(BattleState::Victory)
    } else {
        None
    }
}

/// Serializable public view of a battle for rendering or persistence.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BattleSnapshot {
    pub state: BattleState,
    pub round: u32,
    pub player: Combatant,
    pub alignment: Alignment,
    pub enemy: Combatant,
    pub enemy_name: String,
    pub enemy_is_boss: bool,
    pub enemy_phase: Option<usize>,
    pub can_symbol_break: bool,
    pub statuses: StatusTracker,
    pub history: Vec<RoundResult>,
    pub rng: BattleRngState,
}

/// Orchestrates one battle from the first round to a terminal state.
#[derive(Clone, Debug)]
pub struct BattleMachine {
    config: BattleConfig,
    state: BattleState,
    round: u32,
    player: Combatant,
    alignment: Alignment,
    enemy: EnemyInstance,
    statuses: StatusTracker,
    history: RoundHistory,
    rng: BattleRng,
}

impl BattleMachine {
    /// Set up a battle against a catalog enemy.
    #[must_use]
    pub fn new(
        config: BattleConfig,
        alignment: Alignment,
        spec: &EnemySpec,
        rng: BattleRng,
    ) -> Self {
        let player = Combatant::new(config.player_max_hp, config.max_resolve);
        let enemy = EnemyInstance::from_spec(spec, config.max_resolve);
        let history = RoundHistory::new(config.history_capacity);

        Self {
            config,
            state: BattleState::Waiting,
            round: 0,
            player,
            alignment,
            enemy,
            statuses: StatusTracker::new(),
            history,
            rng,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> BattleState {
        self.state
    }

    /// Rounds resolved so far.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// The player's vitals.
    #[must_use]
    pub fn player(&self) -> &Combatant {
        &self.player
    }

    /// The enemy instance.
    #[must_use]
    pub fn enemy(&self) -> &EnemyInstance {
        &self.enemy
    }

    /// The player's alignment.
    #[must_use]
    pub fn alignment(&self) -> &Alignment {
        &self.alignment
    }

    /// Mutable alignment access for caller-driven affinity shifts.
    pub fn alignment_mut(&mut self) -> &mut Alignment {
        &mut self.alignment
    }

    /// Live status effects.
    #[must_use]
    pub fn statuses(&self) -> &StatusTracker {
        &self.statuses
    }

    /// The buffered round history.
    #[must_use]
    pub fn history(&self) -> &RoundHistory {
        &self.history
    }

    /// Whether the Symbol Break gate is open: full resolve, the
    /// required win streak, and the player still standing.
    #[must_use]
    pub fn can_use_symbol_break(&self) -> bool {
        self.player.resolve() >= self.config.symbol_break_resolve
            && self.player.consecutive_wins() >= self.config.symbol_break_streak
            && self.player.hp() > 0
    }

    /// Submit the player's move and resolve the round.
    ///
    /// Legal only in `Waiting`; the machine moves to `Resolving` and
    /// stays there until `commit_round`.
    pub fn submit_move(&mut self, submitted: Move) -> Result<RoundResult, BattleError> {
        match self.state {
            BattleState::Waiting => {}
            BattleState::Resolving => return Err(BattleError::NotWaiting),
            BattleState::Victory | BattleState::Defeat => return Err(BattleError::BattleOver),
        }

        self.round += 1;
        let mut tags: SmallVec<[TriggeredEffect; 4]> = SmallVec::new();

        // Enemy selection sees the history as it stood entering the round.
        let enemy_hp_percent = self.enemy.combatant.hp_percent();
        let enemy_chosen = crate::strategy::pick(
            &mut self.enemy.pattern,
            self.enemy.base_move,
            &self.history,
            enemy_hp_percent,
            &mut self.rng,
        );

        let player_move = self.scramble(Side::Player, submitted, &mut tags);
        let enemy_move = self.scramble(Side::Enemy, enemy_chosen, &mut tags);

        // Stun is read before the tick: an effect present at the start
        // of the round governs this round.
        let player_stunned = self.statuses.is_stunned(Side::Player);
        let enemy_stunned = self.statuses.is_stunned(Side::Enemy);

        let (player_upkeep, enemy_upkeep) = self.statuses.tick();
        let mut player_damage = self.apply_upkeep(Side::Player, player_upkeep, &mut tags);
        let mut enemy_damage = self.apply_upkeep(Side::Enemy, enemy_upkeep, &mut tags);

        let winner = if player_stunned || enemy_stunned {
            let winner = match (player_stunned, enemy_stunned) {
                (true, true) => RoundWinner::Tie,
                (true, false) => RoundWinner::Enemy,
                (false, true) => RoundWinner::Player,
                (false, false) => unreachable!(),
            };
            if player_stunned {
                tags.push(TriggeredEffect::Stunned { side: Side::Player });
                self.player.apply_damage(self.config.stun_penalty);
                player_damage += self.config.stun_penalty;
            }
            if enemy_stunned {
                tags.push(TriggeredEffect::Stunned { side: Side::Enemy });
                self.enemy.combatant.apply_damage(self.config.stun_penalty);
                enemy_damage += self.config.stun_penalty;
            }
            winner
        } else {
            let player_prior = self.history.player_moves();
            let enemy_prior = self.history.enemy_moves();
            let ctx = RoundContext {
                config: &self.config,
                alignment: &self.alignment,
                statuses: &self.statuses,
                player_prior: &player_prior,
                enemy_prior: &enemy_prior,
            };
            let resolution = resolve_round(&ctx, player_move, enemy_move, &mut self.rng);

            self.player.apply_damage(resolution.player_damage);
            self.enemy.combatant.apply_damage(resolution.enemy_damage);
            player_damage += resolution.player_damage;
            enemy_damage += resolution.enemy_damage;

            if let Some(side) = resolution.critical {
                tags.push(TriggeredEffect::Critical { side });
            }
            if let Some((side, count)) = resolution.combo {
                tags.push(TriggeredEffect::Combo { side, count });
            }
            for (target, effect) in resolution.applied {
                tags.push(TriggeredEffect::StatusApplied {
                    target,
                    kind: effect.kind,
                });
                self.statuses.apply(target, effect);
            }

            resolution.winner
        };

        self.charge_meters(winner);
        self.enemy.refresh_phase();

        let result = RoundResult {
            round: self.round,
            player_move,
            enemy_move,
            winner,
            player_damage,
            enemy_damage,
            effects: tags,
        };
        self.history.push(result.clone());
        self.state = BattleState::Resolving;

        debug!(
            round = self.round,
            %player_move,
            %enemy_move,
            ?winner,
            player_hp = self.player.hp(),
            enemy_hp = self.enemy.combatant.hp(),
            "round resolved"
        );

        Ok(result)
    }

    /// Commit the pending round: re-check the terminal condition and
    /// return to `Waiting` or end the battle.
    pub fn commit_round(&mut self) -> Result<BattleState, BattleError> {
        if self.state != BattleState::Resolving {
            return Err(BattleError::NotResolving);
        }

        self.state = terminal_state(self.player.hp(), self.enemy.combatant.hp())
            .unwrap_or(BattleState::Waiting);

        if self.state.is_terminal() {
            debug!(state = ?self.state, rounds = self.round, "battle ended");
        }
        Ok(self.state)
    }

    /// Fire the meter-gated special attack.
    ///
    /// Legal only in `Waiting` with the gate open. Deals the override
    /// damage, empties the resolve meter, clears the streak, and
    /// re-runs the terminal check. The result is *not* appended to the
    /// round history; strategies key on submitted moves.
    pub fn use_symbol_break(&mut self) -> Result<RoundResult, BattleError> {
        match self.state {
            BattleState::Waiting => {}
            BattleState::Resolving => return Err(BattleError::NotWaiting),
            BattleState::Victory | BattleState::Defeat => return Err(BattleError::BattleOver),
        }
        if !self.can_use_symbol_break() {
            return Err(BattleError::SymbolBreakUnavailable);
        }

        let damage = self.config.symbol_break_damage;
        self.enemy.combatant.apply_damage(damage);
        self.player.reset_resolve();
        self.player.reset_streak();
        self.enemy.refresh_phase();

        if let Some(terminal) = terminal_state(self.player.hp(), self.enemy.combatant.hp()) {
            self.state = terminal;
        }

        debug!(damage, enemy_hp = self.enemy.combatant.hp(), "symbol break");

        let (player_move, enemy_move) = match self.history.last() {
            Some(last) => (last.player_move, last.enemy_move),
            None => (self.enemy.base_move.counter(), self.enemy.base_move),
        };
        let mut tags: SmallVec<[TriggeredEffect; 4]> = SmallVec::new();
        tags.push(TriggeredEffect::SymbolBreak);

        Ok(RoundResult {
            round: self.round,
            player_move,
            enemy_move,
            winner: RoundWinner::Player,
            player_damage: 0,
            enemy_damage: damage,
            effects: tags,
        })
    }

    /// Public view of the battle for rendering or persistence.
    #[must_use]
    pub fn snapshot(&self) -> BattleSnapshot {
        BattleSnapshot {
            state: self.state,
            round: self.round,
            player: self.player,
            alignment: self.alignment,
            enemy: self.enemy.combatant,
            enemy_name: self.enemy.name.clone(),
            enemy_is_boss: self.enemy.is_boss,
            enemy_phase: self.enemy.pattern.current_phase(),
            can_symbol_break: self.can_use_symbol_break(),
            statuses: self.statuses.clone(),
            history: self.history.to_vec(),
            rng: self.rng.state(),
        }
    }

    /// Replace a confused side's move with a uniform-random one.
    fn scramble(
        &mut self,
        side: Side,
        intended: Move,
        tags: &mut SmallVec<[TriggeredEffect; 4]>,
    ) -> Move {
        let chance = self.statuses.confusion_chance(side);
        if chance > 0.0 && self.rng.roll(chance) {
            tags.push(TriggeredEffect::Confused { side });
            Move::ALL[self.rng.pick_index(Move::ALL.len())]
        } else {
            intended
        }
    }

    /// Apply periodic poison/regeneration and tag what happened.
    /// Returns the poison damage taken, for the round's damage total.
    fn apply_upkeep(
        &mut self,
        side: Side,
        upkeep: crate::effects::Upkeep,
        tags: &mut SmallVec<[TriggeredEffect; 4]>,
    ) -> i32 {
        let combatant = match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy.combatant,
        };
        if upkeep.damage > 0 {
            combatant.apply_damage(upkeep.damage);
            tags.push(TriggeredEffect::Poison {
                side,
                amount: upkeep.damage,
            });
        }
        if upkeep.heal > 0 {
            combatant.heal(upkeep.heal);
            tags.push(TriggeredEffect::Regeneration {
                side,
                amount: upkeep.heal,
            });
        }
        upkeep.damage.max(0)
    }

    /// Charge resolve meters and update win streaks from the outcome.
    fn charge_meters(&mut self, winner: RoundWinner) {
        match winner {
            RoundWinner::Player => {
                self.player.mark_win();
                self.player.gain_resolve(self.config.resolve_on_win);
                self.enemy.combatant.mark_loss();
                self.enemy.combatant.gain_resolve(self.config.resolve_on_loss);
            }
            RoundWinner::Enemy => {
                self.enemy.combatant.mark_win();
                self.enemy.combatant.gain_resolve(self.config.resolve_on_win);
                self.player.mark_loss();
                self.player.gain_resolve(self.config.resolve_on_loss);
            }
            RoundWinner::Tie => {
                // Ties charge both meters and leave streaks alone.
                self.player.gain_resolve(self.config.resolve_on_tie);
                self.enemy.combatant.gain_resolve(self.config.resolve_on_tie);
            }
        }
    }
}
