//! The battle session: composition root for one encounter at a time.
//!
//! A session owns the player's persistent alignment and a forkable RNG;
//! `start` clones a catalog enemy into a fresh `BattleMachine` with its
//! own randomness stream. Each session is an isolated unit of mutable
//! state: nothing is shared between sessions, and a single logical
//! caller drives it.

use tracing::debug;

use crate::combat::RoundResult;
use crate::core::{Alignment, BattleConfig, BattleRng, Move};

use super::enemy::EnemySpec;
use super::machine::{BattleMachine, BattleSnapshot, BattleState};
use super::BattleError;

/// Drives battles against catalog enemies, one encounter at a time.
#[derive(Clone, Debug)]
pub struct BattleSession {
    config: BattleConfig,
    alignment: Alignment,
    rng: BattleRng,
    battle: Option<BattleMachine>,
}

impl BattleSession {
    /// Create a session from the player's persisted alignment snapshot.
    #[must_use]
    pub fn new(config: BattleConfig, alignment: Alignment, seed: u64) -> Self {
        Self {
            config,
            alignment,
            rng: BattleRng::new(seed),
            battle: None,
        }
    }

    /// Begin an encounter against a catalog enemy.
    ///
    /// The enemy's pattern state is cloned from the template and the
    /// battle gets a forked RNG stream, so a rematch against the same
    /// template shares neither cursor progress nor rolls. An encounter
    /// already in progress is abandoned.
    pub fn start(&mut self, spec: &EnemySpec) {
        debug!(enemy = %spec.name, is_boss = spec.is_boss, "encounter started");
        let rng = self.rng.fork();
        self.battle = Some(BattleMachine::new(
            self.config.clone(),
            self.alignment,
            spec,
            rng,
        ));
    }

    /// Submit the player's move for the current round.
    pub fn submit_move(&mut self, mv: Move) -> Result<RoundResult, BattleError> {
        self.battle
            .as_mut()
            .ok_or(BattleError::NoBattle)?
            .submit_move(mv)
    }

    /// Commit the pending round, returning the new state.
    pub fn commit_round(&mut self) -> Result<BattleState, BattleError> {
        self.battle
            .as_mut()
            .ok_or(BattleError::NoBattle)?
            .commit_round()
    }

    /// Fire the Symbol Break if the gate is open.
    pub fn use_symbol_break(&mut self) -> Result<RoundResult, BattleError> {
        self.battle
            .as_mut()
            .ok_or(BattleError::NoBattle)?
            .use_symbol_break()
    }

    /// Whether the Symbol Break gate is currently open.
    #[must_use]
    pub fn can_use_symbol_break(&self) -> bool {
        self.battle
            .as_ref()
            .is_some_and(BattleMachine::can_use_symbol_break)
    }

    /// Public view of the current battle for rendering.
    #[must_use]
    pub fn snapshot(&self) -> Option<BattleSnapshot> {
        self.battle.as_ref().map(BattleMachine::snapshot)
    }

    /// The encounter in progress, if any.
    #[must_use]
    pub fn battle(&self) -> Option<&BattleMachine> {
        self.battle.as_ref()
    }

    /// Close out a finished encounter.
    ///
    /// Pulls the battle's alignment back into the session for the
    /// caller to persist and returns the final snapshot. Returns `None`
    /// while the battle is still running.
    pub fn conclude(&mut self) -> Option<BattleSnapshot> {
        if !self.battle.as_ref()?.state().is_terminal() {
            return None;
        }
        let battle = self.battle.take()?;
        self.alignment = *battle.alignment();
        Some(battle.snapshot())
    }

    /// The player's alignment: the live battle's copy while one is
    /// running, the session's persisted copy otherwise.
    #[must_use]
    pub fn alignment(&self) -> &Alignment {
        match &self.battle {
            Some(battle) => battle.alignment(),
            None => &self.alignment,
        }
    }

    /// Apply a partial alignment update (renormalized to 100).
    pub fn shift_alignment(&mut self, mv: Move, delta: i32) {
        match &mut self.battle {
            Some(battle) => battle.alignment_mut().shift(mv, delta),
            None => self.alignment.shift(mv, delta),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::EnemyPattern;

    fn dummy() -> EnemySpec {
        EnemySpec::new(
            1,
            "Training Dummy",
            30,
            Move::Scissors,
            EnemyPattern::Predictable {
                fixed: Move::Scissors,
            },
        )
    }

    fn session() -> BattleSession {
        let config = BattleConfig {
            player_crit_chance: 0.0,
            enemy_crit_chance: 0.0,
            ..BattleConfig::without_move_effects()
        };
        BattleSession::new(config, Alignment::uniform(), 42)
    }

    #[test]
    fn test_operations_require_a_battle() {
        let mut s = session();

        assert_eq!(s.submit_move(Move::Rock), Err(BattleError::NoBattle));
        assert_eq!(s.commit_round(), Err(BattleError::NoBattle));
        assert_eq!(s.use_symbol_break(), Err(BattleError::NoBattle));
        assert!(s.snapshot().is_none());
        assert!(!s.can_use_symbol_break());
    }

    #[test]
    fn test_full_encounter_to_victory() {
        let mut s = session();
        s.start(&dummy());

        loop {
            s.submit_move(Move::Rock).unwrap();
            if s.commit_round().unwrap().is_terminal() {
                break;
            }
        }

        let snapshot = s.conclude().unwrap();
        assert_eq!(snapshot.state, BattleState::Victory);
        assert!(s.battle().is_none());
    }

    #[test]
    fn test_conclude_rejects_running_battle() {
        let mut s = session();
        s.start(&dummy());

        assert!(s.conclude().is_none());
        assert!(s.battle().is_some());
    }

    #[test]
    fn test_alignment_survives_the_encounter() {
        let mut s = session();
        s.start(&dummy());
        s.shift_alignment(Move::Rock, 100);
        let during = *s.alignment();

        loop {
            s.submit_move(Move::Rock).unwrap();
            if s.commit_round().unwrap().is_terminal() {
                break;
            }
        }
        s.conclude().unwrap();

        assert_eq!(*s.alignment(), during);
    }

    #[test]
    fn test_rematch_does_not_share_pattern_state() {
        let spec = EnemySpec::new(
            2,
            "Drill Sergeant",
            500,
            Move::Rock,
            EnemyPattern::Sequence {
                moves: vec![Move::Rock, Move::Paper, Move::Scissors],
                cursor: 0,
            },
        );
        let mut s = session();

        s.start(&spec);
        let first = s.submit_move(Move::Rock).unwrap();
        assert_eq!(first.enemy_move, Move::Rock);
        s.commit_round().unwrap();
        let second = s.submit_move(Move::Rock).unwrap();
        assert_eq!(second.enemy_move, Move::Paper);

        // Restarting resets the cursor: the template was never touched.
        s.start(&spec);
        let fresh = s.submit_move(Move::Rock).unwrap();
        assert_eq!(fresh.enemy_move, Move::Rock);
    }

    #[test]
    fn test_two_battles_use_distinct_rng_streams() {
        let spec = EnemySpec::new(3, "Gambler", 500, Move::Rock, EnemyPattern::Random);

        // Tall HP pools so neither battle can end inside ten rounds.
        let config = BattleConfig {
            player_crit_chance: 0.0,
            enemy_crit_chance: 0.0,
            player_max_hp: 1000,
            ..BattleConfig::without_move_effects()
        };
        let mut s = BattleSession::new(config, Alignment::uniform(), 42);
        s.start(&spec);
        let mut first = Vec::new();
        for _ in 0..10 {
            first.push(s.submit_move(Move::Rock).unwrap().enemy_move);
            s.commit_round().unwrap();
        }

        s.start(&spec);
        let mut second = Vec::new();
        for _ in 0..10 {
            second.push(s.submit_move(Move::Rock).unwrap().enemy_move);
            s.commit_round().unwrap();
        }

        assert_ne!(first, second);
    }
}
