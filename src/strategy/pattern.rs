//! Enemy behavior patterns.
//!
//! A pattern is a closed tagged variant: adding a new behavior is a
//! compile-time-checked addition to this enum and the engine's dispatch,
//! never a runtime string match.
//!
//! ## Per-instance state
//!
//! `Sequence` carries a cursor and `Phase` a current index; both are
//! mutable state scoped to one enemy instance for one battle. The
//! session clones the pattern out of the catalog template at battle
//! start, so progress never leaks between battles or between copies of
//! the same template.
//!
//! ## Legacy data
//!
//! Serialized pattern data with an unrecognized tag deserializes to
//! `Unknown`, which the engine treats as `Random`: a malformed catalog
//! entry degrades to an unpredictable enemy instead of a stuck battle.

use serde::{Deserialize, Serialize};

use crate::core::Move;

/// One phase of a boss pattern.
///
/// Phases are stored in ascending threshold order; the first entry
/// whose `hp_threshold_percent` is at least the current HP percentage
/// is active.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseSpec {
    /// Upper HP bound (percent) at which this phase applies.
    pub hp_threshold_percent: u32,
    /// The move this phase leans on; nested strategies treat it as
    /// their base move.
    pub preferred_move: Move,
    /// Behavior while this phase is active.
    pub pattern: Box<EnemyPattern>,
}

/// How an enemy selects its moves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EnemyPattern {
    /// Always the same move.
    Predictable { fixed: Move },
    /// Counters the player's most recent move. Escalates to
    /// `CounterPredict` once more than three rounds are buffered.
    Reactive,
    /// Uniform random over the three moves.
    Random,
    /// Cycles through a fixed list, one move per round.
    Sequence {
        moves: Vec<Move>,
        #[serde(default)]
        cursor: usize,
    },
    /// The preferred move with probability `weight`, otherwise uniform
    /// over the other two.
    WeightedRandom { preferred: Move, weight: f64 },
    /// Second-guesses a player who repeats or counters.
    CounterPredict,
    /// Transition-frequency prediction over the buffered history.
    Markov,
    /// Switches stance based on the recent tally and its own HP.
    Adaptive,
    /// Punishes long repeats and habitual counter-play.
    RpsPlus,
    /// Boss behavior: HP-threshold-indexed sub-patterns.
    Phase {
        phases: Vec<PhaseSpec>,
        #[serde(default)]
        current: usize,
    },
    /// Unrecognized legacy data; behaves as `Random`.
    #[serde(other)]
    Unknown,
}

impl EnemyPattern {
    /// Recompute the active phase from an HP percentage.
    ///
    /// Called after every HP mutation of a phased enemy; a no-op for
    /// every other variant. Never touches nested cursor state or the
    /// round history.
    pub fn update_phase(&mut self, hp_percent: u32) {
        if let EnemyPattern::Phase { phases, current } = self {
            if phases.is_empty() {
                *current = 0;
                return;
            }
            *current = phases
                .iter()
                .position(|p| p.hp_threshold_percent >= hp_percent)
                .unwrap_or(phases.len() - 1);
        }
    }

    /// The active phase index for a phased pattern.
    #[must_use]
    pub fn current_phase(&self) -> Option<usize> {
        match self {
            EnemyPattern::Phase { current, .. } => Some(*current),
            _ => None,
        }
    }
}
