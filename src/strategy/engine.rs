//! Enemy move selection.
//!
//! `pick` dispatches on the pattern variant. Every algorithm operates
//! only on the buffered round history, the enemy's HP percentage, and
//! the pattern's own per-instance state; the history-driven strategies
//! (`CounterPredict`, `Markov`, `Adaptive`, `RpsPlus`) consume no
//! randomness at all, so identical inputs always yield the identical
//! move.
//!
//! ## Escalation
//!
//! A `Reactive` enemy upgrades to the `CounterPredict` algorithm once
//! more than three rounds are buffered, so a fight ramps in difficulty
//! without a pattern swap.

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::combat::{RoundHistory, RoundWinner};
use crate::core::{BattleRng, Move};

use super::pattern::EnemyPattern;

/// Rounds of history after which `Reactive` escalates.
const ESCALATION_ROUNDS: usize = 3;

/// HP percentage below which `Adaptive` turns defensive.
const ADAPTIVE_PRESSURE_HP: u32 = 50;

/// Select the enemy's next move.
///
/// `base_move` is the enemy's default move type from its catalog entry;
/// phased bosses substitute the active phase's preferred move when
/// delegating. Mutates only `Sequence` cursor state.
pub fn pick(
    pattern: &mut EnemyPattern,
    base_move: Move,
    history: &RoundHistory,
    hp_percent: u32,
    rng: &mut BattleRng,
) -> Move {
    let chosen = match pattern {
        EnemyPattern::Predictable { fixed } => *fixed,

        EnemyPattern::Reactive => {
            if history.len() > ESCALATION_ROUNDS {
                counter_predict(base_move, history)
            } else {
                reactive(history, rng)
            }
        }

        EnemyPattern::Random | EnemyPattern::Unknown => uniform(rng),

        EnemyPattern::Sequence { moves, cursor } => {
            if moves.is_empty() {
                uniform(rng)
            } else {
                let mv = moves[*cursor % moves.len()];
                *cursor = (*cursor + 1) % moves.len();
                mv
            }
        }

        EnemyPattern::WeightedRandom { preferred, weight } => {
            if rng.roll(*weight) {
                *preferred
            } else {
                let others: Vec<Move> = Move::ALL
                    .iter()
                    .copied()
                    .filter(|mv| mv != preferred)
                    .collect();
                others[rng.pick_index(others.len())]
            }
        }

        EnemyPattern::CounterPredict => counter_predict(base_move, history),
        EnemyPattern::Markov => markov(base_move, history),
        EnemyPattern::Adaptive => adaptive(base_move, history, hp_percent),
        EnemyPattern::RpsPlus => rps_plus(base_move, history),

        EnemyPattern::Phase { phases, current } => {
            if phases.is_empty() {
                uniform(rng)
            } else {
                let idx = (*current).min(phases.len() - 1);
                let phase = &mut phases[idx];
                let preferred = phase.preferred_move;
                return pick(&mut phase.pattern, preferred, history, hp_percent, rng);
            }
        }
    };

    trace!(%chosen, rounds = history.len(), hp_percent, "enemy move selected");
    chosen
}

/// Uniform random move.
fn uniform(rng: &mut BattleRng) -> Move {
    Move::ALL[rng.pick_index(Move::ALL.len())]
}

/// Beat the player's most recent move; uniform when no history exists.
fn reactive(history: &RoundHistory, rng: &mut BattleRng) -> Move {
    match history.last() {
        Some(round) => round.player_move.counter(),
        None => uniform(rng),
    }
}

/// Second-guess a player who repeats or habitually counters.
///
/// With the player's last two moves identical, beat that move. If the
/// player's latest move instead countered the enemy's prior move,
/// predict they will counter the enemy's default move again and beat
/// the prediction. Otherwise fall back to the base move.
fn counter_predict(base_move: Move, history: &RoundHistory) -> Move {
    let (Some(prev), Some(last)) = (
        history.len().checked_sub(2).and_then(|i| history.get(i)),
        history.last(),
    ) else {
        return base_move;
    };

    if last.player_move == prev.player_move {
        return last.player_move.counter();
    }
    if last.player_move.beats(prev.enemy_move) {
        let predicted = base_move.counter();
        return predicted.counter();
    }
    base_move
}

/// Beat the most likely successor of the player's latest move.
///
/// Builds a transition-frequency table over the buffered player moves.
/// Ties break in canonical move order; a move with no observed
/// successors falls back to the base move so the strategy stays fully
/// deterministic.
fn markov(base_move: Move, history: &RoundHistory) -> Move {
    if history.len() < 3 {
        return base_move;
    }

    let moves = history.player_moves();
    let mut table: FxHashMap<Move, [u32; 3]> = FxHashMap::default();
    for window in moves.windows(2) {
        table.entry(window[0]).or_default()[window[1].index()] += 1;
    }

    let Some(&last) = moves.last() else {
        return base_move;
    };
    let Some(row) = table.get(&last) else {
        return base_move;
    };

    let mut best: Option<(Move, u32)> = None;
    for &successor in &Move::ALL {
        let count = row[successor.index()];
        if count > 0 && best.map_or(true, |(_, c)| count > c) {
            best = Some((successor, count));
        }
    }

    match best {
        Some((successor, _)) => successor.counter(),
        None => base_move,
    }
}

/// Switch stance from the last three rounds' tally and current HP.
///
/// Recently winning: repeat the last winning move. Recently losing, or
/// under HP pressure: counter the player's most common recent move.
/// Otherwise hold the base move.
fn adaptive(base_move: Move, history: &RoundHistory, hp_percent: u32) -> Move {
    let recent_start = history.len().saturating_sub(3);
    let recent: Vec<_> = (recent_start..history.len())
        .filter_map(|i| history.get(i))
        .collect();

    let wins = recent
        .iter()
        .filter(|r| r.winner == RoundWinner::Enemy)
        .count();
    let losses = recent
        .iter()
        .filter(|r| r.winner == RoundWinner::Player)
        .count();

    if wins >= 2 {
        if let Some(round) = recent
            .iter()
            .rev()
            .find(|r| r.winner == RoundWinner::Enemy)
        {
            return round.enemy_move;
        }
    }

    if losses >= 2 || hp_percent < ADAPTIVE_PRESSURE_HP {
        if let Some(common) = most_common_player_move(&recent) {
            return common.counter();
        }
    }

    base_move
}

/// Punish long repeats, then habitual counter-play, else hold.
///
/// Four identical player moves in a row get countered outright. A
/// player who beat the enemy's move in at least two of the last four
/// rounds is predicted to counter the base move again, and the
/// prediction is itself countered.
fn rps_plus(base_move: Move, history: &RoundHistory) -> Move {
    if history.len() < 4 {
        return base_move;
    }

    let start = history.len() - 4;
    let last4: Vec<_> = (start..history.len())
        .filter_map(|i| history.get(i))
        .collect();

    let first = last4[0].player_move;
    if last4.iter().all(|r| r.player_move == first) {
        return first.counter();
    }

    let countered = last4
        .iter()
        .filter(|r| r.player_move.beats(r.enemy_move))
        .count();
    if countered >= 2 {
        let predicted = base_move.counter();
        return predicted.counter();
    }

    base_move
}

/// Most frequent player move among `rounds`, ties in canonical order.
fn most_common_player_move(rounds: &[&crate::combat::RoundResult]) -> Option<Move> {
    if rounds.is_empty() {
        return None;
    }

    let mut counts = [0u32; 3];
    for round in rounds {
        counts[round.player_move.index()] += 1;
    }

    let mut best = Move::Rock;
    for &mv in &Move::ALL {
        if counts[mv.index()] > counts[best.index()] {
            best = mv;
        }
    }
    Some(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::RoundResult;
    use smallvec::SmallVec;

    /// Build a history from (player, enemy) move pairs, winners derived
    /// from the dominance rule.
    fn hist(pairs: &[(Move, Move)]) -> RoundHistory {
        let mut history = RoundHistory::new(10);
        for (i, &(player_move, enemy_move)) in pairs.iter().enumerate() {
            let winner = if player_move == enemy_move {
                RoundWinner::Tie
            } else if player_move.beats(enemy_move) {
                RoundWinner::Player
            } else {
                RoundWinner::Enemy
            };
            history.push(RoundResult {
                round: i as u32 + 1,
                player_move,
                enemy_move,
                winner,
                player_damage: 0,
                enemy_damage: 0,
                effects: SmallVec::new(),
            });
        }
        history
    }

    fn pick_once(pattern: &mut EnemyPattern, history: &RoundHistory, hp_percent: u32) -> Move {
        let mut rng = BattleRng::new(7);
        pick(pattern, Move::Rock, history, hp_percent, &mut rng)
    }

    #[test]
    fn test_predictable_always_fixed() {
        let mut pattern = EnemyPattern::Predictable {
            fixed: Move::Scissors,
        };
        let history = hist(&[(Move::Rock, Move::Paper), (Move::Paper, Move::Rock)]);

        for _ in 0..5 {
            assert_eq!(pick_once(&mut pattern, &history, 100), Move::Scissors);
        }
    }

    #[test]
    fn test_reactive_counters_last_player_move() {
        let mut pattern = EnemyPattern::Reactive;
        let history = hist(&[(Move::Rock, Move::Rock)]);

        assert_eq!(pick_once(&mut pattern, &history, 100), Move::Paper);
    }

    #[test]
    fn test_reactive_escalates_after_three_rounds() {
        let mut pattern = EnemyPattern::Reactive;
        // Four rounds buffered, player repeating Scissors: the
        // counter-predict path beats the repeat.
        let history = hist(&[
            (Move::Rock, Move::Paper),
            (Move::Paper, Move::Rock),
            (Move::Scissors, Move::Rock),
            (Move::Scissors, Move::Paper),
        ]);

        assert_eq!(pick_once(&mut pattern, &history, 100), Move::Rock);
    }

    #[test]
    fn test_sequence_cycles_and_wraps() {
        let mut pattern = EnemyPattern::Sequence {
            moves: vec![Move::Rock, Move::Paper, Move::Scissors],
            cursor: 0,
        };
        let history = RoundHistory::new(10);
        let mut rng = BattleRng::new(1);

        let picks: Vec<Move> = (0..4)
            .map(|_| pick(&mut pattern, Move::Rock, &history, 100, &mut rng))
            .collect();

        assert_eq!(
            picks,
            vec![Move::Rock, Move::Paper, Move::Scissors, Move::Rock]
        );
    }

    #[test]
    fn test_empty_sequence_falls_back_to_random() {
        let mut pattern = EnemyPattern::Sequence {
            moves: vec![],
            cursor: 0,
        };
        let history = RoundHistory::new(10);

        // Just has to produce a move without panicking.
        let mv = pick_once(&mut pattern, &history, 100);
        assert!(Move::ALL.contains(&mv));
    }

    #[test]
    fn test_weighted_random_extremes() {
        let history = RoundHistory::new(10);
        let mut rng = BattleRng::new(1);

        let mut certain = EnemyPattern::WeightedRandom {
            preferred: Move::Paper,
            weight: 1.0,
        };
        for _ in 0..10 {
            assert_eq!(
                pick(&mut certain, Move::Rock, &history, 100, &mut rng),
                Move::Paper
            );
        }

        let mut never = EnemyPattern::WeightedRandom {
            preferred: Move::Paper,
            weight: 0.0,
        };
        for _ in 0..10 {
            let mv = pick(&mut never, Move::Rock, &history, 100, &mut rng);
            assert_ne!(mv, Move::Paper);
        }
    }

    #[test]
    fn test_counter_predict_beats_a_repeat() {
        let mut pattern = EnemyPattern::CounterPredict;
        let history = hist(&[(Move::Rock, Move::Paper), (Move::Rock, Move::Scissors)]);

        assert_eq!(pick_once(&mut pattern, &history, 100), Move::Paper);
    }

    #[test]
    fn test_counter_predict_double_counters() {
        let mut pattern = EnemyPattern::CounterPredict;
        // Round 1 enemy played Scissors; round 2 the player switched to
        // Rock, which beats it. Prediction: the player counters the
        // base move (Rock) with Paper, so the enemy picks Scissors.
        let history = hist(&[(Move::Paper, Move::Scissors), (Move::Rock, Move::Rock)]);

        assert_eq!(pick_once(&mut pattern, &history, 100), Move::Scissors);
    }

    #[test]
    fn test_counter_predict_falls_back_to_base() {
        let mut pattern = EnemyPattern::CounterPredict;
        // Player neither repeated nor countered the prior enemy move.
        let history = hist(&[(Move::Paper, Move::Paper), (Move::Rock, Move::Rock)]);

        assert_eq!(pick_once(&mut pattern, &history, 100), Move::Rock);
    }

    #[test]
    fn test_counter_predict_needs_two_rounds() {
        let mut pattern = EnemyPattern::CounterPredict;
        let history = hist(&[(Move::Paper, Move::Scissors)]);

        assert_eq!(pick_once(&mut pattern, &history, 100), Move::Rock);
    }

    #[test]
    fn test_markov_beats_most_frequent_successor() {
        let mut pattern = EnemyPattern::Markov;
        // Player transitions: Rock->Paper twice, Paper->Rock twice.
        // Latest move Rock, most frequent successor Paper, counter is
        // Scissors.
        let history = hist(&[
            (Move::Rock, Move::Rock),
            (Move::Paper, Move::Rock),
            (Move::Rock, Move::Rock),
            (Move::Paper, Move::Rock),
            (Move::Rock, Move::Rock),
        ]);

        assert_eq!(pick_once(&mut pattern, &history, 100), Move::Scissors);
    }

    #[test]
    fn test_markov_tie_breaks_in_canonical_order() {
        let mut pattern = EnemyPattern::Markov;
        // From Rock the player went to Rock once and Scissors once:
        // tied row, canonical order picks Rock, countered by Paper.
        let history = hist(&[
            (Move::Rock, Move::Rock),
            (Move::Rock, Move::Rock),
            (Move::Scissors, Move::Rock),
            (Move::Paper, Move::Rock),
            (Move::Rock, Move::Rock),
        ]);

        assert_eq!(pick_once(&mut pattern, &history, 100), Move::Paper);
    }

    #[test]
    fn test_markov_needs_three_rounds() {
        let mut pattern = EnemyPattern::Markov;
        let history = hist(&[(Move::Rock, Move::Rock), (Move::Paper, Move::Rock)]);

        assert_eq!(pick_once(&mut pattern, &history, 100), Move::Rock);
    }

    #[test]
    fn test_adaptive_repeats_winning_move() {
        let mut pattern = EnemyPattern::Adaptive;
        // Enemy won the last two rounds, most recently with Rock.
        let history = hist(&[
            (Move::Rock, Move::Rock),
            (Move::Scissors, Move::Rock),
            (Move::Paper, Move::Scissors),
        ]);

        assert_eq!(pick_once(&mut pattern, &history, 100), Move::Scissors);
    }

    #[test]
    fn test_adaptive_counters_when_losing() {
        let mut pattern = EnemyPattern::Adaptive;
        // Player won the last two rounds, always with Paper.
        let history = hist(&[
            (Move::Rock, Move::Rock),
            (Move::Paper, Move::Rock),
            (Move::Paper, Move::Rock),
        ]);

        assert_eq!(pick_once(&mut pattern, &history, 100), Move::Scissors);
    }

    #[test]
    fn test_adaptive_counters_under_hp_pressure() {
        let mut pattern = EnemyPattern::Adaptive;
        // Tally is even, but HP below half: counter the common move.
        let history = hist(&[(Move::Paper, Move::Paper)]);

        assert_eq!(pick_once(&mut pattern, &history, 30), Move::Scissors);
    }

    #[test]
    fn test_adaptive_holds_base_otherwise() {
        let mut pattern = EnemyPattern::Adaptive;
        let history = hist(&[(Move::Paper, Move::Paper)]);

        assert_eq!(pick_once(&mut pattern, &history, 100), Move::Rock);
    }

    #[test]
    fn test_rps_plus_counters_long_repeat() {
        let mut pattern = EnemyPattern::RpsPlus;
        let history = hist(&[
            (Move::Scissors, Move::Rock),
            (Move::Scissors, Move::Rock),
            (Move::Scissors, Move::Rock),
            (Move::Scissors, Move::Rock),
        ]);

        assert_eq!(pick_once(&mut pattern, &history, 100), Move::Rock);
    }

    #[test]
    fn test_rps_plus_double_counters_habitual_counters() {
        let mut pattern = EnemyPattern::RpsPlus;
        // The player beat the enemy's move in two of the last four
        // rounds without a four-long repeat: predicted Paper (counter
        // of base Rock), answered with Scissors.
        let history = hist(&[
            (Move::Paper, Move::Rock),
            (Move::Rock, Move::Scissors),
            (Move::Paper, Move::Paper),
            (Move::Scissors, Move::Scissors),
        ]);

        assert_eq!(pick_once(&mut pattern, &history, 100), Move::Scissors);
    }

    #[test]
    fn test_rps_plus_needs_four_rounds() {
        let mut pattern = EnemyPattern::RpsPlus;
        let history = hist(&[
            (Move::Paper, Move::Rock),
            (Move::Paper, Move::Rock),
            (Move::Paper, Move::Rock),
        ]);

        assert_eq!(pick_once(&mut pattern, &history, 100), Move::Rock);
    }

    #[test]
    fn test_history_driven_strategies_are_deterministic() {
        let history = hist(&[
            (Move::Rock, Move::Paper),
            (Move::Paper, Move::Rock),
            (Move::Scissors, Move::Scissors),
            (Move::Rock, Move::Paper),
        ]);

        for pattern in [
            EnemyPattern::CounterPredict,
            EnemyPattern::Markov,
            EnemyPattern::Adaptive,
            EnemyPattern::RpsPlus,
        ] {
            let picks: Vec<Move> = (0..20)
                .map(|seed| {
                    let mut p = pattern.clone();
                    let mut rng = BattleRng::new(seed);
                    pick(&mut p, Move::Rock, &history, 40, &mut rng)
                })
                .collect();
            assert!(
                picks.windows(2).all(|w| w[0] == w[1]),
                "{pattern:?} must not depend on the RNG"
            );
        }
    }

    #[test]
    fn test_phase_delegates_with_preferred_move() {
        use crate::strategy::pattern::PhaseSpec;

        let mut pattern = EnemyPattern::Phase {
            phases: vec![
                PhaseSpec {
                    hp_threshold_percent: 50,
                    preferred_move: Move::Scissors,
                    pattern: Box::new(EnemyPattern::CounterPredict),
                },
                PhaseSpec {
                    hp_threshold_percent: 100,
                    preferred_move: Move::Paper,
                    pattern: Box::new(EnemyPattern::CounterPredict),
                },
            ],
            current: 0,
        };
        // Sparse history: CounterPredict falls back to its base move,
        // which is the active phase's preferred move.
        let history = RoundHistory::new(10);

        pattern.update_phase(100);
        assert_eq!(pick_once(&mut pattern, &history, 100), Move::Paper);

        pattern.update_phase(30);
        assert_eq!(pick_once(&mut pattern, &history, 30), Move::Scissors);
    }

    #[test]
    fn test_unknown_behaves_as_random() {
        let mut pattern = EnemyPattern::Unknown;
        let history = RoundHistory::new(10);

        let mv = pick_once(&mut pattern, &history, 100);
        assert!(Move::ALL.contains(&mv));
    }
}
