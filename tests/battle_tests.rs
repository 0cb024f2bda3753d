//! Battle lifecycle tests: the state machine driven through whole
//! encounters, terminal precedence, Symbol Break, and snapshots.

use symbol_duel::{
    Alignment, BattleConfig, BattleError, BattleSession, BattleSnapshot, BattleState,
    EnemyPattern, EnemySpec, Move, RoundWinner,
};

fn quiet_config() -> BattleConfig {
    BattleConfig {
        player_crit_chance: 0.0,
        enemy_crit_chance: 0.0,
        ..BattleConfig::without_move_effects()
    }
}

fn fixed_enemy(fixed: Move, max_hp: i32) -> EnemySpec {
    EnemySpec::new(
        1,
        "Sparring Partner",
        max_hp,
        fixed,
        EnemyPattern::Predictable { fixed },
    )
}

#[test]
fn test_victory_lifecycle() {
    let mut s = BattleSession::new(quiet_config(), Alignment::uniform(), 42);
    s.start(&fixed_enemy(Move::Scissors, 40));

    let mut rounds = 0;
    let outcome = loop {
        let result = s.submit_move(Move::Rock).unwrap();
        assert_eq!(result.winner, RoundWinner::Player);
        rounds += 1;

        let state = s.commit_round().unwrap();
        if state.is_terminal() {
            break state;
        }
    };

    assert_eq!(outcome, BattleState::Victory);
    // 15 + 18 + 18 kills the 40 HP target in three rounds.
    assert_eq!(rounds, 3);

    // Terminal states accept nothing further.
    assert_eq!(s.submit_move(Move::Rock), Err(BattleError::BattleOver));
    assert_eq!(s.use_symbol_break(), Err(BattleError::BattleOver));
}

#[test]
fn test_defeat_lifecycle() {
    let mut s = BattleSession::new(quiet_config(), Alignment::uniform(), 42);
    s.start(&fixed_enemy(Move::Rock, 1000));

    // Scissors into Rock every round: 15, then comboed 18s. Dead in 6.
    let outcome = loop {
        s.submit_move(Move::Scissors).unwrap();
        let state = s.commit_round().unwrap();
        if state.is_terminal() {
            break state;
        }
    };

    assert_eq!(outcome, BattleState::Defeat);
    let snapshot = s.conclude().unwrap();
    assert_eq!(snapshot.player.hp(), 0);
    assert!(snapshot.enemy.hp() > 0);
}

/// A round that fells both sides is a Defeat: the player's HP is
/// checked first.
#[test]
fn test_mutual_ko_is_a_defeat() {
    let config = BattleConfig {
        tie_damage: 200,
        ..quiet_config()
    };
    let mut s = BattleSession::new(config, Alignment::uniform(), 42);
    s.start(&fixed_enemy(Move::Rock, 100));

    let result = s.submit_move(Move::Rock).unwrap();
    assert_eq!(result.winner, RoundWinner::Tie);

    assert_eq!(s.commit_round().unwrap(), BattleState::Defeat);
}

#[test]
fn test_resolving_rejects_overlapping_submissions() {
    let mut s = BattleSession::new(quiet_config(), Alignment::uniform(), 42);
    s.start(&fixed_enemy(Move::Scissors, 1000));

    s.submit_move(Move::Rock).unwrap();
    assert_eq!(s.submit_move(Move::Rock), Err(BattleError::NotWaiting));
    assert_eq!(s.use_symbol_break(), Err(BattleError::NotWaiting));

    s.commit_round().unwrap();
    assert_eq!(s.commit_round(), Err(BattleError::NotResolving));
}

#[test]
fn test_symbol_break_through_the_session() {
    let mut s = BattleSession::new(quiet_config(), Alignment::uniform(), 42);
    s.start(&fixed_enemy(Move::Scissors, 1000));

    assert!(!s.can_use_symbol_break());
    assert_eq!(
        s.use_symbol_break(),
        Err(BattleError::SymbolBreakUnavailable)
    );

    // Five straight wins: resolve 100, streak 5.
    for _ in 0..5 {
        s.submit_move(Move::Rock).unwrap();
        s.commit_round().unwrap();
    }
    assert!(s.can_use_symbol_break());

    let before = s.snapshot().unwrap().enemy.hp();
    let result = s.use_symbol_break().unwrap();
    assert_eq!(result.enemy_damage, 40);

    let after = s.snapshot().unwrap();
    assert_eq!(after.enemy.hp(), before - 40);
    assert_eq!(after.player.resolve(), 0);
    assert!(!after.can_symbol_break);
}

#[test]
fn test_history_is_bounded() {
    let config = BattleConfig {
        player_max_hp: 1000,
        ..quiet_config()
    };
    let mut s = BattleSession::new(config, Alignment::uniform(), 42);
    s.start(&fixed_enemy(Move::Rock, 100_000));

    // Ties only: the battle runs long, the buffer does not.
    for _ in 0..25 {
        s.submit_move(Move::Rock).unwrap();
        s.commit_round().unwrap();
    }

    let snapshot = s.snapshot().unwrap();
    assert_eq!(snapshot.history.len(), 10);
    assert_eq!(snapshot.history.first().unwrap().round, 16);
    assert_eq!(snapshot.history.last().unwrap().round, 25);
}

#[test]
fn test_snapshot_serde_round_trip() {
    let mut s = BattleSession::new(quiet_config(), Alignment::uniform(), 42);
    s.start(&fixed_enemy(Move::Scissors, 200));

    s.submit_move(Move::Rock).unwrap();
    s.commit_round().unwrap();
    s.submit_move(Move::Paper).unwrap();
    s.commit_round().unwrap();

    let snapshot = s.snapshot().unwrap();
    let json = serde_json::to_string(&snapshot).unwrap();
    let back: BattleSnapshot = serde_json::from_str(&json).unwrap();

    assert_eq!(back.state, snapshot.state);
    assert_eq!(back.round, 2);
    assert_eq!(back.player.hp(), snapshot.player.hp());
    assert_eq!(back.enemy.hp(), snapshot.enemy.hp());
    assert_eq!(back.history, snapshot.history);
    assert_eq!(back.rng, snapshot.rng);
}

/// Ties don't break a win streak; losses do.
#[test]
fn test_tie_preserves_streak() {
    let mut s = BattleSession::new(quiet_config(), Alignment::uniform(), 42);
    s.start(&fixed_enemy(Move::Scissors, 100_000));

    s.submit_move(Move::Rock).unwrap();
    s.commit_round().unwrap();
    assert_eq!(s.snapshot().unwrap().player.consecutive_wins(), 1);

    s.submit_move(Move::Scissors).unwrap();
    s.commit_round().unwrap();
    assert_eq!(s.snapshot().unwrap().player.consecutive_wins(), 1);

    s.submit_move(Move::Paper).unwrap();
    s.commit_round().unwrap();
    assert_eq!(s.snapshot().unwrap().player.consecutive_wins(), 0);
}
