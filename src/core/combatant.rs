//! Combatant vitals: HP, the resolve meter, and the win streak.
//!
//! ## Invariants
//!
//! `0 <= hp <= max_hp` and `0 <= resolve <= max_resolve` hold at all
//! times. Every mutation clamps immediately; an out-of-range value is
//! never observable to a caller.

use serde::{Deserialize, Serialize};

/// Vitals for one side of a duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    hp: i32,
    max_hp: i32,
    resolve: i32,
    max_resolve: i32,
    consecutive_wins: u32,
}

impl Combatant {
    /// Create a combatant at full HP with an empty resolve meter.
    ///
    /// ```
    /// use symbol_duel::core::Combatant;
    ///
    /// let c = Combatant::new(100, 100);
    /// assert_eq!(c.hp(), 100);
    /// assert_eq!(c.resolve(), 0);
    /// assert_eq!(c.consecutive_wins(), 0);
    /// ```
    #[must_use]
    pub fn new(max_hp: i32, max_resolve: i32) -> Self {
        let max_hp = max_hp.max(1);
        Self {
            hp: max_hp,
            max_hp,
            resolve: 0,
            max_resolve: max_resolve.max(0),
            consecutive_wins: 0,
        }
    }

    /// Current HP.
    #[must_use]
    pub fn hp(&self) -> i32 {
        self.hp
    }

    /// Maximum HP.
    #[must_use]
    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    /// Current resolve meter value.
    #[must_use]
    pub fn resolve(&self) -> i32 {
        self.resolve
    }

    /// Maximum resolve meter value.
    #[must_use]
    pub fn max_resolve(&self) -> i32 {
        self.max_resolve
    }

    /// Current win streak.
    #[must_use]
    pub fn consecutive_wins(&self) -> u32 {
        self.consecutive_wins
    }

    /// HP as a percentage of maximum, in `0..=100`.
    #[must_use]
    pub fn hp_percent(&self) -> u32 {
        (self.hp.max(0) as u64 * 100 / self.max_hp as u64) as u32
    }

    /// Whether this combatant has been reduced to zero HP.
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.hp <= 0
    }

    /// Apply damage, clamping HP to `0..=max_hp`.
    ///
    /// Negative amounts are ignored rather than healing.
    pub fn apply_damage(&mut self, amount: i32) {
        self.hp = (self.hp - amount.max(0)).clamp(0, self.max_hp);
    }

    /// Heal, clamping HP to `0..=max_hp`.
    ///
    /// Negative amounts are ignored rather than damaging.
    pub fn heal(&mut self, amount: i32) {
        self.hp = (self.hp + amount.max(0)).clamp(0, self.max_hp);
    }

    /// Charge the resolve meter, clamping to `0..=max_resolve`.
    pub fn gain_resolve(&mut self, amount: i32) {
        self.resolve = (self.resolve + amount.max(0)).clamp(0, self.max_resolve);
    }

    /// Empty the resolve meter.
    pub fn reset_resolve(&mut self) {
        self.resolve = 0;
    }

    /// Record a round win, extending the streak.
    pub fn mark_win(&mut self) {
        self.consecutive_wins = self.consecutive_wins.saturating_add(1);
    }

    /// Record a round loss, resetting the streak.
    pub fn mark_loss(&mut self) {
        self.consecutive_wins = 0;
    }

    /// Reset the win streak without touching the meter.
    pub fn reset_streak(&mut self) {
        self.consecutive_wins = 0;
    }
}
