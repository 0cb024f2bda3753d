//! Move-streak combo multiplier.
//!
//! A combo is a streak of identical consecutive moves by the same
//! combatant. The tracker inspects the trailing window of that side's
//! move history (candidate move included): when at least two of those
//! entries match the candidate, the winner's damage is multiplied by
//! `1 + 0.1 * count`. A first use of a move never combos.

use serde::{Deserialize, Serialize};

use crate::core::Move;

/// Computes streak multipliers over a bounded trailing window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboTracker {
    window: usize,
}

impl ComboTracker {
    /// Create a tracker inspecting the trailing `window` moves.
    #[must_use]
    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
        }
    }

    /// How many of the trailing `window` moves (candidate included)
    /// equal the candidate.
    ///
    /// `prior` is the side's move history *before* this round, newest
    /// last.
    #[must_use]
    pub fn count_for(&self, prior: &[Move], candidate: Move) -> u32 {
        let from_prior = prior
            .iter()
            .rev()
            .take(self.window - 1)
            .filter(|&&mv| mv == candidate)
            .count() as u32;
        from_prior + 1
    }

    /// Streak multiplier for playing `candidate` after `prior`.
    ///
    /// ```
    /// use symbol_duel::combat::ComboTracker;
    /// use symbol_duel::core::Move;
    ///
    /// let combo = ComboTracker::new(2);
    ///
    /// // Second consecutive Rock: x1.2.
    /// assert_eq!(combo.multiplier_for(&[Move::Rock], Move::Rock), 1.2);
    ///
    /// // First Rock: no bonus.
    /// assert_eq!(combo.multiplier_for(&[], Move::Rock), 1.0);
    /// ```
    #[must_use]
    pub fn multiplier_for(&self, prior: &[Move], candidate: Move) -> f64 {
        let count = self.count_for(prior, candidate);
        if count >= 2 {
            1.0 + 0.1 * count as f64
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_use_no_combo() {
        let combo = ComboTracker::new(2);
        assert_eq!(combo.count_for(&[], Move::Rock), 1);
        assert_eq!(combo.multiplier_for(&[], Move::Rock), 1.0);
    }

    #[test]
    fn test_second_consecutive_use_combos() {
        let combo = ComboTracker::new(2);
        assert_eq!(combo.count_for(&[Move::Rock], Move::Rock), 2);
        assert_eq!(combo.multiplier_for(&[Move::Rock], Move::Rock), 1.2);
    }

    #[test]
    fn test_broken_streak_no_combo() {
        let combo = ComboTracker::new(2);
        let prior = [Move::Rock, Move::Paper];
        assert_eq!(combo.multiplier_for(&prior, Move::Rock), 1.0);
    }

    #[test]
    fn test_window_bounds_streak_credit() {
        let combo = ComboTracker::new(2);
        // A long streak still only counts the trailing window.
        let prior = [Move::Rock, Move::Rock, Move::Rock, Move::Rock];
        assert_eq!(combo.count_for(&prior, Move::Rock), 2);
        assert_eq!(combo.multiplier_for(&prior, Move::Rock), 1.2);
    }

    #[test]
    fn test_wider_window_scales_multiplier() {
        let combo = ComboTracker::new(3);
        let prior = [Move::Scissors, Move::Scissors];
        assert_eq!(combo.count_for(&prior, Move::Scissors), 3);
        assert!((combo.multiplier_for(&prior, Move::Scissors) - 1.3).abs() < 1e-9);
    }
}
