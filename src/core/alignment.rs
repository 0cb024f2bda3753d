//! Per-player move affinity and the damage multiplier it grants.
//!
//! ## Invariant
//!
//! The three percentages always sum to exactly 100. Updates are
//! renormalized proportionally (largest-remainder rounding, ties broken
//! in canonical move order), never merely clamped.
//!
//! ## Multiplier
//!
//! `multiplier_for(move) = 0.8 + (value / 100) * 0.7`, so the bonus
//! ranges over `[0.8, 1.5]`: full affinity in a move makes it hit half
//! again as hard, zero affinity makes it hit below baseline.

use serde::{Deserialize, Serialize};

use super::moves::{Move, MoveTable};

/// A player's three-way affinity distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alignment {
    values: MoveTable<u32>,
}

impl Alignment {
    /// Create an alignment from raw weights, renormalized to sum to 100.
    ///
    /// ```
    /// use symbol_duel::core::{Alignment, Move};
    ///
    /// let a = Alignment::new(100, 0, 0);
    /// assert_eq!(a.value(Move::Rock), 100);
    /// assert_eq!(a.total(), 100);
    /// ```
    #[must_use]
    pub fn new(rock: u32, paper: u32, scissors: u32) -> Self {
        let mut alignment = Self {
            values: MoveTable::from_fn(|mv| match mv {
                Move::Rock => rock,
                Move::Paper => paper,
                Move::Scissors => scissors,
            }),
        };
        alignment.renormalize();
        alignment
    }

    /// The neutral starting distribution.
    #[must_use]
    pub fn uniform() -> Self {
        Self::new(34, 33, 33)
    }

    /// Affinity percentage for a move.
    #[must_use]
    pub fn value(&self, mv: Move) -> u32 {
        self.values[mv]
    }

    /// Sum of the three percentages. Always 100.
    #[must_use]
    pub fn total(&self) -> u32 {
        Move::ALL.iter().map(|&mv| self.values[mv]).sum()
    }

    /// Apply a partial update to one component, then renormalize all
    /// three proportionally so they sum to exactly 100 again.
    pub fn shift(&mut self, mv: Move, delta: i32) {
        let current = self.values[mv] as i64;
        self.values[mv] = (current + delta as i64).max(0) as u32;
        self.renormalize();
    }

    /// Outgoing damage multiplier for a move, in `[0.8, 1.5]`.
    #[must_use]
    pub fn multiplier_for(&self, mv: Move) -> f64 {
        0.8 + (self.values[mv] as f64 / 100.0) * 0.7
    }

    /// Proportional renormalization with largest-remainder rounding.
    ///
    /// Each component is scaled by `100 / total`; the integer leftovers
    /// go to the components with the largest remainders, ties broken in
    /// canonical move order. A degenerate all-zero distribution resets
    /// to uniform.
    fn renormalize(&mut self) {
        let total: u64 = Move::ALL.iter().map(|&mv| self.values[mv] as u64).sum();
        if total == 0 {
            *self = Self::uniform();
            return;
        }
        if total == 100 {
            return;
        }

        let mut quotients = [0u32; 3];
        let mut remainders = [0u64; 3];
        let mut assigned = 0u32;

        for &mv in &Move::ALL {
            let scaled = self.values[mv] as u64 * 100;
            quotients[mv.index()] = (scaled / total) as u32;
            remainders[mv.index()] = scaled % total;
            assigned += quotients[mv.index()];
        }

        let mut order = [0usize, 1, 2];
        order.sort_by(|&a, &b| remainders[b].cmp(&remainders[a]).then(a.cmp(&b)));

        let mut leftover = 100 - assigned;
        for &i in &order {
            if leftover == 0 {
                break;
            }
            quotients[i] += 1;
            leftover -= 1;
        }

        for &mv in &Move::ALL {
            self.values[mv] = quotients[mv.index()];
        }
    }
}

impl Default for Alignment {
    fn default() -> Self {
        Self::uniform()
    }
}
