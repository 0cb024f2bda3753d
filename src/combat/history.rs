//! Bounded round-history buffer.
//!
//! The session keeps the trailing window of resolved rounds (capacity
//! 10 by default) so strategies can key on recent play without memory
//! growing with battle length. Backed by a persistent `im::Vector` so
//! snapshots clone in O(1).

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::Move;

use super::result::RoundResult;

/// Trailing window of resolved rounds, oldest first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundHistory {
    rounds: Vector<RoundResult>,
    capacity: usize,
}

impl RoundHistory {
    /// Create an empty history with the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            rounds: Vector::new(),
            capacity: capacity.max(1),
        }
    }

    /// Append a round, evicting the oldest entry once full.
    pub fn push(&mut self, result: RoundResult) {
        if self.rounds.len() == self.capacity {
            self.rounds.pop_front();
        }
        self.rounds.push_back(result);
    }

    /// Number of rounds currently buffered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    /// Whether the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Maximum number of buffered rounds.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The most recent round.
    #[must_use]
    pub fn last(&self) -> Option<&RoundResult> {
        self.rounds.last()
    }

    /// Round at `index`, oldest first.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&RoundResult> {
        self.rounds.get(index)
    }

    /// Iterate oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &RoundResult> {
        self.rounds.iter()
    }

    /// The player's buffered moves, oldest first.
    #[must_use]
    pub fn player_moves(&self) -> Vec<Move> {
        self.rounds.iter().map(|r| r.player_move).collect()
    }

    /// The enemy's buffered moves, oldest first.
    #[must_use]
    pub fn enemy_moves(&self) -> Vec<Move> {
        self.rounds.iter().map(|r| r.enemy_move).collect()
    }

    /// Snapshot the buffer as a plain vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<RoundResult> {
        self.rounds.iter().cloned().collect()
    }
}
