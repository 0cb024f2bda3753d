//! Bookkeeping for live status effects on both sides.
//!
//! The tracker owns the effect lists and answers the questions the
//! resolver asks each round: who is stunned, how much incoming damage is
//! absorbed or amplified, and what periodic damage/healing falls due.
//!
//! ## Tick order
//!
//! `tick` runs at the start of every round, before resolution:
//! Poison and Regeneration apply their periodic values, then every
//! duration is decremented and expired effects are dropped. Stun is
//! queried *before* the tick so a one-round stun affects exactly the
//! round it was present for at the start.

use serde::{Deserialize, Serialize};

use crate::core::Side;

use super::status::{StatusEffect, StatusKind};

/// Periodic damage and healing owed to one side after a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Upkeep {
    pub damage: i32,
    pub heal: i32,
}

/// Live status effects for both sides of a duel.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StatusTracker {
    player: Vec<StatusEffect>,
    enemy: Vec<StatusEffect>,
}

impl StatusTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an effect to a side.
    pub fn apply(&mut self, side: Side, effect: StatusEffect) {
        if effect.remaining == 0 {
            return;
        }
        self.list_mut(side).push(effect);
    }

    /// Active effects on a side.
    #[must_use]
    pub fn effects(&self, side: Side) -> &[StatusEffect] {
        self.list(side)
    }

    /// Whether a side carries an active Stun.
    #[must_use]
    pub fn is_stunned(&self, side: Side) -> bool {
        self.list(side)
            .iter()
            .any(|e| e.kind == StatusKind::Stun)
    }

    /// Flat incoming-damage reduction on a side (sum of Defense values).
    #[must_use]
    pub fn defense_reduction(&self, side: Side) -> i32 {
        self.list(side)
            .iter()
            .filter(|e| e.kind == StatusKind::Defense)
            .map(|e| e.value.max(0))
            .sum()
    }

    /// Incoming-damage multiplier on a side: 1.5 when Vulnerability is
    /// active, 1.0 otherwise. Multiple Vulnerabilities do not stack.
    #[must_use]
    pub fn vulnerability_factor(&self, side: Side) -> f64 {
        if self
            .list(side)
            .iter()
            .any(|e| e.kind == StatusKind::Vulnerability)
        {
            1.5
        } else {
            1.0
        }
    }

    /// Crit-chance bonus for a side, as a probability (sum of Speed
    /// values, in percentage points).
    #[must_use]
    pub fn crit_bonus(&self, side: Side) -> f64 {
        self.list(side)
            .iter()
            .filter(|e| e.kind == StatusKind::Speed)
            .map(|e| e.value.max(0) as f64 / 100.0)
            .sum()
    }

    /// Probability that a side's submitted move is scrambled this round
    /// (strongest Confusion value, as a probability).
    #[must_use]
    pub fn confusion_chance(&self, side: Side) -> f64 {
        self.list(side)
            .iter()
            .filter(|e| e.kind == StatusKind::Confusion)
            .map(|e| e.value.max(0) as f64 / 100.0)
            .fold(0.0, f64::max)
    }

    /// Start-of-round tick for both sides.
    ///
    /// Applies Poison/Regeneration, decrements every duration, drops
    /// expired effects, and returns the periodic totals owed to
    /// (player, enemy).
    pub fn tick(&mut self) -> (Upkeep, Upkeep) {
        (
            Self::tick_list(&mut self.player),
            Self::tick_list(&mut self.enemy),
        )
    }

    /// Drop every effect (battle start).
    pub fn clear(&mut self) {
        self.player.clear();
        self.enemy.clear();
    }

    fn tick_list(effects: &mut Vec<StatusEffect>) -> Upkeep {
        let mut upkeep = Upkeep::default();

        for effect in effects.iter_mut() {
            match effect.kind {
                StatusKind::Poison => upkeep.damage += effect.value.max(0),
                StatusKind::Regeneration => upkeep.heal += effect.value.max(0),
                _ => {}
            }
            effect.remaining = effect.remaining.saturating_sub(1);
        }
        effects.retain(|e| e.remaining > 0);

        upkeep
    }

    fn list(&self, side: Side) -> &Vec<StatusEffect> {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    fn list_mut(&mut self, side: Side) -> &mut Vec<StatusEffect> {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }
}
