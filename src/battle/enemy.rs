//! Enemy catalog descriptors and per-battle instances.
//!
//! An `EnemySpec` is the read-only shape the content source supplies:
//! the core does not care whether it came from a static table or a
//! generator. `EnemyInstance` is the live per-battle value: the pattern
//! (with its cursor/phase state) is cloned out of the spec at battle
//! start, so fighting the same template twice never leaks progress
//! between encounters.

use serde::{Deserialize, Serialize};

use crate::core::{Combatant, Move};
use crate::strategy::EnemyPattern;

/// Read-only enemy descriptor from the catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemySpec {
    pub id: u32,
    pub name: String,
    pub max_hp: i32,
    /// Default move type; history-driven strategies fall back to it.
    pub base_move: Move,
    pub pattern: EnemyPattern,
    pub is_boss: bool,
}

impl EnemySpec {
    /// Create a regular enemy descriptor.
    #[must_use]
    pub fn new(
        id: u32,
        name: impl Into<String>,
        max_hp: i32,
        base_move: Move,
        pattern: EnemyPattern,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            max_hp,
            base_move,
            pattern,
            is_boss: false,
        }
    }

    /// Create a boss descriptor.
    #[must_use]
    pub fn boss(
        id: u32,
        name: impl Into<String>,
        max_hp: i32,
        base_move: Move,
        pattern: EnemyPattern,
    ) -> Self {
        Self {
            is_boss: true,
            ..Self::new(id, name, max_hp, base_move, pattern)
        }
    }
}

/// A live enemy for one battle.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EnemyInstance {
    pub name: String,
    pub base_move: Move,
    pub is_boss: bool,
    /// Per-battle pattern state, cloned from the template.
    pub pattern: EnemyPattern,
    pub combatant: Combatant,
}

impl EnemyInstance {
    /// Clone a fresh instance out of a catalog descriptor.
    #[must_use]
    pub fn from_spec(spec: &EnemySpec, max_resolve: i32) -> Self {
        let mut instance = Self {
            name: spec.name.clone(),
            base_move: spec.base_move,
            is_boss: spec.is_boss,
            pattern: spec.pattern.clone(),
            combatant: Combatant::new(spec.max_hp, max_resolve),
        };
        instance.refresh_phase();
        instance
    }

    /// Recompute the active boss phase from current HP.
    pub fn refresh_phase(&mut self) {
        let hp_percent = self.combatant.hp_percent();
        self.pattern.update_phase(hp_percent);
    }
}
