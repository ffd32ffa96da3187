//! Unit types for the combat simulator.
//!
//! A unit is split into two parts:
//! - [`UnitStats`]: the plain, serializable state (health, attack, armor,
//!   evasion, name, owning team). Equality is structural.
//! - [`AttackBehavior`]: the pluggable attack implementation supplied by
//!   whoever builds the team.
//!
//! [`Unit`] bundles the two. Cloning a unit deep-copies both the stats and
//! the behavior (through [`BehaviorClone`]), so a clone is an independent
//! snapshot.
//!
//! # Example
//!
//! ```
//! use loa_core::unit::{Unit, UnitStats};
//!
//! let mut knight = Unit::new(UnitStats::new("knight", "red", 30.0, 8.0, 2.0, 0.0));
//! let mut archer = Unit::new(UnitStats::new("archer", "blue", 20.0, 6.0, 1.0, 10.0));
//!
//! knight.attack(&mut archer);
//! assert_eq!(archer.hp(), 13.0);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::resolver::combat;

/// Plain unit state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitStats {
    /// Unit name, unique within a team.
    pub name: String,
    /// Name of the owning team. Rebound whenever a team takes the unit.
    #[serde(default)]
    pub team: String,
    /// Health points. The unit is dead at or below zero.
    pub hp: f64,
    /// Attack power.
    pub att: f64,
    /// Armor.
    pub arm: f64,
    /// Evasion in percent.
    pub evs: f64,
}

impl UnitStats {
    /// Creates a new set of stats.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        team: impl Into<String>,
        hp: f64,
        att: f64,
        arm: f64,
        evs: f64,
    ) -> Self {
        Self {
            name: name.into(),
            team: team.into(),
            hp,
            att,
            arm,
            evs,
        }
    }

    /// Returns true if health has dropped to zero or below.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.hp <= 0.0
    }
}

/// The attack capability of a unit.
///
/// Implementations mutate the attacker and/or target stats in place.
/// Every attack the simulator executes is shadowed by the reference
/// formula in [`combat`]; an implementation that disagrees with it aborts
/// the run with [`SimError::IllegalAttack`](crate::error::SimError::IllegalAttack).
///
/// Any `Clone` implementation gets [`BehaviorClone`] for free.
pub trait AttackBehavior: BehaviorClone + Send + Sync + fmt::Debug {
    /// Resolves one attack of `attacker` against `target`.
    fn attack(&self, attacker: &mut UnitStats, target: &mut UnitStats);
}

/// Deep copy of a boxed [`AttackBehavior`].
pub trait BehaviorClone {
    /// Returns an owned copy of this behavior, including any state it holds.
    fn box_clone(&self) -> Box<dyn AttackBehavior>;
}

impl<T: AttackBehavior + Clone + 'static> BehaviorClone for T {
    fn box_clone(&self) -> Box<dyn AttackBehavior> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn AttackBehavior> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

/// Attack behavior that applies the reference formula directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardAttack;

impl AttackBehavior for StandardAttack {
    fn attack(&self, attacker: &mut UnitStats, target: &mut UnitStats) {
        combat::reference_attack(attacker, target);
    }
}

/// A unit: stats plus attack behavior.
#[derive(Clone)]
pub struct Unit {
    stats: UnitStats,
    behavior: Box<dyn AttackBehavior>,
}

impl Unit {
    /// Creates a unit with [`StandardAttack`].
    #[must_use]
    pub fn new(stats: UnitStats) -> Self {
        Self::with_behavior(stats, Box::new(StandardAttack))
    }

    /// Creates a unit with a custom attack behavior.
    #[must_use]
    pub fn with_behavior(stats: UnitStats, behavior: Box<dyn AttackBehavior>) -> Self {
        Self { stats, behavior }
    }

    /// Attacks `target` using this unit's behavior.
    pub fn attack(&mut self, target: &mut Unit) {
        self.behavior.attack(&mut self.stats, &mut target.stats);
    }

    /// Returns an independent deep copy of this unit.
    #[must_use]
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    /// Copies this unit into another team, with its own copy of the behavior.
    #[must_use]
    pub fn rebind(&self, team: &str) -> Self {
        let mut unit = self.clone();
        unit.stats.team = team.to_string();
        unit
    }

    /// Returns the unit's stats.
    #[must_use]
    pub fn stats(&self) -> &UnitStats {
        &self.stats
    }

    /// Returns mutable access to the unit's stats.
    pub fn stats_mut(&mut self) -> &mut UnitStats {
        &mut self.stats
    }

    /// Unit name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.stats.name
    }

    /// Owning team name.
    #[must_use]
    pub fn team(&self) -> &str {
        &self.stats.team
    }

    /// Current health.
    #[must_use]
    pub fn hp(&self) -> f64 {
        self.stats.hp
    }

    /// Evasion percent.
    #[must_use]
    pub fn evs(&self) -> f64 {
        self.stats.evs
    }

    /// Returns true if the unit is dead.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.stats.is_dead()
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.stats == other.stats
    }
}

impl fmt::Debug for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unit")
            .field("stats", &self.stats)
            .field("behavior", &self.behavior)
            .finish()
    }
}

impl From<UnitStats> for Unit {
    fn from(stats: UnitStats) -> Self {
        Self::new(stats)
    }
}
