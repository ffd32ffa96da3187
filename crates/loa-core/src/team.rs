//! Teams: fixed-length, ordered unit slots plus an arrangement strategy.
//!
//! A slot holding `None` is a dead or absent unit. The slot count never
//! changes during a match; only the arrangement step may move units between
//! slots, and only within its own team.
//!
//! A team owns its arrangement. Snapshots copy it along with the units, so a
//! stateful arrangement on a working copy never touches the original.
//!
//! # Example
//!
//! ```
//! use loa_core::team::Team;
//! use loa_core::unit::UnitStats;
//!
//! let team = Team::from_stats(
//!     "red",
//!     vec![
//!         UnitStats::new("knight", "", 30.0, 8.0, 2.0, 0.0),
//!         UnitStats::new("archer", "", 20.0, 6.0, 1.0, 10.0),
//!     ],
//! );
//!
//! assert_eq!(team.len(), 2);
//! assert_eq!(team.num_alive(), 2);
//! assert!(team.iter().flatten().all(|unit| unit.team() == "red"));
//! ```

use std::fmt;

use crate::unit::{Unit, UnitStats};

/// The pre-attack arrangement capability of a team.
///
/// `own` is the arranging team's slots; `opponent` is a snapshot of the
/// opposing team, so nothing done to it reaches the live match.
pub trait Arrangement: ArrangementClone + Send + Sync + fmt::Debug {
    /// Reorders or repositions `own` based on the opponent snapshot.
    fn arrange(&mut self, own: &mut [Option<Unit>], opponent: &Team);
}

/// Deep copy of a boxed [`Arrangement`].
pub trait ArrangementClone {
    /// Returns an owned copy of this arrangement, including any state it holds.
    fn box_clone(&self) -> Box<dyn Arrangement>;
}

impl<T: Arrangement + Clone + 'static> ArrangementClone for T {
    fn box_clone(&self) -> Box<dyn Arrangement> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn Arrangement> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

/// Arrangement that leaves the formation untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepFormation;

impl Arrangement for KeepFormation {
    fn arrange(&mut self, _own: &mut [Option<Unit>], _opponent: &Team) {}
}

/// An ordered list of template units, used to re-populate teams.
pub type Roster = Vec<Unit>;

/// A named team of unit slots.
#[derive(Clone)]
pub struct Team {
    name: String,
    slots: Vec<Option<Unit>>,
    arrangement: Box<dyn Arrangement>,
}

impl Team {
    /// Creates a team with [`KeepFormation`]. Units are rebound to `name`.
    #[must_use]
    pub fn new(name: impl Into<String>, units: Vec<Unit>) -> Self {
        Self::with_arrangement(name, units, Box::new(KeepFormation))
    }

    /// Creates a team with a custom arrangement. Units are rebound to `name`.
    #[must_use]
    pub fn with_arrangement(
        name: impl Into<String>,
        units: Vec<Unit>,
        arrangement: Box<dyn Arrangement>,
    ) -> Self {
        let name = name.into();
        let slots = units.iter().map(|unit| Some(unit.rebind(&name))).collect();
        Self {
            name,
            slots,
            arrangement,
        }
    }

    /// Creates a team of [`StandardAttack`](crate::unit::StandardAttack) units.
    #[must_use]
    pub fn from_stats(name: impl Into<String>, stats: Vec<UnitStats>) -> Self {
        Self::new(name, stats.into_iter().map(Unit::new).collect())
    }

    /// Team name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of slots, dead ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the team has no slots at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of slots holding a unit.
    #[must_use]
    pub fn num_alive(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Returns the unit in slot `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Unit> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Returns the unit in slot `index` mutably, if any.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Unit> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    /// Iterates over the slots in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, Option<Unit>> {
        self.slots.iter()
    }

    /// Read-only slot view.
    #[must_use]
    pub fn slots(&self) -> &[Option<Unit>] {
        &self.slots
    }

    /// Mutable slot view. The slot count itself cannot change through it.
    pub fn slots_mut(&mut self) -> &mut [Option<Unit>] {
        &mut self.slots
    }

    /// Empties slot `index`, returning the unit it held.
    pub fn remove(&mut self, index: usize) -> Option<Unit> {
        self.slots.get_mut(index).and_then(Option::take)
    }

    /// Returns an independent deep copy of the team, arrangement included.
    #[must_use]
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    /// Lets the team rearrange itself against an opponent snapshot.
    pub fn arrange(&mut self, opponent: &Team) {
        self.arrangement.arrange(&mut self.slots, opponent);
    }

    /// Replaces every slot with a fresh copy of `roster`, bound to this team.
    pub fn repopulate(&mut self, roster: &[Unit]) {
        self.slots = roster
            .iter()
            .map(|unit| Some(unit.rebind(&self.name)))
            .collect();
    }
}

impl PartialEq for Team {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.slots == other.slots
    }
}

impl fmt::Debug for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Team")
            .field("name", &self.name)
            .field("slots", &self.slots)
            .field("arrangement", &self.arrangement)
            .finish()
    }
}

impl<'a> IntoIterator for &'a Team {
    type Item = &'a Option<Unit>;
    type IntoIter = std::slice::Iter<'a, Option<Unit>>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}
