//! Attack resolution.
//!
//! An [`AttackPolicy`] resolves the attacks of one turn. The offense and
//! defense teams are positionally aligned: for every slot index where both
//! sides hold a unit, the offense unit attacks the defense unit exactly once.
//! There is no cross-slot targeting.
//!
//! # Invariants
//!
//! - Every executed attack is shadowed by the reference formula in
//!   [`combat`]; a divergence aborts the whole run.
//! - An evaded attack changes nothing and is not checked.
//! - Dead units are not cleared here; see [`death`].
//!
//! # Available Policies
//!
//! - [`AttackPolicy::Basic`]: plain checked attacks
//! - [`AttackPolicy::Evasion`]: each attack may be nullified by the target's evasion
//! - [`AttackPolicy::ArrangeOnly`]: plain checked attacks, but both teams are
//!   re-populated from the same roster at the start of every repeat

pub mod combat;
pub mod death;
pub mod evasion;

use std::fmt;

use rand::Rng;

use crate::error::{Result, SimError};
use crate::event::EventSink;
use crate::team::{Roster, Team};

/// Attack resolution strategy, selected when the simulator is built.
#[derive(Clone, Default)]
pub enum AttackPolicy {
    /// Checked attacks, no randomness.
    #[default]
    Basic,
    /// Checked attacks preceded by an evasion roll for the target.
    Evasion,
    /// Checked attacks; repeat `r` starts both teams from `rosters[r]`.
    ArrangeOnly {
        /// One roster per repeat.
        rosters: Vec<Roster>,
    },
}

impl AttackPolicy {
    /// Short name used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Evasion => "evasion",
            Self::ArrangeOnly { .. } => "arrange-only",
        }
    }

    /// Checks that the policy can serve `num_repeats` repeats.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::RosterUnavailable`] if an arrange-only roster list
    /// has fewer entries than `num_repeats`.
    pub fn validate(&self, num_repeats: usize) -> Result<()> {
        if let Self::ArrangeOnly { rosters } = self {
            if rosters.len() < num_repeats {
                return Err(SimError::RosterUnavailable {
                    repeat: rosters.len(),
                    available: rosters.len(),
                });
            }
        }
        Ok(())
    }

    /// Per-repeat seed hook, run on the working copies before the size check.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::RosterUnavailable`] if there is no roster for `repeat`.
    pub fn seed_repeat(&self, repeat: usize, team1: &mut Team, team2: &mut Team) -> Result<()> {
        if let Self::ArrangeOnly { rosters } = self {
            let roster = rosters.get(repeat).ok_or(SimError::RosterUnavailable {
                repeat,
                available: rosters.len(),
            })?;
            team1.repopulate(roster);
            team2.repopulate(roster);
        }
        Ok(())
    }

    /// Resolves one turn of attacks from `offense` against `defense`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::IllegalAttack`] on the first attack whose result
    /// diverges from the reference formula.
    pub fn resolve_attacks<R: Rng + ?Sized>(
        &self,
        offense: &mut Team,
        defense: &mut Team,
        rng: &mut R,
        sink: &dyn EventSink,
    ) -> Result<()> {
        for index in 0..offense.len().min(defense.len()) {
            let (Some(attacker), Some(target)) = (offense.get_mut(index), defense.get_mut(index))
            else {
                continue;
            };

            if matches!(self, Self::Evasion) && evasion::try_evade(target, rng, sink) {
                continue;
            }

            combat::resolve_checked(attacker, target)?;
        }
        Ok(())
    }
}

impl fmt::Debug for AttackPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArrangeOnly { rosters } => f
                .debug_struct("ArrangeOnly")
                .field("rosters", &rosters.len())
                .finish(),
            other => f.write_str(other.name()),
        }
    }
}
