//! Error types for the simulator.
//!
//! Every variant of [`SimError`] is fatal: it unwinds out of the whole
//! multi-repeat `play` call and no partial tally is returned. Deaths and
//! evasions are not errors; they are reported as [`SimEvent`](crate::event::SimEvent)s.

use thiserror::Error;

/// A team composition rejected by an [`Examiner`](crate::examiner::Examiner).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    /// The two teams do not have the same number of slots.
    #[error("{offense} has {offense_size} slots but {defense} has {defense_size}")]
    SizeMismatch {
        /// Offense team name
        offense: String,
        /// Offense slot count
        offense_size: usize,
        /// Defense team name
        defense: String,
        /// Defense slot count
        defense_size: usize,
    },

    /// A team has more slots than the round allows.
    #[error("{team} has {size} slots, round {round} allows at most {max}")]
    TooManyUnits {
        /// Team name
        team: String,
        /// Slot count
        size: usize,
        /// Round identifier
        round: String,
        /// Allowed maximum
        max: usize,
    },

    /// A unit's back-reference names a different team than the one holding it.
    #[error("{unit} sits in {team} but belongs to {owner}")]
    ForeignUnit {
        /// Unit name
        unit: String,
        /// Team holding the unit
        team: String,
        /// Team recorded on the unit
        owner: String,
    },

    /// Two live units of one team share a name.
    #[error("{team} has more than one unit named {unit}")]
    DuplicateUnit {
        /// Team name
        team: String,
        /// Duplicated unit name
        unit: String,
    },
}

/// Fatal simulation failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// Working copies have different slot counts after seeding.
    #[error("the sizes of {team1} ({size1}) and {team2} ({size2}) do not match")]
    TeamSizeMismatch {
        /// First team name
        team1: String,
        /// First team slot count
        size1: usize,
        /// Second team name
        team2: String,
        /// Second team slot count
        size2: usize,
    },

    /// A unit's attack produced a state the reference formula disagrees with.
    #[error("{team}.{unit} attack() performs illegal behaviors")]
    IllegalAttack {
        /// Attacking unit name
        unit: String,
        /// Attacking unit's team
        team: String,
    },

    /// The examiner rejected a turn.
    #[error("rule violation: {0}")]
    RuleViolation(#[from] RuleViolation),

    /// The arrange-only roster list is shorter than the number of repeats.
    #[error("repeat {repeat} needs a roster but only {available} are available")]
    RosterUnavailable {
        /// Zero-based repeat index
        repeat: usize,
        /// Number of rosters supplied
        available: usize,
    },
}

/// Result alias for simulator operations.
pub type Result<T> = std::result::Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_violation_converts_into_sim_error() {
        let violation = RuleViolation::DuplicateUnit {
            team: "red".into(),
            unit: "knight".into(),
        };
        let err: SimError = violation.clone().into();
        assert_eq!(err, SimError::RuleViolation(violation));
        assert!(err.to_string().contains("knight"));
    }

    #[test]
    fn size_mismatch_message_names_both_teams() {
        let err = SimError::TeamSizeMismatch {
            team1: "red".into(),
            size1: 3,
            team2: "blue".into(),
            size2: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("red (3)"));
        assert!(msg.contains("blue (2)"));
    }
}
