//! Team composition checks run before every turn.
//!
//! The [`Examiner`] trait is the seam for league rules. [`TeamExaminer`]
//! only enforces what the engine itself relies on; stat legality belongs to
//! whoever defines a league's rounds.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RuleViolation;
use crate::team::Team;

/// Identifier of a league round.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeagueRound(String);

impl LeagueRound {
    /// Creates a round identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LeagueRound {
    fn default() -> Self {
        Self::new("round-01")
    }
}

impl fmt::Display for LeagueRound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LeagueRound {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Rule-compliance checker for one turn.
pub trait Examiner: Send + Sync {
    /// Checks the turn's `offense` and `defense` under `round`'s rules.
    ///
    /// # Errors
    ///
    /// Returns the first [`RuleViolation`] found.
    fn check_play(
        &self,
        offense: &Team,
        defense: &Team,
        round: &LeagueRound,
    ) -> Result<(), RuleViolation>;
}

/// Limits applied by [`TeamExaminer`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRules {
    /// Maximum number of slots per team, unlimited if `None`.
    pub max_team_size: Option<usize>,
}

/// Structural examiner.
///
/// Rejects mismatched slot counts, units whose team back-reference names
/// another team, duplicate live unit names and teams above
/// [`RoundRules::max_team_size`].
#[derive(Debug, Clone, Default)]
pub struct TeamExaminer {
    rules: RoundRules,
}

impl TeamExaminer {
    /// Creates an examiner with no size limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an examiner with the given rules.
    #[must_use]
    pub fn with_rules(rules: RoundRules) -> Self {
        Self { rules }
    }

    fn check_team(&self, team: &Team, round: &LeagueRound) -> Result<(), RuleViolation> {
        if let Some(max) = self.rules.max_team_size {
            if team.len() > max {
                return Err(RuleViolation::TooManyUnits {
                    team: team.name().to_string(),
                    size: team.len(),
                    round: round.to_string(),
                    max,
                });
            }
        }

        let mut names = HashSet::new();
        for unit in team.iter().flatten() {
            if unit.team() != team.name() {
                return Err(RuleViolation::ForeignUnit {
                    unit: unit.name().to_string(),
                    team: team.name().to_string(),
                    owner: unit.team().to_string(),
                });
            }
            if !names.insert(unit.name()) {
                return Err(RuleViolation::DuplicateUnit {
                    team: team.name().to_string(),
                    unit: unit.name().to_string(),
                });
            }
        }
        Ok(())
    }
}

impl Examiner for TeamExaminer {
    fn check_play(
        &self,
        offense: &Team,
        defense: &Team,
        round: &LeagueRound,
    ) -> Result<(), RuleViolation> {
        if offense.len() != defense.len() {
            return Err(RuleViolation::SizeMismatch {
                offense: offense.name().to_string(),
                offense_size: offense.len(),
                defense: defense.name().to_string(),
                defense_size: defense.len(),
            });
        }
        self.check_team(offense, round)?;
        self.check_team(defense, round)
    }
}
