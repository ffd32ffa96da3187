//! Simulator configuration.

use serde::{Deserialize, Serialize};

use crate::examiner::LeagueRound;

/// Configuration for a [`Simulator`](crate::simulation::Simulator).
///
/// # Example
///
/// ```
/// use loa_core::config::SimulatorConfig;
///
/// let config = SimulatorConfig::default().with_turns(3).with_seed(7);
/// assert_eq!(config.num_turns, 3);
/// assert_eq!(config.num_repeats, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Round whose rules the examiner applies.
    pub round: LeagueRound,
    /// Maximum turns per repeat.
    pub num_turns: usize,
    /// Number of repeats per `play` call.
    pub num_repeats: usize,
    /// Seed for the simulator's random source.
    pub seed: u64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            round: LeagueRound::default(),
            num_turns: 10,
            num_repeats: 10,
            seed: 0,
        }
    }
}

impl SimulatorConfig {
    /// Sets the round.
    #[must_use]
    pub fn with_round(mut self, round: impl Into<LeagueRound>) -> Self {
        self.round = round.into();
        self
    }

    /// Sets the turn cap.
    #[must_use]
    pub fn with_turns(mut self, num_turns: usize) -> Self {
        self.num_turns = num_turns;
        self
    }

    /// Sets the number of repeats.
    #[must_use]
    pub fn with_repeats(mut self, num_repeats: usize) -> Self {
        self.num_repeats = num_repeats;
        self
    }

    /// Sets the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
