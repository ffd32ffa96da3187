//! Judges decide the winner of a repeat.
//!
//! One judge instance serves every repeat of a `play` call. The simulator
//! calls [`Judge::initialize`] at the start of each repeat, [`Judge::update`]
//! after every turn and [`Judge::decide`] once the turn loop ends. A judge's
//! state must be fully reset by `initialize`.

use std::cmp::Ordering;

use crate::team::Team;

/// Final verdict of a repeat.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Decision {
    /// The named team won.
    Winner(String),
    /// Nobody won.
    Draw,
}

impl Decision {
    /// Winner name, `None` for a draw.
    #[must_use]
    pub fn winner(&self) -> Option<&str> {
        match self {
            Self::Winner(name) => Some(name),
            Self::Draw => None,
        }
    }
}

/// Turn-by-turn scoring policy.
pub trait Judge {
    /// Resets all per-repeat state.
    fn initialize(&mut self);

    /// Observes the teams after turn `turn` (zero-based).
    fn update(&mut self, turn: usize, team1: &Team, team2: &Team);

    /// Renders the verdict for the finished repeat.
    fn decide(&mut self, team1: &Team, team2: &Team) -> Decision;
}

/// Default judge: the team with more live units wins.
///
/// Equal live counts are a draw. Per-turn counts are kept in
/// [`history`](Self::history) until the next `initialize`.
#[derive(Debug, Clone, Default)]
pub struct MaxSurvivalJudge {
    history: Vec<(usize, usize)>,
}

impl MaxSurvivalJudge {
    /// Creates a judge with empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Live counts `(team1, team2)` recorded after each turn of the current repeat.
    #[must_use]
    pub fn history(&self) -> &[(usize, usize)] {
        &self.history
    }
}

impl Judge for MaxSurvivalJudge {
    fn initialize(&mut self) {
        self.history.clear();
    }

    fn update(&mut self, _turn: usize, team1: &Team, team2: &Team) {
        self.history.push((team1.num_alive(), team2.num_alive()));
    }

    fn decide(&mut self, team1: &Team, team2: &Team) -> Decision {
        match team1.num_alive().cmp(&team2.num_alive()) {
            Ordering::Greater => Decision::Winner(team1.name().to_string()),
            Ordering::Less => Decision::Winner(team2.name().to_string()),
            Ordering::Equal => Decision::Draw,
        }
    }
}
