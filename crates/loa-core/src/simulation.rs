//! Simulation module with the repeat and turn loops.
//!
//! The [`Simulator`] plays two teams against each other for a number of
//! repeats and tallies the judge's verdicts:
//!
//! 1. **COPY**: Deep-copy both teams into working copies
//! 2. **SEED**: Run the policy's per-repeat seed hook
//! 3. **CHECK**: Reject working copies of different sizes
//! 4. **TURNS**: Alternate offense and defense until the turn cap or until
//!    one side has no live units
//! 5. **DECIDE**: Ask the judge and tally the verdict against the caller's
//!    original team names
//!
//! Each turn runs the [`TurnHook`], examines the composition, lets the
//! offense arrange itself against a snapshot of the defense, resolves
//! attacks, clears dead units on both sides (offense first) and reports live
//! counts.
//!
//! # Determinism
//!
//! Team 1 starts on offense in even repeats and team 2 in odd repeats,
//! regardless of earlier outcomes. The only randomness is drawn from the
//! simulator's seeded `ChaCha8Rng`, so a seed fully determines a run.
//!
//! # Errors
//!
//! Any [`SimError`] aborts the whole run. No partial tally is returned.
//!
//! # Example
//!
//! ```
//! use loa_core::config::SimulatorConfig;
//! use loa_core::judge::MaxSurvivalJudge;
//! use loa_core::resolver::AttackPolicy;
//! use loa_core::simulation::Simulator;
//! use loa_core::team::Team;
//! use loa_core::unit::UnitStats;
//!
//! let stats = |name: &str| UnitStats::new(name, "", 10.0, 4.0, 1.0, 0.0);
//! let red = Team::from_stats("red", vec![stats("a"), stats("b")]);
//! let blue = Team::from_stats("blue", vec![stats("x"), stats("y")]);
//!
//! let config = SimulatorConfig::default().with_turns(1).with_repeats(4);
//! let mut sim = Simulator::new(config, AttackPolicy::Basic);
//! let tally = sim.play(&red, &blue, &mut MaxSurvivalJudge::new()).unwrap();
//!
//! assert_eq!(tally.total(), 4);
//! assert_eq!(tally.draws, 4);
//! ```

use std::fmt;
use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::SimulatorConfig;
use crate::error::{Result, SimError};
use crate::event::{EventSink, SimEvent, TracingSink};
use crate::examiner::{Examiner, LeagueRound, TeamExaminer};
use crate::judge::Judge;
use crate::resolver::{death, AttackPolicy};
use crate::team::{Roster, Team};

// =============================================================================
// Tally
// =============================================================================

/// Outcome of a single repeat, keyed by the caller's original teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The first team won.
    Team1,
    /// The second team won.
    Team2,
    /// Nobody won.
    Draw,
}

/// Win/loss/draw counters accumulated over repeats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    /// Repeats won by the first team.
    pub team1_wins: usize,
    /// Repeats won by the second team.
    pub team2_wins: usize,
    /// Drawn repeats.
    pub draws: usize,
}

impl Tally {
    /// Counts one outcome.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Team1 => self.team1_wins += 1,
            Outcome::Team2 => self.team2_wins += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    /// Sums two partial tallies.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            team1_wins: self.team1_wins + other.team1_wins,
            team2_wins: self.team2_wins + other.team2_wins,
            draws: self.draws + other.draws,
        }
    }

    /// Number of repeats counted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.team1_wins + self.team2_wins + self.draws
    }
}

impl From<Outcome> for Tally {
    fn from(outcome: Outcome) -> Self {
        let mut tally = Self::default();
        tally.record(outcome);
        tally
    }
}

impl From<Tally> for (usize, usize, usize) {
    fn from(tally: Tally) -> Self {
        (tally.team1_wins, tally.team2_wins, tally.draws)
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} wins / {} losses / {} draws",
            self.team1_wins, self.team2_wins, self.draws
        )
    }
}

// =============================================================================
// Turn Hook
// =============================================================================

/// Callback run at the start of every executed turn, before the examiner.
///
/// The hook may adjust either team's working copy. It is shared by all
/// repeats, including parallel ones.
pub trait TurnHook: Send + Sync {
    /// Called with the turn index and the current roles.
    fn on_turn(&self, turn: usize, offense: &mut Team, defense: &mut Team);
}

/// Turn hook that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTurnHook;

impl TurnHook for NoTurnHook {
    fn on_turn(&self, _turn: usize, _offense: &mut Team, _defense: &mut Team) {}
}

// =============================================================================
// Engine
// =============================================================================

/// The repeat and turn drivers, separated from the random source so the
/// sequential and parallel paths can share them.
struct Engine {
    policy: AttackPolicy,
    examiner: Arc<dyn Examiner>,
    sink: Arc<dyn EventSink>,
    turn_hook: Arc<dyn TurnHook>,
    round: LeagueRound,
}

impl Engine {
    /// Plays one full repeat on fresh copies of `team1` and `team2`.
    fn run_repeat(
        &self,
        repeat: usize,
        team1: &Team,
        team2: &Team,
        num_turns: usize,
        judge: &mut dyn Judge,
        rng: &mut ChaCha8Rng,
    ) -> Result<Outcome> {
        let mut teams = [team1.snapshot(), team2.snapshot()];
        {
            let [first, second] = &mut teams;
            self.policy.seed_repeat(repeat, first, second)?;
        }

        if teams[0].len() != teams[1].len() {
            let err = SimError::TeamSizeMismatch {
                team1: team1.name().to_string(),
                size1: teams[0].len(),
                team2: team2.name().to_string(),
                size2: teams[1].len(),
            };
            tracing::error!("{err}");
            return Err(err);
        }

        let mut offense = repeat % 2;
        judge.initialize();
        for turn in 0..num_turns {
            let (alive1, alive2) = self.run_turn(repeat, turn, &mut teams, offense, rng)?;
            judge.update(turn, &teams[0], &teams[1]);
            if alive1 == 0 || alive2 == 0 {
                break;
            }
            offense = 1 - offense;
        }

        let decision = judge.decide(&teams[0], &teams[1]);
        let outcome = match decision.winner() {
            Some(name) if name == team1.name() => Outcome::Team1,
            Some(name) if name == team2.name() => Outcome::Team2,
            _ => Outcome::Draw,
        };
        self.sink.emit(&SimEvent::RepeatFinished {
            repeat,
            winner: decision.winner().map(str::to_string),
        });
        Ok(outcome)
    }

    /// Plays one turn with `teams[offense]` attacking. Returns live counts
    /// `(team1, team2)` after dead units are cleared.
    fn run_turn(
        &self,
        repeat: usize,
        turn: usize,
        teams: &mut [Team; 2],
        offense: usize,
        rng: &mut ChaCha8Rng,
    ) -> Result<(usize, usize)> {
        {
            let (offense, defense) = split_roles(teams, offense);
            self.sink.emit(&SimEvent::TurnStarted {
                repeat,
                turn,
                offense: offense.name().to_string(),
                defense: defense.name().to_string(),
            });

            self.turn_hook.on_turn(turn, offense, defense);

            if let Err(violation) = self.examiner.check_play(offense, defense, &self.round) {
                tracing::error!(round = %self.round, "{violation}");
                return Err(violation.into());
            }

            let defense_snapshot = defense.snapshot();
            offense.arrange(&defense_snapshot);

            self.policy
                .resolve_attacks(offense, defense, rng, self.sink.as_ref())?;

            death::clear_dead_units(offense, self.sink.as_ref());
            death::clear_dead_units(defense, self.sink.as_ref());
        }

        let counts = (teams[0].num_alive(), teams[1].num_alive());
        self.sink.emit(&SimEvent::UnitCounts {
            team1: teams[0].name().to_string(),
            alive1: counts.0,
            team2: teams[1].name().to_string(),
            alive2: counts.1,
        });
        Ok(counts)
    }
}

/// Borrows `(offense, defense)` out of the team pair.
fn split_roles(teams: &mut [Team; 2], offense: usize) -> (&mut Team, &mut Team) {
    let [first, second] = teams;
    if offense == 0 {
        (first, second)
    } else {
        (second, first)
    }
}

/// Independent random stream for one parallel repeat.
fn repeat_rng(seed: u64, repeat: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(repeat as u64);
    rng
}

// =============================================================================
// Simulator
// =============================================================================

/// Plays repeated matches between two teams.
///
/// The simulator owns the attack policy, the examiner, the event sink and a
/// seeded random source. The caller's teams are never mutated; every repeat
/// works on deep copies.
pub struct Simulator {
    config: SimulatorConfig,
    engine: Engine,
    rng: ChaCha8Rng,
}

impl fmt::Debug for Simulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulator")
            .field("config", &self.config)
            .field("policy", &self.engine.policy)
            .finish_non_exhaustive()
    }
}

impl Simulator {
    /// Creates a simulator with the default [`TeamExaminer`], [`TracingSink`]
    /// and [`NoTurnHook`].
    #[must_use]
    pub fn new(config: SimulatorConfig, policy: AttackPolicy) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        let engine = Engine {
            policy,
            examiner: Arc::new(TeamExaminer::new()),
            sink: Arc::new(TracingSink),
            turn_hook: Arc::new(NoTurnHook),
            round: config.round.clone(),
        };
        Self {
            config,
            engine,
            rng,
        }
    }

    /// Simulator with plain checked attacks.
    #[must_use]
    pub fn basic(config: SimulatorConfig) -> Self {
        Self::new(config, AttackPolicy::Basic)
    }

    /// Simulator whose attacks can be evaded.
    #[must_use]
    pub fn evasion(config: SimulatorConfig) -> Self {
        Self::new(config, AttackPolicy::Evasion)
    }

    /// Simulator that re-populates both teams from `rosters[r]` in repeat `r`.
    #[must_use]
    pub fn arrange_only(config: SimulatorConfig, rosters: Vec<Roster>) -> Self {
        Self::new(config, AttackPolicy::ArrangeOnly { rosters })
    }

    /// Replaces the examiner.
    #[must_use]
    pub fn with_examiner(mut self, examiner: Arc<dyn Examiner>) -> Self {
        self.engine.examiner = examiner;
        self
    }

    /// Replaces the event sink.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.engine.sink = sink;
        self
    }

    /// Replaces the per-turn hook.
    #[must_use]
    pub fn with_turn_hook(mut self, turn_hook: Arc<dyn TurnHook>) -> Self {
        self.engine.turn_hook = turn_hook;
        self
    }

    /// Replaces the random source.
    #[must_use]
    pub fn with_rng(mut self, rng: ChaCha8Rng) -> Self {
        self.rng = rng;
        self
    }

    /// Re-seeds the random source from the configured seed.
    pub fn reset_rng(&mut self) {
        self.rng = ChaCha8Rng::seed_from_u64(self.config.seed);
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Returns the attack policy.
    #[must_use]
    pub fn policy(&self) -> &AttackPolicy {
        &self.engine.policy
    }

    /// Plays the configured number of repeats and turns.
    ///
    /// # Errors
    ///
    /// Fails on the first size mismatch, rule violation, illegal attack or
    /// missing roster. Completed repeats are discarded.
    pub fn play(&mut self, team1: &Team, team2: &Team, judge: &mut dyn Judge) -> Result<Tally> {
        let (num_turns, num_repeats) = (self.config.num_turns, self.config.num_repeats);
        self.play_turns(team1, team2, num_turns, num_repeats, judge)
    }

    /// Plays `num_repeats` repeats of at most `num_turns` turns each.
    ///
    /// # Errors
    ///
    /// See [`play`](Self::play).
    pub fn play_turns(
        &mut self,
        team1: &Team,
        team2: &Team,
        num_turns: usize,
        num_repeats: usize,
        judge: &mut dyn Judge,
    ) -> Result<Tally> {
        self.engine.policy.validate(num_repeats).inspect_err(|err| {
            tracing::error!("{err}");
        })?;

        tracing::info!(
            team1 = team1.name(),
            team2 = team2.name(),
            policy = self.engine.policy.name(),
            num_turns,
            num_repeats,
            "play started"
        );

        let mut tally = Tally::default();
        for repeat in 0..num_repeats {
            let outcome =
                self.engine
                    .run_repeat(repeat, team1, team2, num_turns, judge, &mut self.rng)?;
            tally.record(outcome);
        }

        tracing::info!(team1 = team1.name(), team2 = team2.name(), %tally, "play finished");
        Ok(tally)
    }

    /// Plays the configured repeats in parallel.
    ///
    /// Every repeat gets its own judge from `judge_factory` and its own random
    /// stream derived from the configured seed and the repeat index, so the
    /// result is reproducible but differs from [`play`](Self::play). The
    /// simulator's own random source is not touched.
    ///
    /// # Errors
    ///
    /// See [`play`](Self::play).
    pub fn play_parallel<J, F>(&self, team1: &Team, team2: &Team, judge_factory: F) -> Result<Tally>
    where
        J: Judge,
        F: Fn() -> J + Sync,
    {
        let SimulatorConfig {
            num_turns,
            num_repeats,
            seed,
            ..
        } = self.config;

        self.engine.policy.validate(num_repeats).inspect_err(|err| {
            tracing::error!("{err}");
        })?;

        let tally = (0..num_repeats)
            .into_par_iter()
            .map(|repeat| {
                let mut judge = judge_factory();
                let mut rng = repeat_rng(seed, repeat);
                self.engine
                    .run_repeat(repeat, team1, team2, num_turns, &mut judge, &mut rng)
                    .map(Tally::from)
            })
            .try_reduce(Tally::default, |a, b| Ok(a.merge(b)))?;

        tracing::info!(team1 = team1.name(), team2 = team2.name(), %tally, "parallel play finished");
        Ok(tally)
    }
}
