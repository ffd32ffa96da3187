//! # LOA Core
//!
//! Turn-based team combat simulator for LOA league matches.
//!
//! Two teams of units are played against each other for a number of
//! repeats. Each repeat is a bounded sequence of turns in which the offense
//! team's units attack the positionally aligned units of the defense team,
//! after which the roles swap. A pluggable judge turns the final state into a
//! verdict and the simulator tallies wins, losses and draws.
//!
//! ## Architecture
//!
//! - **Units and teams**: [`unit`], [`team`] (pluggable attack and arrangement)
//! - **Resolvers**: attack policies, the reference combat check, evasion and
//!   death clearing ([`resolver`])
//! - **Collaborators**: [`judge`], [`examiner`], [`event`] sinks
//! - **Drivers**: the repeat and turn loops ([`simulation`])
//!
//! Every attack a unit performs is shadowed by the reference combat formula;
//! any divergence aborts the whole run.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use loa_core::{MaxSurvivalJudge, Simulator, SimulatorConfig};
//!
//! let mut sim = Simulator::evasion(SimulatorConfig::default().with_seed(42));
//! let tally = sim.play(&team1, &team2, &mut MaxSurvivalJudge::new())?;
//! println!("{tally}");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod event;
pub mod examiner;
pub mod judge;
pub mod resolver;
pub mod simulation;
pub mod team;
pub mod unit;

#[cfg(test)]
mod tests;

pub use config::SimulatorConfig;
pub use error::{Result, RuleViolation, SimError};
pub use event::{EventLog, EventSink, SimEvent, TracingSink};
pub use examiner::{Examiner, LeagueRound, RoundRules, TeamExaminer};
pub use judge::{Decision, Judge, MaxSurvivalJudge};
pub use resolver::AttackPolicy;
pub use simulation::{NoTurnHook, Outcome, Simulator, Tally, TurnHook};
pub use team::{Arrangement, ArrangementClone, KeepFormation, Roster, Team};
pub use unit::{AttackBehavior, BehaviorClone, StandardAttack, Unit, UnitStats};
