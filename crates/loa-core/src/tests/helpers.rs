//! Test helper functions for setting up teams and simulators.
//!
//! This module provides factory functions and stub collaborators that make
//! writing tests more ergonomic and consistent.

use std::sync::{Arc, Mutex};

use rand::RngCore;

use crate::config::SimulatorConfig;
use crate::event::{EventLog, SimEvent};
use crate::judge::{Decision, Judge};
use crate::resolver::AttackPolicy;
use crate::simulation::Simulator;
use crate::team::{Arrangement, Team};
use crate::unit::{AttackBehavior, Unit, UnitStats};

// =============================================================================
// Team Factories
// =============================================================================

/// Builds a team whose units are named `u0`, `u1`, ... with the given health,
/// attack 3, no armor and no evasion.
pub fn team_of(name: &str, hps: &[f64]) -> Team {
    Team::from_stats(
        name,
        hps.iter()
            .enumerate()
            .map(|(i, hp)| UnitStats::new(format!("u{i}"), name, *hp, 3.0, 0.0, 0.0))
            .collect(),
    )
}

/// Builds a team of identical units.
pub fn uniform_team(name: &str, size: usize, hp: f64, att: f64, arm: f64, evs: f64) -> Team {
    Team::from_stats(
        name,
        (0..size)
            .map(|i| UnitStats::new(format!("u{i}"), name, hp, att, arm, evs))
            .collect(),
    )
}

// =============================================================================
// Simulator Setup
// =============================================================================

/// Builds a simulator wired to a fresh [`EventLog`].
pub fn logged_simulator(config: SimulatorConfig, policy: AttackPolicy) -> (Simulator, Arc<EventLog>) {
    let log = Arc::new(EventLog::new());
    let sim = Simulator::new(config, policy).with_sink(log.clone());
    (sim, log)
}

/// Returns the offense team name of every `TurnStarted` event for `turn`.
pub fn offenses_at_turn(events: &[SimEvent], turn: usize) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            SimEvent::TurnStarted {
                turn: t, offense, ..
            } if *t == turn => Some(offense.clone()),
            _ => None,
        })
        .collect()
}

// =============================================================================
// Stub Collaborators
// =============================================================================

/// Attack behavior that never deals damage.
#[derive(Debug, Clone)]
pub struct IgnoreDamage;

impl AttackBehavior for IgnoreDamage {
    fn attack(&self, _attacker: &mut UnitStats, _target: &mut UnitStats) {}
}

/// Wraps every unit of `team` with [`IgnoreDamage`].
pub fn with_faulty_attacks(team: &Team) -> Team {
    let units = team
        .iter()
        .flatten()
        .map(|unit| Unit::with_behavior(unit.stats().clone(), Box::new(IgnoreDamage)))
        .collect();
    Team::new(team.name(), units)
}

/// Arrangement that records the name of every opponent snapshot it saw.
///
/// Copies share the `seen` log, so records survive the simulator's snapshots.
#[derive(Debug, Clone, Default)]
pub struct RecordingArrangement {
    /// Opponent names seen, in order.
    pub seen: Arc<Mutex<Vec<String>>>,
}

impl Arrangement for RecordingArrangement {
    fn arrange(&mut self, _own: &mut [Option<Unit>], opponent: &Team) {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(opponent.name().to_string());
        }
    }
}

/// Judge that always names a fixed team and counts its calls.
#[derive(Debug, Default)]
pub struct FixedJudge {
    /// Name returned by `decide`, `None` for a draw.
    pub verdict: Option<String>,
    /// Number of `initialize` calls.
    pub initializations: usize,
    /// Number of `update` calls since the last `initialize`.
    pub updates: usize,
    /// Largest `updates` seen at decision time.
    pub max_updates: usize,
}

impl FixedJudge {
    /// Creates a judge that always returns `verdict`.
    pub fn new(verdict: Option<&str>) -> Self {
        Self {
            verdict: verdict.map(str::to_string),
            ..Self::default()
        }
    }
}

impl Judge for FixedJudge {
    fn initialize(&mut self) {
        self.initializations += 1;
        self.updates = 0;
    }

    fn update(&mut self, _turn: usize, _team1: &Team, _team2: &Team) {
        self.updates += 1;
    }

    fn decide(&mut self, _team1: &Team, _team2: &Team) -> Decision {
        self.max_updates = self.max_updates.max(self.updates);
        match &self.verdict {
            Some(name) => Decision::Winner(name.clone()),
            None => Decision::Draw,
        }
    }
}

// =============================================================================
// Deterministic Random Source
// =============================================================================

/// RNG whose `gen::<f64>()` always yields the same value in `[0, 1)`.
#[derive(Debug, Clone, Copy)]
pub struct FixedRng {
    bits: u64,
}

impl FixedRng {
    /// Creates a source that always draws `value`.
    ///
    /// # Panics
    ///
    /// Panics if `value` is outside `[0, 1)`.
    pub fn new(value: f64) -> Self {
        assert!((0.0..1.0).contains(&value), "draw must be in [0, 1)");
        // rand maps the top 53 bits of next_u64 onto [0, 1)
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let mantissa = (value * (1u64 << 53) as f64) as u64;
        Self {
            bits: mantissa << 11,
        }
    }
}

impl RngCore for FixedRng {
    fn next_u32(&mut self) -> u32 {
        (self.bits >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.bits
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.bits.to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn fixed_rng_yields_the_requested_draw() {
        for value in [0.0, 0.25, 0.5, 0.75] {
            let draw: f64 = FixedRng::new(value).gen();
            assert_eq!(draw, value);
        }
    }

    #[test]
    fn team_of_binds_units() {
        let team = team_of("red", &[1.0, 2.0]);
        assert_eq!(team.len(), 2);
        assert!(team.iter().flatten().all(|u| u.team() == "red"));
    }
}
