//! Simulation events and pluggable event sinks.
//!
//! The simulator reports turn boundaries, deaths, evasions and live-unit
//! counts as [`SimEvent`]s. None of them affect control flow. Sinks must not
//! block; [`TracingSink`] hands events to `tracing` and [`EventLog`] buffers
//! them in memory.
//!
//! # Example
//!
//! ```
//! use loa_core::event::{EventLog, EventSink, SimEvent};
//!
//! let log = EventLog::new();
//! log.emit(&SimEvent::UnitDied { team: "red".into(), unit: "knight".into() });
//!
//! let events = log.take_events();
//! assert_eq!(events.len(), 1);
//! assert!(log.take_events().is_empty());
//! ```

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Structured simulation event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// A turn is about to run. Indices are zero-based.
    TurnStarted {
        /// Repeat index
        repeat: usize,
        /// Turn index within the repeat
        turn: usize,
        /// Team attacking this turn
        offense: String,
        /// Team defending this turn
        defense: String,
    },
    /// A unit was removed from its slot after its health dropped to zero.
    UnitDied {
        /// Owning team
        team: String,
        /// Unit name
        unit: String,
    },
    /// An attack was nullified by the target's evasion.
    Evaded {
        /// Evading unit
        unit: String,
        /// Evasion rate in `[0, 1]` terms
        rate: f64,
        /// The random draw that was compared to the rate
        draw: f64,
    },
    /// Live-unit counts after a turn.
    UnitCounts {
        /// Original first team name
        team1: String,
        /// Live units in the first team
        alive1: usize,
        /// Original second team name
        team2: String,
        /// Live units in the second team
        alive2: usize,
    },
    /// A repeat finished and the judge reached a verdict.
    RepeatFinished {
        /// Repeat index
        repeat: usize,
        /// Winning team name, `None` for a draw
        winner: Option<String>,
    },
}

/// Destination for simulation events.
pub trait EventSink: Send + Sync {
    /// Records one event. Must not block the simulation.
    fn emit(&self, event: &SimEvent);
}

/// Sink that forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &SimEvent) {
        match event {
            SimEvent::TurnStarted {
                repeat,
                turn,
                offense,
                defense,
            } => tracing::debug!(
                repeat = repeat + 1,
                turn = turn + 1,
                %offense,
                %defense,
                "turn started"
            ),
            SimEvent::UnitDied { team, unit } => {
                tracing::debug!("{team}.{unit} has been dead");
            }
            SimEvent::Evaded { unit, rate, draw } => {
                tracing::debug!("{unit} evades with {rate:.4} (draw {draw:.4})");
            }
            SimEvent::UnitCounts {
                team1,
                alive1,
                team2,
                alive2,
            } => tracing::trace!("#units in {team1}={alive1}, #units in {team2}={alive2}"),
            SimEvent::RepeatFinished { repeat, winner } => match winner {
                Some(name) => tracing::debug!(repeat = repeat + 1, winner = %name, "repeat finished"),
                None => tracing::debug!(repeat = repeat + 1, "repeat finished in a draw"),
            },
        }
    }
}

/// Sink that buffers events in memory.
///
/// The buffer sits behind a `Mutex` so the log satisfies `Send + Sync`
/// and can be shared with parallel repeats.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<SimEvent>>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains and returns all recorded events.
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn take_events(&self) -> Vec<SimEvent> {
        std::mem::take(&mut *self.events.lock().expect("event log mutex poisoned"))
    }

    /// Number of buffered events.
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().expect("event log mutex poisoned").len()
    }

    /// Returns true if no events are buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for EventLog {
    fn emit(&self, event: &SimEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
