//! Evasion resolver.
//!
//! `rate = target.evs / 100`; a uniform draw `rn` in `[0, 1)` evades iff
//! `rn <= rate`. A rate of zero or less never evades, even on a zero draw. A
//! rate of one or more always evades. Out-of-range evasion is not clamped
//! here; validating it is the team builder's job.
//!
//! Every roll consumes exactly one draw, whatever the rate, so the random
//! stream stays aligned across teams with and without evasion.

use rand::Rng;

use crate::event::{EventSink, SimEvent};
use crate::unit::Unit;

/// Outcome of an evasion roll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvasionRoll {
    /// Evasion rate in `[0, 1]` terms (not clamped).
    pub rate: f64,
    /// The uniform draw.
    pub draw: f64,
    /// Whether the attack is nullified.
    pub evaded: bool,
}

/// Rolls evasion for `target`, consuming one draw from `rng`.
pub fn roll<R: Rng + ?Sized>(target: &Unit, rng: &mut R) -> EvasionRoll {
    let rate = target.evs() / 100.0;
    let draw: f64 = rng.gen();
    EvasionRoll {
        rate,
        draw,
        evaded: rate > 0.0 && draw <= rate,
    }
}

/// Rolls evasion and reports an [`SimEvent::Evaded`] when it succeeds.
pub fn try_evade<R: Rng + ?Sized>(target: &Unit, rng: &mut R, sink: &dyn EventSink) -> bool {
    let result = roll(target, rng);
    if result.evaded {
        sink.emit(&SimEvent::Evaded {
            unit: target.name().to_string(),
            rate: result.rate,
            draw: result.draw,
        });
    }
    result.evaded
}
