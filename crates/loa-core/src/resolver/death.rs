//! Death clearing.
//!
//! Slots are scanned in ascending index order. A unit with health at or
//! below zero is removed and a [`SimEvent::UnitDied`] is reported. Empty
//! slots stay empty, so clearing an already-cleared team does nothing.

use crate::event::{EventSink, SimEvent};
use crate::team::Team;
use crate::unit::Unit;

/// Removes dead units from `team`, returning how many were removed.
pub fn clear_dead_units(team: &mut Team, sink: &dyn EventSink) -> usize {
    let mut removed = 0;
    for index in 0..team.len() {
        if !team.get(index).is_some_and(Unit::is_dead) {
            continue;
        }
        if let Some(unit) = team.remove(index) {
            sink.emit(&SimEvent::UnitDied {
                team: unit.team().to_string(),
                unit: unit.name().to_string(),
            });
            removed += 1;
        }
    }
    removed
}
