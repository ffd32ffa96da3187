//! Reference combat formula and the attack consistency check.
//!
//! The reference formula is the authoritative combat rule:
//! - `damage = max(attacker.att - target.arm, 0)`
//! - `target.hp -= damage`
//! - the attacker is unchanged
//!
//! It is never used to produce the live result. The live result always comes
//! from the unit's own [`AttackBehavior`](crate::unit::AttackBehavior); the
//! formula only shadows it. [`resolve_checked`] runs the live attack and
//! compares both units against the formula applied to pre-attack snapshots.

use crate::error::{Result, SimError};
use crate::unit::{Unit, UnitStats};

/// Applies the reference combat formula in place.
///
/// # Example
///
/// ```
/// use loa_core::resolver::combat::reference_attack;
/// use loa_core::unit::UnitStats;
///
/// let mut attacker = UnitStats::new("knight", "red", 30.0, 8.0, 2.0, 0.0);
/// let mut target = UnitStats::new("archer", "blue", 20.0, 6.0, 1.0, 0.0);
/// reference_attack(&mut attacker, &mut target);
/// assert_eq!(target.hp, 13.0);
/// ```
pub fn reference_attack(attacker: &mut UnitStats, target: &mut UnitStats) {
    let damage = (attacker.att - target.arm).max(0.0);
    target.hp -= damage;
}

/// Computes the expected post-attack `(attacker, target)` stats from
/// pre-attack snapshots.
#[must_use]
pub fn expected_outcome(attacker: &UnitStats, target: &UnitStats) -> (UnitStats, UnitStats) {
    let mut attacker = attacker.clone();
    let mut target = target.clone();
    reference_attack(&mut attacker, &mut target);
    (attacker, target)
}

/// Checks a finished attack against the reference formula.
///
/// # Errors
///
/// Returns [`SimError::IllegalAttack`] if either unit's actual state differs
/// from the expected state.
pub fn verify_attack(
    attacker_before: &UnitStats,
    target_before: &UnitStats,
    attacker_after: &UnitStats,
    target_after: &UnitStats,
) -> Result<()> {
    let (expected_attacker, expected_target) = expected_outcome(attacker_before, target_before);
    if expected_attacker != *attacker_after || expected_target != *target_after {
        tracing::error!(
            unit = %attacker_before.name,
            team = %attacker_before.team,
            ?expected_attacker,
            actual_attacker = ?attacker_after,
            ?expected_target,
            actual_target = ?target_after,
            "attack() performs illegal behaviors"
        );
        return Err(SimError::IllegalAttack {
            unit: attacker_before.name.clone(),
            team: attacker_before.team.clone(),
        });
    }
    Ok(())
}

/// Runs one live attack and verifies it against the reference formula.
///
/// # Errors
///
/// Returns [`SimError::IllegalAttack`] on any divergence.
pub fn resolve_checked(attacker: &mut Unit, target: &mut Unit) -> Result<()> {
    let attacker_before = attacker.snapshot();
    let target_before = target.snapshot();

    attacker.attack(target);

    verify_attack(
        attacker_before.stats(),
        target_before.stats(),
        attacker.stats(),
        target.stats(),
    )
}
