//! Early-unlock penalty

use crate::math::*;
use crate::state::*;

/// Penalty charged on `amount` when unlocking at `now`.
///
/// Only a success-phase unlock before the longstop date pays; reaching the
/// date exactly is already penalty-free. Failure releases everything.
pub fn unlock_penalty(
    amount: u128,
    now: u64,
    unlock_at: u64,
    penalty_fraction: u128,
    phase: Phase,
) -> u128 {
    match phase {
        Phase::AcceptingUnlocks if now < unlock_at => fraction_of(amount, penalty_fraction),
        _ => 0,
    }
}

/// floor(amount * fraction / WHOLE_UNIT), fraction clamped to one whole unit
pub fn fraction_of(amount: u128, fraction: u128) -> u128 {
    mul_div_floor(amount, fraction, WHOLE_UNIT)
}

/// Asset split of an unlock: (to investor, to disbursal destination)
pub fn split_unlock(
    amount: u128,
    now: u64,
    unlock_at: u64,
    penalty_fraction: u128,
    phase: Phase,
) -> (u128, u128) {
    let penalty = unlock_penalty(amount, now, unlock_at, penalty_fraction, phase);
    (sub_u128(amount, penalty), penalty)
}
