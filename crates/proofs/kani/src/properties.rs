//! Explicit property proofs for documentation and clarity
//!
//! These pin the penalty arithmetic on its own, independent of any state.

use lock_model::{math::*, penalty::*, state::*};

/// P1: Penalty is floor(amount * p) strictly before the date, zero at/after it
#[kani::proof]
fn p1_penalty_step_at_unlock_date() {
    let amount: u128 = kani::any();
    let fraction: u128 = kani::any();
    let now: u64 = kani::any();
    let unlock_at: u64 = kani::any();

    kani::assume(amount < 1_000_000);
    kani::assume(fraction <= WHOLE_UNIT);

    let p = unlock_penalty(amount, now, unlock_at, fraction, Phase::AcceptingUnlocks);
    if now >= unlock_at {
        assert_eq!(p, 0, "P1: no penalty at or after the unlock date");
    } else {
        assert_eq!(p, amount * fraction / WHOLE_UNIT, "P1: penalty is the floored fraction");
    }
}

/// P2: Penalty never exceeds the ticket
#[kani::proof]
fn p2_penalty_bounded_by_amount() {
    let amount: u128 = kani::any();
    let fraction: u128 = kani::any();

    let (out, penalty) = split_unlock(amount, 0, 1, fraction, Phase::AcceptingUnlocks);
    assert!(penalty <= amount, "P2: penalty cannot exceed the ticket");
    assert_eq!(out + penalty, amount, "P2: split must conserve the ticket");
}

/// P3: Penalty is monotone in the fraction
#[kani::proof]
fn p3_penalty_monotone_in_fraction() {
    let amount: u128 = kani::any();
    let f1: u128 = kani::any();
    let f2: u128 = kani::any();
    kani::assume(amount < 1_000_000);
    kani::assume(f1 <= f2 && f2 <= WHOLE_UNIT);

    assert!(fraction_of(amount, f1) <= fraction_of(amount, f2), "P3: higher fraction, higher penalty");
}

/// P4: mul_div_floor is exact where the naive product does not overflow
#[kani::proof]
fn p4_mul_div_floor_exact() {
    let a: u128 = kani::any();
    let num: u128 = kani::any();
    let den: u128 = kani::any();
    kani::assume(a < 1 << 40 && den > 0 && den < 1 << 40 && num <= den);

    assert_eq!(mul_div_floor(a, num, den), a * num / den);
}
