//! Kani safety proofs for the locked-account invariants

use kani::{any, assume};
use lock_model::{helpers::*, state::*, transitions::*};
use crate::{adversary::*, generators::*, sanitizer::*};

/// C1: Conservation
/// Registry, totals, custody and wallets balance across any short sequence,
/// and every reward due stays held by its investor
#[kani::proof]
#[kani::unwind(6)]
fn c1_conservation_holds_across_short_adversary_sequences() {
    let mut s = any_state_bounded().sanitize();
    assume(conservation_ok(&s));
    assume(rewards_backed(&s));

    let mut steps: u8 = any();
    steps = (steps % MAX_STEPS) + 1;

    for _ in 0..steps {
        s = adversary_step(s);
        kani::assert(conservation_ok(&s), "C1: conservation must hold after every step");
        kani::assert(registry_wellformed(&s), "C1: registry must stay well-formed");
        kani::assert(rewards_backed(&s), "C1: every reward due must be held by its investor");
    }
}

/// C2: Merge never extends vesting
#[kani::proof]
fn c2_merge_keeps_earliest_date() {
    let s = any_state_bounded().sanitize();
    assume(!s.investors.is_empty());

    let uid: usize = (any::<u8>() as usize) % s.investors.len();
    let amount: u128 = (any::<u8>() as u128) % 100;
    let now: u64 = (any::<u8>() as u64) % 100;

    let before = s.clone();
    let after = lock(s, uid, amount, 0, now);

    kani::assert(
        unlock_dates_never_extended(&before, &after),
        "C2: a repeated deposit must never push the unlock date later",
    );
}

/// C3: Authorization
/// Without the required role nothing moves
#[kani::proof]
fn c3_unauthorized_cannot_mutate() {
    let mut s = any_state_bounded().sanitize();
    s.authorized_caller = false;
    let before = s.clone();

    let uid: usize = if s.investors.is_empty() { 0 } else { (any::<u8>() as usize) % s.investors.len() };
    let amount: u128 = any();

    let after = lock(s.clone(), uid, amount, any(), any());
    kani::assert(balances_unchanged(&before, &after), "C3: unauthorized lock must not change balances");

    let after = reclaim(s.clone());
    kani::assert(balances_unchanged(&before, &after), "C3: unauthorized reclaim must not change balances");

    let after = confirm_success(s.clone());
    kani::assert(after.phase == before.phase, "C3: unauthorized success must not change phase");

    let after = confirm_failure(s);
    kani::assert(after.phase == before.phase, "C3: unauthorized failure must not change phase");
}

/// C4: Release-all bypass
/// After failure every unlock returns the full amount and burns nothing
#[kani::proof]
fn c4_release_all_returns_everything() {
    let s = any_state_bounded().sanitize();
    assume(s.phase == Phase::ReleaseAll);
    assume(!s.investors.is_empty());

    let uid: usize = (any::<u8>() as usize) % s.investors.len();
    let position = s.investors[uid].position;
    assume(position.is_live());
    let now: u64 = any();

    let before = s.clone();
    let after = unlock(s, uid, now);

    kani::assert(
        after.investors[uid].asset_balance == before.investors[uid].asset_balance + position.locked_amount,
        "C4: release-all must return the whole locked amount",
    );
    kani::assert(
        after.investors[uid].reward_balance == before.investors[uid].reward_balance,
        "C4: release-all must not burn reward",
    );
    kani::assert(after.disbursed == before.disbursed, "C4: release-all must not disburse a penalty");
}

/// C5: No double unlock
#[kani::proof]
fn c5_second_unlock_is_noop() {
    let s = any_state_bounded().sanitize();
    assume(!s.investors.is_empty());

    let uid: usize = (any::<u8>() as usize) % s.investors.len();
    let now: u64 = any();

    let once = unlock(s, uid, now);
    let twice = unlock(once.clone(), uid, now);

    kani::assert(once == twice, "C5: unlocking an empty position must change nothing");
}

/// C6: Reclaim never touches owed funds and is idempotent
#[kani::proof]
fn c6_reclaim_preserves_locked_funds() {
    let s = any_state_bounded().sanitize();
    assume(conservation_ok(&s));

    let once = reclaim(s.clone());
    kani::assert(once.custody >= once.total_locked, "C6: reclaim must leave locked funds in custody");
    kani::assert(once.total_locked == s.total_locked, "C6: reclaim must not touch positions");
    kani::assert(positions_unchanged(&s, &once), "C6: reclaim must not touch positions");

    let twice = reclaim(once.clone());
    kani::assert(twice.reclaimed == once.reclaimed, "C6: a second reclaim moves nothing");
}
