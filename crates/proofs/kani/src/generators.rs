//! Generators for arbitrary state (for Kani)

#[cfg(kani)]
use arrayvec::ArrayVec;
#[cfg(kani)]
use kani::any;
#[cfg(kani)]
use lock_model::{state::*, transitions::*};

// Ultra-small bounds for very fast verification
#[cfg(kani)]
const MAX_VAL: u128 = 100;
#[cfg(kani)]
const MAX_TIME: u64 = 50;

#[cfg(kani)]
pub fn any_investor() -> Investor {
    let balance_raw: u8 = any();
    let allowance_raw: u8 = any();

    Investor {
        position: Position::EMPTY,
        asset_balance: (balance_raw as u128) % MAX_VAL,
        reward_balance: 0,
        reward_allowance: (allowance_raw as u128) % MAX_VAL,
    }
}

#[cfg(kani)]
pub fn any_phase() -> Phase {
    match any::<u8>() % 4 {
        0 => Phase::Uncontrolled,
        1 => Phase::AcceptingLocks,
        2 => Phase::AcceptingUnlocks,
        _ => Phase::ReleaseAll,
    }
}

/// Reachable state: two funded investors, each with at most one reward
/// issue and one lock, then an arbitrary outcome.
#[cfg(kani)]
pub fn any_state_bounded() -> State {
    let mut s = bind_controller(State::default());
    s.params.lock_period = ((any::<u8>() as u64) % 20).max(1);
    s.params.penalty_fraction = (any::<u8>() as u128 % 11) * (WHOLE_UNIT / 10);

    let mut investors: ArrayVec<Investor, MAX_INVESTORS> = ArrayVec::new();
    investors.push(any_investor());
    investors.push(any_investor());
    s.asset_supply = investors
        .iter()
        .fold(0u128, |acc, i| acc.saturating_add(i.asset_balance));
    s.investors = investors;

    for uid in 0..s.investors.len() {
        if any::<bool>() {
            let amount = (any::<u8>() as u128) % MAX_VAL;
            let reward = (any::<u8>() as u128) % MAX_VAL;
            let minted = (any::<u8>() as u128) % MAX_VAL;
            let now = (any::<u8>() as u64) % MAX_TIME;
            s = mint_reward(s, uid, minted);
            s = lock(s, uid, amount, reward, now);
        }
    }

    match any::<u8>() % 3 {
        0 => s,
        1 => confirm_success(s),
        _ => confirm_failure(s),
    }
}
