//! Ultra-minimal Kani proofs using concrete values

use lock_model::{helpers::*, state::*, transitions::*};

fn one_investor(balance: u128) -> State {
    let mut s = bind_controller(State::default());
    s.investors.push(Investor {
        asset_balance: balance,
        ..Investor::default()
    });
    s.asset_supply = balance;
    s
}

/// Concrete penalised unlock: 1.0 at 10% leaves 0.9 with the investor
#[kani::proof]
fn concrete_penalised_unlock() {
    let mut s = mint_reward(one_investor(WHOLE_UNIT), 0, 5);
    s = lock(s, 0, WHOLE_UNIT, 5, 10);
    s = confirm_success(s);
    s = approve_burn(s, 0, 5);
    s = unlock(s, 0, 11);

    assert_eq!(s.investors[0].asset_balance, WHOLE_UNIT / 10 * 9);
    assert_eq!(s.disbursed, WHOLE_UNIT / 10);
    assert_eq!(s.total_investors, 0);
    assert!(conservation_ok(&s));
}

/// Concrete unauthorized lock does nothing
#[kani::proof]
fn concrete_unauthorized_lock() {
    let mut s = one_investor(100);
    s.authorized_caller = false;
    let before = s.clone();
    let after = lock(s, 0, 50, 0, 1);
    assert!(balances_unchanged(&before, &after));
}

/// Concrete lock whose reward was never issued does nothing
#[kani::proof]
fn concrete_unbacked_lock_rejected() {
    let s = mint_reward(one_investor(1_000), 0, 499);
    let before = s.clone();
    let after = lock(s, 0, 1_000, 500, 1);
    assert!(balances_unchanged(&before, &after));
    assert!(rewards_backed(&after));
}
