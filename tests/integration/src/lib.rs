//! Lockvault integration tests
//!
//! Scenarios drive a locked account wired to the in-memory collaborators
//! from `lockvault_locker::testing` through whole lifecycles.

pub use lockvault_locker as locker;

use lockvault_locker::testing::{Fixture, SimAccount};
use lockvault_locker::{RewardLedger, Token, WHOLE_UNIT};
use solana_program::pubkey::Pubkey;

/// Install a test logger once per process; `RUST_LOG` controls verbosity
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// `n` whole units in ULPs
pub fn units(n: u128) -> u128 {
    n * WHOLE_UNIT
}

/// Account totals agree with the registry, custody covers them, every
/// reward due is held by its investor, and neither token created or lost units
pub fn assert_conserved(account: &SimAccount) {
    assert!(account.is_consistent(), "registry and totals disagree");
    assert_eq!(
        account.asset().supply(),
        account.asset().sum_of_balances(),
        "asset supply drifted"
    );
    assert_eq!(
        account.reward().total_supply(),
        account.reward().sum_of_balances(),
        "reward supply drifted"
    );
    for (investor, position) in account.registry().iter() {
        assert!(
            account.reward().balance_of(investor) >= position.reward_due,
            "reward due of {} is not backed",
            investor
        );
    }
}

/// Lock for every `(investor, amount, reward)` at the fixture clock
pub fn lock_all(fx: &mut Fixture, tickets: &[(Pubkey, u128, u128)]) {
    for (investor, amount, reward) in tickets {
        fx.lock(*investor, *amount, *reward);
    }
    log::debug!("locked {} tickets", tickets.len());
}

/// Asset the account holds beyond the locked total
pub fn surplus(account: &SimAccount) -> u128 {
    account
        .asset()
        .balance_of(&account.address())
        .saturating_sub(account.total_locked_amount())
}
